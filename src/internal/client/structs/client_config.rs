use std::time::Duration;

use tokio::time::Instant;

/// 默认分片大小：10MB
pub const DEFAULT_CHUNK_SIZE: u64 = 10 * 1024 * 1024;

/// 默认最多跟随的重定向次数
pub const DEFAULT_MAX_REDIRECTS: usize = 16;

/// 默认单次下载的超时时间
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// 无法获取 CPU 数量时的默认 worker 数
pub const FALLBACK_NUM_WORKERS: usize = 4;

/// 客户端配置。交给 [`FetchClient`](super::FetchClient) 后不再可变，所有 worker 只读共享。
///
/// `num_workers` 与 `chunk_size` 的 setter 会把 0 提升为 1，保证分片下载总能推进。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// 是否允许对支持 Range 的资源使用分片并发下载
    accepts_ranges: bool,
    /// 分片并发下载的 worker 数
    num_workers: usize,
    /// 每个分片的大小（字节）
    chunk_size: u64,
    /// 最多跟随的重定向次数
    max_redirects: usize,
    /// 单次调用的超时时间；为 0 表示不设截止时间
    timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let num_workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(FALLBACK_NUM_WORKERS);

        Self {
            accepts_ranges: true,
            num_workers,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn with_accepts_ranges(mut self, accepts_ranges: bool) -> Self {
        self.accepts_ranges = accepts_ranges;
        self
    }

    pub fn with_num_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers.max(1);
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn accepts_ranges(&self) -> bool {
        self.accepts_ranges
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    pub fn max_redirects(&self) -> usize {
        self.max_redirects
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 以当前时刻加 `timeout` 作为截止时间；`timeout` 为 0 时不设截止时间。
    pub fn deadline_from_now(&self) -> Option<Instant> {
        if self.timeout.is_zero() {
            None
        } else {
            Some(Instant::now() + self.timeout)
        }
    }
}
