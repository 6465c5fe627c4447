//! 下载相关错误类型。

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

use crate::internal::client::structs::byte_range::ByteRange;
use crate::internal::transport::structs::TransportError;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("传输失败: {0}")]
    Transport(#[from] TransportError),

    #[error("无效的 URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    /// 收到重定向响应却没有 `Location` 头。
    #[error("重定向响应缺少 Location 头: {url}")]
    MissingLocationHeader { url: String },

    #[error("无效的重定向地址 {location}: {source}")]
    InvalidLocation {
        location: String,
        source: url::ParseError,
    },

    #[error("重定向次数过多（上限 {max_redirects} 次）")]
    TooManyRedirects { max_redirects: usize },

    #[error("分片下载需要已知的资源长度")]
    UnknownContentLength,

    #[error("服务器返回了非预期的状态码: {status}")]
    UnexpectedStatus { status: StatusCode },

    /// 服务器返回的分片长度与请求的区间长度不一致。
    #[error("分片长度不符：期望 {expected} 字节，实际 {actual} 字节")]
    ChunkLengthMismatch { expected: u64, actual: u64 },

    #[error("worker {worker} 下载区间 {range} 失败: {source}")]
    ChunkFetchFailed {
        worker: usize,
        range: ByteRange,
        source: Box<FetchError>,
    },

    #[error("在偏移 {offset} 处写入失败: {source}")]
    SinkWriteFailed {
        offset: u64,
        source: std::io::Error,
    },

    #[error("创建文件 {} 失败: {source}", .path.display())]
    FileCreateFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("截断文件 {} 到 {len} 字节失败: {source}", .path.display())]
    FileTruncateFailed {
        path: PathBuf,
        len: u64,
        source: std::io::Error,
    },

    /// 截止时间已到，区间未能全部分发给 worker。
    #[error("截止时间已到，仅分发了 {dispatched}/{total} 个区间")]
    DeadlineExceeded { dispatched: usize, total: usize },

    /// 带上 URL 的外层错误。
    #[error("下载 {url} 失败: {source}")]
    Download {
        url: String,
        source: Box<FetchError>,
    },

    #[error("分片任务失败: {0}")]
    WorkerJoin(#[from] tokio::task::JoinError),
}

impl FetchError {
    /// 剥掉 URL / worker 等上下文包装后的底层错误。
    pub fn root(&self) -> &FetchError {
        match self {
            FetchError::Download { source, .. } | FetchError::ChunkFetchFailed { source, .. } => {
                source.root()
            }
            other => other,
        }
    }

    /// 底层是否为截止时间到期（传输超时或区间分发中止）。
    pub fn is_timeout(&self) -> bool {
        matches!(
            self.root(),
            FetchError::Transport(TransportError::Timeout) | FetchError::DeadlineExceeded { .. }
        )
    }
}
