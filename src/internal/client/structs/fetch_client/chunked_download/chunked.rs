//! 分片下载入口：有界队列 + 固定 worker 池 + 在调用方任务上运行的区间分发循环。

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::internal::client::structs::{ByteRange, ByteRanges, FetchClient, FetchError};
use crate::internal::sink::traits::sink::WriteAt;
use crate::internal::transport::traits::transport::Transport;

use super::super::parse_url;
use super::feed_ranges::{FeedOutcome, FeedRangesParams, feed_ranges};
use super::spawn_workers::{SpawnWorkersParams, join_workers, spawn_workers};

impl<T: Transport + 'static> FetchClient<T> {
    /// 把长度为 `length` 的资源按 `chunk_size` 切成区间，由 `num_workers` 个 worker 并发下载，
    /// 各自写入 `sink` 的对应偏移。调用方需已确认服务器支持 Range。
    ///
    /// 失败时只返回最先出现的错误；已写入的部分保留在 `sink` 中，不做回滚。
    pub async fn download_in_chunks<S: WriteAt + 'static>(
        &self,
        sink: Arc<S>,
        url: &str,
        length: u64,
    ) -> Result<(), FetchError> {
        self.download_in_chunks_until(sink, url, length, self.config.deadline_from_now())
            .await
    }

    pub async fn download_in_chunks_until<S: WriteAt + 'static>(
        &self,
        sink: Arc<S>,
        url: &str,
        length: u64,
        deadline: Option<Instant>,
    ) -> Result<(), FetchError> {
        self.run_chunked_download(sink, url, length, deadline)
            .await
            .map_err(|source| FetchError::Download {
                url: url.to_string(),
                source: Box::new(source),
            })
    }

    async fn run_chunked_download<S: WriteAt + 'static>(
        &self,
        sink: Arc<S>,
        url: &str,
        length: u64,
        deadline: Option<Instant>,
    ) -> Result<(), FetchError> {
        if length == 0 {
            return Err(FetchError::UnknownContentLength);
        }
        let url = parse_url(url)?;

        let num_workers = self.config.num_workers();
        let ranges = ByteRanges::new(length, self.config.chunk_size());
        let total = ranges.len();
        debug!(%url, length, total, num_workers, "开始分片下载");

        // 队列容量与 worker 数一致：分发与下载交替进行，不会无限堆积
        let (queue, receiver) = mpsc::channel::<ByteRange>(num_workers);

        let workers = spawn_workers(SpawnWorkersParams {
            client: self.clone(),
            sink,
            url,
            deadline,
            queue: Arc::new(Mutex::new(receiver)),
            num_workers,
        });

        // 分发结束时 queue 被消耗并关闭，worker 取完剩余区间后退出
        let outcome = feed_ranges(FeedRangesParams {
            queue,
            ranges,
            deadline,
        })
        .await;

        let joined = join_workers(workers).await;

        match outcome {
            FeedOutcome::Completed { .. } => joined,
            FeedOutcome::WorkersGone { dispatched } => {
                // 所有 worker 都已退出，说明至少一个 worker 失败了
                joined?;
                Err(FetchError::DeadlineExceeded { dispatched, total })
            }
            FeedOutcome::DeadlineReached { dispatched } => {
                joined?;
                warn!(dispatched, total, "截止时间已到，区间未全部下载");
                Err(FetchError::DeadlineExceeded { dispatched, total })
            }
        }
    }
}
