//! 下载策略选择，以及下载到内存 / 文件的便捷入口。
//!
//! 顶层入口只计算一次截止时间，探测与后续下载共用它。

use std::path::Path;
use std::sync::Arc;

use tokio::time::Instant;
use tracing::debug;

use crate::internal::client::structs::{FetchClient, FetchError, ResourceMetadata};
use crate::internal::sink::structs::{FileSink, MemorySink};
use crate::internal::sink::traits::sink::Sink;
use crate::internal::transport::traits::transport::Transport;

impl<T: Transport + 'static> FetchClient<T> {
    /// 按探测结果选择下载方式：配置与服务器都允许 Range 且长度已知时分片下载，否则串行下载。
    pub async fn download<S: Sink + 'static>(
        &self,
        sink: Arc<S>,
        url: &str,
        metadata: ResourceMetadata,
    ) -> Result<(), FetchError> {
        self.download_until(sink, url, metadata, self.config.deadline_from_now())
            .await
    }

    pub async fn download_until<S: Sink + 'static>(
        &self,
        sink: Arc<S>,
        url: &str,
        metadata: ResourceMetadata,
        deadline: Option<Instant>,
    ) -> Result<(), FetchError> {
        if self.config.accepts_ranges() && metadata.accepts_ranges && metadata.is_length_known() {
            debug!(url, length = metadata.content_length, "使用分片并发下载");
            self.download_in_chunks_until(sink, url, metadata.content_length, deadline)
                .await
        } else {
            debug!(url, "使用串行下载");
            self.download_serially_until(sink.as_ref(), url, deadline)
                .await
        }
    }

    /// 下载到内存。复用 `dst` 的已分配空间（原内容会被清空），返回资源的全部字节。
    pub async fn download_to_bytes(&self, dst: Vec<u8>, url: &str) -> Result<Vec<u8>, FetchError> {
        self.download_to_bytes_until(dst, url, self.config.deadline_from_now())
            .await
    }

    pub async fn download_to_bytes_until(
        &self,
        mut dst: Vec<u8>,
        url: &str,
        deadline: Option<Instant>,
    ) -> Result<Vec<u8>, FetchError> {
        let metadata = self.probe_headers_until(url, deadline).await;

        dst.clear();
        // 长度来自服务器声明，不可信：预留量不超过一个分片，且分配失败时忽略
        let hint = metadata.content_length.min(self.config.chunk_size());
        let _ = dst.try_reserve(usize::try_from(hint).unwrap_or(0));

        let sink = Arc::new(MemorySink::from_vec(dst));
        self.download_until(Arc::clone(&sink), url, metadata, deadline)
            .await?;

        // worker 均已结束，正常情况下这里是唯一引用
        match Arc::try_unwrap(sink) {
            Ok(sink) => Ok(sink.into_inner()),
            Err(shared) => Ok(shared.to_vec().await),
        }
    }

    /// 下载到文件：创建（或覆盖）`path`，截断到探测出的长度后下载并刷新。
    pub async fn download_to_file(
        &self,
        path: impl AsRef<Path>,
        url: &str,
    ) -> Result<(), FetchError> {
        self.download_to_file_until(path, url, self.config.deadline_from_now())
            .await
    }

    pub async fn download_to_file_until(
        &self,
        path: impl AsRef<Path>,
        url: &str,
        deadline: Option<Instant>,
    ) -> Result<(), FetchError> {
        let metadata = self.probe_headers_until(url, deadline).await;

        let sink = Arc::new(FileSink::create(path, metadata.content_length).await?);
        self.download_until(Arc::clone(&sink), url, metadata, deadline)
            .await?;

        sink.flush()
            .await
            .map_err(|source| FetchError::SinkWriteFailed {
                offset: metadata.content_length,
                source,
            })
    }
}
