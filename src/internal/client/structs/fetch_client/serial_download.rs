//! 串行下载：一次 GET，响应体边读边顺序写入目标。

use bytes::Bytes;
use futures_util::StreamExt;
use tokio::time::Instant;
use tracing::debug;

use crate::internal::client::structs::{FetchClient, FetchError};
use crate::internal::sink::traits::sink::AppendWrite;
use crate::internal::transport::structs::{BodyStream, HttpRequest, TransportError};
use crate::internal::transport::traits::transport::Transport;

use super::parse_url;

impl<T: Transport + 'static> FetchClient<T> {
    /// 串行下载 `url` 并顺序写入 `sink`；不做重试。
    pub async fn download_serially<S: AppendWrite + ?Sized>(
        &self,
        sink: &S,
        url: &str,
    ) -> Result<(), FetchError> {
        self.download_serially_until(sink, url, self.config.deadline_from_now())
            .await
    }

    pub async fn download_serially_until<S: AppendWrite + ?Sized>(
        &self,
        sink: &S,
        url: &str,
        deadline: Option<Instant>,
    ) -> Result<(), FetchError> {
        self.fetch_whole(sink, url, deadline)
            .await
            .map_err(|source| FetchError::Download {
                url: url.to_string(),
                source: Box::new(source),
            })
    }

    async fn fetch_whole<S: AppendWrite + ?Sized>(
        &self,
        sink: &S,
        url: &str,
        deadline: Option<Instant>,
    ) -> Result<(), FetchError> {
        let mut request = HttpRequest::get(parse_url(url)?);
        let response = self.execute_streaming(&mut request, deadline).await?;

        if !response.head.status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: response.head.status,
            });
        }

        let mut body = response.body;
        let mut written = 0u64;
        while let Some(chunk) = next_chunk(&mut body, deadline).await? {
            sink.append(&chunk)
                .await
                .map_err(|source| FetchError::SinkWriteFailed {
                    offset: written,
                    source,
                })?;
            written += chunk.len() as u64;
        }

        debug!(url, bytes = written, "串行下载完成");
        Ok(())
    }
}

/// 读取下一块响应体，读取过程同样受截止时间约束。
async fn next_chunk(
    body: &mut BodyStream,
    deadline: Option<Instant>,
) -> Result<Option<Bytes>, FetchError> {
    let next = match deadline {
        Some(deadline) => tokio::time::timeout_at(deadline, body.next())
            .await
            .map_err(|_| TransportError::Timeout)?,
        None => body.next().await,
    };
    Ok(next.transpose()?)
}
