//! 响应头探测：HEAD 请求获取资源长度与 Range 支持情况。

use tokio::time::Instant;
use tracing::debug;

use crate::internal::client::structs::{FetchClient, FetchError, ResourceMetadata};
use crate::internal::transport::structs::HttpRequest;
use crate::internal::transport::traits::transport::Transport;

use super::parse_url;

impl<T: Transport + 'static> FetchClient<T> {
    /// 探测资源长度与是否支持 Range。
    ///
    /// 探测只是优化手段：任何失败都返回 `ResourceMetadata::default()`（长度 0、不支持 Range），
    /// 后续自然走串行下载，不向调用方报错。
    pub async fn probe_headers(&self, url: &str) -> ResourceMetadata {
        self.probe_headers_until(url, self.config.deadline_from_now())
            .await
    }

    pub async fn probe_headers_until(
        &self,
        url: &str,
        deadline: Option<Instant>,
    ) -> ResourceMetadata {
        match self.try_probe(url, deadline).await {
            Ok(metadata) => {
                debug!(
                    url,
                    content_length = metadata.content_length,
                    accepts_ranges = metadata.accepts_ranges,
                    "探测响应头完成"
                );
                metadata
            }
            Err(e) => {
                debug!(url, error = %e, "探测响应头失败，按长度未知处理");
                ResourceMetadata::default()
            }
        }
    }

    async fn try_probe(
        &self,
        url: &str,
        deadline: Option<Instant>,
    ) -> Result<ResourceMetadata, FetchError> {
        let mut request = HttpRequest::head(parse_url(url)?);
        let response = self.execute(&mut request, deadline).await?;

        if !response.status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: response.status,
            });
        }

        // 缺失、无法解析或为负都视为 0
        let content_length = response
            .content_length()
            .and_then(|n| u64::try_from(n).ok())
            .unwrap_or(0);

        Ok(ResourceMetadata {
            content_length,
            accepts_ranges: response.accepts_byte_ranges(),
        })
    }
}
