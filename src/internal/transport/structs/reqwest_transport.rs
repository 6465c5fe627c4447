//! 基于 reqwest 的默认传输实现。

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use reqwest::{Client, Response};
use reqwest::redirect::Policy;
use tokio::time::Instant;

use crate::internal::transport::structs::{
    HttpRequest, HttpResponse, StreamingResponse, TransportError,
};
use crate::internal::transport::traits::transport::Transport;

/// reqwest 传输。内部 `Client` 是 Arc，克隆代价很低。
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// 创建关闭了自动重定向的 reqwest 客户端，重定向交给下载客户端按 `max_redirects` 处理。
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder().redirect(Policy::none()).build()?;
        Ok(Self { client })
    }

    /// 包装已有的 reqwest 客户端。
    ///
    /// 注意：该客户端应使用 `Policy::none()`，否则重定向会在 reqwest 内部被吞掉，`max_redirects` 不再生效。
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// 发出请求并等到响应头；`deadline` 同时约束之后的响应体读取。
    async fn start(
        &self,
        request: &HttpRequest,
        deadline: Option<Instant>,
    ) -> Result<Response, TransportError> {
        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone());

        if let Some(deadline) = deadline {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(TransportError::Timeout);
            }
            builder = builder.timeout(remaining);
        }

        Ok(builder.send().await?)
    }

    async fn execute(
        &self,
        request: &HttpRequest,
        deadline: Option<Instant>,
    ) -> Result<HttpResponse, TransportError> {
        let resp = self.start(request, deadline).await?;
        let status = resp.status();
        let headers = resp.headers().clone();

        let mut body = BytesMut::new();
        let mut stream = resp.bytes_stream();
        while let Some(chunk_result) = stream.next().await {
            body.extend_from_slice(&chunk_result?);
        }

        Ok(HttpResponse {
            status,
            headers,
            body: body.freeze(),
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.execute(request, None).await
    }

    async fn send_deadline(
        &self,
        request: &HttpRequest,
        deadline: Instant,
    ) -> Result<HttpResponse, TransportError> {
        self.execute(request, Some(deadline)).await
    }

    async fn send_streaming(
        &self,
        request: &HttpRequest,
        deadline: Option<Instant>,
    ) -> Result<StreamingResponse, TransportError> {
        let resp = self.start(request, deadline).await?;
        let head = HttpResponse {
            status: resp.status(),
            headers: resp.headers().clone(),
            body: Bytes::new(),
        };
        let body = resp
            .bytes_stream()
            .map(|chunk| chunk.map_err(TransportError::from));
        Ok(StreamingResponse::new(head, Box::pin(body)))
    }
}
