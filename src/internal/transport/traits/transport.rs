//! 传输能力 trait：一次请求 / 响应交换，提供无界、相对超时、绝对截止时间三种调用形态。
//!
//! 实现方只需提供 [`Transport::send`]；另外两种形态默认基于 `tokio::time::timeout_at` 实现，
//! 有原生超时能力的实现（如 [`ReqwestTransport`](crate::transport::ReqwestTransport)）可自行覆盖。
//! 能边收边交付响应体的实现还可覆盖 [`Transport::send_streaming`]，串行下载据此按块写入目标。
//! 实现方**不应**自动跟随重定向，重定向由下载客户端统一处理。

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::internal::transport::structs::{
    HttpRequest, HttpResponse, StreamingResponse, TransportError,
};

#[async_trait]
pub trait Transport: Send + Sync {
    /// 发送请求，不设时间上限。
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;

    /// 发送请求，最多等待 `timeout`。
    async fn send_timeout(
        &self,
        request: &HttpRequest,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        self.send_deadline(request, Instant::now() + timeout).await
    }

    /// 发送请求，必须在 `deadline` 之前完成，否则返回 [`TransportError::Timeout`]。
    async fn send_deadline(
        &self,
        request: &HttpRequest,
        deadline: Instant,
    ) -> Result<HttpResponse, TransportError> {
        match tokio::time::timeout_at(deadline, self.send(request)).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout),
        }
    }

    /// 发送请求，响应头到达即返回，响应体按块读取；`deadline` 为 `None` 时不限时。
    ///
    /// 默认实现先完整读取响应体，再包装成单块流。
    async fn send_streaming(
        &self,
        request: &HttpRequest,
        deadline: Option<Instant>,
    ) -> Result<StreamingResponse, TransportError> {
        let response = match deadline {
            Some(deadline) => self.send_deadline(request, deadline).await?,
            None => self.send(request).await?,
        };
        Ok(StreamingResponse::from(response))
    }
}
