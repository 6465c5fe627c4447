//! 重定向执行器：发送请求，遇到重定向时按 `Location` 改写请求地址后重发，直到非重定向响应或次数用尽。

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::debug;

use crate::internal::client::structs::{FetchClient, FetchError};
use crate::internal::transport::structs::{
    HttpRequest, HttpResponse, StreamingResponse, TransportError,
};
use crate::internal::transport::traits::transport::Transport;

impl<T: Transport + 'static> FetchClient<T> {
    /// 发送请求并跟随重定向，截止时间为当前时刻加配置的 `timeout`。
    pub async fn do_request(&self, request: &mut HttpRequest) -> Result<HttpResponse, FetchError> {
        self.execute(request, self.config.deadline_from_now()).await
    }

    /// 发送请求并跟随重定向，覆盖配置中的超时时间。
    pub async fn do_timeout(
        &self,
        request: &mut HttpRequest,
        timeout: Duration,
    ) -> Result<HttpResponse, FetchError> {
        self.execute(request, Some(Instant::now() + timeout)).await
    }

    /// 发送请求并跟随重定向，所有跳转共用同一个绝对截止时间。
    pub async fn do_deadline(
        &self,
        request: &mut HttpRequest,
        deadline: Instant,
    ) -> Result<HttpResponse, FetchError> {
        self.execute(request, Some(deadline)).await
    }

    /// 执行器本体。最多尝试 `max_redirects + 1` 次；`deadline` 为 `None` 时不限时。
    ///
    /// 请求会被原地改写：返回后 `request.url` 即最终地址。传输错误直接返回，不做重试。
    pub async fn execute(
        &self,
        request: &mut HttpRequest,
        deadline: Option<Instant>,
    ) -> Result<HttpResponse, FetchError> {
        self.follow_redirects(request, deadline).await
    }

    /// 与 [`execute`](Self::execute) 相同，但最终响应的响应体按块读取。
    ///
    /// 中间的重定向响应体直接丢弃。
    pub async fn execute_streaming(
        &self,
        request: &mut HttpRequest,
        deadline: Option<Instant>,
    ) -> Result<StreamingResponse, FetchError> {
        self.follow_redirects(request, deadline).await
    }

    async fn follow_redirects<R: Exchange>(
        &self,
        request: &mut HttpRequest,
        deadline: Option<Instant>,
    ) -> Result<R, FetchError> {
        let max_redirects = self.config.max_redirects();

        for hop in 0..=max_redirects {
            let response = R::exchange(self.transport.as_ref(), request, deadline).await?;
            let head = response.head();

            if !head.is_redirect() {
                return Ok(response);
            }

            let location = head
                .location()
                .ok_or_else(|| FetchError::MissingLocationHeader {
                    url: request.url.to_string(),
                })?;

            // 相对地址按当前地址解析
            let next = request
                .url
                .join(location)
                .map_err(|source| FetchError::InvalidLocation {
                    location: location.to_string(),
                    source,
                })?;

            debug!(hop, status = %head.status, from = %request.url, to = %next, "跟随重定向");
            request.url = next;
        }

        Err(FetchError::TooManyRedirects { max_redirects })
    }
}

/// 一跳请求的响应形态：完整读取或按块读取。
#[async_trait]
trait Exchange: Sized + Send {
    async fn exchange<T: Transport>(
        transport: &T,
        request: &HttpRequest,
        deadline: Option<Instant>,
    ) -> Result<Self, TransportError>;

    /// 判断重定向所需的状态码与响应头。
    fn head(&self) -> &HttpResponse;
}

#[async_trait]
impl Exchange for HttpResponse {
    async fn exchange<T: Transport>(
        transport: &T,
        request: &HttpRequest,
        deadline: Option<Instant>,
    ) -> Result<Self, TransportError> {
        match deadline {
            Some(deadline) => transport.send_deadline(request, deadline).await,
            None => transport.send(request).await,
        }
    }

    fn head(&self) -> &HttpResponse {
        self
    }
}

#[async_trait]
impl Exchange for StreamingResponse {
    async fn exchange<T: Transport>(
        transport: &T,
        request: &HttpRequest,
        deadline: Option<Instant>,
    ) -> Result<Self, TransportError> {
        transport.send_streaming(request, deadline).await
    }

    fn head(&self) -> &HttpResponse {
        &self.head
    }
}
