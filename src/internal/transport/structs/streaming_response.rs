use std::fmt;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::{Stream, stream};

use crate::internal::transport::structs::{HttpResponse, TransportError};

/// 按块读取的响应体。
pub type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes, TransportError>> + Send>>;

/// 响应头已到达、响应体尚未读取的响应；`head.body` 始终为空。
pub struct StreamingResponse {
    pub head: HttpResponse,
    pub body: BodyStream,
}

impl StreamingResponse {
    pub fn new(mut head: HttpResponse, body: BodyStream) -> Self {
        head.body = Bytes::new();
        Self { head, body }
    }
}

/// 已完整读取的响应包装成单块流。
impl From<HttpResponse> for StreamingResponse {
    fn from(mut response: HttpResponse) -> Self {
        let body = std::mem::take(&mut response.body);
        let chunk = (!body.is_empty()).then_some(Ok(body));
        Self {
            head: response,
            body: Box::pin(stream::iter(chunk)),
        }
    }
}

impl fmt::Debug for StreamingResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamingResponse")
            .field("head", &self.head)
            .finish_non_exhaustive()
    }
}
