use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::{
    ACCEPT_RANGES, CONTENT_LENGTH, HeaderMap, HeaderName, HeaderValue, LOCATION,
};

/// 一次请求得到的完整响应，响应体已全部读入内存。
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// 追加一个响应头；值不是合法头部时忽略。
    pub fn with_header(mut self, name: HeaderName, value: &str) -> Self {
        if let Ok(v) = HeaderValue::from_str(value) {
            self.headers.insert(name, v);
        }
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// 是否为需要跟随的重定向状态码（301 / 302 / 303 / 307 / 308）。
    pub fn is_redirect(&self) -> bool {
        matches!(
            self.status,
            StatusCode::MOVED_PERMANENTLY
                | StatusCode::FOUND
                | StatusCode::SEE_OTHER
                | StatusCode::TEMPORARY_REDIRECT
                | StatusCode::PERMANENT_REDIRECT
        )
    }

    pub fn header_str(&self, name: &HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// `Location` 头；缺失或为空时返回 `None`。
    pub fn location(&self) -> Option<&str> {
        self.header_str(&LOCATION).filter(|l| !l.is_empty())
    }

    /// `Content-Length` 头的原始数值，可能为负；缺失或无法解析时返回 `None`。
    pub fn content_length(&self) -> Option<i64> {
        self.header_str(&CONTENT_LENGTH)
            .and_then(|v| v.trim().parse::<i64>().ok())
    }

    /// `Accept-Ranges` 是否恰好为 `bytes`。
    pub fn accepts_byte_ranges(&self) -> bool {
        self.header_str(&ACCEPT_RANGES) == Some("bytes")
    }
}
