use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderValue, RANGE};
use url::Url;

/// 一次请求的描述。跟随重定向时由执行器原地改写 `url`，调用方可据此得知最终地址。
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
}

impl HttpRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
        }
    }

    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn head(url: Url) -> Self {
        Self::new(Method::HEAD, url)
    }

    /// 设置 Range 请求头：`bytes=start-end`，两端均为闭区间。
    pub fn set_byte_range(&mut self, start: u64, end: u64) {
        let value = format!("bytes={}-{}", start, end);
        if let Ok(v) = HeaderValue::from_str(&value) {
            self.headers.insert(RANGE, v);
        }
    }

    /// 当前的 Range 请求头（未设置时为 `None`）。
    pub fn byte_range(&self) -> Option<&str> {
        self.headers.get(RANGE).and_then(|v| v.to_str().ok())
    }
}
