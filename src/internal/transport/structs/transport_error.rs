//! 传输层错误类型。

use thiserror::Error;

/// 传输层返回的错误；下载器对其不做重试，原样向上传递。
#[derive(Debug, Error)]
pub enum TransportError {
    /// 截止时间已到，请求未完成。
    #[error("请求超时")]
    Timeout,

    #[error("HTTP 请求失败: {0}")]
    Request(reqwest::Error),

    /// 自定义传输实现的连接类错误。
    #[error("连接失败: {0}")]
    Connection(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Request(e)
        }
    }
}
