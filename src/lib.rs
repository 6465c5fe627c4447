//! HTTP 分片下载库：探测资源是否支持 Range，支持时按固定大小切片并发下载、直接写入最终位置，
//! 否则退回单次请求；所有请求自动跟随重定向，并受同一个截止时间约束。

/// 内部导出的模块
mod internal;

#[cfg(test)]
mod tests;

/// 下载客户端：重定向执行器、探测、串行 / 分片下载
pub mod client {
    use crate::internal;
    pub use internal::client::structs::client_config::{
        DEFAULT_CHUNK_SIZE, DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT, FALLBACK_NUM_WORKERS,
    };
    pub use internal::client::structs::*;
}

/// 传输层抽象与基于 reqwest 的默认实现
pub mod transport {
    use crate::internal;
    pub use internal::transport::structs::*;
    pub use internal::transport::traits::transport::Transport;
}

/// 下载目标：内存、文件以及偏移适配器
pub mod sink {
    use crate::internal;
    pub use internal::sink::structs::*;
    pub use internal::sink::traits::sink::{AppendWrite, Sink, WriteAt};
}

pub use client::{ClientConfig, FetchClient, FetchError, ResourceMetadata};
