//! 下载客户端
//!
//! 对任意 [`Transport`] 的一层包装，提供带重定向跟随的请求执行器，以及在其之上的下载能力。
//!
//! ## 下载策略
//!
//! - 先发 HEAD 探测 `Content-Length` 与 `Accept-Ranges`（探测失败不报错，视为长度未知）
//! - 长度已知且双方都允许 Range 时，走分片并发下载：固定数量的 worker 从有界队列中领取区间，
//!   各自请求并写到目标的对应偏移
//! - 否则走串行下载：一次 GET，整个响应体顺序写入目标
//!
//! ## 截止时间
//!
//! 每次顶层调用按配置的 `timeout` 计算一个绝对截止时间，探测、每一跳重定向、每个分片请求以及
//! 区间分发循环都受它约束。需要自行控制截止时间时使用各方法的 `_until` 版本。
//!
//! ## 子模块
//!
//! - `redirect`：重定向执行器与 `do_*` 系列入口
//! - `probe`：响应头探测
//! - `serial_download`：串行下载
//! - `chunked_download`：分片并发下载
//! - `download`：策略选择以及下载到内存 / 文件的便捷入口

mod chunked_download;
mod download;
mod probe;
mod redirect;
mod serial_download;

use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::internal::client::structs::{ClientConfig, FetchError};
use crate::internal::transport::structs::{ReqwestTransport, TransportError};
use crate::internal::transport::traits::transport::Transport;

/// 下载客户端。内部全部是 Arc，克隆后可在多个任务间共享。
pub struct FetchClient<T: Transport> {
    transport: Arc<T>,
    config: Arc<ClientConfig>,
}

impl<T: Transport> Clone for FetchClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            config: Arc::clone(&self.config),
        }
    }
}

/// 传输实现不一定实现 Debug，这里只输出配置
impl<T: Transport> fmt::Debug for FetchClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<T: Transport + 'static> FetchClient<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self::from_arc(Arc::new(transport), config)
    }

    /// 与其他组件共享同一个传输实例。
    pub fn from_arc(transport: Arc<T>, config: ClientConfig) -> Self {
        Self {
            transport,
            config: Arc::new(config),
        }
    }

    /// 用默认配置包装已有的传输实现。
    pub fn wrap(transport: T) -> Self {
        Self::new(transport, ClientConfig::default())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl FetchClient<ReqwestTransport> {
    /// 基于 reqwest 与默认配置创建客户端；进程内需要共享时创建一次后传递使用。
    pub fn with_defaults() -> Result<Self, TransportError> {
        Ok(Self::wrap(ReqwestTransport::new()?))
    }
}

pub(crate) fn parse_url(url: &str) -> Result<Url, FetchError> {
    Url::parse(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })
}
