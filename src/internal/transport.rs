//! 传输层领域模块：对底层 HTTP 客户端的抽象，下载器只通过 [`traits::transport::Transport`] 发起请求。
//!
//! 对外导出以 [`crate::transport`] 为准，此处仅做模块划分。

pub mod structs;
pub mod traits;
