//! 写入目标领域模块：下载得到的字节最终落到实现了 [`traits::sink::Sink`] 的目标上（内存或文件）。

pub mod structs;
pub mod traits;
