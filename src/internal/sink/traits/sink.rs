//! 写入目标 trait：顺序追加与随机偏移写入两种接口。

use std::io;

use async_trait::async_trait;

/// 顺序追加写入。串行下载时使用；同一目标上的多个 `append` 不应并发调用。
#[async_trait]
pub trait AppendWrite: Send + Sync {
    async fn append(&self, data: &[u8]) -> io::Result<()>;
}

/// 随机偏移写入。分片下载时被所有 worker 并发调用，实现方需保证不重叠偏移的并发写入互不破坏。
#[async_trait]
pub trait WriteAt: Send + Sync {
    async fn write_at(&self, offset: u64, data: &[u8]) -> io::Result<()>;
}

/// 同时支持两种写入方式的下载目标。
pub trait Sink: AppendWrite + WriteAt {}

impl<T: AppendWrite + WriteAt + ?Sized> Sink for T {}
