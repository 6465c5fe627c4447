use std::io;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::internal::sink::traits::sink::{AppendWrite, WriteAt};

/// 把随机写入目标适配成顺序写入：从固定偏移开始，每次追加接在上一次之后。
///
/// 分片 worker 用它把单个分片的响应体写到目标的正确位置。
#[derive(Debug)]
pub struct OffsetWriter<'a, W: WriteAt + ?Sized> {
    inner: &'a W,
    offset: AtomicU64,
}

impl<'a, W: WriteAt + ?Sized> OffsetWriter<'a, W> {
    pub fn new(inner: &'a W, offset: u64) -> Self {
        Self {
            inner,
            offset: AtomicU64::new(offset),
        }
    }

    /// 下一次追加的写入位置。
    pub fn offset(&self) -> u64 {
        self.offset.load(Ordering::Acquire)
    }
}

#[async_trait]
impl<'a, W: WriteAt + ?Sized> AppendWrite for OffsetWriter<'a, W> {
    async fn append(&self, data: &[u8]) -> io::Result<()> {
        let start = self.offset.fetch_add(data.len() as u64, Ordering::AcqRel);
        self.inner.write_at(start, data).await
    }
}
