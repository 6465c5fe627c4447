use std::io;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::internal::sink::traits::sink::{AppendWrite, WriteAt};

/// 内存写入目标：可增长的字节缓冲。
///
/// 随机写入时缓冲会先扩展到 `offset + data.len()`，中间空洞以 0 填充。
#[derive(Debug, Default)]
pub struct MemorySink {
    buf: Mutex<Vec<u8>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 复用已有缓冲；原有内容保留，顺序写入会追加在其后。
    pub fn from_vec(buf: Vec<u8>) -> Self {
        Self {
            buf: Mutex::new(buf),
        }
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf.into_inner()
    }

    pub async fn len(&self) -> usize {
        self.buf.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.buf.lock().await.is_empty()
    }

    /// 当前内容的拷贝。
    pub async fn to_vec(&self) -> Vec<u8> {
        self.buf.lock().await.clone()
    }
}

#[async_trait]
impl AppendWrite for MemorySink {
    async fn append(&self, data: &[u8]) -> io::Result<()> {
        self.buf.lock().await.extend_from_slice(data);
        Ok(())
    }
}

#[async_trait]
impl WriteAt for MemorySink {
    async fn write_at(&self, offset: u64, data: &[u8]) -> io::Result<()> {
        let start = usize::try_from(offset)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "偏移超出内存寻址范围"))?;
        let end = start
            .checked_add(data.len())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "写入区间溢出"))?;

        let mut buf = self.buf.lock().await;
        if buf.len() < end {
            buf.resize(end, 0);
        }
        buf[start..end].copy_from_slice(data);
        Ok(())
    }
}
