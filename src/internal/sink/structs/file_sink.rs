use std::io;
use std::path::Path;

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};
use tokio::sync::Mutex;

use crate::internal::client::structs::FetchError;
use crate::internal::sink::traits::sink::{AppendWrite, WriteAt};

/// 文件写入目标。
///
/// 分片下载前文件已被截断到资源总长度，随机写入只需定位后写入，不必扩展文件。
/// 文件句柄由互斥锁保护：定位与写入必须作为一个整体完成，否则并发 worker 会写错位置。
#[derive(Debug)]
pub struct FileSink {
    state: Mutex<FileState>,
}

#[derive(Debug)]
struct FileState {
    file: File,
    /// 顺序追加的下一个写入位置
    cursor: u64,
}

impl FileSink {
    pub fn new(file: File) -> Self {
        Self {
            state: Mutex::new(FileState { file, cursor: 0 }),
        }
    }

    /// 创建（或覆盖）文件并截断到 `len` 字节。
    pub async fn create(path: impl AsRef<Path>, len: u64) -> Result<Self, FetchError> {
        let path = path.as_ref();
        let file = File::create(path)
            .await
            .map_err(|source| FetchError::FileCreateFailed {
                path: path.to_path_buf(),
                source,
            })?;
        file.set_len(len)
            .await
            .map_err(|source| FetchError::FileTruncateFailed {
                path: path.to_path_buf(),
                len,
                source,
            })?;
        Ok(Self::new(file))
    }

    /// 刷新文件缓冲区。
    pub async fn flush(&self) -> io::Result<()> {
        self.state.lock().await.file.flush().await
    }

    pub fn into_file(self) -> File {
        self.state.into_inner().file
    }
}

#[async_trait]
impl AppendWrite for FileSink {
    async fn append(&self, data: &[u8]) -> io::Result<()> {
        let mut state = self.state.lock().await;
        let cursor = state.cursor;
        state.file.seek(io::SeekFrom::Start(cursor)).await?;
        state.file.write_all(data).await?;
        state.cursor = cursor + data.len() as u64;
        Ok(())
    }
}

#[async_trait]
impl WriteAt for FileSink {
    async fn write_at(&self, offset: u64, data: &[u8]) -> io::Result<()> {
        let mut state = self.state.lock().await;
        state.file.seek(io::SeekFrom::Start(offset)).await?;
        state.file.write_all(data).await
    }
}
