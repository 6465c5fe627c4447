//! 写入目标：内存补零、并发随机写、偏移适配器、文件截断。

use std::sync::Arc;

use crate::sink::{AppendWrite, FileSink, MemorySink, OffsetWriter, WriteAt};

#[tokio::test]
async fn memory_write_at_zero_fills_gap() {
    let sink = MemorySink::new();
    sink.write_at(4, b"xy").await.unwrap();
    assert_eq!(sink.to_vec().await, vec![0, 0, 0, 0, b'x', b'y']);

    // 覆盖已有内容但不缩短
    sink.write_at(1, b"a").await.unwrap();
    assert_eq!(sink.to_vec().await, vec![0, b'a', 0, 0, b'x', b'y']);
    assert_eq!(sink.len().await, 6);
}

#[tokio::test]
async fn memory_append_then_write_at() {
    let sink = MemorySink::new();
    sink.append(b"hello").await.unwrap();
    sink.append(b" world").await.unwrap();
    sink.write_at(0, b"J").await.unwrap();
    assert_eq!(sink.into_inner(), b"Jello world");
}

#[tokio::test]
async fn memory_concurrent_disjoint_writes() {
    let sink = Arc::new(MemorySink::new());
    let mut tasks = tokio::task::JoinSet::new();

    // 倒序写入，后面的分片先扩容
    for i in (0..16u8).rev() {
        let sink = Arc::clone(&sink);
        tasks.spawn(async move { sink.write_at(i as u64 * 100, &[i; 100]).await });
    }
    while let Some(joined) = tasks.join_next().await {
        joined.unwrap().unwrap();
    }

    let data = sink.to_vec().await;
    assert_eq!(data.len(), 1600);
    for (i, chunk) in data.chunks(100).enumerate() {
        assert!(chunk.iter().all(|b| *b as usize == i));
    }
}

#[tokio::test]
async fn offset_writer_advances_on_each_append() {
    let sink = MemorySink::new();
    let writer = OffsetWriter::new(&sink, 3);
    writer.append(b"ab").await.unwrap();
    writer.append(b"cd").await.unwrap();

    assert_eq!(writer.offset(), 7);
    assert_eq!(sink.to_vec().await, vec![0, 0, 0, b'a', b'b', b'c', b'd']);
}

#[tokio::test]
async fn file_sink_truncates_and_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sink.bin");
    tokio::fs::write(&path, vec![9u8; 100]).await.unwrap();

    let sink = FileSink::create(&path, 10).await.unwrap();
    sink.write_at(6, b"6789").await.unwrap();
    sink.append(b"012").await.unwrap();
    sink.append(b"345").await.unwrap();
    sink.flush().await.unwrap();
    drop(sink);

    assert_eq!(tokio::fs::read(&path).await.unwrap(), b"0123456789");
}

#[tokio::test]
async fn file_sink_concurrent_disjoint_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("concurrent.bin");
    let sink = Arc::new(FileSink::create(&path, 800).await.unwrap());

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..8u8 {
        let sink = Arc::clone(&sink);
        tasks.spawn(async move { sink.write_at(i as u64 * 100, &[i; 100]).await });
    }
    while let Some(joined) = tasks.join_next().await {
        joined.unwrap().unwrap();
    }
    sink.flush().await.unwrap();

    let data = tokio::fs::read(&path).await.unwrap();
    assert_eq!(data.len(), 800);
    for (i, chunk) in data.chunks(100).enumerate() {
        assert!(chunk.iter().all(|b| *b as usize == i));
    }
}
