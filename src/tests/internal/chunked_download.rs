//! 分片并发下载：与串行结果逐字节一致、区间覆盖、错误传播、截止时间。

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;

use crate::client::{ByteRange, ClientConfig, FetchError};
use crate::sink::{FileSink, MemorySink};
use crate::tests::{MockRoute, MockTransport, mock_client, mock_url, random_payload, small_config};

#[tokio::test]
async fn chunked_matches_serial_byte_for_byte() {
    let data = random_payload(100_003);
    let transport = MockTransport::new().route(&mock_url("/file"), MockRoute::ranged(&data));
    let client = mock_client(transport, small_config());

    let chunked = Arc::new(MemorySink::new());
    client
        .download_in_chunks(Arc::clone(&chunked), &mock_url("/file"), data.len() as u64)
        .await
        .unwrap();

    let serial = MemorySink::new();
    client
        .download_serially(&serial, &mock_url("/file"))
        .await
        .unwrap();

    assert_eq!(chunked.to_vec().await, data);
    assert_eq!(serial.to_vec().await, data);
}

#[tokio::test]
async fn requested_ranges_cover_resource() {
    let data = random_payload(100_003);
    let transport = MockTransport::new().route(&mock_url("/file"), MockRoute::ranged(&data));
    let client = mock_client(transport, small_config());

    client
        .download_in_chunks(Arc::new(MemorySink::new()), &mock_url("/file"), data.len() as u64)
        .await
        .unwrap();

    // 完成顺序不定，排序后应首尾相接
    let mut ranges = client.transport().requested_ranges();
    ranges.sort_by_key(|r| r.start);
    assert_eq!(ranges.len(), 25);

    let mut next = 0;
    for range in &ranges {
        assert_eq!(range.start, next);
        assert!(range.byte_count() <= 4096);
        next = range.end + 1;
    }
    assert_eq!(next, data.len() as u64);
}

#[tokio::test]
async fn small_resource_is_one_range() {
    let data = random_payload(1_048_576);
    let transport = MockTransport::new().route(&mock_url("/file"), MockRoute::ranged(&data));
    let config = ClientConfig::default().with_num_workers(4);
    let client = mock_client(transport, config);

    let sink = Arc::new(MemorySink::new());
    client
        .download_in_chunks(Arc::clone(&sink), &mock_url("/file"), 1_048_576)
        .await
        .unwrap();

    assert_eq!(
        client.transport().requested_ranges(),
        vec![ByteRange::new(0, 1_048_575)]
    );
    assert_eq!(sink.to_vec().await, data);
}

#[tokio::test]
async fn zero_length_is_rejected() {
    let client = mock_client(MockTransport::new(), small_config());
    let err = client
        .download_in_chunks(Arc::new(MemorySink::new()), &mock_url("/file"), 0)
        .await
        .unwrap_err();

    assert!(matches!(err.root(), FetchError::UnknownContentLength));
    assert_eq!(client.transport().request_count(), 0);
}

#[tokio::test]
async fn short_chunk_is_rejected() {
    let data = random_payload(10_000);
    let transport = MockTransport::new().route(
        &mock_url("/file"),
        MockRoute::ShortRanges {
            data: Bytes::from(data.clone()),
        },
    );
    let client = mock_client(transport, small_config());

    let err = client
        .download_in_chunks(Arc::new(MemorySink::new()), &mock_url("/file"), data.len() as u64)
        .await
        .unwrap_err();

    assert!(matches!(
        err.root(),
        FetchError::ChunkLengthMismatch { expected, actual } if *actual + 1 == *expected
    ));
}

#[tokio::test]
async fn failing_transport_reports_chunk_context() {
    let transport = MockTransport::new().route(&mock_url("/down"), MockRoute::Fail);
    let client = mock_client(transport, small_config());

    let sink = Arc::new(MemorySink::new());
    let err = client
        .download_in_chunks(Arc::clone(&sink), &mock_url("/down"), 100_000)
        .await
        .unwrap_err();

    let FetchError::Download { url, source } = &err else {
        panic!("预期 Download 包装，得到 {err:?}");
    };
    assert_eq!(url, &mock_url("/down"));
    assert!(
        matches!(source.as_ref(), FetchError::ChunkFetchFailed { worker, .. } if *worker < 4),
        "实际: {source:?}"
    );
    assert!(matches!(err.root(), FetchError::Transport(_)));
    assert!(sink.is_empty().await);
}

#[tokio::test]
async fn error_status_on_range_fails() {
    let client = mock_client(MockTransport::new(), small_config());
    let err = client
        .download_in_chunks(Arc::new(MemorySink::new()), &mock_url("/missing"), 10_000)
        .await
        .unwrap_err();

    assert!(matches!(
        err.root(),
        FetchError::UnexpectedStatus {
            status: reqwest::StatusCode::NOT_FOUND
        }
    ));
}

#[tokio::test]
async fn more_workers_than_ranges() {
    let data = random_payload(5000);
    let transport = MockTransport::new().route(&mock_url("/file"), MockRoute::ranged(&data));
    let config = small_config().with_num_workers(32);
    let client = mock_client(transport, config);

    let sink = Arc::new(MemorySink::new());
    client
        .download_in_chunks(Arc::clone(&sink), &mock_url("/file"), data.len() as u64)
        .await
        .unwrap();

    assert_eq!(client.transport().request_count(), 2);
    assert_eq!(sink.to_vec().await, data);
}

#[tokio::test(start_paused = true)]
async fn deadline_stops_feeding_promptly() {
    let data = random_payload(1000);
    let transport = MockTransport::new()
        .route(&mock_url("/slow"), MockRoute::ranged(&data))
        .with_delay(Duration::from_millis(100));
    let config = ClientConfig::default()
        .with_num_workers(1)
        .with_chunk_size(10);
    let client = mock_client(transport, config);

    let started = tokio::time::Instant::now();
    let deadline = started + Duration::from_millis(250);
    let err = client
        .download_in_chunks_until(
            Arc::new(MemorySink::new()),
            &mock_url("/slow"),
            data.len() as u64,
            Some(deadline),
        )
        .await
        .unwrap_err();

    assert!(err.is_timeout(), "应为超时，实际: {err}");
    assert!(started.elapsed() < Duration::from_secs(1));
    assert!(client.transport().request_count() < 100);
}

#[tokio::test]
async fn writes_into_file_sink() {
    let data = random_payload(20_000);
    let transport = MockTransport::new().route(&mock_url("/file"), MockRoute::ranged(&data));
    let client = mock_client(transport, small_config());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chunked.bin");
    let sink = Arc::new(FileSink::create(&path, data.len() as u64).await.unwrap());

    client
        .download_in_chunks(Arc::clone(&sink), &mock_url("/file"), data.len() as u64)
        .await
        .unwrap();
    sink.flush().await.unwrap();

    assert_eq!(tokio::fs::read(&path).await.unwrap(), data);
}
