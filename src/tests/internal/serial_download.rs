use std::io;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;

use crate::client::{ClientConfig, FetchError};
use crate::sink::{AppendWrite, MemorySink};
use crate::tests::{MockRoute, MockTransport, mock_client, mock_url, random_payload};
use crate::transport::{HttpResponse, TransportError};

/// 记录每次追加内容的写入目标。
#[derive(Default)]
struct RecordingSink {
    appends: Mutex<Vec<Vec<u8>>>,
}

#[async_trait]
impl AppendWrite for RecordingSink {
    async fn append(&self, data: &[u8]) -> io::Result<()> {
        self.appends.lock().unwrap().push(data.to_vec());
        Ok(())
    }
}

fn chunked_route(then_fail: bool) -> MockRoute {
    MockRoute::Chunked {
        chunks: vec![
            Bytes::from_static(b"first "),
            Bytes::from_static(b"second "),
            Bytes::from_static(b"third"),
        ],
        then_fail,
    }
}

#[tokio::test]
async fn writes_whole_body_sequentially() {
    let data = random_payload(50_000);
    let transport = MockTransport::new().route(&mock_url("/file"), MockRoute::plain(&data));
    let client = mock_client(transport, ClientConfig::default());

    let sink = MemorySink::new();
    client
        .download_serially(&sink, &mock_url("/file"))
        .await
        .unwrap();

    assert_eq!(sink.to_vec().await, data);
    let requests = client.transport().requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].range.is_none());
}

#[tokio::test]
async fn appends_after_existing_content() {
    let transport = MockTransport::new().route(&mock_url("/file"), MockRoute::plain(b"world"));
    let client = mock_client(transport, ClientConfig::default());

    let sink = MemorySink::from_vec(b"hello ".to_vec());
    client
        .download_serially(&sink, &mock_url("/file"))
        .await
        .unwrap();
    assert_eq!(sink.into_inner(), b"hello world");
}

#[tokio::test]
async fn failing_transport_leaves_sink_untouched() {
    let transport = MockTransport::new().route(&mock_url("/down"), MockRoute::Fail);
    let client = mock_client(transport, ClientConfig::default());

    let sink = MemorySink::new();
    let err = client
        .download_serially(&sink, &mock_url("/down"))
        .await
        .unwrap_err();

    match &err {
        FetchError::Download { url, .. } => assert_eq!(url, &mock_url("/down")),
        other => panic!("预期 Download 包装，得到 {other:?}"),
    }
    assert!(matches!(err.root(), FetchError::Transport(_)));
    assert!(sink.is_empty().await);
}

#[tokio::test]
async fn error_status_is_not_written() {
    let transport = MockTransport::new().route(
        &mock_url("/gone"),
        MockRoute::Custom(HttpResponse::new(StatusCode::GONE).with_body("error page")),
    );
    let client = mock_client(transport, ClientConfig::default());

    let sink = MemorySink::new();
    let err = client
        .download_serially(&sink, &mock_url("/gone"))
        .await
        .unwrap_err();

    assert!(matches!(
        err.root(),
        FetchError::UnexpectedStatus {
            status: StatusCode::GONE
        }
    ));
    assert!(sink.is_empty().await);
}

#[tokio::test]
async fn follows_redirect() {
    let transport = MockTransport::new()
        .route(&mock_url("/old"), MockRoute::redirect(&mock_url("/new")))
        .route(&mock_url("/new"), MockRoute::plain(b"moved content"));
    let client = mock_client(transport, ClientConfig::default());

    let sink = MemorySink::new();
    client
        .download_serially(&sink, &mock_url("/old"))
        .await
        .unwrap();
    assert_eq!(sink.to_vec().await, b"moved content");
}

#[tokio::test]
async fn body_is_written_chunk_by_chunk() {
    let transport = MockTransport::new().route(&mock_url("/stream"), chunked_route(false));
    let client = mock_client(transport, ClientConfig::default());

    let sink = RecordingSink::default();
    client
        .download_serially(&sink, &mock_url("/stream"))
        .await
        .unwrap();

    let appends = sink.appends.lock().unwrap().clone();
    assert_eq!(
        appends,
        vec![b"first ".to_vec(), b"second ".to_vec(), b"third".to_vec()]
    );
}

#[tokio::test]
async fn broken_stream_keeps_received_chunks() {
    let transport = MockTransport::new().route(&mock_url("/stream"), chunked_route(true));
    let client = mock_client(transport, ClientConfig::default());

    let sink = MemorySink::new();
    let err = client
        .download_serially(&sink, &mock_url("/stream"))
        .await
        .unwrap_err();

    assert!(matches!(
        err.root(),
        FetchError::Transport(TransportError::Connection(_))
    ));
    // 中断前收到的部分已写入，不做回滚
    assert_eq!(sink.to_vec().await, b"first second third");
}
