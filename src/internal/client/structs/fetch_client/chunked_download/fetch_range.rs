//! 分片下载：请求单个区间，校验后写入目标的对应偏移。

use tokio::time::Instant;
use tracing::debug;
use url::Url;

use crate::internal::client::structs::{ByteRange, FetchClient, FetchError};
use crate::internal::sink::structs::OffsetWriter;
use crate::internal::sink::traits::sink::{AppendWrite, WriteAt};
use crate::internal::transport::structs::HttpRequest;
use crate::internal::transport::traits::transport::Transport;

/// 请求单个区间时的参数（形参超过 3 个，用 struct 承载）。
pub struct FetchRangeParams<'a, T: Transport, S: ?Sized> {
    pub client: &'a FetchClient<T>,
    pub sink: &'a S,
    pub url: &'a Url,
    pub range: ByteRange,
    pub deadline: Option<Instant>,
}

/// 发起 `Range: bytes=start-end` 请求（跟随重定向），长度与请求一致才写入 `range.start` 处。
pub async fn fetch_range<T, S>(params: FetchRangeParams<'_, T, S>) -> Result<(), FetchError>
where
    T: Transport + 'static,
    S: WriteAt + ?Sized,
{
    let range = params.range;
    let mut request = HttpRequest::get(params.url.clone());
    request.set_byte_range(range.start, range.end);

    let response = params.client.execute(&mut request, params.deadline).await?;

    if !response.status.is_success() {
        return Err(FetchError::UnexpectedStatus {
            status: response.status,
        });
    }

    // 服务器少给或多给字节都算失败，不写入不完整的分片
    let actual = response.body.len() as u64;
    if actual != range.byte_count() {
        return Err(FetchError::ChunkLengthMismatch {
            expected: range.byte_count(),
            actual,
        });
    }

    OffsetWriter::new(params.sink, range.start)
        .append(&response.body)
        .await
        .map_err(|source| FetchError::SinkWriteFailed {
            offset: range.start,
            source,
        })?;

    debug!(start = range.start, end = range.end, "区间写入完成");
    Ok(())
}
