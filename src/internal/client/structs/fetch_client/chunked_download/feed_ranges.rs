//! 分片下载：区间分发循环，每次入队都受截止时间约束。

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::internal::client::structs::{ByteRange, ByteRanges};

/// 分发循环的结束方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedOutcome {
    /// 全部区间都已入队
    Completed { dispatched: usize },
    /// 截止时间先到，提前停止分发
    DeadlineReached { dispatched: usize },
    /// 所有 worker 都已退出，队列没有接收方
    WorkersGone { dispatched: usize },
}

/// 分发区间时的参数（形参超过 3 个，用 struct 承载）。
pub struct FeedRangesParams {
    pub queue: mpsc::Sender<ByteRange>,
    pub ranges: ByteRanges,
    pub deadline: Option<Instant>,
}

/// 按偏移递增顺序把区间送入队列；返回时 `queue` 被丢弃，队列随之关闭。
///
/// 截止时间到了就不再分发，已入队的区间仍会被 worker 处理。
pub async fn feed_ranges(params: FeedRangesParams) -> FeedOutcome {
    let FeedRangesParams {
        queue,
        ranges,
        deadline,
    } = params;
    let mut dispatched = 0usize;

    for range in ranges {
        let sent = match deadline {
            Some(deadline) => match tokio::time::timeout_at(deadline, queue.send(range)).await {
                Ok(sent) => sent,
                Err(_) => {
                    warn!(dispatched, next = %range, "截止时间已到，停止分发区间");
                    return FeedOutcome::DeadlineReached { dispatched };
                }
            },
            None => queue.send(range).await,
        };

        if sent.is_err() {
            debug!(dispatched, "worker 已全部退出，停止分发区间");
            return FeedOutcome::WorkersGone { dispatched };
        }
        dispatched += 1;
    }

    FeedOutcome::Completed { dispatched }
}
