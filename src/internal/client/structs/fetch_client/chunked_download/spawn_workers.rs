//! 分片下载：启动固定数量的 worker，以及等待全部 worker 结束并汇总错误。

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, warn};
use url::Url;

use crate::internal::client::structs::{ByteRange, FetchClient, FetchError};
use crate::internal::sink::traits::sink::WriteAt;
use crate::internal::transport::traits::transport::Transport;

use super::fetch_range::{FetchRangeParams, fetch_range};

/// 多个 worker 共享的区间队列接收端（mpsc 只允许一个消费者，用锁轮流领取）。
pub type SharedQueue = Arc<Mutex<mpsc::Receiver<ByteRange>>>;

/// 启动 worker 时的参数（形参超过 3 个，用 struct 承载）。
pub struct SpawnWorkersParams<T: Transport, S> {
    pub client: FetchClient<T>,
    pub sink: Arc<S>,
    pub url: Url,
    pub deadline: Option<Instant>,
    pub queue: SharedQueue,
    pub num_workers: usize,
}

/// 单个 worker 持有的上下文。
struct WorkerContext<T: Transport, S> {
    worker: usize,
    client: FetchClient<T>,
    sink: Arc<S>,
    url: Url,
    deadline: Option<Instant>,
    queue: SharedQueue,
}

/// 启动 `num_workers` 个 worker，必须在分发区间之前调用。
pub fn spawn_workers<T, S>(params: SpawnWorkersParams<T, S>) -> JoinSet<Result<(), FetchError>>
where
    T: Transport + 'static,
    S: WriteAt + 'static,
{
    let mut workers = JoinSet::new();
    for worker in 0..params.num_workers {
        let ctx = WorkerContext {
            worker,
            client: params.client.clone(),
            sink: Arc::clone(&params.sink),
            url: params.url.clone(),
            deadline: params.deadline,
            queue: Arc::clone(&params.queue),
        };
        workers.spawn(run_worker(ctx));
    }
    workers
}

/// worker 主循环：领取区间直到队列关闭且取空；任一区间失败即带上 worker 编号与区间退出，不影响其他 worker。
async fn run_worker<T, S>(ctx: WorkerContext<T, S>) -> Result<(), FetchError>
where
    T: Transport + 'static,
    S: WriteAt + 'static,
{
    let mut completed = 0usize;
    loop {
        let next = ctx.queue.lock().await.recv().await;
        let Some(range) = next else {
            debug!(worker = ctx.worker, completed, "队列已关闭，worker 退出");
            return Ok(());
        };

        let result = fetch_range(FetchRangeParams {
            client: &ctx.client,
            sink: ctx.sink.as_ref(),
            url: &ctx.url,
            range,
            deadline: ctx.deadline,
        })
        .await;

        if let Err(e) = result {
            warn!(worker = ctx.worker, start = range.start, end = range.end, error = %e, "区间下载失败");
            return Err(FetchError::ChunkFetchFailed {
                worker: ctx.worker,
                range,
                source: Box::new(e),
            });
        }
        completed += 1;
    }
}

/// 等待全部 worker 结束；按完成顺序取第一个错误返回。
pub async fn join_workers(
    mut workers: JoinSet<Result<(), FetchError>>,
) -> Result<(), FetchError> {
    let mut first_error: Option<FetchError> = None;

    while let Some(joined) = workers.join_next().await {
        let result = match joined {
            Ok(result) => result,
            Err(join_err) => Err(FetchError::WorkerJoin(join_err)),
        };
        if let Err(e) = result {
            first_error.get_or_insert(e);
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
