//! 完成度轮询器 - 流程核心
//!
//! ## 职责
//!
//! 跟踪一个批次的分析进度：按固定节奏查询后端文档列表，
//! 把返回记录按文档ID匹配回批次，全部完成后把结果写入存储并终止。
//!
//! ## 状态机
//!
//! ```text
//! Active → Resolved   （批次内全部文档分析完成，AND 屏障）
//!        → Cancelled  （调用方主动取消，不写存储）
//!        → TimedOut   （超过配置的最长轮询时间，不写存储）
//! ```
//!
//! ## 并发纪律
//!
//! 每个会话只有一个后台任务顺序执行检查，同一会话内不会出现
//! 两个同时在途的检查；检查慢于节奏时顺延下一个检查点而不是并发补发。
//! 单次检查失败只记录日志，会话保持 Active，下一个检查点照常进行，
//! 不做节奏外重试也不做退避。

use crate::clients::DocumentsApi;
use crate::config::Config;
use crate::error::PollError;
use crate::models::{Batch, DocumentRecord, ResolvedResult};
use crate::store::ResultStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// 轮询会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// 正在轮询
    Active,
    /// 批次全部完成，结果已写入存储
    Resolved,
    /// 已被调用方取消
    Cancelled,
    /// 超过最长轮询时间
    TimedOut,
}

impl PollState {
    /// 是否为终态
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollState::Active)
    }
}

/// 轮询会话句柄
///
/// 持有者可以查询状态、等待终态或取消会话。
/// 句柄被丢弃时后台检查随之停止，不会泄漏到会话生命周期之外。
pub struct PollSession {
    state_rx: watch::Receiver<PollState>,
    cancel: CancellationToken,
    /// 句柄全部释放时自动取消后台任务
    _drop_guard: Option<tokio_util::sync::DropGuard>,
}

impl PollSession {
    /// 当前状态
    pub fn state(&self) -> PollState {
        *self.state_rx.borrow()
    }

    /// 取消会话
    ///
    /// Active 时立即停止后续检查且不写存储；
    /// 已处于终态时为空操作
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// 等待会话进入终态
    pub async fn wait(&mut self) -> PollState {
        loop {
            let current = *self.state_rx.borrow();
            if current.is_terminal() {
                return current;
            }
            if self.state_rx.changed().await.is_err() {
                // 发送端已结束，返回最后可见的状态
                return *self.state_rx.borrow();
            }
        }
    }
}

/// 完成度轮询器
pub struct CompletionPoller {
    api: Arc<dyn DocumentsApi>,
    store: Arc<dyn ResultStore>,
    interval: Duration,
    max_duration: Option<Duration>,
    verbose_logging: bool,
}

impl CompletionPoller {
    /// 创建新的轮询器
    pub fn new(config: &Config, api: Arc<dyn DocumentsApi>, store: Arc<dyn ResultStore>) -> Self {
        Self {
            api,
            store,
            interval: Duration::from_millis(config.poll_interval_ms),
            max_duration: config.max_poll_duration_secs.map(Duration::from_secs),
            verbose_logging: config.verbose_logging,
        }
    }

    /// 启动一个批次的轮询会话
    ///
    /// 空批次直接以空结果集进入 Resolved，不发起任何网络请求
    pub fn start(&self, batch: Batch) -> PollSession {
        let (state_tx, state_rx) = watch::channel(PollState::Active);
        let cancel = CancellationToken::new();

        if batch.is_empty() {
            info!("✓ 空批次，无需轮询");
            if let Err(e) = self.store.put(Vec::new()) {
                error!("❌ 写入空结果集失败: {}", e);
            }
            let _ = state_tx.send(PollState::Resolved);
            return PollSession {
                state_rx,
                cancel,
                _drop_guard: None,
            };
        }

        info!("🔁 开始轮询批次，共 {} 个文档", batch.len());

        let worker = PollWorker {
            api: Arc::clone(&self.api),
            store: Arc::clone(&self.store),
            batch,
            interval: self.interval,
            max_duration: self.max_duration,
            verbose_logging: self.verbose_logging,
            cancel: cancel.clone(),
            state_tx,
        };
        tokio::spawn(worker.run());

        PollSession {
            state_rx,
            _drop_guard: Some(cancel.clone().drop_guard()),
            cancel,
        }
    }
}

/// 单个会话的后台检查任务
struct PollWorker {
    api: Arc<dyn DocumentsApi>,
    store: Arc<dyn ResultStore>,
    batch: Batch,
    interval: Duration,
    max_duration: Option<Duration>,
    verbose_logging: bool,
    cancel: CancellationToken,
    state_tx: watch::Sender<PollState>,
}

impl PollWorker {
    async fn run(self) {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // 消耗立即到期的首个 tick，首次检查在一个完整间隔之后
        interval.tick().await;

        let deadline = self.max_duration.map(|d| Instant::now() + d);
        // 已完成数量的水位线，契约上单调不减
        let mut last_matched = 0usize;

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    info!("🛑 轮询会话已取消（剩余 {} 个未完成）", self.batch.len() - last_matched);
                    let _ = self.state_tx.send(PollState::Cancelled);
                    return;
                }
                _ = sleep_until_deadline(deadline) => {
                    warn!(
                        "⚠️ 轮询超时，批次未在限定时间内完成 ({}/{})",
                        last_matched,
                        self.batch.len()
                    );
                    let _ = self.state_tx.send(PollState::TimedOut);
                    return;
                }
                _ = interval.tick() => {
                    match self.check_once(&mut last_matched).await {
                        CheckOutcome::Pending => {}
                        CheckOutcome::Done => return,
                    }
                }
            }
        }
    }

    /// 执行一次检查
    ///
    /// 检查在途期间不响应取消；写存储前再确认一次取消状态，
    /// 保证取消之后不再有任何存储写入
    async fn check_once(&self, last_matched: &mut usize) -> CheckOutcome {
        let documents = match self.api.list_documents().await {
            Ok(documents) => documents,
            Err(e) => {
                // 单次检查失败非致命，下一个检查点照常进行
                warn!("⚠️ 轮询检查失败: {}", e);
                return CheckOutcome::Pending;
            }
        };

        let matched = self.match_completed(documents);

        if matched.len() < *last_matched {
            let defect = PollError::MatchedCountRegressed {
                previous: *last_matched,
                current: matched.len(),
            };
            error!("❌ {}", defect);
            return CheckOutcome::Pending;
        }
        *last_matched = matched.len();

        if self.verbose_logging {
            info!("📋 已完成 {}/{}", matched.len(), self.batch.len());
        } else {
            debug!("已完成 {}/{}", matched.len(), self.batch.len());
        }

        // AND 屏障：必须全部完成，部分完成继续等待
        if matched.len() < self.batch.len() {
            return CheckOutcome::Pending;
        }

        if self.cancel.is_cancelled() {
            info!("🛑 轮询会话已取消");
            let _ = self.state_tx.send(PollState::Cancelled);
            return CheckOutcome::Done;
        }

        if let Err(e) = self.store.put(matched) {
            // 写入失败则保持 Active，下一个检查点重建结果并重写
            error!("❌ 写入结果存储失败，将在下个检查点重试: {}", e);
            return CheckOutcome::Pending;
        }

        info!("✅ 批次全部完成，共 {} 个结果已写入存储", self.batch.len());
        let _ = self.state_tx.send(PollState::Resolved);
        CheckOutcome::Done
    }

    /// 从完整快照中筛出属于本批次且已完成的记录，按批次顺序排列
    fn match_completed(&self, documents: Vec<DocumentRecord>) -> Vec<ResolvedResult> {
        self.batch
            .ids()
            .iter()
            .filter_map(|id| {
                documents
                    .iter()
                    .find(|d| &d.id == id && d.is_completed())
                    .cloned()
                    .and_then(DocumentRecord::into_resolved)
            })
            .collect()
    }
}

enum CheckOutcome {
    /// 会话继续 Active
    Pending,
    /// 会话已进入终态，任务退出
    Done,
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
