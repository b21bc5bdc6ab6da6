//! 文档分析流程 - 流程层
//!
//! 核心职责：编排一批文档从提交到拿到结果的完整路径
//!
//! 流程顺序：
//! 1. BatchSubmitter 校验并提交，得到批次
//! 2. CompletionPoller 轮询到批次全部完成
//! 3. 结果已由轮询器写入 ResultStore，从存储读出返回给调用方

use crate::clients::DocumentsApi;
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{ResolvedResult, UploadFile};
use crate::poller::{CompletionPoller, PollState};
use crate::services::BatchSubmitter;
use crate::store::ResultStore;
use crate::utils::logging;
use std::sync::Arc;
use tracing::warn;

/// 一次完整分析流程的结果
#[derive(Debug)]
pub enum AnalysisOutcome {
    /// 批次全部完成，结果已写入存储
    Completed(Vec<ResolvedResult>),
    /// 轮询超时，批次未在限定时间内完成
    TimedOut,
    /// 会话被取消
    Cancelled,
}

/// 文档分析流程
///
/// - 编排提交和轮询两个阶段
/// - 不持有任何网络资源，只依赖注入的接口
pub struct AnalysisFlow {
    submitter: BatchSubmitter,
    poller: CompletionPoller,
    store: Arc<dyn ResultStore>,
    poll_interval_ms: u64,
}

impl AnalysisFlow {
    /// 创建新的分析流程
    pub fn new(config: &Config, api: Arc<dyn DocumentsApi>, store: Arc<dyn ResultStore>) -> Self {
        Self {
            submitter: BatchSubmitter::new(config, Arc::clone(&api)),
            poller: CompletionPoller::new(config, api, Arc::clone(&store)),
            store,
            poll_interval_ms: config.poll_interval_ms,
        }
    }

    /// 运行完整流程：提交一批文件并等待全部分析完成
    ///
    /// # 参数
    /// - `files`: 待分析文件列表
    /// - `notify_email`: 通知邮箱，None 时匿名提交
    ///
    /// # 返回
    /// 批次完成时返回按提交顺序排列的结果列表
    pub async fn run(
        &self,
        files: &[UploadFile],
        notify_email: Option<&str>,
    ) -> AppResult<AnalysisOutcome> {
        logging::log_flow_start(files.len(), self.poll_interval_ms);

        let submission = self.submitter.submit(files, notify_email).await?;

        // 提交成功即进入新一轮周期，清掉上一批的结果；
        // 校验或提交失败时上一批结果保持可见
        self.store.clear()?;

        let failed = submission.failed();
        if !failed.is_empty() {
            warn!("⚠️ {} 个文件未进入本批次: {}", failed.len(), failed.join(", "));
        }

        let batch_size = submission.batch.len();
        let mut session = self.poller.start(submission.batch);
        match session.wait().await {
            PollState::Resolved => {
                let results = self.store.get()?;
                logging::log_flow_complete(results.len(), batch_size);
                Ok(AnalysisOutcome::Completed(results))
            }
            PollState::TimedOut => Ok(AnalysisOutcome::TimedOut),
            PollState::Cancelled => Ok(AnalysisOutcome::Cancelled),
            // wait() 只在终态返回
            PollState::Active => unreachable!("轮询会话在 Active 状态下不会结束等待"),
        }
    }
}
