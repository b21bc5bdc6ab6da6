//! 批量提交服务 - 业务能力层
//!
//! 核心职责：把用户选择的文件变成一次后端提交和一个待跟踪的批次
//!
//! 流程顺序：
//! 1. 本地校验（文件列表非空、邮箱格式）—— 校验失败时不发起任何网络请求
//! 2. 构造一个携带全部文件的 multipart 请求并提交（一次调用恰好一个请求）
//! 3. 解析逐文件结果，从成功项构建 Batch

use crate::clients::DocumentsApi;
use crate::config::Config;
use crate::error::{AppError, AppResult, ValidationError};
use crate::models::{Batch, UploadFile, UploadOutcome};
use regex::Regex;
use std::sync::{Arc, OnceLock};
use tracing::{info, warn};

/// 邮箱格式正则（与后端 EmailStr 校验对齐的常规模式）
fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
    })
}

/// 校验邮箱格式
pub fn validate_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// 一次提交的结果
#[derive(Debug, Clone)]
pub struct SubmissionResult {
    /// 每个输入文件的结果，顺序与提交顺序一致
    pub outcomes: Vec<UploadOutcome>,
    /// 由成功项构成的批次
    pub batch: Batch,
}

impl SubmissionResult {
    /// 上传失败的文件名列表（调用方可据此提示部分失败）
    pub fn failed(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_uploaded())
            .map(|o| o.filename.as_str())
            .collect()
    }
}

/// 批量提交器
///
/// 只负责校验和提交，不触碰结果存储
pub struct BatchSubmitter {
    api: Arc<dyn DocumentsApi>,
    anonymous_email: String,
}

impl BatchSubmitter {
    /// 创建新的批量提交器
    pub fn new(config: &Config, api: Arc<dyn DocumentsApi>) -> Self {
        Self {
            api,
            anonymous_email: config.anonymous_email.clone(),
        }
    }

    /// 提交一批文件
    ///
    /// # 参数
    /// - `files`: 待上传文件列表（不能为空）
    /// - `notify_email`: 通知邮箱，None 时使用占位邮箱
    ///
    /// # 返回
    /// 返回逐文件结果和由成功项构成的批次
    pub async fn submit(
        &self,
        files: &[UploadFile],
        notify_email: Option<&str>,
    ) -> AppResult<SubmissionResult> {
        // 全部校验在任何网络活动之前完成
        if files.is_empty() {
            return Err(AppError::Validation(ValidationError::EmptyFileList));
        }
        if files.iter().any(|f| f.filename.is_empty()) {
            return Err(AppError::Validation(ValidationError::EmptyFilename));
        }

        let uploader_email = match notify_email {
            Some(email) => {
                if !validate_email(email) {
                    return Err(AppError::Validation(ValidationError::InvalidEmail {
                        email: email.to_string(),
                    }));
                }
                email.to_string()
            }
            None => self.anonymous_email.clone(),
        };

        info!("📤 正在提交 {} 个文件...", files.len());

        let outcomes = self.api.upload_documents(files, &uploader_email).await?;

        let batch = Batch::from_outcomes(&outcomes);
        for outcome in outcomes.iter().filter(|o| !o.is_uploaded()) {
            warn!(
                "⚠️ 文件 {} 上传失败: {}",
                outcome.filename,
                outcome.error.as_deref().unwrap_or("未知原因")
            );
        }
        info!(
            "✓ 提交完成: 成功 {}/{}",
            batch.len(),
            outcomes.len()
        );

        Ok(SubmissionResult { outcomes, batch })
    }
}
