#![allow(dead_code)]
//! 测试共用的内存后端实现
//!
//! 按脚本逐次返回列表快照，模拟后端分析逐步完成的过程

use async_trait::async_trait;
use document_analysis_client::error::{AppError, AppResult};
use document_analysis_client::models::{AnalysisResult, DetectedItem};
use document_analysis_client::{Config, DocumentRecord, DocumentsApi, UploadFile, UploadOutcome};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// 单次列表检查的脚本步骤
#[derive(Clone)]
pub enum ListStep {
    /// 返回给定快照
    Ok(Vec<DocumentRecord>),
    /// 模拟网络故障
    Fail,
}

/// 脚本化的内存后端
///
/// 列表请求依次消耗脚本步骤，最后一步会被重复返回
pub struct FakeApi {
    steps: Mutex<VecDeque<ListStep>>,
    upload_outcomes: Mutex<Vec<UploadOutcome>>,
    pub list_calls: AtomicUsize,
    pub upload_calls: AtomicUsize,
    pub last_email: Mutex<Option<String>>,
}

impl FakeApi {
    pub fn new(steps: Vec<ListStep>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            upload_outcomes: Mutex::new(Vec::new()),
            list_calls: AtomicUsize::new(0),
            upload_calls: AtomicUsize::new(0),
            last_email: Mutex::new(None),
        }
    }

    /// 设置下一次上传调用返回的逐文件结果
    pub fn set_upload_outcomes(&self, outcomes: Vec<UploadOutcome>) {
        *self.upload_outcomes.lock().unwrap() = outcomes;
    }

    pub fn list_call_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn upload_call_count(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentsApi for FakeApi {
    async fn upload_documents(
        &self,
        _files: &[UploadFile],
        uploader_email: &str,
    ) -> AppResult<Vec<UploadOutcome>> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_email.lock().unwrap() = Some(uploader_email.to_string());
        Ok(self.upload_outcomes.lock().unwrap().clone())
    }

    async fn list_documents(&self) -> AppResult<Vec<DocumentRecord>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let step = {
            let mut steps = self.steps.lock().unwrap();
            if steps.len() > 1 {
                steps.pop_front().unwrap()
            } else {
                steps.front().cloned().unwrap_or(ListStep::Ok(Vec::new()))
            }
        };
        match step {
            ListStep::Ok(documents) => Ok(documents),
            ListStep::Fail => Err(AppError::poll_check_failed(
                "fake",
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"),
            )),
        }
    }
}

/// 测试用配置：500 毫秒节奏，不限制轮询时长
pub fn test_config() -> Config {
    Config {
        poll_interval_ms: 500,
        max_poll_duration_secs: None,
        ..Config::default()
    }
}

/// 分析仍在进行中的文档记录
pub fn pending_doc(id: &str, filename: &str) -> DocumentRecord {
    DocumentRecord {
        id: id.to_string(),
        filename: filename.to_string(),
        analysis_result: None,
    }
}

/// 分析已完成的文档记录
pub fn completed_doc(id: &str, filename: &str) -> DocumentRecord {
    DocumentRecord {
        id: id.to_string(),
        filename: filename.to_string(),
        analysis_result: Some(AnalysisResult {
            detected_items: vec![DetectedItem {
                label: "PESEL".to_string(),
                value: "90010112345".to_string(),
            }],
        }),
    }
}

/// 上传成功的逐文件结果
pub fn uploaded_outcome(filename: &str, id: &str) -> UploadOutcome {
    UploadOutcome {
        filename: filename.to_string(),
        status: "uploaded".to_string(),
        document_id: Some(id.to_string()),
        error: None,
    }
}

/// 上传失败的逐文件结果
pub fn failed_outcome(filename: &str, error: &str) -> UploadOutcome {
    UploadOutcome {
        filename: filename.to_string(),
        status: "failed".to_string(),
        document_id: None,
        error: Some(error.to_string()),
    }
}
