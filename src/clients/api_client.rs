/// 文档分析后端 API 客户端
///
/// 封装所有与文档后端的 HTTP 交互：多文件上传和文档列表查询
use crate::config::Config;
use crate::error::{AppError, AppResult, PollError, SubmissionError};
use crate::models::{DocumentListResponse, DocumentRecord, UploadFile, UploadOutcome};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use tracing::debug;

/// 文档后端能力接口
///
/// 提交器和轮询器只依赖这个接口，测试中可替换为内存实现
#[async_trait]
pub trait DocumentsApi: Send + Sync {
    /// 上传一批文件
    ///
    /// # 参数
    /// - `files`: 待上传文件列表（顺序即提交顺序）
    /// - `uploader_email`: 上传者邮箱（调用方负责占位邮箱的填充）
    ///
    /// # 返回
    /// 返回每个文件的上传结果，顺序与输入一致
    async fn upload_documents(
        &self,
        files: &[UploadFile],
        uploader_email: &str,
    ) -> AppResult<Vec<UploadOutcome>>;

    /// 查询后端已知的全部文档
    ///
    /// 后端返回的是完整快照，不按批次过滤；按批次筛选由轮询器完成
    async fn list_documents(&self) -> AppResult<Vec<DocumentRecord>>;
}

/// 基于 reqwest 的后端客户端
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// 创建新的后端客户端
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn upload_endpoint(&self) -> String {
        format!("{}/api/documents", self.base_url)
    }

    fn list_endpoint(&self) -> String {
        format!("{}/api/documents/", self.base_url)
    }
}

#[async_trait]
impl DocumentsApi for ApiClient {
    async fn upload_documents(
        &self,
        files: &[UploadFile],
        uploader_email: &str,
    ) -> AppResult<Vec<UploadOutcome>> {
        let endpoint = self.upload_endpoint();
        debug!("提交 {} 个文件到 {}", files.len(), endpoint);

        let mut form = Form::new().text("uploader_email", uploader_email.to_string());
        for file in files {
            let part = Part::bytes(file.content.clone()).file_name(file.filename.clone());
            form = form.part("files", part);
        }

        let response = self
            .http
            .post(&endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::submission_request_failed(&endpoint, e))?;

        // 后端对整批提交固定返回 207 Multi-Status，其余状态码一律视为失败
        let status = response.status();
        if status != StatusCode::MULTI_STATUS {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::submission_bad_status(status.as_u16(), body));
        }

        let outcomes: Vec<UploadOutcome> = response.json().await.map_err(|e| {
            AppError::Submission(SubmissionError::ResponseParseFailed {
                source: Box::new(e),
            })
        })?;

        Ok(outcomes)
    }

    async fn list_documents(&self) -> AppResult<Vec<DocumentRecord>> {
        let endpoint = self.list_endpoint();
        debug!("查询文档列表: {}", endpoint);

        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| AppError::poll_check_failed(&endpoint, e))?;

        let listing: DocumentListResponse = response.json().await.map_err(|e| {
            AppError::Poll(PollError::CheckParseFailed {
                source: Box::new(e),
            })
        })?;

        Ok(listing.documents)
    }
}
