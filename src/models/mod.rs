//! 数据模型
//!
//! 包含两类类型：
//! - 线上类型：与后端 JSON 契约一一对应（字段名通过 serde rename 对齐）
//! - 领域类型：Batch / ResolvedResult 等仅在客户端内部流转的类型

use serde::{Deserialize, Serialize};

/// 待上传的文件
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// 文件名（含扩展名）
    pub filename: String,
    /// 文件内容
    pub content: Vec<u8>,
}

impl UploadFile {
    pub fn new(filename: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content,
        }
    }

    /// 文件大小（字节）
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// 单个文件的上传结果
///
/// 后端对每个输入文件返回一条记录，顺序与提交顺序一致
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadOutcome {
    pub filename: String,
    /// "uploaded" 或 "failed"
    pub status: String,
    #[serde(rename = "documentId", skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadOutcome {
    /// 该文件是否上传成功并获得了文档ID
    pub fn is_uploaded(&self) -> bool {
        self.status == "uploaded" && self.document_id.is_some()
    }
}

/// 一次提交产生的批次
///
/// 仅包含上传成功的文档ID，创建后不可变（轮询器只读）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    ids: Vec<String>,
}

impl Batch {
    /// 从上传结果列表构建批次（保留提交顺序）
    pub fn from_outcomes(outcomes: &[UploadOutcome]) -> Self {
        let ids = outcomes
            .iter()
            .filter(|o| o.is_uploaded())
            .filter_map(|o| o.document_id.clone())
            .collect();
        Self { ids }
    }

    /// 直接从文档ID列表构建批次
    pub fn from_ids(ids: Vec<String>) -> Self {
        Self { ids }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}

/// 后端检测到的单个条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedItem {
    pub label: String,
    pub value: String,
}

/// 分析结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "detectedItems", default)]
    pub detected_items: Vec<DetectedItem>,
}

/// 后端列表接口返回的文档记录
///
/// `analysis_result` 在分析进行中为 None，完成后恰好出现一次，
/// 出现后不会再变回 None（单调完成）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub filename: String,
    #[serde(rename = "analysisResult", default, skip_serializing_if = "Option::is_none")]
    pub analysis_result: Option<AnalysisResult>,
}

impl DocumentRecord {
    /// 分析是否已完成
    pub fn is_completed(&self) -> bool {
        self.analysis_result.is_some()
    }

    /// 转换为已解析结果，分析未完成时返回 None
    pub fn into_resolved(self) -> Option<ResolvedResult> {
        let analysis = self.analysis_result?;
        Some(ResolvedResult {
            id: self.id,
            filename: self.filename,
            analysis,
        })
    }
}

/// 列表接口响应体
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentRecord>,
}

/// 分析已完成的文档结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedResult {
    pub id: String,
    pub filename: String,
    pub analysis: AnalysisResult,
}

/// 导出投影：每个结果只保留文件名和检测条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportEntry {
    pub filename: String,
    #[serde(rename = "detectedItems")]
    pub detected_items: Vec<DetectedItem>,
}

impl From<&ResolvedResult> for ExportEntry {
    fn from(result: &ResolvedResult) -> Self {
        Self {
            filename: result.filename.clone(),
            detected_items: result.analysis.detected_items.clone(),
        }
    }
}
