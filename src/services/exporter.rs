//! 结果导出服务 - 业务能力层
//!
//! 把已解析结果投影为 `{filename, detectedItems}` 列表，
//! 序列化为 JSON 字节并给出固定的下载文件名。
//! 纯函数式：确定性、保序、无副作用。

use crate::error::{AppError, AppResult, ExportError};
use crate::models::{ExportEntry, ResolvedResult};

/// 导出产物的建议文件名
pub const EXPORT_FILENAME: &str = "wynik_analizy.json";

/// 导出产物
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    /// JSON 字节内容
    pub bytes: Vec<u8>,
    /// 建议的下载文件名
    pub suggested_filename: String,
}

/// 结果导出器
#[derive(Debug, Default, Clone, Copy)]
pub struct ResultExporter;

impl ResultExporter {
    pub fn new() -> Self {
        Self
    }

    /// 导出一批已解析结果
    ///
    /// # 参数
    /// - `results`: 已解析结果列表（不能为空）
    ///
    /// # 返回
    /// 返回可供下载的 JSON 产物，条目顺序与输入一致
    pub fn export(&self, results: &[ResolvedResult]) -> AppResult<ExportArtifact> {
        if results.is_empty() {
            return Err(AppError::Export(ExportError::EmptyResults));
        }

        let entries: Vec<ExportEntry> = results.iter().map(ExportEntry::from).collect();

        let bytes = serde_json::to_vec_pretty(&entries).map_err(|e| {
            AppError::Export(ExportError::SerializeFailed {
                source: Box::new(e),
            })
        })?;

        Ok(ExportArtifact {
            bytes,
            suggested_filename: EXPORT_FILENAME.to_string(),
        })
    }
}
