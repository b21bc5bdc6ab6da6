/// 文件结果存储
///
/// 将最近批次的结果以 JSON 形式写入一个固定命名的存储槽文件，
/// 在同一客户端会话内跨页面切换存活（不是数据库，不保证跨机器持久化）
use crate::config::Config;
use crate::error::{AppError, AppResult, StoreError};
use crate::models::ResolvedResult;
use crate::store::ResultStore;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 基于 JSON 文件的存储槽
pub struct FileResultStore {
    path: PathBuf,
}

impl FileResultStore {
    /// 按配置中的存储槽路径创建
    pub fn new(config: &Config) -> Self {
        Self {
            path: PathBuf::from(&config.results_slot_path),
        }
    }

    /// 指定路径创建
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn path_str(&self) -> String {
        self.path.display().to_string()
    }
}

impl ResultStore for FileResultStore {
    fn put(&self, results: Vec<ResolvedResult>) -> AppResult<()> {
        let json = serde_json::to_vec_pretty(&results).map_err(|e| {
            AppError::store_write_failed(self.path_str(), e)
        })?;

        // 先写临时文件再改名，读方看到的要么是旧列表要么是新列表
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, &json)
            .map_err(|e| AppError::store_write_failed(self.path_str(), e))?;
        fs::rename(&tmp_path, &self.path)
            .map_err(|e| AppError::store_write_failed(self.path_str(), e))?;

        debug!("已写入 {} 条结果到存储槽 {}", results.len(), self.path_str());
        Ok(())
    }

    fn get(&self) -> AppResult<Vec<ResolvedResult>> {
        // 存储槽不存在等价于"暂无结果"
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let bytes = fs::read(&self.path).map_err(|e| {
            AppError::Store(StoreError::ReadFailed {
                path: self.path_str(),
                source: Box::new(e),
            })
        })?;

        let results = serde_json::from_slice(&bytes).map_err(|e| {
            AppError::Store(StoreError::DeserializeFailed {
                path: self.path_str(),
                source: Box::new(e),
            })
        })?;

        Ok(results)
    }

    fn clear(&self) -> AppResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                AppError::Store(StoreError::WriteFailed {
                    path: self.path_str(),
                    source: Box::new(e),
                })
            })?;
        }
        Ok(())
    }
}
