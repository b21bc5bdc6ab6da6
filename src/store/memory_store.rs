/// 内存结果存储
///
/// 用于测试和不需要跨进程持久化的宿主环境
use crate::error::AppResult;
use crate::models::ResolvedResult;
use crate::store::ResultStore;
use std::sync::Mutex;

/// 基于 Mutex 的内存存储
#[derive(Default)]
pub struct MemoryResultStore {
    results: Mutex<Vec<ResolvedResult>>,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultStore for MemoryResultStore {
    fn put(&self, results: Vec<ResolvedResult>) -> AppResult<()> {
        let mut guard = self.results.lock().unwrap_or_else(|e| e.into_inner());
        *guard = results;
        Ok(())
    }

    fn get(&self) -> AppResult<Vec<ResolvedResult>> {
        let guard = self.results.lock().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }

    fn clear(&self) -> AppResult<()> {
        let mut guard = self.results.lock().unwrap_or_else(|e| e.into_inner());
        guard.clear();
        Ok(())
    }
}
