//! 结果存储
//!
//! 保存最近一个批次的已解析结果，供结果页和导出器读取。
//! 语义为"最后写入者获胜"：一次 `put` 整体替换先前内容，不做增量合并。
//!
//! 写路径只有轮询器一个，读路径可能有多个，
//! 因此两个实现都保证读方不会观察到写了一半的列表。

pub mod file_store;
pub mod memory_store;

pub use file_store::FileResultStore;
pub use memory_store::MemoryResultStore;

use crate::error::AppResult;
use crate::models::ResolvedResult;

/// 结果存储接口
///
/// 空存储的 `get()` 返回空列表，表示"暂无结果"，不是错误
pub trait ResultStore: Send + Sync {
    /// 写入一批已解析结果，整体替换先前内容
    fn put(&self, results: Vec<ResolvedResult>) -> AppResult<()>;

    /// 读取当前保存的结果列表
    fn get(&self) -> AppResult<Vec<ResolvedResult>>;

    /// 清空存储（新一轮提交开始时调用）
    fn clear(&self) -> AppResult<()>;
}
