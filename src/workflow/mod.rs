//! 流程层（Workflow Layer）
//!
//! 定义"一批文档"的完整处理流程：
//!
//! ```text
//! AnalysisFlow (提交 → 轮询 → 存储 → 返回结果)
//!     ↓
//! services (能力层：submit / export)
//!     ↓
//! poller (完成度轮询)
//!     ↓
//! clients (基础设施：HTTP)
//! ```

pub mod analysis_flow;

pub use analysis_flow::{AnalysisFlow, AnalysisOutcome};
