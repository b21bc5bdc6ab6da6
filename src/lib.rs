//! # Document Analysis Client
//!
//! 文档分析前端的核心库：批量提交文档、轮询分析进度、暂存并导出结果
//!
//! ## 架构设计
//!
//! 本库采用分层架构：
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 唯一与后端 HTTP 交互的模块
//! - `DocumentsApi` - 后端能力接口（上传 + 列表），测试可注入内存实现
//! - `ApiClient` - 基于 reqwest 的生产实现
//!
//! ### ② 业务能力层（Services / Store）
//! - `services/submitter` - 校验输入并发起一次多文件提交，产出批次
//! - `services/exporter` - 把已解析结果投影为可下载的 JSON 产物
//! - `store/` - 结果存储接口及内存 / 文件两种实现
//!
//! ### ③ 轮询层（Poller）
//! - `poller/` - 可取消的定时检查会话，AND 屏障判定批次完成
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/analysis_flow` - 提交 → 轮询 → 存储 → 返回结果的完整编排
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod poller;
pub mod services;
pub mod store;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{ApiClient, DocumentsApi};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Batch, DocumentRecord, ResolvedResult, UploadFile, UploadOutcome};
pub use poller::{CompletionPoller, PollSession, PollState};
pub use services::{BatchSubmitter, ExportArtifact, ResultExporter, SubmissionResult};
pub use store::{FileResultStore, MemoryResultStore, ResultStore};
pub use workflow::{AnalysisFlow, AnalysisOutcome};
