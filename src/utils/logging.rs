/// 日志工具模块
///
/// 提供日志初始化和格式化输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志订阅器
///
/// 级别由 RUST_LOG 环境变量控制，默认 info
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}

/// 记录流程启动信息
///
/// # 参数
/// - `file_count`: 本次提交的文件数量
/// - `poll_interval_ms`: 轮询间隔（毫秒）
pub fn log_flow_start(file_count: usize, poll_interval_ms: u64) {
    info!("{}", "=".repeat(60));
    info!("🚀 开始文档分析流程");
    info!("📄 本次提交文件数: {}", file_count);
    info!("⏱️ 轮询间隔: {} 毫秒", poll_interval_ms);
    info!("{}", "=".repeat(60));
}

/// 记录流程完成信息
///
/// # 参数
/// - `resolved`: 拿到结果的文档数量
/// - `total`: 批次文档总数
pub fn log_flow_complete(resolved: usize, total: usize) {
    info!("\n{}", "─".repeat(60));
    info!("✓ 分析流程结束: 完成 {}/{}", resolved, total);
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
