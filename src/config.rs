/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 文档分析后端地址
    pub api_base_url: String,
    /// 轮询检查间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 单次轮询会话的最长持续时间（秒），None 表示不限制
    pub max_poll_duration_secs: Option<u64>,
    /// 用户不填写邮箱时使用的占位邮箱
    pub anonymous_email: String,
    /// 已解析结果的本地存储槽路径
    pub results_slot_path: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8002".to_string(),
            poll_interval_ms: 500,
            max_poll_duration_secs: Some(600),
            anonymous_email: "anonymous@example.com".to_string(),
            results_slot_path: "wynik_analizy.json".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(default.api_base_url),
            poll_interval_ms: std::env::var("POLL_INTERVAL_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.poll_interval_ms),
            max_poll_duration_secs: std::env::var("MAX_POLL_DURATION_SECS").ok().and_then(|v| v.parse().ok()).or(default.max_poll_duration_secs),
            anonymous_email: std::env::var("ANONYMOUS_EMAIL").unwrap_or(default.anonymous_email),
            results_slot_path: std::env::var("RESULTS_SLOT_PATH").unwrap_or(default.results_slot_path),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}
