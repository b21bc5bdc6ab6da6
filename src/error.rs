use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 输入校验错误（发起任何网络请求之前）
    Validation(ValidationError),
    /// 提交阶段错误（对本次提交是致命的）
    Submission(SubmissionError),
    /// 轮询单次检查错误（非致命，会话保持 Active）
    Poll(PollError),
    /// 结果导出错误
    Export(ExportError),
    /// 结果存储错误
    Store(StoreError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(e) => write!(f, "校验错误: {}", e),
            AppError::Submission(e) => write!(f, "提交错误: {}", e),
            AppError::Poll(e) => write!(f, "轮询错误: {}", e),
            AppError::Export(e) => write!(f, "导出错误: {}", e),
            AppError::Store(e) => write!(f, "存储错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Validation(e) => Some(e),
            AppError::Submission(e) => Some(e),
            AppError::Poll(e) => Some(e),
            AppError::Export(e) => Some(e),
            AppError::Store(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// 输入校验错误
#[derive(Debug)]
pub enum ValidationError {
    /// 文件列表为空
    EmptyFileList,
    /// 通知邮箱格式不正确
    InvalidEmail { email: String },
    /// 文件名为空
    EmptyFilename,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyFileList => write!(f, "文件列表不能为空"),
            ValidationError::InvalidEmail { email } => {
                write!(f, "邮箱格式不正确: {}", email)
            }
            ValidationError::EmptyFilename => write!(f, "文件名不能为空"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// 提交阶段错误
#[derive(Debug)]
pub enum SubmissionError {
    /// 网络请求失败
    RequestFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 后端返回非 207 状态码
    BadStatus { status: u16, body: String },
    /// 响应体解析失败
    ResponseParseFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionError::RequestFailed { endpoint, source } => {
                write!(f, "提交请求失败 ({}): {}", endpoint, source)
            }
            SubmissionError::BadStatus { status, body } => {
                write!(f, "后端返回错误状态码 {}: {}", status, body)
            }
            SubmissionError::ResponseParseFailed { source } => {
                write!(f, "提交响应解析失败: {}", source)
            }
        }
    }
}

impl std::error::Error for SubmissionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SubmissionError::RequestFailed { source, .. }
            | SubmissionError::ResponseParseFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 轮询单次检查错误
#[derive(Debug)]
pub enum PollError {
    /// 列表请求失败
    CheckRequestFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 列表响应解析失败
    CheckParseFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 已完成数量出现回退（后端契约保证单调递增，出现即为缺陷）
    MatchedCountRegressed { previous: usize, current: usize },
}

impl fmt::Display for PollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollError::CheckRequestFailed { endpoint, source } => {
                write!(f, "轮询检查请求失败 ({}): {}", endpoint, source)
            }
            PollError::CheckParseFailed { source } => {
                write!(f, "轮询响应解析失败: {}", source)
            }
            PollError::MatchedCountRegressed { previous, current } => {
                write!(f, "已完成数量回退: {} -> {}", previous, current)
            }
        }
    }
}

impl std::error::Error for PollError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PollError::CheckRequestFailed { source, .. }
            | PollError::CheckParseFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 结果导出错误
#[derive(Debug)]
pub enum ExportError {
    /// 没有可导出的结果
    EmptyResults,
    /// 序列化失败
    SerializeFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::EmptyResults => write!(f, "没有可导出的结果"),
            ExportError::SerializeFailed { source } => {
                write!(f, "结果序列化失败: {}", source)
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::SerializeFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 结果存储错误
#[derive(Debug)]
pub enum StoreError {
    /// 读取存储槽失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入存储槽失败
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 存储内容反序列化失败
    DeserializeFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::ReadFailed { path, source } => {
                write!(f, "读取存储槽失败 ({}): {}", path, source)
            }
            StoreError::WriteFailed { path, source } => {
                write!(f, "写入存储槽失败 ({}): {}", path, source)
            }
            StoreError::DeserializeFailed { path, source } => {
                write!(f, "存储内容解析失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::ReadFailed { source, .. }
            | StoreError::WriteFailed { source, .. }
            | StoreError::DeserializeFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

// ========== 从常见错误类型转换 ==========

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Submission(SubmissionError::ResponseParseFailed {
            source: Box::new(err),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Store(StoreError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建提交请求失败错误
    pub fn submission_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Submission(SubmissionError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建后端错误状态码错误
    pub fn submission_bad_status(status: u16, body: impl Into<String>) -> Self {
        AppError::Submission(SubmissionError::BadStatus {
            status,
            body: body.into(),
        })
    }

    /// 创建轮询检查失败错误
    pub fn poll_check_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Poll(PollError::CheckRequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建存储写入失败错误
    pub fn store_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Store(StoreError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
