// ==========================================
// 水库下泄排程系统 - 配置模块错误类型
// ==========================================

use thiserror::Error;

/// 配置模块错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: {path}: {message}")]
    FileReadError { path: String, message: String },

    #[error("配置快照解析失败: {0}")]
    SnapshotParseError(String),

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },

    #[error("情景配置不存在: {0}")]
    ProfileNotFound(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::SnapshotParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
