// ==========================================
// 水库下泄排程系统 - API层错误类型
// ==========================================
// 职责: 汇总配置/导出/校验错误，转换为面向调用方的错误消息
// ==========================================

use crate::config::error::ConfigError;
use crate::export::error::ExportError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API层错误类型
/// 所有错误信息必须包含显式原因
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    /// 运行请求校验失败（带详细原因）
    #[error("运行请求校验失败: {reason}")]
    ValidationError {
        reason: String,
        violations: Vec<ValidationViolation>,
    },

    // ==========================================
    // 下游模块错误
    // ==========================================
    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("导出失败: {0}")]
    ExportError(String),
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ConfigValueError { key, value, message } => {
                ApiError::InvalidInput(format!("配置项{}={}无效: {}", key, value, message))
            }
            other => ApiError::ConfigError(other.to_string()),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        ApiError::ExportError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 校验违规详情
// ==========================================

/// 校验违规详情
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationViolation {
    /// 违规字段（如 storage_min / demand_pct）
    pub field: String,
    /// 违规原因
    pub reason: String,
    /// 额外信息（可选）
    pub details: Option<serde_json::Value>,
}

impl ValidationViolation {
    pub fn new(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_value_error_maps_to_invalid_input() {
        let err: ApiError = ConfigError::ConfigValueError {
            key: "seed".to_string(),
            value: "x".to_string(),
            message: "invalid digit".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::InvalidInput(ref m) if m.contains("seed")));
    }

    #[test]
    fn test_export_error_keeps_path_in_message() {
        let err: ApiError = ExportError::DirectoryCreateError {
            path: "/readonly/out".to_string(),
            message: "permission denied".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::ExportError(ref m) if m.contains("/readonly/out")));
    }

    #[test]
    fn test_profile_not_found_maps_to_config_error() {
        let err: ApiError = ConfigError::ProfileNotFound("dry".to_string()).into();
        assert!(matches!(err, ApiError::ConfigError(ref m) if m.contains("dry")));
    }
}
