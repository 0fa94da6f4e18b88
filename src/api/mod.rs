// ==========================================
// 水库下泄排程系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口，供 CLI 及外部调用
// ==========================================

pub mod error;
pub mod schedule_api;
pub mod validator;

// 重导出核心类型
pub use error::{ApiError, ApiResult, ValidationViolation};
pub use schedule_api::{RunApiResponse, ScheduleApi};
pub use validator::{
    collect_parameter_violations, collect_violations, validate_run_parameters,
    validate_run_request, ValidationMode,
};
