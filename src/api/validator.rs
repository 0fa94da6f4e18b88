// ==========================================
// 水库下泄排程系统 - 运行请求校验器
// ==========================================
// 职责: 在调用引擎前检查参数合理性
// 红线: 引擎本身不做校验、不报错；校验只在 API 层按模式启用
// ==========================================

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::error::{ApiError, ApiResult, ValidationViolation};
use crate::domain::reservoir::ScenarioPercentages;
use crate::domain::types::Horizon;
use crate::engine::RunRequest;

// ==========================================
// ValidationMode - 校验模式
// ==========================================

/// 校验模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationMode {
    /// 严格模式：任何违规都返回错误
    Strict,
    /// 宽松模式：记录警告后照常运行（引擎按既定规则截断）
    Lenient,
}

/// 收集运行请求的全部违规项（规划时长 + 水库参数 + 情景调整）
pub fn collect_violations(request: &RunRequest) -> Vec<ValidationViolation> {
    let mut violations = Vec::new();

    if Horizon::from_hours(request.horizon_hours).is_none() {
        let allowed: Vec<usize> = Horizon::ALL.iter().map(Horizon::hours).collect();
        violations.push(
            ValidationViolation::new("horizon_hours", "规划时长只能从可选时段中选择")
                .with_details(serde_json::json!({
                    "horizon_hours": request.horizon_hours,
                    "allowed": allowed,
                })),
        );
    }

    violations.extend(collect_parameter_violations(request));
    violations
}

/// 收集水库参数与情景调整的违规项（不含规划时长，外部输入序列时使用）
pub fn collect_parameter_violations(request: &RunRequest) -> Vec<ValidationViolation> {
    let mut violations = Vec::new();
    let p = &request.params;

    for (field, value) in [
        ("storage_start", p.storage_start),
        ("storage_min", p.storage_min),
        ("storage_max", p.storage_max),
        ("max_release_per_hour", p.max_release_per_hour),
    ] {
        if !value.is_finite() || value < 0.0 {
            violations.push(
                ValidationViolation::new(field, "必须为非负有限数值")
                    .with_details(serde_json::json!({ "value": value })),
            );
        }
    }

    if p.storage_min > p.storage_max {
        violations.push(
            ValidationViolation::new("storage_min", "死库容不得高于最大库容")
                .with_details(serde_json::json!({
                    "storage_min": p.storage_min,
                    "storage_max": p.storage_max,
                })),
        );
    } else if p.storage_start < p.storage_min || p.storage_start > p.storage_max {
        violations.push(
            ValidationViolation::new("storage_start", "初始库容不在 [storage_min, storage_max] 内")
                .with_details(serde_json::json!({
                    "storage_start": p.storage_start,
                    "storage_min": p.storage_min,
                    "storage_max": p.storage_max,
                })),
        );
    }

    let pct = &request.percentages;
    for (field, value) in [
        ("river_pct", pct.river_pct),
        ("upstream_pct", pct.upstream_pct),
        ("demand_pct", pct.demand_pct),
        ("commitments_pct", pct.commitments_pct),
    ] {
        if !value.is_finite()
            || value < ScenarioPercentages::MIN_PCT
            || value > ScenarioPercentages::MAX_PCT
        {
            violations.push(
                ValidationViolation::new(
                    field,
                    format!(
                        "情景调整需在 [{}, {}] 之间",
                        ScenarioPercentages::MIN_PCT,
                        ScenarioPercentages::MAX_PCT
                    ),
                )
                .with_details(serde_json::json!({ "value": value })),
            );
        }
    }

    violations
}

/// 按模式校验运行请求
///
/// # 返回
/// - Ok(Vec): 宽松模式下被忽略的违规项（严格模式下必为空）
/// - Err(ApiError::ValidationError): 严格模式下存在违规
pub fn validate_run_request(
    request: &RunRequest,
    mode: ValidationMode,
) -> ApiResult<Vec<ValidationViolation>> {
    apply_mode(collect_violations(request), mode)
}

/// 按模式校验水库参数与情景调整（规划时长由外部输入序列决定）
pub fn validate_run_parameters(
    request: &RunRequest,
    mode: ValidationMode,
) -> ApiResult<Vec<ValidationViolation>> {
    apply_mode(collect_parameter_violations(request), mode)
}

fn apply_mode(
    violations: Vec<ValidationViolation>,
    mode: ValidationMode,
) -> ApiResult<Vec<ValidationViolation>> {
    if violations.is_empty() {
        return Ok(violations);
    }

    match mode {
        ValidationMode::Strict => Err(ApiError::ValidationError {
            reason: format!("{}项参数不合法", violations.len()),
            violations,
        }),
        ValidationMode::Lenient => {
            for v in &violations {
                warn!(field = %v.field, reason = %v.reason, "Lenient模式: 忽略参数违规");
            }
            Ok(violations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request_is_valid() {
        assert!(collect_violations(&RunRequest::default()).is_empty());
    }

    #[test]
    fn test_inverted_bounds_rejected_in_strict() {
        let mut req = RunRequest::default();
        req.params.storage_min = 9500.0;
        let err = validate_run_request(&req, ValidationMode::Strict).unwrap_err();
        match err {
            ApiError::ValidationError { violations, .. } => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].field, "storage_min");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lenient_returns_ignored_violations() {
        let mut req = RunRequest::default();
        req.percentages.demand_pct = 45.0;
        req.params.storage_start = 9999.0;
        let ignored = validate_run_request(&req, ValidationMode::Lenient).unwrap();
        let fields: Vec<&str> = ignored.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["storage_start", "demand_pct"]);
    }

    #[test]
    fn test_horizon_outside_allowed_set_rejected() {
        let mut req = RunRequest::default();
        req.horizon_hours = 48;
        match validate_run_request(&req, ValidationMode::Strict) {
            Err(ApiError::ValidationError { violations, .. }) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].field, "horizon_hours");
            }
            other => panic!("unexpected result: {:?}", other.map(|v| v.len())),
        }

        for horizon in Horizon::ALL {
            req.horizon_hours = horizon.hours();
            assert!(validate_run_request(&req, ValidationMode::Strict).is_ok());
        }

        // 外部输入序列不受可选时段约束
        req.horizon_hours = 48;
        assert!(validate_run_parameters(&req, ValidationMode::Strict).is_ok());
    }

    #[test]
    fn test_non_finite_and_zero_horizon() {
        let mut req = RunRequest::default();
        req.horizon_hours = 0;
        req.params.max_release_per_hour = f64::NAN;
        let fields: Vec<String> = collect_violations(&req)
            .into_iter()
            .map(|v| v.field)
            .collect();
        assert!(fields.contains(&"horizon_hours".to_string()));
        assert!(fields.contains(&"max_release_per_hour".to_string()));
    }
}
