// ==========================================
// 水库下泄排程系统 - 排程 API
// ==========================================
// 职责: 校验 → 编排执行 → 导出
// 定位: 决策支持，结果供人工审阅，不直接下发闸门指令
// ==========================================

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::api::error::{ApiResult, ValidationViolation};
use crate::api::validator::{validate_run_parameters, validate_run_request, ValidationMode};
use crate::config::run_config_trait::RunConfigReader;
use crate::domain::timeseries::TimeSeries;
use crate::engine::{RunOrchestrator, RunRequest, RunResult};
use crate::export::{write_run_bundle, ExportManifest};

// ==========================================
// RunApiResponse - 排程 API 响应
// ==========================================

/// 排程运行响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunApiResponse {
    /// 运行结果
    pub result: RunResult,
    /// Lenient 模式下被忽略的参数违规（Strict 模式下恒为空）
    pub ignored_violations: Vec<ValidationViolation>,
}

impl RunApiResponse {
    /// 是否在参数违规的情况下运行
    pub fn has_ignored_violations(&self) -> bool {
        !self.ignored_violations.is_empty()
    }
}

// ==========================================
// ScheduleApi - 排程 API
// ==========================================

/// 排程API
///
/// 职责：
/// 1. 运行请求校验（Strict / Lenient）
/// 2. 调用编排器完成一次完整排程
/// 3. 导出 CSV 结果包
pub struct ScheduleApi {
    orchestrator: RunOrchestrator,
}

impl ScheduleApi {
    /// 创建新的ScheduleApi实例
    pub fn new() -> Self {
        Self {
            orchestrator: RunOrchestrator::new(),
        }
    }

    /// 执行一次排程
    ///
    /// # 参数
    /// - request: 运行请求
    /// - mode: 校验模式
    ///
    /// # 返回
    /// - Ok(RunApiResponse): 运行结果 + 被忽略的违规项
    /// - Err(ApiError::ValidationError): Strict 模式下参数不合法
    #[instrument(skip(self, request), fields(horizon_hours = request.horizon_hours, seed = request.seed))]
    pub fn run(&self, request: RunRequest, mode: ValidationMode) -> ApiResult<RunApiResponse> {
        let ignored_violations = validate_run_request(&request, mode)?;
        Ok(RunApiResponse {
            result: self.orchestrator.execute(request),
            ignored_violations,
        })
    }

    /// 使用外部输入序列执行排程（不生成情景）
    ///
    /// 规划时长由输入序列决定，不校验 horizon_hours
    pub fn run_with_inputs(
        &self,
        request: RunRequest,
        inputs: TimeSeries,
        mode: ValidationMode,
    ) -> ApiResult<RunApiResponse> {
        let ignored_violations = validate_run_parameters(&request, mode)?;
        Ok(RunApiResponse {
            result: self.orchestrator.execute_with_inputs(request, inputs),
            ignored_violations,
        })
    }

    /// 从配置读取运行请求并执行
    pub fn run_from_config<C: RunConfigReader>(
        &self,
        config: &C,
        mode: ValidationMode,
    ) -> ApiResult<RunApiResponse> {
        let request = config.to_run_request()?;
        self.run(request, mode)
    }

    /// 导出运行结果到目录
    ///
    /// # 返回
    /// - Ok(ExportManifest): 导出文件清单
    pub fn export_run(&self, result: &RunResult, dir: &Path) -> ApiResult<ExportManifest> {
        let manifest = write_run_bundle(dir, result)?;
        info!(run_id = %manifest.run_id, dir = %dir.display(), "运行结果已导出");
        Ok(manifest)
    }
}

impl Default for ScheduleApi {
    fn default() -> Self {
        Self::new()
    }
}
