// ==========================================
// 水库下泄排程系统 - 引擎编排器
// ==========================================
// 用途: 协调 情景生成 → 下泄分配 → KPI → 事实表 的执行顺序
// 红线: 每次运行完整重算，不做增量更新
// ==========================================

use crate::domain::kpi::{FactRow, KpiSummary};
use crate::domain::reservoir::{ReservoirParameters, ScenarioMultipliers, ScenarioPercentages};
use crate::domain::schedule::Schedule;
use crate::domain::timeseries::TimeSeries;
use crate::engine::{build_fact_table, AllocationEngine, KpiEngine, ScenarioGenerator};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

// ==========================================
// RunRequest - 运行请求
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    pub horizon_hours: usize,
    pub seed: u64,
    pub params: ReservoirParameters,
    pub percentages: ScenarioPercentages,
    /// 首小时时刻；None 表示当前整点
    #[serde(default)]
    pub start: Option<NaiveDateTime>,
}

impl Default for RunRequest {
    fn default() -> Self {
        Self {
            horizon_hours: crate::domain::Horizon::default().hours(),
            seed: crate::engine::scenario_generator::DEFAULT_SEED,
            params: ReservoirParameters::default(),
            percentages: ScenarioPercentages::default(),
            start: None,
        }
    }
}

// ==========================================
// RunResult - 运行结果
// ==========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub run_id: String,
    pub created_at: DateTime<Utc>,
    pub request: RunRequest,
    pub multipliers: ScenarioMultipliers,

    // 情景生成输出（未作用情景系数）
    pub inputs: TimeSeries,

    // 分配引擎输出
    pub schedule: Schedule,

    // 汇总
    pub kpis: KpiSummary,
    pub fact_table: Vec<FactRow>,
}

// ==========================================
// RunOrchestrator - 引擎编排器
// ==========================================

pub struct RunOrchestrator {
    generator: ScenarioGenerator,
    allocation: AllocationEngine,
    kpi: KpiEngine,
}

impl RunOrchestrator {
    pub fn new() -> Self {
        Self {
            generator: ScenarioGenerator::new(),
            allocation: AllocationEngine::new(),
            kpi: KpiEngine::new(),
        }
    }

    /// 执行完整流程
    pub fn execute(&self, request: RunRequest) -> RunResult {
        let run_id = Uuid::new_v4().to_string();
        info!(
            run_id = %run_id,
            horizon_hours = request.horizon_hours,
            seed = request.seed,
            "开始执行排程流程"
        );

        // 步骤1: 情景生成
        debug!("步骤1: 生成输入序列");
        let inputs = match request.start {
            Some(start) => self
                .generator
                .generate_at(start, request.horizon_hours, request.seed),
            None => self.generator.generate(request.horizon_hours, request.seed),
        };

        self.run_with_inputs(run_id, request, inputs)
    }

    /// 使用外部提供的输入序列执行（跳过情景生成）
    pub fn execute_with_inputs(&self, request: RunRequest, inputs: TimeSeries) -> RunResult {
        let run_id = Uuid::new_v4().to_string();
        info!(run_id = %run_id, hours = inputs.len(), "使用外部输入执行排程流程");
        self.run_with_inputs(run_id, request, inputs)
    }

    fn run_with_inputs(&self, run_id: String, request: RunRequest, inputs: TimeSeries) -> RunResult {
        // 步骤2: 下泄分配
        debug!("步骤2: 逐小时下泄分配");
        let multipliers = ScenarioMultipliers::from_percentages(request.percentages);
        let schedule = self.allocation.allocate(&inputs, &request.params, &multipliers);

        // 步骤3: KPI 与事实表（请求量按未调整输入计）
        debug!("步骤3: 计算 KPI 与事实表");
        let kpis = self.kpi.compute(&inputs, &schedule);
        let fact_table = build_fact_table(&inputs, &schedule);

        info!(
            run_id = %run_id,
            demand_met_pct = kpis.demand_met_pct,
            commitments_met_pct = kpis.commitments_met_pct,
            total_spillage = kpis.total_spillage,
            storage_min_violations = kpis.storage_min_violations,
            "排程流程完成"
        );

        RunResult {
            run_id,
            created_at: Utc::now(),
            request,
            multipliers,
            inputs,
            schedule,
            kpis,
            fact_table,
        }
    }
}

impl Default for RunOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}
