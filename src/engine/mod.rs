// ==========================================
// 水库下泄排程系统 - 引擎层
// ==========================================
// 职责: 情景生成、逐小时下泄分配、KPI 汇总、事实表、流程编排
// 红线: 引擎不做 I/O, 不校验参数, 不抛错误
// ==========================================

pub mod allocation;
pub mod fact_table;
pub mod kpi;
pub mod orchestrator;
pub mod scenario_generator;

// 重导出核心引擎
pub use allocation::{allocate_schedule, scale_to_budget, AllocationEngine, EPS};
pub use fact_table::build_fact_table;
pub use kpi::{compute_kpis, KpiEngine};
pub use orchestrator::{RunOrchestrator, RunRequest, RunResult};
pub use scenario_generator::{generate_inputs, generate_inputs_at, ScenarioGenerator};
