// ==========================================
// 水库下泄排程系统 - 核心库
// ==========================================
// 技术栈: Rust + CSV
// 系统定位: 决策支持系统 (人工最终控制权)
// 流程: 情景生成 → 逐小时下泄分配 → KPI / 事实表 → CSV 导出
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 情景生成、下泄分配、KPI
pub mod engine;

// 导出层 - CSV
pub mod export;

// 配置层 - 运行参数与预设情景
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Horizon, InputColumn};

// 领域实体
pub use domain::{
    FactRow, KpiSummary, ReservoirParameters, ScenarioMultipliers, ScenarioPercentages, Schedule,
    ScheduleRow, TimeSeries, TimeSeriesRow,
};

// 引擎
pub use engine::{
    allocate_schedule, compute_kpis, generate_inputs, AllocationEngine, KpiEngine,
    RunOrchestrator, RunRequest, RunResult, ScenarioGenerator,
};

// API
pub use api::{ScheduleApi, ValidationMode};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "水库下泄排程系统";
