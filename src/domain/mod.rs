// ==========================================
// 水库下泄排程系统 - 领域模型层
// ==========================================
// 职责: 定义输入序列、水库参数、排程结果、KPI 等实体与类型
// 红线: 不含引擎逻辑,不含导出逻辑
// ==========================================

pub mod kpi;
pub mod reservoir;
pub mod schedule;
pub mod timeseries;
pub mod types;

// 重导出核心类型
pub use kpi::{FactRow, KpiSummary};
pub use reservoir::{ReservoirParameters, ScenarioMultipliers, ScenarioPercentages};
pub use schedule::{Schedule, ScheduleRow};
pub use timeseries::{TimeSeries, TimeSeriesRow};
pub use types::{Horizon, InputColumn};
