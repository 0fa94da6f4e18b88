// ==========================================
// 水库下泄排程系统 - KPI 汇总引擎
// ==========================================
// 职责: 基于输入序列与排程计算汇总指标
// 输入: TimeSeries（请求量口径） + Schedule
// 输出: KpiSummary
// ==========================================

use crate::domain::kpi::KpiSummary;
use crate::domain::schedule::Schedule;
use crate::domain::timeseries::TimeSeries;
use crate::engine::allocation::EPS;

// ==========================================
// KpiEngine - KPI 汇总引擎
// ==========================================
// 红线: 无状态引擎,所有方法都是纯函数
pub struct KpiEngine;

impl KpiEngine {
    pub fn new() -> Self {
        Self
    }

    /// 计算汇总指标
    ///
    /// 满足率 = 100 × 实际下泄合计 / (请求合计 + 1e-6)。
    /// 请求合计为 0 时结果有限但无业务含义。
    pub fn compute(&self, inputs: &TimeSeries, schedule: &Schedule) -> KpiSummary {
        KpiSummary {
            demand_met_pct: met_pct(schedule.demand_released(), inputs.total_demand()),
            commitments_met_pct: met_pct(
                schedule.commitment_released(),
                inputs.total_commitment(),
            ),
            total_spillage: schedule.total_spillage(),
            storage_min_violations: schedule.violation_count(),
        }
    }
}

impl Default for KpiEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// 计算汇总指标（外部调用入口）
pub fn compute_kpis(inputs: &TimeSeries, schedule: &Schedule) -> KpiSummary {
    KpiEngine::new().compute(inputs, schedule)
}

pub(crate) fn met_pct(released: f64, requested: f64) -> f64 {
    100.0 * released / (requested + EPS)
}
