// ==========================================
// 水库下泄排程系统 - MIS 事实表引擎
// ==========================================
// 职责: 逐小时拼接请求量与下泄量，计算各分支满足率
// 输入: TimeSeries + Schedule（按行对齐，取较短者）
// 输出: Vec<FactRow>
// ==========================================

use crate::domain::kpi::FactRow;
use crate::domain::schedule::Schedule;
use crate::domain::timeseries::TimeSeries;
use crate::engine::kpi::met_pct;

/// 构建 MIS 事实表
pub fn build_fact_table(inputs: &TimeSeries, schedule: &Schedule) -> Vec<FactRow> {
    inputs
        .iter()
        .zip(schedule.iter())
        .map(|(input, s)| FactRow {
            timestamp: s.timestamp,
            inflow_total: s.inflow_total,
            release_demand_1: s.release_demand_1,
            release_demand_2: s.release_demand_2,
            release_commitment_1: s.release_commitment_1,
            release_commitment_2: s.release_commitment_2,
            release_total: s.release_total,
            storage_end: s.storage_end,
            spillage: s.spillage,
            violation_storage_min: s.violation_storage_min,
            demand_1: input.demand_1,
            demand_2: input.demand_2,
            commitment_1: input.commitment_min_1,
            commitment_2: input.commitment_min_2,
            demand_met_1_pct: met_pct(s.release_demand_1, input.demand_1),
            demand_met_2_pct: met_pct(s.release_demand_2, input.demand_2),
            commitment_met_1_pct: met_pct(s.release_commitment_1, input.commitment_min_1),
            commitment_met_2_pct: met_pct(s.release_commitment_2, input.commitment_min_2),
        })
        .collect()
}
