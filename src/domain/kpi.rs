// ==========================================
// 水库下泄排程系统 - KPI / 事实表领域模型
// ==========================================
// 红线: 派生数据，不持久化，每次按需重算
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 排程汇总指标
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub demand_met_pct: f64,
    pub commitments_met_pct: f64,
    pub total_spillage: f64,
    pub storage_min_violations: usize,
}

/// MIS 逐小时事实表行
///
/// 排程输出 + 请求量 + 分支满足率
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactRow {
    pub timestamp: NaiveDateTime,
    pub inflow_total: f64,
    pub release_demand_1: f64,
    pub release_demand_2: f64,
    pub release_commitment_1: f64,
    pub release_commitment_2: f64,
    pub release_total: f64,
    pub storage_end: f64,
    pub spillage: f64,
    pub violation_storage_min: bool,

    // ===== 请求量 =====
    pub demand_1: f64,
    pub demand_2: f64,
    pub commitment_1: f64,
    pub commitment_2: f64,

    // ===== 满足率 (%) =====
    pub demand_met_1_pct: f64,
    pub demand_met_2_pct: f64,
    pub commitment_met_1_pct: f64,
    pub commitment_met_2_pct: f64,
}
