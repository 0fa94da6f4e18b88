// ==========================================
// 水库下泄排程系统 - 排程结果领域模型
// ==========================================
// 用途: 分配引擎逐小时输出
// 生命周期: 严格按时间顺序计算, storage_end 作为下一小时起始库容
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// ScheduleRow - 单小时排程
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub timestamp: NaiveDateTime,
    pub inflow_total: f64, // 情景调整后的总来水

    // ===== 分支下泄 =====
    pub release_demand_1: f64,
    pub release_demand_2: f64,
    pub release_commitment_1: f64,
    pub release_commitment_2: f64,
    pub release_total: f64,

    // ===== 库容状态 =====
    pub storage_end: f64,
    pub spillage: f64,               // 超出最高库容被迫弃水
    pub violation_storage_min: bool, // 本小时水量平衡跌破最低库容（已钳位）
}

impl ScheduleRow {
    /// 需水分支下泄合计
    pub fn demand_released(&self) -> f64 {
        self.release_demand_1 + self.release_demand_2
    }

    /// 承诺分支下泄合计
    pub fn commitment_released(&self) -> f64 {
        self.release_commitment_1 + self.release_commitment_2
    }
}

// ==========================================
// Schedule - 有序排程表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    rows: Vec<ScheduleRow>,
}

impl Schedule {
    pub fn new(rows: Vec<ScheduleRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ScheduleRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduleRow> {
        self.rows.iter()
    }

    /// 末小时库容（空排程返回 None）
    pub fn final_storage(&self) -> Option<f64> {
        self.rows.last().map(|r| r.storage_end)
    }

    pub fn total_spillage(&self) -> f64 {
        self.rows.iter().map(|r| r.spillage).sum()
    }

    pub fn violation_count(&self) -> usize {
        self.rows.iter().filter(|r| r.violation_storage_min).count()
    }

    pub fn demand_released(&self) -> f64 {
        self.rows.iter().map(ScheduleRow::demand_released).sum()
    }

    pub fn commitment_released(&self) -> f64 {
        self.rows.iter().map(ScheduleRow::commitment_released).sum()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ScheduleRow;
    type IntoIter = std::slice::Iter<'a, ScheduleRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
