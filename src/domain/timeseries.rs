// ==========================================
// 水库下泄排程系统 - 输入时间序列领域模型
// ==========================================
// 用途: 情景生成器输出 / 分配引擎输入
// 不变量: 所有流量非负; 逐小时等间隔
// ==========================================

use crate::domain::types::InputColumn;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// TimeSeriesRow - 单小时输入
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesRow {
    pub timestamp: NaiveDateTime, // 整点时刻

    // ===== 来水 =====
    pub inflow_river: f64,       // 河道来水
    pub upstream_release_1: f64, // 上游水库下泄 1
    pub upstream_release_2: f64, // 上游水库下泄 2

    // ===== 需水 =====
    pub demand_1: f64, // 需水点 1
    pub demand_2: f64, // 需水点 2

    // ===== 刚性承诺 =====
    pub commitment_min_1: f64, // 生态基流
    pub commitment_min_2: f64, // 下游承诺
}

impl TimeSeriesRow {
    /// 本小时总来水
    pub fn inflow_total(&self) -> f64 {
        self.inflow_river + self.upstream_release_1 + self.upstream_release_2
    }

    /// 按列名读取
    pub fn value(&self, column: InputColumn) -> f64 {
        match column {
            InputColumn::InflowRiver => self.inflow_river,
            InputColumn::UpstreamRelease1 => self.upstream_release_1,
            InputColumn::UpstreamRelease2 => self.upstream_release_2,
            InputColumn::Demand1 => self.demand_1,
            InputColumn::Demand2 => self.demand_2,
            InputColumn::CommitmentMin1 => self.commitment_min_1,
            InputColumn::CommitmentMin2 => self.commitment_min_2,
        }
    }
}

// ==========================================
// TimeSeries - 有序输入序列
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    rows: Vec<TimeSeriesRow>,
}

impl TimeSeries {
    pub fn new(rows: Vec<TimeSeriesRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[TimeSeriesRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<TimeSeriesRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimeSeriesRow> {
        self.rows.iter()
    }

    /// 抽取单列序列（流域图元素查看）
    pub fn column(&self, column: InputColumn) -> Vec<f64> {
        self.rows.iter().map(|r| r.value(column)).collect()
    }

    /// 全时段需水总量
    pub fn total_demand(&self) -> f64 {
        self.rows.iter().map(|r| r.demand_1 + r.demand_2).sum()
    }

    /// 全时段承诺总量
    pub fn total_commitment(&self) -> f64 {
        self.rows
            .iter()
            .map(|r| r.commitment_min_1 + r.commitment_min_2)
            .sum()
    }
}

impl From<Vec<TimeSeriesRow>> for TimeSeries {
    fn from(rows: Vec<TimeSeriesRow>) -> Self {
        Self::new(rows)
    }
}

impl FromIterator<TimeSeriesRow> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = TimeSeriesRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a TimeSeriesRow;
    type IntoIter = std::slice::Iter<'a, TimeSeriesRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
