// ==========================================
// 水库下泄排程系统 - 水库参数与情景系数
// ==========================================
// 红线: 引擎不校验参数（storage_min <= storage_max 由调用方保证）
// 校验入口: api::validator
// ==========================================

use crate::domain::timeseries::{TimeSeries, TimeSeriesRow};
use serde::{Deserialize, Serialize};

// ==========================================
// ReservoirParameters - 水库约束参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReservoirParameters {
    pub storage_start: f64,        // 起始库容
    pub storage_min: f64,          // 最低库容
    pub storage_max: f64,          // 最高库容
    pub max_release_per_hour: f64, // 单小时下泄上限
}

impl Default for ReservoirParameters {
    fn default() -> Self {
        Self {
            storage_start: 5000.0,
            storage_min: 2000.0,
            storage_max: 9000.0,
            max_release_per_hour: 600.0,
        }
    }
}

// ==========================================
// ScenarioPercentages - 情景调整百分比
// ==========================================
// 调用方输入口径: [-30, +30]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPercentages {
    pub river_pct: f64,
    pub upstream_pct: f64,
    pub demand_pct: f64,
    pub commitments_pct: f64,
}

impl ScenarioPercentages {
    /// 调用方允许的百分比下限
    pub const MIN_PCT: f64 = -30.0;
    /// 调用方允许的百分比上限
    pub const MAX_PCT: f64 = 30.0;
}

// ==========================================
// ScenarioMultipliers - 情景系数
// ==========================================
// 以 1.0 为中心，在循环开始前统一作用于整段序列
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMultipliers {
    pub river: f64,
    pub upstream: f64,
    pub demand: f64,
    pub commitments: f64,
}

impl ScenarioMultipliers {
    /// 中性情景（全部为 1.0）
    pub fn neutral() -> Self {
        Self {
            river: 1.0,
            upstream: 1.0,
            demand: 1.0,
            commitments: 1.0,
        }
    }

    /// 百分比 → 系数: 1 + pct/100
    pub fn from_percentages(pct: ScenarioPercentages) -> Self {
        Self {
            river: 1.0 + pct.river_pct / 100.0,
            upstream: 1.0 + pct.upstream_pct / 100.0,
            demand: 1.0 + pct.demand_pct / 100.0,
            commitments: 1.0 + pct.commitments_pct / 100.0,
        }
    }

    /// 作用于单行
    pub fn apply_row(&self, row: &TimeSeriesRow) -> TimeSeriesRow {
        TimeSeriesRow {
            timestamp: row.timestamp,
            inflow_river: row.inflow_river * self.river,
            upstream_release_1: row.upstream_release_1 * self.upstream,
            upstream_release_2: row.upstream_release_2 * self.upstream,
            demand_1: row.demand_1 * self.demand,
            demand_2: row.demand_2 * self.demand,
            commitment_min_1: row.commitment_min_1 * self.commitments,
            commitment_min_2: row.commitment_min_2 * self.commitments,
        }
    }

    /// 作用于整段序列（返回新序列，原序列不变）
    pub fn apply(&self, inputs: &TimeSeries) -> TimeSeries {
        inputs.iter().map(|r| self.apply_row(r)).collect()
    }
}

impl Default for ScenarioMultipliers {
    fn default() -> Self {
        Self::neutral()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_percentages() {
        let m = ScenarioMultipliers::from_percentages(ScenarioPercentages {
            river_pct: -30.0,
            upstream_pct: 10.0,
            demand_pct: 0.0,
            commitments_pct: 30.0,
        });
        assert!((m.river - 0.7).abs() < 1e-12);
        assert!((m.upstream - 1.1).abs() < 1e-12);
        assert_eq!(m.demand, 1.0);
        assert!((m.commitments - 1.3).abs() < 1e-12);
    }

    #[test]
    fn test_neutral_is_default() {
        assert_eq!(ScenarioMultipliers::default(), ScenarioMultipliers::neutral());
        assert_eq!(
            ScenarioMultipliers::from_percentages(ScenarioPercentages::default()),
            ScenarioMultipliers::neutral()
        );
    }
}
