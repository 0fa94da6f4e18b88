// ==========================================
// 水库下泄排程系统 - 领域类型定义
// ==========================================
// 职责: 规划时段、输入序列列名等枚举类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 规划时段 (Horizon)
// ==========================================
// 调用方只能从有限枚举中选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Horizon {
    Hours24,  // 24 小时
    Hours72,  // 72 小时
    Hours120, // 5 天
}

impl Horizon {
    /// 全部可选时段（按时长升序）
    pub const ALL: [Horizon; 3] = [Horizon::Hours24, Horizon::Hours72, Horizon::Hours120];

    /// 时段对应的小时数
    pub fn hours(&self) -> usize {
        match self {
            Horizon::Hours24 => 24,
            Horizon::Hours72 => 72,
            Horizon::Hours120 => 120,
        }
    }

    /// 显示标签
    pub fn label(&self) -> &'static str {
        match self {
            Horizon::Hours24 => "24 hours",
            Horizon::Hours72 => "72 hours",
            Horizon::Hours120 => "5 days (120h)",
        }
    }

    /// 从小时数解析（仅接受枚举内的值）
    pub fn from_hours(hours: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.hours() == hours)
    }
}

impl Default for Horizon {
    fn default() -> Self {
        Horizon::Hours120
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Horizon {
    type Err = String;

    /// 接受小时数（"72" / "72h"）或显示标签
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        if let Some(h) = Self::ALL.into_iter().find(|h| h.label().to_lowercase() == key) {
            return Ok(h);
        }
        key.trim_end_matches('h')
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(Self::from_hours)
            .ok_or_else(|| format!("未知规划时段: {}", s))
    }
}

// ==========================================
// 输入序列列名 (Input Column)
// ==========================================
// 序列化格式: snake_case (与 CSV 表头一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputColumn {
    InflowRiver,
    UpstreamRelease1,
    UpstreamRelease2,
    Demand1,
    Demand2,
    CommitmentMin1,
    CommitmentMin2,
}

impl InputColumn {
    pub const ALL: [InputColumn; 7] = [
        InputColumn::InflowRiver,
        InputColumn::UpstreamRelease1,
        InputColumn::UpstreamRelease2,
        InputColumn::Demand1,
        InputColumn::Demand2,
        InputColumn::CommitmentMin1,
        InputColumn::CommitmentMin2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InputColumn::InflowRiver => "inflow_river",
            InputColumn::UpstreamRelease1 => "upstream_release_1",
            InputColumn::UpstreamRelease2 => "upstream_release_2",
            InputColumn::Demand1 => "demand_1",
            InputColumn::Demand2 => "demand_2",
            InputColumn::CommitmentMin1 => "commitment_min_1",
            InputColumn::CommitmentMin2 => "commitment_min_2",
        }
    }
}

impl fmt::Display for InputColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InputColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == key)
            .ok_or_else(|| format!("未知输入列: {}", s))
    }
}
