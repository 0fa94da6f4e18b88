// ==========================================
// 水库下泄排程系统 - 情景生成器
// ==========================================
// 职责: 生成合成的逐小时输入序列（来水/上游下泄/需水/承诺）
// 输入: 规划时长 + 基础随机种子
// 输出: TimeSeries（起点为当前整点，逐小时）
// 红线: 同一 (起点, 时长, 种子) 必须得到完全相同的序列
// ==========================================

use crate::domain::timeseries::{TimeSeries, TimeSeriesRow};
use chrono::{Duration, Local, NaiveDateTime, Timelike};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;
use tracing::instrument;

/// 默认基础种子
pub const DEFAULT_SEED: u64 = 7;

// 日内波动形态
const SIGNAL_BASELINE: f64 = 120.0;
const SIGNAL_AMPLITUDE: f64 = 30.0;
const SIGNAL_NOISE_STD: f64 = 6.0;
const PHASE_SWEEP: f64 = 3.0 * PI;

// 两个需水点对驱动序列的拆分比例
const DEMAND_SPLIT_1: f64 = 0.55;
const DEMAND_SPLIT_2: f64 = 0.45;

// 刚性承诺（平直，不随机）
const COMMITMENT_MIN_1: f64 = 40.0; // 生态基流
const COMMITMENT_MIN_2: f64 = 35.0; // 下游承诺

// ==========================================
// RawSignal - 原始信号（各自派生种子）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RawSignal {
    InflowRiver,
    UpstreamRelease1,
    UpstreamRelease2,
    DemandDriver1,
    DemandDriver2,
}

impl RawSignal {
    /// 派生种子偏移 = 基础种子 + offset
    fn seed_offset(self) -> u64 {
        match self {
            RawSignal::InflowRiver => 0,
            RawSignal::UpstreamRelease1 => 1,
            RawSignal::UpstreamRelease2 => 2,
            RawSignal::DemandDriver1 => 3,
            RawSignal::DemandDriver2 => 4,
        }
    }
}

// ==========================================
// ScenarioGenerator - 情景生成器
// ==========================================
pub struct ScenarioGenerator {
    // 无状态生成器
}

impl ScenarioGenerator {
    pub fn new() -> Self {
        Self {}
    }

    /// 以当前整点为起点生成输入序列
    pub fn generate(&self, horizon_hours: usize, seed: u64) -> TimeSeries {
        self.generate_at(current_hour(), horizon_hours, seed)
    }

    /// 以指定起点生成输入序列
    ///
    /// # 参数
    /// - `start`: 首小时时刻
    /// - `horizon_hours`: 小时数（0 → 空序列）
    /// - `seed`: 基础种子，五路信号分别使用 seed+0..seed+4
    #[instrument(skip(self, start), fields(start = %start))]
    pub fn generate_at(
        &self,
        start: NaiveDateTime,
        horizon_hours: usize,
        seed: u64,
    ) -> TimeSeries {
        let inflow = diurnal_signal(horizon_hours, derive_seed(seed, RawSignal::InflowRiver));
        let upstream_1 =
            diurnal_signal(horizon_hours, derive_seed(seed, RawSignal::UpstreamRelease1));
        let upstream_2 =
            diurnal_signal(horizon_hours, derive_seed(seed, RawSignal::UpstreamRelease2));
        let driver_1 = diurnal_signal(horizon_hours, derive_seed(seed, RawSignal::DemandDriver1));
        let driver_2 = diurnal_signal(horizon_hours, derive_seed(seed, RawSignal::DemandDriver2));

        (0..horizon_hours)
            .map(|i| TimeSeriesRow {
                timestamp: start + Duration::hours(i as i64),
                inflow_river: inflow[i],
                upstream_release_1: upstream_1[i],
                upstream_release_2: upstream_2[i],
                demand_1: driver_1[i] * DEMAND_SPLIT_1,
                demand_2: driver_2[i] * DEMAND_SPLIT_2,
                commitment_min_1: COMMITMENT_MIN_1,
                commitment_min_2: COMMITMENT_MIN_2,
            })
            .collect()
    }
}

impl Default for ScenarioGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// 生成输入序列（起点 = 当前整点）
pub fn generate_inputs(horizon_hours: usize, seed: u64) -> TimeSeries {
    ScenarioGenerator::new().generate(horizon_hours, seed)
}

/// 生成输入序列（指定起点）
pub fn generate_inputs_at(start: NaiveDateTime, horizon_hours: usize, seed: u64) -> TimeSeries {
    ScenarioGenerator::new().generate_at(start, horizon_hours, seed)
}

/// 当前本地时间向下取整到小时
pub fn current_hour() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.date().and_hms_opt(now.hour(), 0, 0).unwrap_or(now)
}

fn derive_seed(base: u64, signal: RawSignal) -> u64 {
    base.wrapping_add(signal.seed_offset())
}

/// amplitude·sin(φ) + baseline + N(0, σ)，φ 在 [0, 3π] 上线性扫过，负值截断为 0
fn diurnal_signal(hours: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    // σ 为正的常量，构造不会失败
    let noise = Normal::new(0.0, SIGNAL_NOISE_STD).expect("SIGNAL_NOISE_STD 必须为正");
    let step = if hours > 1 {
        PHASE_SWEEP / (hours - 1) as f64
    } else {
        0.0
    };

    (0..hours)
        .map(|i| {
            let phase = step * i as f64;
            (SIGNAL_AMPLITUDE * phase.sin() + SIGNAL_BASELINE + noise.sample(&mut rng)).max(0.0)
        })
        .collect()
}
