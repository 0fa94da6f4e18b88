// ==========================================
// 水库下泄排程系统 - 逐小时下泄分配引擎
// ==========================================
// 红线: 刚性承诺优先于需水; 单小时下泄不超过上限
// ==========================================
// 职责: 情景系数预处理 + 逐小时贪心分配 + 库容递推
// 输入: TimeSeries + ReservoirParameters + ScenarioMultipliers
// 输出: Schedule（每小时一行，顺序与输入一致）
// 状态: 仅当前库容在小时间传递
// ==========================================

use crate::domain::reservoir::{ReservoirParameters, ScenarioMultipliers};
use crate::domain::schedule::{Schedule, ScheduleRow};
use crate::domain::timeseries::{TimeSeries, TimeSeriesRow};
use tracing::{debug, info, instrument, warn};

/// 除零保护阈值
pub const EPS: f64 = 1e-6;

// ==========================================
// 按预算等比缩放
// ==========================================

/// 将一组非负量缩放到预算以内并保持比例
///
/// - 合计 <= 预算: 原样返回
/// - 合计 ≈ 0: 全部返回 0
/// - 否则: 全部乘以 budget / 合计
///
/// 承诺短缺缩减、需水公平配给、下泄上限缩减三处共用
pub fn scale_to_budget<const N: usize>(quantities: [f64; N], budget: f64) -> [f64; N] {
    let total: f64 = quantities.iter().sum();
    if total <= budget {
        return quantities;
    }
    if total < EPS {
        return [0.0; N];
    }
    let scale = budget / total;
    quantities.map(|q| q * scale)
}

// ==========================================
// AllocationEngine - 下泄分配引擎
// ==========================================
pub struct AllocationEngine {
    // 无状态引擎，不需要注入依赖
}

impl AllocationEngine {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 生成整段排程
    ///
    /// 规则：
    /// 1) 情景系数在循环开始前统一作用于整段输入
    /// 2) 逐小时调用 `allocate_hour`，上一小时 storage_end 即本小时起始库容
    ///
    /// 参数不做校验（storage_min > storage_max 等情形行为未定义）
    #[instrument(skip(self, inputs, params, multipliers), fields(
        hours = inputs.len(),
        storage_start = params.storage_start,
        max_release_per_hour = params.max_release_per_hour
    ))]
    pub fn allocate(
        &self,
        inputs: &TimeSeries,
        params: &ReservoirParameters,
        multipliers: &ScenarioMultipliers,
    ) -> Schedule {
        let adjusted = multipliers.apply(inputs);

        let mut rows = Vec::with_capacity(adjusted.len());
        let mut storage = params.storage_start;
        for row in adjusted.iter() {
            let out = self.allocate_hour(row, storage, params);
            storage = out.storage_end;
            rows.push(out);
        }

        let schedule = Schedule::new(rows);
        info!(
            final_storage = storage,
            total_spillage = schedule.total_spillage(),
            violations = schedule.violation_count(),
            "排程计算完成"
        );
        schedule
    }

    /// 单小时分配
    ///
    /// # 参数
    /// - `row`: 已作用情景系数的本小时输入
    /// - `storage`: 本小时起始库容
    /// - `params`: 水库约束
    ///
    /// # 返回
    /// 本小时排程行，其 storage_end 为下一小时起始库容
    pub fn allocate_hour(
        &self,
        row: &TimeSeriesRow,
        storage: f64,
        params: &ReservoirParameters,
    ) -> ScheduleRow {
        let inflow_total = row.inflow_total();

        // 只有最低库容以上的部分可用于本小时下泄
        let usable_storage = (storage - params.storage_min).max(0.0);
        let available = inflow_total + usable_storage;

        let commitments = [row.commitment_min_1, row.commitment_min_2];
        let commitment_sum = commitments[0] + commitments[1];

        // 1. 刚性承诺优先; 2. 剩余水量按比例分给需水
        let (commitment_out, demand_out) = if available < commitment_sum {
            debug!(
                timestamp = %row.timestamp,
                available,
                commitment_sum,
                "来水不足以满足承诺，承诺按比例缩减"
            );
            (scale_to_budget(commitments, available), [0.0, 0.0])
        } else {
            let remaining = available - commitment_sum;
            let demands = [row.demand_1, row.demand_2];
            if remaining < demands[0] + demands[1] {
                debug!(
                    timestamp = %row.timestamp,
                    remaining,
                    demand_sum = demands[0] + demands[1],
                    "需水按比例配给"
                );
            }
            (commitments, scale_to_budget(demands, remaining))
        };

        // 3. 单小时下泄上限，四个分支等比缩减
        let requested = [
            demand_out[0],
            demand_out[1],
            commitment_out[0],
            commitment_out[1],
        ];
        let requested_total: f64 = requested.iter().sum();
        let (released, release_total) = if requested_total > params.max_release_per_hour {
            debug!(
                timestamp = %row.timestamp,
                requested_total,
                cap = params.max_release_per_hour,
                "下泄超过上限，等比缩减"
            );
            (
                scale_to_budget(requested, params.max_release_per_hour),
                params.max_release_per_hour,
            )
        } else {
            (requested, requested_total)
        };

        // 4. 库容递推: 先处理弃水，再处理最低库容
        let mut storage_next = storage + inflow_total - release_total;
        let mut spillage = 0.0;
        if storage_next > params.storage_max {
            spillage = storage_next - params.storage_max;
            storage_next = params.storage_max;
        }

        let violation_storage_min = storage_next < params.storage_min;
        if violation_storage_min {
            warn!(
                timestamp = %row.timestamp,
                storage_next,
                storage_min = params.storage_min,
                "库容跌破最低库容，钳位后继续推演"
            );
            // 钳位后继续，不向后续小时传递缺口
            storage_next = params.storage_min;
        }

        ScheduleRow {
            timestamp: row.timestamp,
            inflow_total,
            release_demand_1: released[0],
            release_demand_2: released[1],
            release_commitment_1: released[2],
            release_commitment_2: released[3],
            release_total,
            storage_end: storage_next,
            spillage,
            violation_storage_min,
        }
    }
}

impl Default for AllocationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// 生成排程（外部调用入口）
pub fn allocate_schedule(
    inputs: &TimeSeries,
    storage_start: f64,
    storage_min: f64,
    storage_max: f64,
    max_release_per_hour: f64,
    scenario_multipliers: &ScenarioMultipliers,
) -> Schedule {
    let params = ReservoirParameters {
        storage_start,
        storage_min,
        storage_max,
        max_release_per_hour,
    };
    AllocationEngine::new().allocate(inputs, &params, scenario_multipliers)
}
