// ==========================================
// 水库下泄排程系统 - 运行配置读取 Trait
// ==========================================
// 职责: 定义一次排程运行所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::error::ConfigError;
use crate::domain::reservoir::{ReservoirParameters, ScenarioPercentages};
use crate::engine::RunRequest;

// ==========================================
// RunConfigReader Trait
// ==========================================
// 实现者: ConfigManager（内存 key-value，JSON 快照）
pub trait RunConfigReader {
    /// 规划时长（小时）
    ///
    /// # 默认值
    /// - 120
    fn get_horizon_hours(&self) -> Result<usize, ConfigError>;

    /// 情景生成基础种子
    ///
    /// # 默认值
    /// - 7
    fn get_seed(&self) -> Result<u64, ConfigError>;

    /// 水库约束参数
    ///
    /// # 默认值
    /// - 5000 / 2000 / 9000 / 600
    fn get_reservoir_parameters(&self) -> Result<ReservoirParameters, ConfigError>;

    /// 情景调整百分比（四项默认均为 0）
    fn get_scenario_percentages(&self) -> Result<ScenarioPercentages, ConfigError>;

    /// 组装运行请求（起点取当前整点）
    fn to_run_request(&self) -> Result<RunRequest, ConfigError> {
        Ok(RunRequest {
            horizon_hours: self.get_horizon_hours()?,
            seed: self.get_seed()?,
            params: self.get_reservoir_parameters()?,
            percentages: self.get_scenario_percentages()?,
            start: None,
        })
    }
}
