// ==========================================
// 水库下泄排程系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: 内存 key-value（global scope），以 JSON 快照落盘/恢复
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::run_config_trait::RunConfigReader;
use crate::config::scenario_profile::ScenarioProfile;
use crate::domain::reservoir::{ReservoirParameters, ScenarioPercentages};
use crate::engine::RunRequest;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// 情景配置 key 前缀
const SCENARIO_PROFILE_PREFIX: &str = "scenario_profile/";

/// 快照中的元信息 key 前缀（不回写）
const META_PREFIX: &str = "__meta_";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: BTreeMap<String, String>,
}

impl ConfigManager {
    /// 创建空配置（全部取默认值）
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 快照创建
    pub fn from_snapshot_json(snapshot_json: &str) -> ConfigResult<Self> {
        let mut manager = Self::new();
        manager.restore_config_from_snapshot(snapshot_json)?;
        Ok(manager)
    }

    /// 从 JSON 快照文件创建
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "加载配置快照");
        Self::from_snapshot_json(&raw)
    }

    /// 读取 global scope 的配置值
    pub fn get_global_config_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// 写入单项配置
    pub fn set_config_value(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// 获取所有配置的快照（JSON格式，key 有序）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string(&self.values)?)
    }

    /// 从配置快照恢复配置
    ///
    /// # 返回
    /// - Ok(usize): 恢复的配置项数量
    ///
    /// # 注意
    /// - 覆盖同名配置，保留快照中没有的项
    /// - 值可以是 JSON 字符串或数字/布尔，统一按文本存储
    pub fn restore_config_from_snapshot(&mut self, snapshot_json: &str) -> ConfigResult<usize> {
        let config_map: BTreeMap<String, serde_json::Value> = serde_json::from_str(snapshot_json)?;

        let mut count = 0;
        for (key, value) in config_map {
            if key.starts_with(META_PREFIX) {
                continue;
            }
            let text = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            self.values.insert(key, text);
            count += 1;
        }
        Ok(count)
    }

    /// 读取预设情景（存储于 scenario_profile/{profile_id}）
    pub fn get_scenario_profile(&self, profile_id: &str) -> ConfigResult<Option<ScenarioProfile>> {
        let id = profile_id.trim();
        if id.is_empty() {
            return Ok(None);
        }

        let key = format!("{}{}", SCENARIO_PROFILE_PREFIX, id);
        match self.values.get(&key) {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    /// 列出全部预设情景 ID
    pub fn list_scenario_profiles(&self) -> Vec<String> {
        self.values
            .keys()
            .filter_map(|k| k.strip_prefix(SCENARIO_PROFILE_PREFIX))
            .map(str::to_string)
            .collect()
    }

    /// 组装运行请求，并叠加指定情景
    pub fn to_run_request_with_profile(&self, profile_id: &str) -> ConfigResult<RunRequest> {
        let profile = self
            .get_scenario_profile(profile_id)?
            .ok_or_else(|| ConfigError::ProfileNotFound(profile_id.to_string()))?;
        let mut request = self.to_run_request()?;
        request.percentages = profile.overlay(request.percentages);
        Ok(request)
    }

    /// CSV 导出目录
    pub fn get_output_dir(&self) -> PathBuf {
        PathBuf::from(
            self.get_global_config_value(config_keys::OUTPUT_DIR)
                .unwrap_or(defaults::OUTPUT_DIR),
        )
    }

    /// 读取并解析，缺失时取默认值
    fn get_parsed_or_default<T: FromStr>(&self, key: &str, default: T) -> ConfigResult<T>
    where
        T::Err: std::fmt::Display,
    {
        match self.values.get(key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::ConfigValueError {
                key: key.to_string(),
                value: raw.clone(),
                message: e.to_string(),
            }),
        }
    }

    fn get_f64_or_default(&self, key: &str, default: f64) -> ConfigResult<f64> {
        let value = self.get_parsed_or_default(key, default)?;
        if !value.is_finite() {
            return Err(ConfigError::ConfigValueError {
                key: key.to_string(),
                value: value.to_string(),
                message: "必须为有限数值".to_string(),
            });
        }
        Ok(value)
    }
}

impl RunConfigReader for ConfigManager {
    fn get_horizon_hours(&self) -> ConfigResult<usize> {
        self.get_parsed_or_default(config_keys::HORIZON_HOURS, defaults::HORIZON_HOURS)
    }

    fn get_seed(&self) -> ConfigResult<u64> {
        self.get_parsed_or_default(config_keys::SEED, defaults::SEED)
    }

    fn get_reservoir_parameters(&self) -> ConfigResult<ReservoirParameters> {
        let d = ReservoirParameters::default();
        Ok(ReservoirParameters {
            storage_start: self.get_f64_or_default(config_keys::STORAGE_START, d.storage_start)?,
            storage_min: self.get_f64_or_default(config_keys::STORAGE_MIN, d.storage_min)?,
            storage_max: self.get_f64_or_default(config_keys::STORAGE_MAX, d.storage_max)?,
            max_release_per_hour: self
                .get_f64_or_default(config_keys::MAX_RELEASE_PER_HOUR, d.max_release_per_hour)?,
        })
    }

    fn get_scenario_percentages(&self) -> ConfigResult<ScenarioPercentages> {
        Ok(ScenarioPercentages {
            river_pct: self.get_f64_or_default(config_keys::RIVER_PCT, 0.0)?,
            upstream_pct: self.get_f64_or_default(config_keys::UPSTREAM_PCT, 0.0)?,
            demand_pct: self.get_f64_or_default(config_keys::DEMAND_PCT, 0.0)?,
            commitments_pct: self.get_f64_or_default(config_keys::COMMITMENTS_PCT, 0.0)?,
        })
    }
}

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    // 规划
    pub const HORIZON_HOURS: &str = "horizon_hours";
    pub const SEED: &str = "seed";

    // 水库约束
    pub const STORAGE_START: &str = "storage_start";
    pub const STORAGE_MIN: &str = "storage_min";
    pub const STORAGE_MAX: &str = "storage_max";
    pub const MAX_RELEASE_PER_HOUR: &str = "max_release_per_hour";

    // 情景调整 (%)
    pub const RIVER_PCT: &str = "river_pct";
    pub const UPSTREAM_PCT: &str = "upstream_pct";
    pub const DEMAND_PCT: &str = "demand_pct";
    pub const COMMITMENTS_PCT: &str = "commitments_pct";

    // 导出
    pub const OUTPUT_DIR: &str = "output_dir";
}

mod defaults {
    pub const HORIZON_HOURS: usize = 120;
    pub const SEED: u64 = crate::engine::scenario_generator::DEFAULT_SEED;
    pub const OUTPUT_DIR: &str = "output";
}
