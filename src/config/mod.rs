// ==========================================
// 水库下泄排程系统 - 配置层
// ==========================================
// 职责: 运行参数与预设情景管理，支持 JSON 快照
// 存储: 内存 key-value（global scope）
// ==========================================

pub mod config_manager;
pub mod error;
pub mod run_config_trait;
pub mod scenario_profile;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use error::{ConfigError, ConfigResult};
pub use run_config_trait::RunConfigReader;
pub use scenario_profile::{ScenarioAdjustments, ScenarioProfile};
