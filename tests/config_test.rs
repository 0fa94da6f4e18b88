// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 配置文件加载、快照恢复、预设情景、错误报告
// ==========================================


use reservoir_dss::config::{config_keys, ConfigError, ConfigManager, RunConfigReader};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn write_config(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(json.as_bytes()).expect("Failed to write config");
    file
}

#[test]
fn test_load_from_path() {
    let file = write_config(
        r#"{
            "horizon_hours": "72",
            "seed": 11,
            "storage_start": 4200,
            "max_release_per_hour": 450.5,
            "river_pct": -15,
            "output_dir": "out/dry"
        }"#,
    );

    let cm = ConfigManager::from_path(file.path()).expect("Failed to load config");
    let req = cm.to_run_request().unwrap();
    assert_eq!(req.horizon_hours, 72);
    assert_eq!(req.seed, 11);
    assert_eq!(req.params.storage_start, 4200.0);
    assert_eq!(req.params.storage_min, 2000.0);
    assert_eq!(req.params.max_release_per_hour, 450.5);
    assert_eq!(req.percentages.river_pct, -15.0);
    assert_eq!(req.start, None);
    assert_eq!(cm.get_output_dir(), PathBuf::from("out/dry"));
}

#[test]
fn test_missing_file_reports_path() {
    let err = ConfigManager::from_path(std::path::Path::new("/nonexistent/reservoir.json"))
        .unwrap_err();
    match err {
        ConfigError::FileReadError { path, .. } => assert!(path.contains("reservoir.json")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_malformed_snapshot_rejected() {
    let file = write_config("{ not json");
    assert!(matches!(
        ConfigManager::from_path(file.path()),
        Err(ConfigError::SnapshotParseError(_))
    ));
}

#[test]
fn test_restore_overrides_and_counts() {
    let mut cm = ConfigManager::new();
    cm.set_config_value(config_keys::SEED, "3");
    cm.set_config_value(config_keys::DEMAND_PCT, "10");

    let restored = cm
        .restore_config_from_snapshot(r#"{"seed": 5, "__meta_saved_by": "ops"}"#)
        .unwrap();
    assert_eq!(restored, 1);
    assert_eq!(cm.get_seed().unwrap(), 5);
    assert_eq!(cm.get_scenario_percentages().unwrap().demand_pct, 10.0);

    let snapshot = cm.get_config_snapshot().unwrap();
    assert!(snapshot.contains("\"seed\":\"5\""));
    assert!(!snapshot.contains("__meta_"));
}

#[test]
fn test_scenario_profile_from_file() {
    let file = write_config(
        r#"{
            "demand_pct": 5,
            "scenario_profile/drought": "{\"profile_id\":\"drought\",\"title\":\"干旱\",\"adjustments\":{\"river_pct\":-30,\"upstream_pct\":-30}}"
        }"#,
    );
    let cm = ConfigManager::from_path(file.path()).unwrap();
    let profile = cm.get_scenario_profile("drought").unwrap().unwrap();
    assert_eq!(profile.title, "干旱");

    let req = cm.to_run_request_with_profile("drought").unwrap();
    assert_eq!(req.percentages.river_pct, -30.0);
    assert_eq!(req.percentages.upstream_pct, -30.0);
    assert_eq!(req.percentages.demand_pct, 5.0);
    assert_eq!(req.percentages.commitments_pct, 0.0);
}

#[test]
fn test_invalid_number_names_key() {
    let mut cm = ConfigManager::new();
    cm.set_config_value(config_keys::HORIZON_HOURS, "five days");
    match cm.get_horizon_hours().unwrap_err() {
        ConfigError::ConfigValueError { key, value, .. } => {
            assert_eq!(key, "horizon_hours");
            assert_eq!(value, "five days");
        }
        other => panic!("unexpected error: {other}"),
    }
}
