// ==========================================
// 完整排程流程端到端测试
// ==========================================
// 职责: 验证 配置 → 校验 → 情景生成 → 分配 → KPI → 导出 的完整链路
// ==========================================


use reservoir_dss::api::{ApiError, ScheduleApi, ValidationMode};
use reservoir_dss::config::{config_keys, ConfigManager};
use reservoir_dss::domain::ScenarioMultipliers;
use reservoir_dss::engine::EPS;
use reservoir_dss::logging;
use tempfile::tempdir;
use test_helpers::{fixed_request, params, three_hour_inputs};

#[test]
fn test_full_flow_from_config_to_csv() {
    logging::init_test();

    let mut cm = ConfigManager::new();
    cm.set_config_value(config_keys::HORIZON_HOURS, "72");
    cm.set_config_value(config_keys::DEMAND_PCT, "15");
    cm.set_config_value(config_keys::RIVER_PCT, "-20");

    let api = ScheduleApi::new();
    let response = api
        .run_from_config(&cm, ValidationMode::Strict)
        .expect("run should succeed");
    assert!(response.ignored_violations.is_empty());
    let result = response.result;

    assert_eq!(result.inputs.len(), 72);
    assert_eq!(result.schedule.len(), 72);
    assert_eq!(result.fact_table.len(), 72);
    assert!((result.multipliers.demand - 1.15).abs() < 1e-12);
    assert!((result.multipliers.river - 0.8).abs() < 1e-12);

    for r in result.schedule.iter() {
        assert!(r.release_total <= result.request.params.max_release_per_hour + EPS);
        assert!(r.storage_end >= result.request.params.storage_min - EPS);
        assert!(r.storage_end <= result.request.params.storage_max + EPS);
    }

    let dir = tempdir().unwrap();
    let manifest = api.export_run(&result, dir.path()).unwrap();
    for path in [
        &manifest.inputs_path,
        &manifest.schedule_path,
        &manifest.fact_table_path,
        &manifest.kpi_path,
    ] {
        assert!(path.exists(), "missing {}", path.display());
    }
}

#[test]
fn test_fixed_start_runs_are_reproducible() {
    let api = ScheduleApi::new();
    let a = api.run(fixed_request(120), ValidationMode::Strict).unwrap().result;
    let b = api.run(fixed_request(120), ValidationMode::Strict).unwrap().result;
    assert_eq!(a.inputs, b.inputs);
    assert_eq!(a.schedule, b.schedule);
    assert_eq!(a.kpis, b.kpis);
    assert_eq!(a.fact_table, b.fact_table);
}

#[test]
fn test_external_inputs_path() {
    let mut request = fixed_request(3);
    request.params = params(150.0, 100.0, 1000.0, 1000.0);

    let result = ScheduleApi::new()
        .run_with_inputs(request, three_hour_inputs(), ValidationMode::Strict)
        .unwrap()
        .result;
    assert_eq!(result.multipliers, ScenarioMultipliers::neutral());
    let storages: Vec<f64> = result.schedule.iter().map(|r| r.storage_end).collect();
    assert_eq!(storages, vec![175.0, 100.0, 125.0]);
}

#[test]
fn test_strict_vs_lenient_on_out_of_range_start() {
    let mut request = fixed_request(24);
    request.params.storage_start = 1500.0; // 低于 storage_min 2000

    let api = ScheduleApi::new();
    match api.run(request.clone(), ValidationMode::Strict) {
        Err(ApiError::ValidationError { violations, .. }) => {
            assert_eq!(violations[0].field, "storage_start");
        }
        other => panic!(
            "expected validation error, got {:?}",
            other.map(|r| r.result.run_id)
        ),
    }

    // 宽松模式照常运行: 首小时无可动用库容，违规项随结果返回
    let response = api.run(request, ValidationMode::Lenient).unwrap();
    assert_eq!(response.result.schedule.len(), 24);
    assert_eq!(response.ignored_violations.len(), 1);
    assert_eq!(response.ignored_violations[0].field, "storage_start");
}

#[test]
fn test_strict_rejects_horizon_outside_selector() {
    let api = ScheduleApi::new();
    match api.run(fixed_request(48), ValidationMode::Strict) {
        Err(ApiError::ValidationError { violations, .. }) => {
            assert_eq!(violations.len(), 1);
            assert_eq!(violations[0].field, "horizon_hours");
        }
        other => panic!(
            "expected validation error, got {:?}",
            other.map(|r| r.result.schedule.len())
        ),
    }

    // 宽松模式按请求的小时数照常生成
    let response = api.run(fixed_request(48), ValidationMode::Lenient).unwrap();
    assert_eq!(response.result.schedule.len(), 48);
    assert_eq!(response.ignored_violations[0].field, "horizon_hours");
}

#[test]
fn test_export_failure_surfaces_as_api_error() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("occupied");
    std::fs::write(&blocker, "x").unwrap();

    let api = ScheduleApi::new();
    let result = api.run(fixed_request(24), ValidationMode::Strict).unwrap().result;
    match api.export_run(&result, &blocker) {
        Err(ApiError::ExportError(message)) => assert!(message.contains("occupied")),
        other => panic!("expected export error, got {:?}", other.map(|m| m.run_id)),
    }
}
