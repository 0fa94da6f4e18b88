// ==========================================
// 水库下泄排程系统 - 命令行入口
// ==========================================
// 用法:
//   reservoir-dss [config.json] [output_dir] [profile_id]
//
// 未给出配置文件时全部取默认值；output_dir 缺省取配置项 output_dir
// ==========================================

use std::path::{Path, PathBuf};

use anyhow::Context;
use reservoir_dss::api::{ScheduleApi, ValidationMode};
use reservoir_dss::config::{ConfigManager, RunConfigReader};
use reservoir_dss::logging;

fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 决策支持系统", reservoir_dss::APP_NAME);
    tracing::info!("系统版本: {}", reservoir_dss::VERSION);
    tracing::info!("==================================================");

    let mut args = std::env::args().skip(1);
    let config_path = args.next().filter(|s| !s.trim().is_empty());
    let output_arg = args.next().filter(|s| !s.trim().is_empty());
    let profile_id = args.next().filter(|s| !s.trim().is_empty());

    let config = match &config_path {
        Some(path) => ConfigManager::from_path(Path::new(path))
            .with_context(|| format!("无法加载配置文件 {}", path))?,
        None => ConfigManager::new(),
    };

    let request = match &profile_id {
        Some(id) => config
            .to_run_request_with_profile(id)
            .with_context(|| format!("无法应用情景 {}", id))?,
        None => config.to_run_request().context("配置项无效")?,
    };

    let api = ScheduleApi::new();
    let response = api
        .run(request, ValidationMode::Lenient)
        .context("排程运行失败")?;
    for v in &response.ignored_violations {
        eprintln!("warning: {} {}", v.field, v.reason);
    }
    let result = response.result;

    let output_dir = output_arg
        .map(PathBuf::from)
        .unwrap_or_else(|| config.get_output_dir());
    let manifest = api
        .export_run(&result, &output_dir)
        .with_context(|| format!("无法导出到 {}", output_dir.display()))?;

    let k = &result.kpis;
    println!("run_id={}", result.run_id);
    println!("demand_met_pct={:.2}", k.demand_met_pct);
    println!("commitments_met_pct={:.2}", k.commitments_met_pct);
    println!("total_spillage={:.2}", k.total_spillage);
    println!("storage_min_violations={}", k.storage_min_violations);
    if let Some(end) = result.schedule.final_storage() {
        println!("final_storage={:.2}", end);
    }
    println!("schedule_csv={}", manifest.schedule_path.display());

    Ok(())
}
