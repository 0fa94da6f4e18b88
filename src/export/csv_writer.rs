// ==========================================
// 水库下泄排程系统 - CSV 导出
// ==========================================
// 职责: 输入序列 / 排程表 / 事实表 / KPI 导出为 CSV
// 格式: 每小时一行，表头即字段名，时间格式 %Y-%m-%d %H:%M:%S
// ==========================================

use crate::domain::kpi::{FactRow, KpiSummary};
use crate::domain::schedule::Schedule;
use crate::domain::timeseries::TimeSeries;
use crate::engine::RunResult;
use crate::export::error::{ExportError, ExportResult};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// 时间列格式
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// 导出文件名
pub const INPUTS_FILE: &str = "inputs.csv";
pub const SCHEDULE_FILE: &str = "release_schedule.csv";
pub const FACT_TABLE_FILE: &str = "mis_fact_table.csv";
pub const KPI_FILE: &str = "kpi_summary.csv";

pub const INPUT_HEADERS: [&str; 8] = [
    "timestamp",
    "inflow_river",
    "upstream_release_1",
    "upstream_release_2",
    "demand_1",
    "demand_2",
    "commitment_min_1",
    "commitment_min_2",
];

pub const SCHEDULE_HEADERS: [&str; 10] = [
    "timestamp",
    "inflow_total",
    "release_demand_1",
    "release_demand_2",
    "release_commitment_1",
    "release_commitment_2",
    "release_total",
    "storage_end",
    "spillage",
    "violation_storage_min",
];

pub const FACT_HEADERS: [&str; 18] = [
    "timestamp",
    "inflow_total",
    "release_demand_1",
    "release_demand_2",
    "release_commitment_1",
    "release_commitment_2",
    "release_total",
    "storage_end",
    "spillage",
    "violation_storage_min",
    "demand_1",
    "demand_2",
    "commitment_1",
    "commitment_2",
    "demand_met_1_pct",
    "demand_met_2_pct",
    "commitment_met_1_pct",
    "commitment_met_2_pct",
];

/// 一次运行导出的文件清单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportManifest {
    pub run_id: String,
    pub inputs_path: PathBuf,
    pub schedule_path: PathBuf,
    pub fact_table_path: PathBuf,
    pub kpi_path: PathBuf,
}

// ==========================================
// 写入任意 Writer
// ==========================================

/// 导出输入序列
pub fn write_inputs_csv<W: Write>(writer: W, inputs: &TimeSeries) -> ExportResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(INPUT_HEADERS)?;
    for r in inputs.iter() {
        wtr.write_record([
            format_timestamp(&r.timestamp),
            r.inflow_river.to_string(),
            r.upstream_release_1.to_string(),
            r.upstream_release_2.to_string(),
            r.demand_1.to_string(),
            r.demand_2.to_string(),
            r.commitment_min_1.to_string(),
            r.commitment_min_2.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// 导出排程表
pub fn write_schedule_csv<W: Write>(writer: W, schedule: &Schedule) -> ExportResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(SCHEDULE_HEADERS)?;
    for r in schedule.iter() {
        wtr.write_record([
            format_timestamp(&r.timestamp),
            r.inflow_total.to_string(),
            r.release_demand_1.to_string(),
            r.release_demand_2.to_string(),
            r.release_commitment_1.to_string(),
            r.release_commitment_2.to_string(),
            r.release_total.to_string(),
            r.storage_end.to_string(),
            r.spillage.to_string(),
            r.violation_storage_min.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// 导出 MIS 事实表
pub fn write_fact_table_csv<W: Write>(writer: W, facts: &[FactRow]) -> ExportResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(FACT_HEADERS)?;
    for f in facts {
        wtr.write_record([
            format_timestamp(&f.timestamp),
            f.inflow_total.to_string(),
            f.release_demand_1.to_string(),
            f.release_demand_2.to_string(),
            f.release_commitment_1.to_string(),
            f.release_commitment_2.to_string(),
            f.release_total.to_string(),
            f.storage_end.to_string(),
            f.spillage.to_string(),
            f.violation_storage_min.to_string(),
            f.demand_1.to_string(),
            f.demand_2.to_string(),
            f.commitment_1.to_string(),
            f.commitment_2.to_string(),
            f.demand_met_1_pct.to_string(),
            f.demand_met_2_pct.to_string(),
            f.commitment_met_1_pct.to_string(),
            f.commitment_met_2_pct.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// 导出 KPI（metric,value 两列）
pub fn write_kpi_csv<W: Write>(writer: W, kpis: &KpiSummary) -> ExportResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["metric", "value"])?;
    let rows = [
        ("demand_met_pct", kpis.demand_met_pct.to_string()),
        ("commitments_met_pct", kpis.commitments_met_pct.to_string()),
        ("total_spillage", kpis.total_spillage.to_string()),
        (
            "storage_min_violations",
            kpis.storage_min_violations.to_string(),
        ),
    ];
    for (metric, value) in rows {
        wtr.write_record([metric, value.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

// ==========================================
// 写入文件
// ==========================================

pub fn write_inputs_csv_to_path(path: &Path, inputs: &TimeSeries) -> ExportResult<()> {
    write_inputs_csv(create_file(path)?, inputs)
}

pub fn write_schedule_csv_to_path(path: &Path, schedule: &Schedule) -> ExportResult<()> {
    write_schedule_csv(create_file(path)?, schedule)
}

pub fn write_fact_table_csv_to_path(path: &Path, facts: &[FactRow]) -> ExportResult<()> {
    write_fact_table_csv(create_file(path)?, facts)
}

pub fn write_kpi_csv_to_path(path: &Path, kpis: &KpiSummary) -> ExportResult<()> {
    write_kpi_csv(create_file(path)?, kpis)
}

/// 导出一次运行的全部 CSV 到目录
#[instrument(skip(dir, result), fields(run_id = %result.run_id, dir = %dir.display()))]
pub fn write_run_bundle(dir: &Path, result: &RunResult) -> ExportResult<ExportManifest> {
    ensure_dir(dir)?;

    let manifest = ExportManifest {
        run_id: result.run_id.clone(),
        inputs_path: dir.join(INPUTS_FILE),
        schedule_path: dir.join(SCHEDULE_FILE),
        fact_table_path: dir.join(FACT_TABLE_FILE),
        kpi_path: dir.join(KPI_FILE),
    };

    write_inputs_csv_to_path(&manifest.inputs_path, &result.inputs)?;
    write_schedule_csv_to_path(&manifest.schedule_path, &result.schedule)?;
    write_fact_table_csv_to_path(&manifest.fact_table_path, &result.fact_table)?;
    write_kpi_csv_to_path(&manifest.kpi_path, &result.kpis)?;

    info!(rows = result.schedule.len(), "CSV 导出完成");
    Ok(manifest)
}

fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn ensure_dir(dir: &Path) -> ExportResult<()> {
    fs::create_dir_all(dir).map_err(|e| ExportError::DirectoryCreateError {
        path: dir.display().to_string(),
        message: e.to_string(),
    })
}

fn create_file(path: &Path) -> ExportResult<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    Ok(BufWriter::new(File::create(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schedule::ScheduleRow;
    use chrono::NaiveDate;

    fn sample_schedule() -> Schedule {
        Schedule::new(vec![ScheduleRow {
            timestamp: NaiveDate::from_ymd_opt(2026, 1, 20)
                .unwrap()
                .and_hms_opt(13, 0, 0)
                .unwrap(),
            inflow_total: 200.0,
            release_demand_1: 27.5,
            release_demand_2: 22.5,
            release_commitment_1: 40.0,
            release_commitment_2: 35.0,
            release_total: 125.0,
            storage_end: 100.0,
            spillage: 0.0,
            violation_storage_min: true,
        }])
    }

    #[test]
    fn test_schedule_csv_header_and_row() {
        let mut buf = Vec::new();
        write_schedule_csv(&mut buf, &sample_schedule()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), SCHEDULE_HEADERS.join(","));
        assert_eq!(
            lines.next().unwrap(),
            "2026-01-20 13:00:00,200,27.5,22.5,40,35,125,100,0,true"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_kpi_csv_rows() {
        let kpis = KpiSummary {
            demand_met_pct: 75.0,
            commitments_met_pct: 100.0,
            total_spillage: 12.5,
            storage_min_violations: 2,
        };
        let mut buf = Vec::new();
        write_kpi_csv(&mut buf, &kpis).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("metric,value\n"));
        assert!(text.contains("total_spillage,12.5\n"));
        assert!(text.contains("storage_min_violations,2\n"));
    }

    #[test]
    fn test_empty_schedule_writes_header_only() {
        let mut buf = Vec::new();
        write_schedule_csv(&mut buf, &Schedule::default()).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            format!("{}\n", SCHEDULE_HEADERS.join(","))
        );
    }
}
