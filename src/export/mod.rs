// ==========================================
// 水库下泄排程系统 - 导出层
// ==========================================
// 职责: 排程结果序列化为扁平分隔文本 (CSV)
// ==========================================

pub mod csv_writer;
pub mod error;

pub use csv_writer::{
    write_fact_table_csv, write_fact_table_csv_to_path, write_inputs_csv,
    write_inputs_csv_to_path, write_kpi_csv, write_kpi_csv_to_path, write_run_bundle,
    write_schedule_csv, write_schedule_csv_to_path, ExportManifest, FACT_HEADERS,
    FACT_TABLE_FILE, INPUTS_FILE, INPUT_HEADERS, KPI_FILE, SCHEDULE_FILE, SCHEDULE_HEADERS,
    TIMESTAMP_FORMAT,
};
pub use error::{ExportError, ExportResult};
