// ==========================================
// 水库下泄排程系统 - 导出模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导出模块错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    // ===== 文件相关错误 =====
    #[error("目录创建失败: {path}: {message}")]
    DirectoryCreateError { path: String, message: String },

    #[error("文件写入失败: {0}")]
    FileWriteError(String),

    #[error("CSV 写入失败: {0}")]
    CsvWriteError(String),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::FileWriteError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::CsvWriteError(err.to_string())
    }
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
