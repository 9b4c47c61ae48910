use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// 库内统一错误类型
#[derive(Debug, Error)]
pub enum Error {
    /// 参数个数或格式不对，不做任何 I/O
    #[error("{0}")]
    Usage(String),

    #[error("directory {path:?} is not readable: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid manifest record: {0}")]
    InvalidRecord(String),

    #[error("failed to parse {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("schema error: {0}")]
    Schema(String),

    #[error("separator must be a single ASCII character, got {0:?}")]
    InvalidSeparator(String),

    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),

    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
