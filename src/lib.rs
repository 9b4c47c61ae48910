//! # dirhash
//!
//! 目录内容哈希与数据集拆分工具库
//!
//! ## 功能
//!
//! - 对目录中匹配扩展名的文件计算 SHA256，以 `<文件名> <摘要>` 追加到 `01-hashes.txt`
//! - 按某一列的取值把分隔文本数据集拆分为多个文件，支持 csv/txt/parquet/xlsx 输出
//!
//! ## 使用示例
//!
//! ```no_run
//! use dirhash::hasher::run;
//! use dirhash::splitter::{split, SplitOptions};
//! use std::path::Path;
//!
//! // 生成哈希清单
//! let report = run(Path::new("data"), "csv").unwrap();
//! println!("{}", report.manifest_path.display());
//!
//! // 按类别拆分
//! split(&SplitOptions::new("data", "region", "out")).unwrap();
//! ```

pub mod cli;
pub mod error;
pub mod hasher;
pub mod logging;
pub mod splitter;
pub mod utils;

// 重新导出常用类型
pub use error::{Error, Result};
pub use hasher::{HashReport, MANIFEST_FILE_NAME, ManifestRecord, run, run_from_args};
pub use splitter::{OutputFormat, SplitOptions, SplitReport, split};
