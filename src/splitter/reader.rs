use csv::ReaderBuilder;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::InputExtension;
use crate::error::{Error, Result};
use crate::utils::list_candidates;

/// 全部字段按文本读取的表格
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// 输入可以是目录（读取其中所有匹配扩展名的文件）或单个文件
pub fn input_files(input_path: &Path, extension: InputExtension) -> Result<Vec<PathBuf>> {
    if input_path.is_file() {
        return Ok(vec![input_path.to_path_buf()]);
    }
    if !input_path.exists() {
        return Err(Error::io(
            input_path,
            io::Error::new(io::ErrorKind::NotFound, "input path does not exist"),
        ));
    }

    let files = list_candidates(input_path, extension.as_str())?
        .into_iter()
        .filter(|path| path.is_file())
        .collect();
    Ok(files)
}

/// 读取一个带表头的分隔文本文件
pub fn read_delimited(path: &Path, separator: u8) -> Result<Dataset> {
    let csv_err = |source| Error::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .delimiter(separator)
        .has_headers(true)
        .from_path(path)
        .map_err(csv_err)?;

    let header: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!(path = %path.display(), rows = rows.len(), "read dataset");
    Ok(Dataset { header, rows })
}

/// 依次读取并拼接所有输入，要求表头一致；空文件会被跳过
pub fn load_inputs(files: &[PathBuf], separator: u8) -> Result<Option<Dataset>> {
    let mut merged: Option<Dataset> = None;

    for path in files {
        let dataset = read_delimited(path, separator)?;
        if dataset.header.is_empty() {
            warn!(path = %path.display(), "skipping file without a header row");
            continue;
        }

        match &mut merged {
            None => merged = Some(dataset),
            Some(acc) if acc.header == dataset.header => acc.rows.extend(dataset.rows),
            Some(acc) => {
                return Err(Error::Schema(format!(
                    "header of {} ({}) does not match earlier inputs ({})",
                    path.display(),
                    dataset.header.join(","),
                    acc.header.join(",")
                )));
            }
        }
    }

    Ok(merged)
}
