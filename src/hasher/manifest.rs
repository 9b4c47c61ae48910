use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::utils::ContentHash;

/// 清单文件名，位于被哈希的目录内
pub const MANIFEST_FILE_NAME: &str = "01-hashes.txt";

/// 由目录推导清单路径
pub fn manifest_path(directory: &Path) -> PathBuf {
    directory.join(MANIFEST_FILE_NAME)
}

/// 清单中的一行：`<文件名> <sha256>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRecord {
    pub file_name: String,
    pub hash: ContentHash,
}

impl ManifestRecord {
    pub fn new(file_name: impl Into<String>, hash: ContentHash) -> Self {
        Self {
            file_name: file_name.into(),
            hash,
        }
    }
}

impl fmt::Display for ManifestRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.file_name, self.hash)
    }
}

impl FromStr for ManifestRecord {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        // 文件名本身可能含空格，摘要总是最后一段
        let (file_name, hash) = line
            .rsplit_once(' ')
            .ok_or_else(|| Error::InvalidRecord(format!("missing separator in {line:?}")))?;
        if file_name.is_empty() {
            return Err(Error::InvalidRecord(format!("empty file name in {line:?}")));
        }
        Ok(Self::new(file_name, hash.parse()?))
    }
}

/// 以追加模式写清单
///
/// 文件在第一次追加时才打开，没有记录的运行不会创建清单。
/// 每条记录单独写入，进程中断时清单里保留的是已写记录的前缀。
pub struct ManifestWriter {
    path: PathBuf,
    file: Option<File>,
}

impl ManifestWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, record: &ManifestRecord) -> Result<()> {
        let mut file = match self.file.take() {
            Some(file) => file,
            None => OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .map_err(|err| Error::io(&self.path, err))?,
        };

        let written = file.write_all(format!("{record}\n").as_bytes());
        self.file = Some(file);
        written.map_err(|err| Error::io(&self.path, err))
    }
}
