use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::manifest::{ManifestRecord, ManifestWriter, manifest_path};
use crate::error::{Error, Result};
use crate::utils::{base_name, compute_file_hash, list_candidates};

pub const USAGE: &str = "Usage: dirhash <directory> <extension>";

/// 单个候选文件的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Recorded(ManifestRecord),
    Skipped { name: String, reason: SkipReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// 不存在、不是普通文件，或是清单本身
    Missing,
    /// 文件名不是合法 UTF-8，无法原样写入清单
    NonUtf8Name,
}

/// 一次哈希运行的结果
#[derive(Debug, Clone)]
pub struct HashReport {
    pub manifest_path: PathBuf,
    pub recorded: Vec<ManifestRecord>,
    pub skipped: Vec<String>,
}

impl HashReport {
    fn new(manifest_path: &Path) -> Self {
        Self {
            manifest_path: manifest_path.to_path_buf(),
            recorded: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// 按命令行参数执行，参数必须恰好是 `<directory> <extension>`
pub fn run_from_args(args: &[String]) -> Result<HashReport> {
    let [directory, extension] = args else {
        return Err(Error::Usage(USAGE.to_string()));
    };
    run(Path::new(directory), extension)
}

/// 对目录中匹配扩展名的文件计算 SHA256，并追加到目录内的清单
pub fn run(directory: &Path, extension: &str) -> Result<HashReport> {
    validate_extension(extension)?;

    let manifest_path = manifest_path(directory);
    let candidates = list_candidates(directory, extension)?;
    info!(
        directory = %directory.display(),
        extension,
        candidates = candidates.len(),
        "hashing directory"
    );

    let report = hash_candidates(&candidates, &manifest_path)?;
    println!(
        "Hashing completed and successfully saved to {}",
        report.manifest_path.display()
    );
    Ok(report)
}

/// 对目录本身及其所有子目录分别生成清单，每个目录写自己的 `01-hashes.txt`
pub fn run_recursive(directory: &Path, extension: &str) -> Result<Vec<HashReport>> {
    validate_extension(extension)?;

    let mut reports = Vec::new();
    for entry in WalkDir::new(directory).sort_by_file_name() {
        let entry = entry.map_err(|err| Error::Directory {
            path: err
                .path()
                .map_or_else(|| directory.to_path_buf(), Path::to_path_buf),
            source: io::Error::from(err),
        })?;
        if entry.file_type().is_dir() {
            reports.push(run(entry.path(), extension)?);
        }
    }
    Ok(reports)
}

fn validate_extension(extension: &str) -> Result<()> {
    if extension.is_empty() || extension.starts_with('.') || extension.contains(['/', '\\']) {
        return Err(Error::Usage(format!(
            "extension must be a bare suffix such as `csv`, got {extension:?}\n{USAGE}"
        )));
    }
    Ok(())
}

fn hash_candidates(candidates: &[PathBuf], manifest_path: &Path) -> Result<HashReport> {
    let mut writer = ManifestWriter::new(manifest_path);
    let mut report = HashReport::new(manifest_path);

    for candidate in candidates {
        match hash_candidate(candidate, writer.path())? {
            FileOutcome::Recorded(record) => {
                writer.append(&record)?;
                debug!(file = %record.file_name, hash = %record.hash, "recorded");
                report.recorded.push(record);
            }
            FileOutcome::Skipped { name, reason } => {
                match reason {
                    SkipReason::Missing => println!("File {name} does not exist"),
                    SkipReason::NonUtf8Name => {
                        println!("File {name} skipped: name is not valid UTF-8")
                    }
                }
                report.skipped.push(name);
            }
        }
    }

    Ok(report)
}

fn hash_candidate(candidate: &Path, manifest_path: &Path) -> Result<FileOutcome> {
    let name = base_name(candidate);
    let missing = |name: String| FileOutcome::Skipped {
        name,
        reason: SkipReason::Missing,
    };

    if candidate == manifest_path || !candidate.is_file() {
        debug!(path = %candidate.display(), "not a regular file or is the manifest");
        return Ok(missing(name));
    }
    if candidate.file_name().and_then(|n| n.to_str()).is_none() {
        warn!(path = %candidate.display(), "file name is not valid UTF-8");
        return Ok(FileOutcome::Skipped {
            name,
            reason: SkipReason::NonUtf8Name,
        });
    }

    match compute_file_hash(candidate) {
        Ok(hash) => Ok(FileOutcome::Recorded(ManifestRecord::new(name, hash))),
        // 枚举之后被删除
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(missing(name)),
        Err(err) => Err(Error::io(candidate, err)),
    }
}
