use globset::{Glob, GlobMatcher};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// 列出目录下（不递归）匹配 `*.<extension>` 的路径，按文件名排序
///
/// 与 shell 通配一致，以 `.` 开头的文件不参与匹配。返回的路径只是候选，
/// 可能是目录或失效的符号链接，由调用方再做校验。
pub fn list_candidates(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let matcher = extension_matcher(extension)?;

    let metadata = dir.metadata().map_err(|source| Error::Directory {
        path: dir.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(Error::Directory {
            path: dir.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
        });
    }

    let mut candidates = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|err| Error::Directory {
            path: dir.to_path_buf(),
            source: io::Error::from(err),
        })?;

        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if hidden || !matcher.is_match(entry.file_name()) {
            continue;
        }
        candidates.push(entry.into_path());
    }

    Ok(candidates)
}

fn extension_matcher(extension: &str) -> Result<GlobMatcher> {
    let glob = Glob::new(&format!("*.{extension}"))
        .map_err(|err| Error::Usage(format!("invalid extension {extension:?}: {err}")))?;
    Ok(glob.compile_matcher())
}

/// 取路径的文件名部分（去掉目录）
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// 解析单字节分隔符，支持 `\t` 写法
pub fn parse_separator(value: &str) -> Result<u8> {
    match value {
        "\\t" | "\t" => Ok(b'\t'),
        _ if value.len() == 1 && value.is_ascii() => Ok(value.as_bytes()[0]),
        _ => Err(Error::InvalidSeparator(value.to_string())),
    }
}
