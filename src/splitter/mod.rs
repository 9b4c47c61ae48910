//! 按类别列把数据集拆分成多个文件

mod partition;
mod reader;
mod writer;

use clap::ValueEnum;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::utils::parse_separator;

pub use partition::{Partition, category_file_stem, partition};
pub use reader::{Dataset, input_files, load_inputs, read_delimited};
pub use writer::write_partition;

/// 输入文件扩展名
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputExtension {
    Csv,
    Txt,
}

impl InputExtension {
    pub fn as_str(self) -> &'static str {
        match self {
            InputExtension::Csv => "csv",
            InputExtension::Txt => "txt",
        }
    }
}

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Txt,
    Parquet,
    Xlsx,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Txt => "txt",
            OutputFormat::Parquet => "parquet",
            OutputFormat::Xlsx => "xlsx",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SplitOptions {
    pub input_path: PathBuf,
    pub category_col: String,
    pub output_dir: PathBuf,
    pub extension: InputExtension,
    pub separator: String,
    pub keep_category_col: bool,
    pub output_format: OutputFormat,
    pub output_separator: String,
    /// 输出文件名前缀，生成 `<前缀>_<类别>.<扩展名>`
    pub file_name: Option<String>,
    /// 每个输入文件单独拆分，写到 `<输出目录>/<类别>/<输入文件名>.<扩展名>`
    pub per_file: bool,
}

impl SplitOptions {
    pub fn new(
        input_path: impl Into<PathBuf>,
        category_col: impl Into<String>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            category_col: category_col.into(),
            output_dir: output_dir.into(),
            extension: InputExtension::Csv,
            separator: "|".to_string(),
            keep_category_col: false,
            output_format: OutputFormat::Csv,
            output_separator: "|".to_string(),
            file_name: None,
            per_file: false,
        }
    }

    fn prefixed(&self, name: &str) -> String {
        match &self.file_name {
            Some(prefix) => format!("{prefix}_{name}"),
            None => name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOutput {
    pub category: String,
    pub path: PathBuf,
    pub rows: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SplitReport {
    pub outputs: Vec<SplitOutput>,
}

/// 读取输入、按类别分组并写出每个分组
pub fn split(options: &SplitOptions) -> Result<SplitReport> {
    let separator = parse_separator(&options.separator)?;
    let output_separator = parse_separator(&options.output_separator)?;

    info!("Reading data from {}", options.input_path.display());
    let files = input_files(&options.input_path, options.extension)?;
    let mut sink = OutputSink::new(options, output_separator);

    if options.per_file {
        for file in &files {
            let dataset = read_delimited(file, separator)?;
            if dataset.header.is_empty() {
                warn!(path = %file.display(), "skipping file without a header row");
                continue;
            }
            let stem = file
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            let name = options.prefixed(&stem);

            for part in partition(dataset, &options.category_col, options.keep_category_col)? {
                let dir = options.output_dir.join(category_file_stem(&part.category));
                sink.emit(&part, &dir, &name)?;
            }
        }
    } else if let Some(dataset) = load_inputs(&files, separator)? {
        for part in partition(dataset, &options.category_col, options.keep_category_col)? {
            let name = options.prefixed(&category_file_stem(&part.category));
            sink.emit(&part, &options.output_dir, &name)?;
        }
    }

    if sink.report.outputs.is_empty() {
        warn!(
            "no {} rows found under {}",
            options.extension.as_str(),
            options.input_path.display()
        );
    }
    Ok(sink.report)
}

/// 负责写出分组并保证同一次运行中不会覆盖已写的文件
struct OutputSink<'a> {
    options: &'a SplitOptions,
    output_separator: u8,
    written: HashSet<PathBuf>,
    report: SplitReport,
}

impl<'a> OutputSink<'a> {
    fn new(options: &'a SplitOptions, output_separator: u8) -> Self {
        Self {
            options,
            output_separator,
            written: HashSet::new(),
            report: SplitReport::default(),
        }
    }

    fn emit(&mut self, part: &Partition, dir: &Path, name: &str) -> Result<()> {
        fs::create_dir_all(dir).map_err(|err| Error::io(dir, err))?;
        let path = self.unique_path(dir, name, &part.category);

        write_partition(part, &path, self.options.output_format, self.output_separator)?;
        println!("Saved {} rows to {}", part.rows.len(), path.display());
        self.report.outputs.push(SplitOutput {
            category: part.category.clone(),
            path,
            rows: part.rows.len(),
        });
        Ok(())
    }

    /// 不同类别值清洗后可能得到相同文件名，此时追加 `_2`、`_3` 等后缀
    fn unique_path(&mut self, dir: &Path, name: &str, category: &str) -> PathBuf {
        let ext = self.options.output_format.extension();
        let mut path = dir.join(format!("{name}.{ext}"));
        let mut n = 2;
        while self.written.contains(&path) {
            path = dir.join(format!("{name}_{n}.{ext}"));
            n += 1;
        }
        if n > 2 {
            warn!(category, path = %path.display(), "output name collision, using suffixed file");
        }
        self.written.insert(path.clone());
        path
    }
}
