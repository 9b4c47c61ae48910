use clap::Parser;
use std::path::PathBuf;

use crate::splitter::{InputExtension, OutputFormat, SplitOptions};

/// 为目录中匹配扩展名的文件计算 SHA256，追加到 01-hashes.txt
///
/// 只接受两个位置参数，没有任何选项（包括 `--help` 与 `--version`）
#[derive(Parser)]
#[command(name = "dirhash", disable_help_flag = true, disable_version_flag = true)]
#[command(
    about = "Append SHA-256 hashes of matching files to <directory>/01-hashes.txt",
    long_about = None
)]
pub struct HashCli {
    /// 目标目录
    #[arg(allow_hyphen_values = true)]
    pub directory: PathBuf,
    /// 扩展名，不带点，例如 csv
    #[arg(allow_hyphen_values = true)]
    pub extension: String,
}

/// 按类别列拆分数据集
#[derive(Parser)]
#[command(name = "dataset_splitter", version)]
#[command(about = "Split delimited datasets into one file per category value", long_about = None)]
pub struct SplitCli {
    /// 数据集目录或单个文件
    #[arg(long)]
    pub input_path: PathBuf,
    /// 用于分组的列名
    #[arg(long)]
    pub category_col: String,
    /// 输出目录
    #[arg(long)]
    pub output_dir: PathBuf,
    /// 读取的文件扩展名
    #[arg(long, value_enum, default_value_t = InputExtension::Csv)]
    pub extension: InputExtension,
    /// 输入字段分隔符
    #[arg(long, default_value = "|")]
    pub separator: String,
    /// 在输出中保留类别列
    #[arg(long)]
    pub keep_category_col: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub output_format: OutputFormat,
    /// csv/txt 输出的字段分隔符
    #[arg(long, default_value = "|")]
    pub output_separator: String,
    /// 输出文件名前缀
    #[arg(long)]
    pub file_name: Option<String>,
    /// 每个输入文件单独拆分到 `<输出目录>/<类别>/` 下
    #[arg(long)]
    pub per_file: bool,
    #[arg(short, long)]
    pub verbose: bool,
}

impl From<SplitCli> for SplitOptions {
    fn from(cli: SplitCli) -> Self {
        Self {
            input_path: cli.input_path,
            category_col: cli.category_col,
            output_dir: cli.output_dir,
            extension: cli.extension,
            separator: cli.separator,
            keep_category_col: cli.keep_category_col,
            output_format: cli.output_format,
            output_separator: cli.output_separator,
            file_name: cli.file_name,
            per_file: cli.per_file,
        }
    }
}
