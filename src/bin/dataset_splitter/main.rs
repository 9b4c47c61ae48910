//! dataset_splitter — 按类别列把数据集拆分为多个文件
//!
//! ```text
//! dataset_splitter --input-path data/ --category-col region --output-dir out/ \
//!     --separator '|' --output-format parquet
//! ```
//!
//! 每个不同的类别值生成一个输出文件，默认不保留类别列。加上 `--per-file`
//! 时每个输入文件单独拆分，输出到 `out/<类别>/<输入文件名>.<格式>`。
//!
//! 退出码：成功为 `0`，参数错误或拆分失败为 `1`。
use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use std::process;

use dirhash::cli::SplitCli;
use dirhash::logging::setup_logging;
use dirhash::splitter::{SplitOptions, split};

fn main() -> Result<()> {
    let cli = match SplitCli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let _ = err.print();
            process::exit(1);
        }
    };
    setup_logging(if cli.verbose { "debug" } else { "info" });

    let options = SplitOptions::from(cli);
    let report = split(&options)
        .with_context(|| format!("failed to split {}", options.input_path.display()))?;

    println!(
        "Done! {} files written to {}",
        report.outputs.len(),
        options.output_dir.display()
    );
    Ok(())
}
