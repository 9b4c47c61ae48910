use anyhow::Result;
use clap::Parser;
use std::env;
use std::ffi::OsString;
use std::process;

use dirhash::Error;
use dirhash::cli::HashCli;
use dirhash::hasher::{USAGE, run};
use dirhash::logging::setup_logging;

fn usage_exit(message: &str) -> ! {
    println!("{message}");
    process::exit(1);
}

fn main() -> Result<()> {
    let args: Vec<OsString> = env::args_os().skip(1).collect();
    if args.len() != 2 {
        usage_exit(USAGE);
    }

    // `--` 之后的参数一律按位置参数解析，`-x`、`--help` 之类也只是普通值
    let argv = [OsString::from("dirhash"), OsString::from("--")]
        .into_iter()
        .chain(args);
    let cli = match HashCli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(_) => usage_exit(USAGE),
    };

    setup_logging("warn");

    match run(&cli.directory, &cli.extension) {
        Ok(_) => Ok(()),
        Err(Error::Usage(message)) => usage_exit(&message),
        Err(err) => Err(err.into()),
    }
}
