use std::io;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// 初始化日志，输出到 stderr；`RUST_LOG` 优先于默认级别
pub fn setup_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 重复初始化（例如测试里）时忽略错误
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .try_init();
}
