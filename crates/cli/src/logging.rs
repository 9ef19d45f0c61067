use tracing_subscriber::EnvFilter;

/// stderr へのログ出力を初期化する
///
/// `RUST_LOG` が設定されていればそれを優先します。`log` クレート経由の
/// レコードもここに流れます。
pub fn init(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // 二重初期化 (テストなど) は無視する
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
