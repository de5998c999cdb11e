use log::LevelFilter;

/// Map a configured level name to a filter, defaulting to `warn`
pub fn parse_level(level: Option<&str>) -> LevelFilter {
    level
        .map(|level| match level.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Warn,
        })
        .unwrap_or(LevelFilter::Warn)
}

/// Initialize env_logger; `RUST_LOG` still wins over the configured level
pub fn init(configured: Option<&str>, verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        parse_level(configured)
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.to_string()))
        .init();
}
