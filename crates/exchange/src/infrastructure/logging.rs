use env_logger::Env;

/// Install the global logger.
///
/// `RUST_LOG` wins when set; otherwise `default_level` (e.g. `"info"` or
/// `"hermes_exchange=debug"`) is used. Calling this twice is harmless.
pub fn init_logging(default_level: &str) {
    let result = env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .try_init();
    if result.is_err() {
        log::debug!("logger already initialised");
    }
}
