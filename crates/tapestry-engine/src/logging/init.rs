use std::sync::Once;

/// How the studio (or any embedding application) wants log records printed.
///
/// The interesting targets are `tapestry_engine` (object creation, signal
/// dispatch and loop levels at `trace`) and `tapestry_ui` (registry
/// replacements, unused externals, bindings and loop frames). A filter such
/// as `"warn,tapestry_ui=debug"` shows binding-layer decisions without the
/// per-signal noise of the engine.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter directives. `None` defers to `RUST_LOG`.
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { env_filter: None, write_style: env_logger::WriteStyle::Auto }
    }
}

static LOGGER: Once = Once::new();

/// Install the process-wide logger.
///
/// Filter precedence is `config.env_filter`, then `RUST_LOG`, then `info`.
/// Only the first call has any effect, so tests and embedders may call it
/// freely.
pub fn init_logging(config: LoggingConfig) {
    LOGGER.call_once(|| {
        let filter = config.env_filter.or_else(|| std::env::var("RUST_LOG").ok());

        let mut builder = env_logger::Builder::new();
        match filter.as_deref() {
            Some(directives) => builder.parse_filters(directives),
            None => builder.filter_level(log::LevelFilter::Info),
        };
        builder.write_style(config.write_style).init();

        log::debug!(target: "tapestry_engine", "logger installed (filter: {})", filter.as_deref().unwrap_or("info"));
    });
}
