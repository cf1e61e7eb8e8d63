use std::sync::Once;

/// How the process logger is set up.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter directives, e.g. `"rift_game=debug,wgpu=warn"`.
    /// Overrides `RUST_LOG` when set.
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { env_filter: None, write_style: env_logger::WriteStyle::Auto }
    }
}

impl LoggingConfig {
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self { env_filter: Some(filter.into()), ..Self::default() }
    }

    // The wgpu backends are chatty at info.
    fn apply_defaults(builder: &mut env_logger::Builder) {
        builder.filter_level(log::LevelFilter::Info);
        for noisy in ["wgpu_core", "wgpu_hal", "naga"] {
            builder.filter_module(noisy, log::LevelFilter::Warn);
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        match config.env_filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => LoggingConfig::apply_defaults(&mut builder),
        }
        builder.write_style(config.write_style).format_timestamp_millis().init();
        log::debug!("logger ready");
    });
}
