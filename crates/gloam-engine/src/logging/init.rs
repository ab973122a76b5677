use std::sync::Once;

use log::LevelFilter;

use super::level_for;
use super::verbosity::install;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "gloam_engine=debug,wgpu=warn") and wins over `verbosity`. A bare level
/// only sets the starting verbosity, which [`raise_verbosity`] can still
/// raise; module directives are handed to `env_logger` as-is.
///
/// [`raise_verbosity`]: super::raise_verbosity
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,

    /// Numeric verbosity used when neither `env_filter` nor `RUST_LOG` is set.
    pub verbosity: u8,

    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            verbosity: 0,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. Intended usage is early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config.env_filter.or_else(|| std::env::var("RUST_LOG").ok());
        let initial = initial_level(filter.as_deref(), config.verbosity);

        let mut builder = env_logger::Builder::new();
        match (initial, filter) {
            // The `log` max level is the only gate; the sink lets everything through.
            (Some(_), _) => {
                builder.filter_level(LevelFilter::Trace);
            }
            (None, Some(directives)) => {
                builder.parse_filters(&directives);
            }
            (None, None) => {}
        }

        builder.write_style(config.write_style);

        // `try_init` so an embedder's logger is left in place.
        if install(builder, initial).is_err() {
            log::debug!("a global logger was already installed");
            return;
        }

        log::debug!("logging initialized");
    });
}

/// Starting max level, or `None` when `filter` carries module directives
/// that `env_logger` has to apply itself.
fn initial_level(filter: Option<&str>, verbosity: u8) -> Option<LevelFilter> {
    match filter {
        Some(filter) => filter.trim().parse().ok(),
        None => Some(level_for(verbosity)),
    }
}
