use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "tidal_lsp=debug,tidal_intel=trace").  When absent, `RUST_LOG` is consulted,
/// then the `info` default applies.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            // stderr is shown verbatim in editor output panes.
            write_style: env_logger::WriteStyle::Never,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
///
/// Output always goes to stderr: stdout carries the LSP channel.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder
            .write_style(config.write_style)
            .target(env_logger::Target::Stderr);

        if let Err(e) = builder.try_init() {
            eprintln!("tidal-lsp: logger already installed: {e}");
            return;
        }

        log::debug!("logging initialized");
    });
}
