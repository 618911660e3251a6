//! Logging setup for the CLI.
//!
//! Logs go to stderr so stdout stays parseable. `RUST_LOG` wins when no
//! `-v` flag is given.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    /// Level for our own crates; dependencies stay at `warn`
    pub level: LevelFilter,
    /// Honor `RUST_LOG` when set
    pub use_env_filter: bool,
}

impl LogConfig {
    /// `0` → info, `1` → debug, `2+` → trace. An explicit flag overrides
    /// `RUST_LOG`.
    pub fn from_verbosity(verbose: u8) -> Self {
        let level = match verbose {
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        LogConfig {
            level,
            use_env_filter: verbose == 0,
        }
    }
}

pub fn init_logging(config: &LogConfig) -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(config))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| e.to_string())
}

fn default_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    format!("warn,shade_core={level},shade_cli={level}")
}

fn build_env_filter(config: &LogConfig) -> EnvFilter {
    let fallback = || EnvFilter::new(default_directives(config.level));
    if config.use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    } else {
        fallback()
    }
}
