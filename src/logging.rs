//! Log setup for the `wavhide` binary.
//!
//! Events go to stderr so that stdout carries only command output. `RUST_LOG`
//! takes precedence over `--log-level` when it is set and parses.

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Error => "wavhide=error",
            LogLevel::Warn => "wavhide=warn",
            LogLevel::Info => "wavhide=info",
            LogLevel::Debug => "wavhide=debug",
            LogLevel::Trace => "wavhide=trace",
        }
    }
}

/// Build the event filter: `RUST_LOG` if usable, else the CLI level scoped
/// to this crate.
fn build_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive()))
}

pub fn init_logging(format: LogFormat, level: LogLevel) {
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(build_filter(level))
        .with_target(matches!(level, LogLevel::Debug | LogLevel::Trace));

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().flatten_event(true).try_init(),
    };
    if let Err(e) = installed {
        eprintln!("warning: logging not initialised: {}", e);
    }
}
