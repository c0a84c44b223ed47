//! Diagnostics go to stderr so stdout stays parseable in every output format.

use clap::ValueEnum;
use tracing::level_filters::LevelFilter;

/// Encoding of diagnostic lines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    /// One flattened JSON object per event.
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Install the global subscriber. Returns `false` if one was already set.
pub fn init_logging(format: LogFormat, level: LogLevel) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(LevelFilter::from(level))
        .with_ansi(false)
        .with_target(false);

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .try_init(),
    };
    installed.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_map_to_filters_in_order() {
        let filters: Vec<LevelFilter> = [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ]
        .into_iter()
        .map(LevelFilter::from)
        .collect();

        assert!(filters.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(filters[2], LevelFilter::INFO);
    }

    #[test]
    fn second_install_is_reported() {
        init_logging(LogFormat::Text, LogLevel::Error);
        assert!(!init_logging(LogFormat::Json, LogLevel::Trace));
    }
}
