// log.rs - Per-component logger with its own severity threshold

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Severity levels, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Fatal,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug   => "debug",
            LogLevel::Info    => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error   => "error",
            LogLevel::Fatal   => "fatal",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown log level `{0}` (expected one of debug, info, warning, error, fatal)")]
pub struct ParseLevelError(pub String);

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

/// A named log source. Each component holds its own copy, so the threshold
/// travels with the value instead of living in process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logger {
    source: String,
    threshold: LogLevel,
}

impl Logger {
    pub fn new(source: impl Into<String>, threshold: LogLevel) -> Self {
        Self { source: source.into(), threshold }
    }

    /// Same threshold, different source name.
    pub fn scoped(&self, source: impl Into<String>) -> Self {
        Self { source: source.into(), threshold: self.threshold }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.threshold
    }

    pub fn log(&self, level: LogLevel, message: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        let source = self.source.as_str();
        match level {
            LogLevel::Debug   => tracing::debug!(source, "{}", message),
            LogLevel::Info    => tracing::info!(source, "{}", message),
            LogLevel::Warning => tracing::warn!(source, "{}", message),
            LogLevel::Error   => tracing::error!(source, "{}", message),
            LogLevel::Fatal   => tracing::error!(source, fatal = true, "{}", message),
        }
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(LogLevel::Debug, format_args!("{message}"));
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(LogLevel::Info, format_args!("{message}"));
    }

    pub fn warning(&self, message: impl fmt::Display) {
        self.log(LogLevel::Warning, format_args!("{message}"));
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(LogLevel::Error, format_args!("{message}"));
    }

    /// Logs only. Stopping the loop is `Context::fatal`'s job.
    pub fn fatal(&self, message: impl fmt::Display) {
        self.log(LogLevel::Fatal, format_args!("{message}"));
    }
}
