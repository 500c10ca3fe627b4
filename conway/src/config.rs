// config.rs - Typed program options, parsed once at construction

use std::path::PathBuf;
use std::time::Duration;

use program::{ConfigError, Logger, Options};

use crate::grid::{DEFAULT_SIZE, MAX_SIZE};
use crate::patterns::{self, Pattern};

pub const DEFAULT_STEP: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Time between generations.
    pub step: Duration,
    /// Cells per side.
    pub size: usize,
    /// Snapshot imported at startup and written by the save key.
    pub file: Option<PathBuf>,
    /// Seed pattern stamped at the grid centre.
    pub pattern: Option<&'static str>,
    /// Wait in `Hold` for the start key instead of running immediately.
    pub hold: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { step: DEFAULT_STEP, size: DEFAULT_SIZE, file: None, pattern: None, hold: false }
    }
}

impl Config {
    /// Bad values are logged and replaced by their defaults; this never fails.
    pub fn from_options(options: &Options, logger: &Logger) -> Self {
        let mut config = Self::default();
        let reject = |err: ConfigError| logger.warning(format_args!("{err}; using default"));

        match parse_step(options) {
            Ok(Some(step)) => config.step = step,
            Ok(None) => {}
            Err(err) => reject(err),
        }
        match parse_size(options) {
            Ok(Some(size)) => config.size = size,
            Ok(None) => {}
            Err(err) => reject(err),
        }
        match parse_pattern(options) {
            Ok(pattern) => config.pattern = pattern.map(|p| p.name),
            Err(err) => reject(err),
        }
        config.file = options.get("file").filter(|path| !path.is_empty()).map(PathBuf::from);
        config.hold = options.flag("hold");
        config
    }
}

fn invalid(key: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue { key: key.into(), value: value.into(), reason: reason.into() }
}

fn parse_step(options: &Options) -> Result<Option<Duration>, ConfigError> {
    let Some(seconds) = options.parse::<f64>("step")? else {
        return Ok(None);
    };
    let raw = options.get("step").unwrap_or_default();
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(invalid("step", raw, "must be a positive number of seconds"));
    }
    Duration::try_from_secs_f64(seconds)
        .map(Some)
        .map_err(|err| invalid("step", raw, &err.to_string()))
}

fn parse_size(options: &Options) -> Result<Option<usize>, ConfigError> {
    match options.parse::<usize>("size")? {
        Some(0) => Err(invalid("size", "0", "must be at least 1")),
        Some(size) if size > MAX_SIZE => {
            Err(invalid("size", &size.to_string(), &format!("must be at most {MAX_SIZE}")))
        }
        size => Ok(size),
    }
}

fn parse_pattern(options: &Options) -> Result<Option<&'static Pattern>, ConfigError> {
    let Some(name) = options.get("pattern") else {
        return Ok(None);
    };
    patterns::find(name)
        .map(Some)
        .ok_or_else(|| invalid("pattern", name, "unknown pattern"))
}
