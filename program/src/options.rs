// options.rs - Raw `key=value` program options and typed lookups

use std::collections::BTreeMap;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("option `{0}` must look like key=value")]
    MissingSeparator(String),
    #[error("option `{key}` has invalid value `{value}`: {reason}")]
    InvalidValue { key: String, value: String, reason: String },
}

/// Options as given on the command line. Programs turn these into a typed
/// config once, at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    values: BTreeMap<String, String>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `Ok(None)` when absent, `Err` when present but unparsable.
    pub fn parse<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let Some(raw) = self.get(key) else {
            return Ok(None);
        };
        raw.trim().parse::<T>().map(Some).map_err(|err| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
            reason: err.to_string(),
        })
    }

    /// Flags are only set by the literal string `true`.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key) == Some("true")
    }
}

/// Splits one `key=value` argument at the first `=`.
pub fn parse_pair(arg: &str) -> Result<(String, String), ConfigError> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| ConfigError::MissingSeparator(arg.to_string()))?;
    if key.is_empty() {
        return Err(ConfigError::MissingSeparator(arg.to_string()));
    }
    Ok((key.to_string(), value.to_string()))
}

impl FromIterator<(String, String)> for Options {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}
