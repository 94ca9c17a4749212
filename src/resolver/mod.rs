//! Expression resolution
//!
//! Turns the symbolic date and value strings used throughout a model into
//! concrete dates and numbers.
//!
//! # Date expressions
//!
//! `<atom>(<op><amount><unit>)*` where the atom is a literal date, `today`,
//! or a trigger name, `<op>` is `+` or `-`, `<amount>` is a whole number or
//! `variable` (optionally preceded by a multiplier), and `<unit>` is one of
//! `d`, `w`, `m`, `y`. A literal date takes up to two offset terms; `today`
//! and trigger names take one. `A<B?C:D` picks atom C when A is strictly
//! before B, else D.
//!
//! # Value expressions
//!
//! A numeric literal, a setting name, or a literal immediately followed by a
//! setting name (`2cpi` is twice `cpi`). Growth expressions may add a
//! trailing `%`.
//!
//! Resolution never panics and never raises: failures come back as a
//! [`ResolveError`] and callers word their own message around the original
//! string. Chains through triggers and settings carry the names visited so
//! far, so cycles fail fast instead of recursing.

mod cache;
mod date;
mod value;

pub use cache::NumericCache;
pub use date::parse_literal_date;

use chrono::NaiveDate;
use thiserror::Error;

use crate::config::EngineConfig;

/// Why an expression could not be resolved
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("'{0}' cannot be parsed")]
    Unparseable(String),

    #[error("'{0}' does not name anything")]
    UnknownName(String),

    #[error("'{0}' refers back to itself")]
    Cycle(String),

    #[error("'{0}' is nested too deeply")]
    TooDeep(String),

    #[error("'{0}' has too many offset terms")]
    TooManyOffsets(String),

    #[error("a variable offset was used but no variable value is available")]
    MissingVariable,

    #[error("'{0}' falls outside the supported calendar")]
    OutOfRange(String),
}

/// Resolves date and value expressions against a model's triggers and settings
#[derive(Debug, Clone)]
pub struct Resolver {
    config: EngineConfig,
    today: NaiveDate,
    numeric: NumericCache,
}

impl Resolver {
    /// Create a resolver whose "today" is the local current date
    pub fn new(config: EngineConfig) -> Self {
        Self::with_today(config, chrono::Local::now().date_naive())
    }

    /// Create a resolver with a fixed "today"
    pub fn with_today(config: EngineConfig, today: NaiveDate) -> Self {
        let numeric = NumericCache::new(config.numeric_cache_capacity);
        Self {
            config,
            today,
            numeric,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The date `today` resolves to
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Check whether a (trimmed) string is a plain numeric literal
    pub fn is_numeric(&self, s: &str) -> bool {
        self.numeric.is_numeric(s.trim())
    }

    /// Parse a plain numeric literal
    pub fn parse_number(&self, s: &str) -> Option<f64> {
        let s = s.trim();
        if self.numeric.is_numeric(s) {
            s.parse::<f64>().ok()
        } else {
            None
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_today() {
        let today = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
        let resolver = Resolver::with_today(EngineConfig::default(), today);
        assert_eq!(resolver.today(), today);
        assert_eq!(resolver.config().max_setting_depth, 5);
    }

    #[test]
    fn test_parse_number() {
        let resolver = Resolver::default();
        assert_eq!(resolver.parse_number(" 12.5 "), Some(12.5));
        assert_eq!(resolver.parse_number("-3"), Some(-3.0));
        assert_eq!(resolver.parse_number("cpi"), None);
        assert!(resolver.is_numeric("7"));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ResolveError::UnknownName("Retire".into()).to_string(),
            "'Retire' does not name anything"
        );
        assert_eq!(
            ResolveError::TooManyOffsets("X-1m-2d".into()).to_string(),
            "'X-1m-2d' has too many offset terms"
        );
    }
}
