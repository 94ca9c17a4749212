//! Numeric classification cache
//!
//! Whether a literal string is a number never changes, so results are
//! memoized. The cache belongs to one resolver and is bounded; moka evicts
//! the least useful entries once capacity is reached.

use moka::sync::Cache;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?(?:\d+(?:\.\d*)?|\.\d+)$").expect("numeric pattern is valid"));

/// Bounded memo of "is this string a numeric literal"
#[derive(Clone)]
pub struct NumericCache {
    inner: Cache<String, bool>,
}

impl NumericCache {
    /// Create a cache holding at most `capacity` classifications
    pub fn new(capacity: u64) -> Self {
        Self {
            inner: Cache::new(capacity),
        }
    }

    /// Classify `s` (already trimmed), consulting the cache first
    pub fn is_numeric(&self, s: &str) -> bool {
        if let Some(hit) = self.inner.get(s) {
            return hit;
        }
        let numeric = NUMERIC.is_match(s);
        self.inner.insert(s.to_string(), numeric);
        numeric
    }

    /// Check whether a classification for `s` is currently cached
    pub fn contains(&self, s: &str) -> bool {
        self.inner.contains_key(s)
    }
}

impl fmt::Debug for NumericCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumericCache")
            .field("entry_count", &self.inner.entry_count())
            .finish()
    }
}
