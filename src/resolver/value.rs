//! Value expression resolution

use once_cell::sync::Lazy;
use regex::Regex;

use super::{ResolveError, Resolver};
use crate::models::Setting;

/// "2cpi", "1.5 USD": a literal immediately followed by a setting name
static LITERAL_TIMES_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-?(?:\d+(?:\.\d+)?|\.\d+))\s*([A-Za-z_].*)$")
        .expect("literal-times-name pattern is valid")
});

impl Resolver {
    /// Resolve a value expression against a model's settings
    pub fn resolve_value(&self, expr: &str, settings: &[Setting]) -> Result<f64, ResolveError> {
        let mut chain = Vec::new();
        self.resolve_value_expr(expr, settings, &mut chain)
    }

    /// Resolve a growth expression: a value expression with an optional trailing '%'
    pub fn resolve_growth(&self, expr: &str, settings: &[Setting]) -> Result<f64, ResolveError> {
        let expr = expr.trim();
        let expr = expr.strip_suffix('%').unwrap_or(expr);
        self.resolve_value(expr, settings)
    }

    /// Resolve a proportional transaction value; "50%" and "0.5" both give 0.5
    pub fn resolve_proportion(&self, expr: &str) -> Result<f64, ResolveError> {
        let trimmed = expr.trim();
        let (number, scale) = match trimmed.strip_suffix('%') {
            Some(percent) => (percent, 100.0),
            None => (trimmed, 1.0),
        };
        self.parse_number(number)
            .map(|n| n / scale)
            .ok_or_else(|| ResolveError::Unparseable(trimmed.to_string()))
    }

    /// A value that resolves, but only by way of a setting
    pub fn is_word_valued(&self, expr: &str, settings: &[Setting]) -> bool {
        !self.is_numeric(expr) && self.resolve_value(expr, settings).is_ok()
    }

    fn resolve_value_expr(
        &self,
        expr: &str,
        settings: &[Setting],
        chain: &mut Vec<String>,
    ) -> Result<f64, ResolveError> {
        let expr = expr.trim();
        if expr.is_empty() {
            return Err(ResolveError::Unparseable(String::new()));
        }
        if let Some(number) = self.parse_number(expr) {
            return Ok(number);
        }
        if let Some(caps) = LITERAL_TIMES_NAME.captures(expr) {
            let factor: f64 = caps[1]
                .parse()
                .map_err(|_| ResolveError::Unparseable(expr.to_string()))?;
            let base = self.lookup_setting(caps[2].trim(), settings, chain)?;
            return Ok(factor * base);
        }
        self.lookup_setting(expr, settings, chain)
    }

    fn lookup_setting(
        &self,
        name: &str,
        settings: &[Setting],
        chain: &mut Vec<String>,
    ) -> Result<f64, ResolveError> {
        if chain.iter().any(|visited| visited == name) {
            return Err(ResolveError::Cycle(name.to_string()));
        }
        if chain.len() >= self.config.max_setting_depth {
            return Err(ResolveError::TooDeep(name.to_string()));
        }
        let setting = settings
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ResolveError::UnknownName(name.to_string()))?;

        chain.push(setting.name.clone());
        let resolved = self.resolve_value_expr(&setting.value, settings, chain);
        chain.pop();
        resolved
    }
}
