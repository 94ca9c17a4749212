//! Date expression resolution

use chrono::{Duration, Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{ResolveError, Resolver};
use crate::models::keywords::TODAY;
use crate::models::Trigger;

/// Accepted literal date spellings, tried in order
const LITERAL_FORMATS: [&str; 8] = [
    "%d %b %Y",
    "%d %B %Y",
    "%Y-%m-%d",
    "%b %d %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d/%m/%Y",
];

/// Scaled `variable` amounts at or beyond this cannot be a calendar offset
const MAX_SCALED_AMOUNT: f64 = 1e15;

static OFFSET_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([+-])\s*(\d*variable|\d+)\s*([dwmy])\s*$").expect("offset pattern is valid")
});

/// Parse a literal date in any of the accepted spellings
pub fn parse_literal_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    LITERAL_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Day,
    Week,
    Month,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Amount {
    Fixed(i64),
    /// Multiplier applied to the variable value
    Variable(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Offset {
    negative: bool,
    amount: Amount,
    unit: Unit,
}

impl Offset {
    fn apply(&self, date: NaiveDate, variable: Option<f64>, expr: &str) -> Result<NaiveDate, ResolveError> {
        let out_of_range = || ResolveError::OutOfRange(expr.to_string());
        let amount = match self.amount {
            Amount::Fixed(n) => n,
            Amount::Variable(multiplier) => {
                let value = variable.ok_or(ResolveError::MissingVariable)?;
                let scaled = (multiplier as f64 * value).round();
                if !scaled.is_finite() || scaled.abs() >= MAX_SCALED_AMOUNT {
                    return Err(out_of_range());
                }
                scaled as i64
            }
        };
        let signed = if self.negative {
            amount.checked_neg().ok_or_else(out_of_range)?
        } else {
            amount
        };

        let shifted = match self.unit {
            Unit::Day => Duration::try_days(signed).and_then(|d| date.checked_add_signed(d)),
            Unit::Week => Duration::try_weeks(signed).and_then(|d| date.checked_add_signed(d)),
            Unit::Month => shift_months(date, signed),
            Unit::Year => signed.checked_mul(12).and_then(|m| shift_months(date, m)),
        };
        shifted.ok_or_else(out_of_range)
    }
}

/// Month arithmetic clamps to the last day of the target month
fn shift_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
}

/// Peel offset terms off the end of an expression.
/// Returns the atom text and the offsets in application order.
fn split_offsets(expr: &str) -> Result<(&str, Vec<Offset>), ResolveError> {
    let mut rest = expr.trim();
    let mut offsets = Vec::new();

    while let Some(caps) = OFFSET_SUFFIX.captures(rest) {
        let whole = caps.get(0).map_or(rest.len(), |m| m.start());
        let amount_text = &caps[2];
        let amount = match amount_text.strip_suffix("variable") {
            Some("") => Amount::Variable(1),
            Some(digits) => Amount::Variable(
                digits
                    .parse()
                    .map_err(|_| ResolveError::Unparseable(expr.to_string()))?,
            ),
            None => Amount::Fixed(
                amount_text
                    .parse()
                    .map_err(|_| ResolveError::Unparseable(expr.to_string()))?,
            ),
        };
        let unit = match &caps[3] {
            "d" => Unit::Day,
            "w" => Unit::Week,
            "m" => Unit::Month,
            _ => Unit::Year,
        };
        offsets.push(Offset {
            negative: &caps[1] == "-",
            amount,
            unit,
        });
        rest = rest[..whole].trim_end();
    }

    offsets.reverse();
    Ok((rest, offsets))
}

struct Atom {
    date: NaiveDate,
    literal: bool,
}

struct DateScope<'a> {
    triggers: &'a [Trigger],
    variable: Option<f64>,
}

impl Resolver {
    /// Resolve a date expression against a model's triggers.
    ///
    /// `variable` scales any `variable` offset amounts; expressions that use
    /// one fail with [`ResolveError::MissingVariable`] when it is `None`.
    pub fn resolve_date(
        &self,
        expr: &str,
        triggers: &[Trigger],
        variable: Option<f64>,
    ) -> Result<NaiveDate, ResolveError> {
        let scope = DateScope { triggers, variable };
        let mut chain = Vec::new();
        self.resolve_date_expr(expr, &scope, &mut chain)
    }

    fn resolve_date_expr(
        &self,
        expr: &str,
        scope: &DateScope<'_>,
        chain: &mut Vec<String>,
    ) -> Result<NaiveDate, ResolveError> {
        let expr = expr.trim();
        if expr.contains('?') {
            return self.resolve_conditional(expr, scope, chain);
        }

        let (atom_text, offsets) = split_offsets(expr)?;
        let atom = self.resolve_atom(atom_text, scope, chain)?;

        let allowed = if atom.literal { 2 } else { 1 };
        if offsets.len() > allowed {
            return Err(ResolveError::TooManyOffsets(expr.to_string()));
        }

        offsets
            .iter()
            .try_fold(atom.date, |date, offset| offset.apply(date, scope.variable, expr))
    }

    /// `A<B?C:D` where every part is a single atom
    fn resolve_conditional(
        &self,
        expr: &str,
        scope: &DateScope<'_>,
        chain: &mut Vec<String>,
    ) -> Result<NaiveDate, ResolveError> {
        let unparseable = || ResolveError::Unparseable(expr.to_string());

        let (condition, branches) = expr.split_once('?').ok_or_else(unparseable)?;
        let (lhs, rhs) = condition.split_once('<').ok_or_else(unparseable)?;
        let (if_before, otherwise) = branches.split_once(':').ok_or_else(unparseable)?;

        let lhs = self.resolve_atom(lhs, scope, chain)?.date;
        let rhs = self.resolve_atom(rhs, scope, chain)?.date;
        let if_before = self.resolve_atom(if_before, scope, chain)?.date;
        let otherwise = self.resolve_atom(otherwise, scope, chain)?.date;

        Ok(if lhs < rhs { if_before } else { otherwise })
    }

    fn resolve_atom(
        &self,
        text: &str,
        scope: &DateScope<'_>,
        chain: &mut Vec<String>,
    ) -> Result<Atom, ResolveError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ResolveError::Unparseable(text.to_string()));
        }
        if text == TODAY {
            return Ok(Atom {
                date: self.today,
                literal: false,
            });
        }
        if let Some(date) = parse_literal_date(text) {
            return Ok(Atom {
                date,
                literal: true,
            });
        }

        let trigger = scope
            .triggers
            .iter()
            .find(|t| t.name == text)
            .ok_or_else(|| ResolveError::UnknownName(text.to_string()))?;

        if chain.iter().any(|name| name == &trigger.name) {
            return Err(ResolveError::Cycle(trigger.name.clone()));
        }
        if chain.len() >= self.config.max_trigger_depth {
            return Err(ResolveError::TooDeep(trigger.name.clone()));
        }

        chain.push(trigger.name.clone());
        let resolved = self.resolve_date_expr(&trigger.date, scope, chain);
        chain.pop();

        Ok(Atom {
            date: resolved?,
            literal: false,
        })
    }
}
