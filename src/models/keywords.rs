//! Reserved words and well-known names
//!
//! Names the resolver, migration and validator agree on. Anything listed here
//! is part of the persisted format: renaming a constant is a schema change.

/// Date keyword meaning "the current date"
pub const TODAY: &str = "today";

/// Date-offset keyword scaled by the `variable` setting
pub const VARIABLE: &str = "variable";

/// Words no trigger, asset, income, expense or transaction may be named
pub const RESERVED_WORDS: [&str; 2] = [TODAY, VARIABLE];

/// The asset whose start date is the model's cash-start date
pub const CASH_ASSET_NAME: &str = "Cash";

/// Prefix every revaluation transaction name carries
pub const REVALUE_PREFIX: &str = "Revalue";

/// Marker on bond FROM values ("bond maturity value")
pub const BOND_MARKER: &str = "BMV";

pub const VIEW_RANGE_START: &str = "Start of view range";
pub const VIEW_RANGE_END: &str = "End of view range";
pub const BIRTH_DATE: &str = "Date of birth";
pub const VALUE_FOCUS_DATE: &str = "Today's value focus date";
pub const MONITOR_RANGE_START: &str = "Start of monitor range";
pub const MONITOR_RANGE_END: &str = "End of monitor range";
pub const CPI: &str = "cpi";

/// Legacy spelling of [`CPI`] folded away by migration
pub const LEGACY_CPI: &str = "CPI";

/// Per-chart focus settings from older schemas; none may survive migration
pub const DEPRECATED_SETTINGS: [&str; 6] = [
    "Focus of assets chart",
    "Focus of debts chart",
    "Focus of incomes chart",
    "Focus of expenses chart",
    "Focus of taxes chart",
    "Type of view for chart",
];

/// Liability suffix for capital gains tax
pub const CGT_SUFFIX: &str = "(CGT)";
/// Liability suffix for income tax
pub const INCOME_TAX_SUFFIX: &str = "(incomeTax)";
/// Liability suffix for national insurance
pub const NI_SUFFIX: &str = "(NI)";

/// Maximum number of '/'-separated parts in an income liability
pub const MAX_INCOME_LIABILITY_PARTS: usize = 3;

/// Check whether a name is one of the reserved words
pub fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// Check whether a setting name belongs to the deprecated chart-focus family
pub fn is_deprecated_setting(name: &str) -> bool {
    DEPRECATED_SETTINGS.contains(&name)
}
