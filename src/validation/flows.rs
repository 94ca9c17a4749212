//! Income and expense checks

use chrono::NaiveDate;

use super::context::CheckContext;
use super::liability::{split_part, LiabilityPart};
use super::violation::{CheckResult, Violation};
use crate::models::keywords::{INCOME_TAX_SUFFIX, MAX_INCOME_LIABILITY_PARTS, NI_SUFFIX};
use crate::models::{EntityKind, Expense, Income};

/// Fields incomes and expenses share
struct Flow<'r> {
    kind: EntityKind,
    name: &'r str,
    start: &'r str,
    end: &'r str,
    value: &'r str,
    value_set: &'r str,
    recurrence: &'r str,
}

impl<'r> From<&'r Income> for Flow<'r> {
    fn from(income: &'r Income) -> Self {
        Self {
            kind: EntityKind::Income,
            name: &income.name,
            start: &income.start,
            end: &income.end,
            value: &income.value,
            value_set: &income.value_set,
            recurrence: &income.recurrence,
        }
    }
}

impl<'r> From<&'r Expense> for Flow<'r> {
    fn from(expense: &'r Expense) -> Self {
        Self {
            kind: EntityKind::Expense,
            name: &expense.name,
            start: &expense.start,
            end: &expense.end,
            value: &expense.value,
            value_set: &expense.value_set,
            recurrence: &expense.recurrence,
        }
    }
}

pub(crate) fn check_income(income: &Income, ctx: &CheckContext<'_>) -> CheckResult {
    check_flow(&Flow::from(income), ctx)?;
    check_income_liability(income)
}

pub(crate) fn check_expense(expense: &Expense, ctx: &CheckContext<'_>) -> CheckResult {
    check_flow(&Flow::from(expense), ctx)
}

fn check_flow(flow: &Flow<'_>, ctx: &CheckContext<'_>) -> CheckResult {
    let (kind, name) = (flow.kind, flow.name);
    ctx.check_name(kind, name)?;

    let start = ctx.date_field(kind, name, "start", flow.start)?;
    let end = ctx.date_field(kind, name, "end", flow.end)?;
    let value_set = ctx.date_field(kind, name, "value set date", flow.value_set)?;

    if value_set > start {
        return Err(Violation::new(
            kind,
            name,
            format!(
                "{} '{}' has its value set on {}, after it starts on {}",
                kind,
                name,
                ctx.show(value_set),
                ctx.show(start)
            ),
        ));
    }
    ctx.check_after_cash_start(kind, name, start)?;
    check_ends_after_start(kind, name, start, end)?;

    ctx.value_field(kind, name, "value", flow.value)?;
    ctx.check_recurrence(kind, name, flow.recurrence)
}

fn check_ends_after_start(kind: EntityKind, name: &str, start: NaiveDate, end: NaiveDate) -> CheckResult {
    if end < start {
        Err(Violation::new(
            kind,
            name,
            format!("{} '{}' ends before it starts", kind, name),
        ))
    } else {
        Ok(())
    }
}

fn check_income_liability(income: &Income) -> CheckResult {
    let kind = EntityKind::Income;
    let name = income.name.as_str();
    let liability = income.liability.trim();
    if liability.is_empty() {
        return Ok(());
    }

    let parts: Vec<&str> = liability.split('/').collect();
    if parts.len() > MAX_INCOME_LIABILITY_PARTS {
        return Err(Violation::new(
            kind,
            name,
            format!(
                "Income '{}' liability '{}' has more than {} parts",
                name, liability, MAX_INCOME_LIABILITY_PARTS
            ),
        ));
    }

    let mut tax_people = Vec::new();
    let mut ni_people = Vec::new();
    for part in parts {
        match split_part(part, &[INCOME_TAX_SUFFIX, NI_SUFFIX]) {
            LiabilityPart::Person(person, suffix) if suffix == INCOME_TAX_SUFFIX => {
                tax_people.push(person)
            }
            LiabilityPart::Person(person, _) => ni_people.push(person),
            LiabilityPart::NoPerson => {
                return Err(Violation::new(
                    kind,
                    name,
                    format!(
                        "Income '{}' liability '{}' should name a person before the tax kind",
                        name, part
                    ),
                ))
            }
            LiabilityPart::BadSuffix => {
                return Err(Violation::new(
                    kind,
                    name,
                    format!(
                        "Income '{}' liability '{}' should end with {} or {}",
                        name, part, INCOME_TAX_SUFFIX, NI_SUFFIX
                    ),
                ))
            }
        }
    }

    let mismatched = !tax_people.is_empty() && ni_people.iter().any(|p| !tax_people.contains(p));
    if mismatched {
        return Err(Violation::new(
            kind,
            name,
            format!(
                "Income '{}' liability '{}' should name the same person for income tax and NI",
                name, liability
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Asset, Model, Trigger};
    use crate::resolver::Resolver;

    fn model() -> Model {
        let mut model = Model::new("Test", 14);
        model.assets.push(Asset::new("Cash", "1 Jan 2019", "0"));
        model.triggers.push(Trigger::new("Retire", "1 Jan 2040"));
        model
    }

    fn income_message(income: Income) -> String {
        let model = model();
        let resolver = Resolver::default();
        let ctx = CheckContext::new(&model, &resolver);
        match check_income(&income, &ctx) {
            Ok(()) => String::new(),
            Err(v) => v.message,
        }
    }

    fn expense_message(expense: Expense) -> String {
        let model = model();
        let resolver = Resolver::default();
        let ctx = CheckContext::new(&model, &resolver);
        match check_expense(&expense, &ctx) {
            Ok(()) => String::new(),
            Err(v) => v.message,
        }
    }

    #[test]
    fn test_valid_income() {
        let income = Income::new("Salary", "1 Jan 2019", "Retire", "3000")
            .with_liability("Joe(incomeTax)/Joe(NI)");
        assert_eq!(income_message(income), "");
    }

    #[test]
    fn test_value_set_after_start() {
        let mut income = Income::new("Salary", "1 Jan 2019", "Retire", "3000");
        income.value_set = "1 Feb 2019".into();
        assert_eq!(
            income_message(income),
            "Income 'Salary' has its value set on 01 Feb 2019, after it starts on 01 Jan 2019"
        );
    }

    #[test]
    fn test_ends_before_start() {
        let expense = Expense::new("Rent", "1 Jan 2020", "1 Jan 2019", "800");
        assert_eq!(expense_message(expense), "Expense 'Rent' ends before it starts");
    }

    #[test]
    fn test_bad_recurrence() {
        let mut expense = Expense::new("Rent", "1 Jan 2020", "Retire", "800");
        expense.recurrence = "monthly".into();
        assert_eq!(
            expense_message(expense),
            "Expense 'Rent' recurrence 'monthly' should be a whole number followed by w, m or y"
        );
    }

    #[test]
    fn test_income_liability_rules() {
        let income = Income::new("Salary", "1 Jan 2019", "Retire", "3000")
            .with_liability("Joe(incomeTax)/Joe(NI)/Jane(incomeTax)/Jane(NI)");
        assert!(income_message(income).contains("has more than 3 parts"));

        let income = Income::new("Salary", "1 Jan 2019", "Retire", "3000")
            .with_liability("Joe(CGT)");
        assert_eq!(
            income_message(income),
            "Income 'Salary' liability 'Joe(CGT)' should end with (incomeTax) or (NI)"
        );

        let income = Income::new("Salary", "1 Jan 2019", "Retire", "3000")
            .with_liability("Joe(incomeTax)/Jane(NI)");
        assert_eq!(
            income_message(income),
            "Income 'Salary' liability 'Joe(incomeTax)/Jane(NI)' should name the same person for income tax and NI"
        );

        let income = Income::new("Pension", "1 Jan 2019", "Retire", "100")
            .with_liability("Jane(NI)");
        assert_eq!(income_message(income), "");
    }
}
