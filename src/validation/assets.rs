//! Asset and debt checks

use super::context::CheckContext;
use super::liability::{split_part, LiabilityPart};
use super::violation::{CheckResult, Violation};
use crate::models::keywords::{CASH_ASSET_NAME, CGT_SUFFIX, INCOME_TAX_SUFFIX};
use crate::models::Asset;

pub(crate) fn check_asset(asset: &Asset, ctx: &CheckContext<'_>) -> CheckResult {
    let kind = asset.entity_kind();
    let name = asset.name.as_str();
    ctx.check_name(kind, name)?;

    if name.contains('/') {
        return Err(Violation::new(
            kind,
            name,
            format!("{} name '{}' should not contain '/'", kind, name),
        ));
    }

    let start = ctx.date_field(kind, name, "start", &asset.start)?;
    if name != CASH_ASSET_NAME {
        ctx.check_after_cash_start(kind, name, start)?;
    }

    let value = ctx.value_field(kind, name, "value", &asset.value)?;
    if asset.is_a_debt && value > 0.0 {
        return Err(Violation::new(
            kind,
            name,
            format!("Debt '{}' value '{}' should be negative or zero", name, asset.value),
        ));
    }

    if asset.has_quantity() {
        let whole = asset.quantity.trim().parse::<u64>().is_ok_and(|q| q > 0);
        if !whole {
            return Err(Violation::new(
                kind,
                name,
                format!(
                    "{} '{}' quantity '{}' should be a positive whole number",
                    kind, name, asset.quantity
                ),
            ));
        }
    }

    ctx.resolver
        .resolve_growth(&asset.growth, &ctx.model.settings)
        .map_err(|_| {
            Violation::new(
                kind,
                name,
                format!(
                    "{} '{}' growth '{}' does not resolve to a number",
                    kind, name, asset.growth
                ),
            )
        })?;

    if !asset.purchase_price.trim().is_empty() {
        ctx.value_field(kind, name, "purchase price", &asset.purchase_price)?;
    }

    check_asset_liability(asset)
}

fn check_asset_liability(asset: &Asset) -> CheckResult {
    let kind = asset.entity_kind();
    let name = asset.name.as_str();
    let liability = asset.liability.trim();
    if liability.is_empty() {
        return Ok(());
    }
    if asset.is_a_debt {
        return Err(Violation::new(
            kind,
            name,
            format!("Debt '{}' should not have a liability", name),
        ));
    }

    for part in liability.split('/') {
        match split_part(part, &[CGT_SUFFIX, INCOME_TAX_SUFFIX]) {
            LiabilityPart::Person(..) => {}
            LiabilityPart::NoPerson => {
                return Err(Violation::new(
                    kind,
                    name,
                    format!(
                        "Asset '{}' liability '{}' should name a person before the tax kind",
                        name, part
                    ),
                ))
            }
            LiabilityPart::BadSuffix => {
                return Err(Violation::new(
                    kind,
                    name,
                    format!(
                        "Asset '{}' liability '{}' should end with {} or {}",
                        name, part, CGT_SUFFIX, INCOME_TAX_SUFFIX
                    ),
                ))
            }
        }
    }
    Ok(())
}
