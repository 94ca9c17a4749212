//! Checks on the model as a whole

use std::collections::HashSet;

use super::context::CheckContext;
use super::violation::{CheckResult, Violation};
use crate::models::keywords::{is_deprecated_setting, VIEW_RANGE_END, VIEW_RANGE_START};
use crate::models::EntityKind;

pub(crate) type ModelRule = fn(&CheckContext<'_>) -> CheckResult;

/// Model-level rules in the order they run
pub(crate) const MODEL_RULES: [ModelRule; 4] = [
    check_view_range,
    check_no_deprecated_settings,
    check_monitor_names,
    check_generator_names,
];

fn check_view_range(ctx: &CheckContext<'_>) -> CheckResult {
    let start = view_range_bound(ctx, VIEW_RANGE_START)?;
    let end = view_range_bound(ctx, VIEW_RANGE_END)?;
    if end <= start {
        return Err(Violation::new(
            EntityKind::Model,
            "",
            format!("'{}' should be after '{}'", VIEW_RANGE_END, VIEW_RANGE_START),
        ));
    }
    Ok(())
}

fn view_range_bound(ctx: &CheckContext<'_>, name: &str) -> Result<chrono::NaiveDate, Violation> {
    let setting = ctx.model.find_setting(name).ok_or_else(|| {
        Violation::new(
            EntityKind::Model,
            "",
            format!("Model is missing the required setting '{}'", name),
        )
    })?;
    ctx.date_field(EntityKind::Setting, name, "value", &setting.value)
}

fn check_no_deprecated_settings(ctx: &CheckContext<'_>) -> CheckResult {
    match ctx
        .model
        .settings
        .iter()
        .find(|s| is_deprecated_setting(&s.name))
    {
        Some(setting) => Err(Violation::new(
            EntityKind::Setting,
            setting.name.as_str(),
            format!(
                "Setting '{}' is no longer used and should have been removed when the model was upgraded",
                setting.name
            ),
        )),
        None => Ok(()),
    }
}

fn check_unique_names<'n>(kind: EntityKind, names: impl Iterator<Item = &'n str>) -> CheckResult {
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(Violation::new(kind, name, format!("{} name needs some characters", kind)));
        }
        if !seen.insert(name) {
            return Err(Violation::new(
                kind,
                name,
                format!("{} name '{}' is already in use", kind, name),
            ));
        }
    }
    Ok(())
}

fn check_monitor_names(ctx: &CheckContext<'_>) -> CheckResult {
    check_unique_names(
        EntityKind::Monitor,
        ctx.model.monitors.iter().map(|m| m.name.as_str()),
    )
}

fn check_generator_names(ctx: &CheckContext<'_>) -> CheckResult {
    check_unique_names(
        EntityKind::Generator,
        ctx.model.generators.iter().map(|g| g.name.as_str()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Generator, Model, Monitor, Setting};
    use serde_json::json;
    use crate::resolver::Resolver;

    fn model() -> Model {
        let mut model = Model::new("Test", 14);
        model.settings.push(Setting::view(VIEW_RANGE_START, "1 Jan 2019"));
        model.settings.push(Setting::view(VIEW_RANGE_END, "1 Jan 2029"));
        model
    }

    fn messages(model: &Model) -> Vec<String> {
        let resolver = Resolver::default();
        let ctx = CheckContext::new(model, &resolver);
        MODEL_RULES
            .iter()
            .filter_map(|rule| rule(&ctx).err())
            .map(|v| v.message)
            .collect()
    }

    #[test]
    fn test_complete_model_passes() {
        assert!(messages(&model()).is_empty());
    }

    #[test]
    fn test_missing_end_of_view_range() {
        let mut model = model();
        model.settings.retain(|s| s.name != VIEW_RANGE_END);
        assert_eq!(
            messages(&model),
            vec!["Model is missing the required setting 'End of view range'"]
        );
    }

    #[test]
    fn test_view_range_order() {
        let mut model = model();
        model.settings[1].value = "1 Jan 2018".into();
        assert_eq!(
            messages(&model),
            vec!["'End of view range' should be after 'Start of view range'"]
        );

        model.settings[1].value = "whenever".into();
        assert_eq!(
            messages(&model),
            vec!["Setting 'End of view range' value 'whenever' is not a valid date"]
        );
    }

    #[test]
    fn test_deprecated_setting() {
        let mut model = model();
        model.settings.push(Setting::new("Focus of assets chart", "All"));
        assert_eq!(messages(&model).len(), 1);
    }

    #[test]
    fn test_monitor_names() {
        let mut model = model();
        model.monitors.push(Monitor::new("Cash"));
        model.monitors.push(Monitor::new("Cash"));
        assert_eq!(messages(&model), vec!["Monitor name 'Cash' is already in use"]);
    }

    #[test]
    fn test_generator_names() {
        let mut model = model();
        let details = json!({"contribution": "5%"});
        model
            .generators
            .push(Generator::new("Pension", "Defined Contributions", details.clone()));
        assert!(messages(&model).is_empty());

        model.generators.push(Generator::new(" ", "Defined Contributions", details));
        assert_eq!(messages(&model), vec!["Generator name needs some characters"]);
    }
}
