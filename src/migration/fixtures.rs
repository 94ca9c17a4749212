//! Documents as each schema version saved them
//!
//! `fixture(v)` describes the same household plan, written with exactly the
//! fields and conventions version `v` used.

use serde_json::{json, Map, Value};

fn record(fields: Value) -> Map<String, Value> {
    match fields {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn setting(version: u32, name: &str, value: &str, kind: &str) -> Value {
    let mut s = record(json!({"NAME": name, "VALUE": value}));
    if version >= 8 {
        s.insert("TYPE".into(), json!(kind));
        s.insert("HINT".into(), json!(""));
    }
    if version >= 14 {
        s.insert("ERA".into(), Value::Null);
    }
    Value::Object(s)
}

fn settings(version: u32) -> Vec<Value> {
    let cpi = if version >= 8 { "cpi" } else { "CPI" };
    let mut out = vec![
        setting(version, cpi, "2.5", "const"),
        setting(version, "Stock price", "12.5", "const"),
    ];
    if version < 3 {
        out.push(setting(version, "Stock price", "99", "const"));
    }
    if version < 11 {
        out.push(setting(version, "Focus of assets chart", "All", "view"));
    }
    if version >= 6 {
        out.push(setting(version, "Start of view range", "1 Jan 2019", "view"));
        out.push(setting(version, "End of view range", "1 Jan 2029", "view"));
    }
    if version >= 7 {
        out.push(setting(version, "Date of birth", "", "view"));
    }
    if version >= 10 {
        out.push(setting(version, "Today's value focus date", "", "view"));
    }
    if version >= 13 {
        out.push(setting(version, "Start of monitor range", "1 Jan 2019", "view"));
        out.push(setting(version, "End of monitor range", "1 Jan 2029", "view"));
    }
    out
}

fn asset(version: u32, fields: Value, is_debt: bool) -> Value {
    let mut a = record(fields);
    if version >= 2 {
        a.insert("IS_A_DEBT".into(), json!(is_debt));
        a.insert("CAN_BE_NEGATIVE".into(), json!(is_debt));
    }
    if version >= 4 {
        a.insert("QUANTITY".into(), json!(""));
        a.insert("PURCHASE_PRICE".into(), json!(""));
    }
    if version >= 14 {
        a.insert("CPI_IMMUNE".into(), json!(false));
        a.entry("GROWTH").or_insert(json!("0"));
        a.insert("ERA".into(), Value::Null);
    }
    Value::Object(a)
}

fn assets(version: u32) -> Vec<Value> {
    let growth = if version >= 8 { "cpi" } else { "CPI" };
    let mut out = vec![
        asset(
            version,
            json!({"NAME": "Cash", "CATEGORY": "", "START": "1 Jan 2019", "VALUE": "0"}),
            false,
        ),
        asset(
            version,
            json!({"NAME": "ISA", "CATEGORY": "Stocks", "START": "1 Jan 2019",
                   "VALUE": "10000", "GROWTH": growth, "LIABILITY": "Joe(CGT)"}),
            false,
        ),
    ];
    if version >= 2 {
        out.push(asset(
            version,
            json!({"NAME": "Mortgage", "CATEGORY": "", "START": "1 Jan 2019",
                   "VALUE": "-150000", "GROWTH": "3"}),
            true,
        ));
    }
    out
}

fn flow(version: u32, fields: Value) -> Value {
    let mut f = record(fields);
    if version >= 5 {
        f.insert("RECURRENCE".into(), json!("1m"));
        let start = f.get("START").cloned().unwrap_or(Value::Null);
        f.insert("VALUE_SET".into(), start);
    }
    if version >= 14 {
        f.insert("CPI_IMMUNE".into(), json!(false));
        f.insert("ERA".into(), Value::Null);
    }
    Value::Object(f)
}

fn transaction(version: u32, fields: Value, kind: &str) -> Value {
    let mut t = record(fields);
    if version >= 1 {
        t.insert("TYPE".into(), json!(kind));
        t.entry("RECURRENCE").or_insert(json!(""));
        t.insert("FROM_ABSOLUTE".into(), json!(true));
        t.entry("TO_ABSOLUTE").or_insert(json!(true));
    }
    if version >= 14 {
        t.insert("ERA".into(), Value::Null);
    }
    Value::Object(t)
}

fn transactions(version: u32) -> Vec<Value> {
    let mut out = vec![transaction(
        version,
        json!({"NAME": "Save", "FROM": "Cash", "FROM_VALUE": "100",
               "TO": "ISA", "TO_VALUE": "100", "DATE": "1 Mar 2019"}),
        "custom",
    )];
    for n in 1..=10 {
        let name = if version >= 9 {
            format!("Revalue ISA {:02}", n)
        } else {
            format!("Revalue ISA {}", n)
        };
        out.push(transaction(
            version,
            json!({"NAME": name, "FROM": "", "FROM_VALUE": "", "TO": "ISA",
                   "TO_VALUE": format!("{}", 10000 + 1000 * n),
                   "DATE": format!("1 Jan {}", 2019 + n)}),
            "revalueAsset",
        ));
    }
    if version >= 2 {
        out.push(transaction(
            version,
            json!({"NAME": "Pay mortgage", "FROM": "Cash", "FROM_VALUE": "500",
                   "TO": "Mortgage", "TO_VALUE": "500", "DATE": "1 Feb 2019",
                   "STOP_DATE": "Retire", "RECURRENCE": "1m"}),
            "payOffDebt",
        ));
    }
    out
}

/// The household plan as saved by schema `version`
pub(super) fn fixture(version: u32) -> Value {
    let mut trigger = record(json!({"NAME": "Retire", "DATE": "1 Jan 2040"}));
    if version >= 14 {
        trigger.insert("ERA".into(), Value::Null);
    }

    let mut doc = record(json!({
        "name": "Household",
        "version": version,
        "triggers": [Value::Object(trigger)],
        "settings": settings(version),
        "assets": assets(version),
        "incomes": [flow(version, json!({"NAME": "Salary", "CATEGORY": "", "START": "1 Jan 2019",
                                        "END": "Retire", "VALUE": "3000",
                                        "LIABILITY": "Joe(incomeTax)/Joe(NI)"}))],
        "expenses": [flow(version, json!({"NAME": "Rent", "CATEGORY": "", "START": "1 Jan 2019",
                                         "END": "Retire", "VALUE": "800"}))],
        "transactions": transactions(version),
    }));
    if version >= 12 {
        doc.insert("monitors".into(), json!([]));
    }
    if version >= 13 {
        doc.insert("generators".into(), json!([]));
    }
    Value::Object(doc)
}
