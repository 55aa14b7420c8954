use std::io;

use serde_json::Value;

use super::format;

pub fn render_inspect(data: &Value) -> io::Result<String> {
    let mut sections = Vec::new();
    if let Some(date) = data.get("date") {
        sections.push(render_date(date));
    }
    if let Some(amount) = data.get("amount") {
        sections.push(render_amount(amount));
    }
    if let Some(merchant) = data.get("merchant") {
        sections.push(render_merchant(merchant));
    }
    if sections.is_empty() {
        return Err(io::Error::other("inspect output requires at least one field"));
    }

    Ok(sections
        .into_iter()
        .map(|lines| lines.join("\n"))
        .collect::<Vec<String>>()
        .join("\n\n"))
}

fn render_date(date: &Value) -> Vec<String> {
    let mut entries = vec![("Input:", quoted(date, "input"))];
    if is_ok(date) {
        entries.push(("Normalized:", text(date, "value")));
        entries.push(("Format:", text(date, "format")));
    } else {
        entries.push(("Rejected:", text(date, "error_code")));
    }
    section("Date", &entries)
}

fn render_amount(amount: &Value) -> Vec<String> {
    let mut entries = vec![("Input:", quoted(amount, "input"))];
    if is_ok(amount) {
        entries.push(("Normalized:", text(amount, "value")));
        let refund = amount
            .get("refund")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        entries.push(("Refund:", if refund { "yes" } else { "no" }.to_string()));
    } else {
        entries.push(("Rejected:", text(amount, "error_code")));
    }
    section("Amount", &entries)
}

fn render_merchant(merchant: &Value) -> Vec<String> {
    let mut entries = vec![
        ("Input:", quoted(merchant, "input")),
        ("Match key:", quoted(merchant, "key")),
        ("Merchant:", text(merchant, "merchant")),
    ];

    let resolved = merchant
        .get("resolved")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if resolved {
        let method = text(merchant, "method");
        let how = match merchant.get("distance").and_then(Value::as_u64) {
            Some(distance) => format!("{method} ({distance} edits)"),
            None => method,
        };
        entries.push(("Matched by:", how));
        if let Some(entry) = merchant.get("matched") {
            entries.push(("Catalog entry:", describe_entry(entry)));
        }
    } else {
        entries.push(("Unresolved:", text(merchant, "unresolved_reason")));
        if let Some(nearest) = merchant.get("nearest") {
            let distance = merchant
                .get("distance")
                .and_then(Value::as_u64)
                .unwrap_or(0);
            entries.push((
                "Nearest:",
                format!("{} ({distance} edits)", describe_entry(nearest)),
            ));
        }
    }

    let limit = match merchant.get("max_edit_distance").and_then(Value::as_u64) {
        Some(limit) => limit.to_string(),
        None => "none".to_string(),
    };
    entries.push(("Edit limit:", limit));
    section("Merchant", &entries)
}

fn section(title: &str, entries: &[(&str, String)]) -> Vec<String> {
    let mut lines = vec![format!("{title}:")];
    lines.extend(format::key_value_rows(entries, 2));
    lines
}

fn describe_entry(entry: &Value) -> String {
    format!(
        "#{} {} ({} `{}`)",
        entry.get("priority").and_then(Value::as_u64).unwrap_or(0),
        text(entry, "canonical_output"),
        text(entry, "kind"),
        text(entry, "canonical_base"),
    )
}

fn is_ok(value: &Value) -> bool {
    value.get("ok").and_then(Value::as_bool).unwrap_or(false)
}

fn text(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

fn quoted(value: &Value, key: &str) -> String {
    format!("\"{}\"", text(value, key))
}
