use std::io;

use serde_json::{Map, Value};

use super::format::{self, Align, Column};

const MAX_LISTED_ISSUES: usize = 20;

pub fn render_clean(data: &Value) -> io::Result<String> {
    let dry_run = data
        .get("dry_run")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let summary = data
        .get("summary")
        .and_then(Value::as_object)
        .ok_or_else(|| io::Error::other("clean output requires summary"))?;

    let mut lines = Vec::new();
    if dry_run {
        lines.push("Dry-run cleaning completed successfully.".to_string());
    } else {
        lines.push("Cleaning completed successfully.".to_string());
    }

    lines.push(String::new());
    lines.push("Summary:".to_string());
    let source = match data.get("path").and_then(Value::as_str) {
        Some(path) if path != "-" => path.to_string(),
        _ => "stdin".to_string(),
    };
    let entries = vec![
        ("Source:", source),
        ("Rows read:", get_count(summary, "total_rows").to_string()),
        ("Rows kept:", get_count(summary, "kept_rows").to_string()),
        ("Bad dates:", get_count(summary, "date_errors").to_string()),
        ("Bad amounts:", get_count(summary, "amount_errors").to_string()),
        (
            "Fuzzy matches:",
            get_count(summary, "merchant_fuzzy_matches").to_string(),
        ),
        (
            "Unresolved:",
            get_count(summary, "merchant_unresolved").to_string(),
        ),
        ("Edit limit:", describe_edit_limit(data)),
    ];
    lines.extend(format::key_value_rows(&entries, 2));

    lines.push(String::new());
    lines.extend(render_merchants(summary));

    let issues = render_issues(data);
    if !issues.is_empty() {
        lines.push(String::new());
        lines.extend(issues);
    }

    lines.push(String::new());
    match data.get("output_path").and_then(Value::as_str) {
        Some(path) => lines.push(format!("Cleaned rows were written to `{path}`.")),
        None if dry_run => {
            lines.push("No rows were written because this was a dry run.".to_string())
        }
        None => lines.push("No rows were written.".to_string()),
    }

    if dry_run {
        lines.push(String::new());
        lines.push("What to do next:".to_string());
        lines.push("  1. Fix or accept the dropped rows listed above.".to_string());
        lines.push("  2. Rerun without `--dry-run` to write the cleaned file.".to_string());
    }

    Ok(lines.join("\n"))
}

fn describe_edit_limit(data: &Value) -> String {
    match data
        .get("config")
        .and_then(|config| config.get("max_edit_distance"))
        .and_then(Value::as_u64)
    {
        Some(limit) => limit.to_string(),
        None => "none (nearest catalog entry always wins)".to_string(),
    }
}

fn render_merchants(summary: &Map<String, Value>) -> Vec<String> {
    let merchants = summary
        .get("merchants")
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<&str>>()
        })
        .unwrap_or_default();

    if merchants.is_empty() {
        return vec!["Merchants: none resolved.".to_string()];
    }
    vec![
        format!("Merchants ({}):", merchants.len()),
        format!("  {}", merchants.join(", ")),
    ]
}

fn render_issues(data: &Value) -> Vec<String> {
    let issues = data
        .get("issues")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if issues.is_empty() {
        return Vec::new();
    }

    let rows = issues
        .iter()
        .take(MAX_LISTED_ISSUES)
        .map(|issue| {
            vec![
                issue
                    .get("row")
                    .and_then(Value::as_u64)
                    .map(|row| row.to_string())
                    .unwrap_or_default(),
                value_str(issue, "code"),
                value_str(issue, "received"),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    let columns = [
        Column {
            name: "Row",
            align: Align::Right,
        },
        Column {
            name: "Problem",
            align: Align::Left,
        },
        Column {
            name: "Received",
            align: Align::Left,
        },
    ];

    let mut lines = vec![format!("Dropped rows ({}):", issues.len())];
    lines.extend(format::render_table_or_blocks(
        &columns,
        &rows,
        format::terminal_width(),
        "Dropped row",
    ));
    if issues.len() > MAX_LISTED_ISSUES {
        lines.push(format!(
            "  ... and {} more. Use `--json` for the full list.",
            issues.len() - MAX_LISTED_ISSUES
        ));
    }
    lines
}

fn get_count(map: &Map<String, Value>, key: &str) -> u64 {
    map.get(key).and_then(Value::as_u64).unwrap_or(0)
}

fn value_str(row: &Value, key: &str) -> String {
    row.get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}
