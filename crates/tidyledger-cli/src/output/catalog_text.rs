use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_catalog(data: &Value) -> io::Result<String> {
    let entries = data
        .get("entries")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("catalog output requires entries"))?;
    let family_count = data
        .get("family_count")
        .and_then(Value::as_u64)
        .unwrap_or(0);

    let mut lines = vec![
        format!(
            "{} catalog entries across {family_count} merchants.",
            entries.len()
        ),
        "The longest contained match wins; on equal length the earlier entry wins.".to_string(),
        String::new(),
    ];

    let columns = [
        Column {
            name: "#",
            align: Align::Right,
        },
        Column {
            name: "Match text",
            align: Align::Left,
        },
        Column {
            name: "Output",
            align: Align::Left,
        },
        Column {
            name: "Kind",
            align: Align::Left,
        },
    ];
    let rows = entries
        .iter()
        .map(|entry| {
            vec![
                entry
                    .get("priority")
                    .and_then(Value::as_u64)
                    .map(|priority| priority.to_string())
                    .unwrap_or_default(),
                field(entry, "canonical_base"),
                field(entry, "canonical_output"),
                field(entry, "kind"),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(format::render_table_or_blocks(
        &columns,
        &rows,
        format::terminal_width(),
        "Entry",
    ));

    Ok(lines.join("\n"))
}

fn field(entry: &Value, key: &str) -> String {
    entry
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}
