use serde_json::Value;
use tidyledger_client::ClientError;

pub fn render_error(error: &ClientError) -> String {
    let mut lines = vec![
        "Something went wrong, but it's easy to fix.".to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
    ];
    lines.extend(detail_lines(error.data.as_ref()));
    lines.push(String::new());
    lines.push("What to do next:".to_string());

    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}

/// Header lists from a schema mismatch are worth showing inline.
fn detail_lines(data: Option<&Value>) -> Vec<String> {
    let Some(data) = data else {
        return Vec::new();
    };
    [("Missing:", "missing_headers"), ("Found:", "actual_headers")]
        .iter()
        .filter_map(|(label, key)| {
            let values = data.get(*key)?.as_array()?;
            let joined = values
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<&str>>()
                .join(", ");
            Some(format!("  {label:<9} {joined}"))
        })
        .collect()
}
