use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

pub(crate) const CLEAN_HELP_COMMAND: &str = "tidyledger clean --help";
pub(crate) const CLEAN_HELP_SECTION_TITLE: &str = "Cleaning Troubleshooting";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_clean_help_data(self, data: Value) -> Self {
        self.with_data(merge_clean_help_data(data))
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `tidyledger {cmd} --help` for usage."),
            None => "Run `tidyledger --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn input_schema_mismatch(
        required_headers: Vec<String>,
        actual_headers: Vec<String>,
    ) -> Self {
        let missing_headers = required_headers
            .iter()
            .filter(|required| !actual_headers.contains(required))
            .cloned()
            .collect::<Vec<String>>();

        Self::new(
            "input_schema_mismatch",
            "CSV headers do not include every required column.",
            vec![
                "Include the `date`, `merchant`, and `amount` headers; other columns are ignored."
                    .to_string(),
                "Run `tidyledger clean --help` to review the input format.".to_string(),
                "Rerun `tidyledger clean --dry-run <path>`.".to_string(),
            ],
        )
        .with_clean_help_data(json!({
            "required_headers": required_headers,
            "missing_headers": missing_headers,
            "actual_headers": actual_headers,
        }))
    }

    pub fn output_conflicts_with_input(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::invalid_argument_with_recovery(
            &format!("Output path `{location}` is the same file as the input."),
            vec![
                "Pass a different `--output <path>` so the raw file is preserved.".to_string(),
                "Or omit `--output` to write `<name>_clean.csv` next to the input.".to_string(),
            ],
        )
        .with_clean_help_data(json!({
            "output_path": location,
        }))
    }

    pub fn output_write_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "output_write_failed",
            &format!("Could not write cleaned rows to `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or pass a writable `--output <path>`."
            )],
        )
    }

    pub fn config_invalid(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "config_invalid",
            &format!("Configuration file `{location}` could not be read or parsed: {detail}"),
            vec![
                format!(
                    "Make `{location}` readable and valid TOML, or remove the file to use defaults."
                ),
                "Supported keys: `[merchant] max_edit_distance`, `[amount] currency_marker`."
                    .to_string(),
            ],
        )
    }

    pub fn config_home_unresolved(detail: &str) -> Self {
        Self::new(
            "config_home_unresolved",
            &format!("Could not resolve the tidyledger home directory: {detail}"),
            vec!["Set `TIDYLEDGER_HOME` to a readable directory.".to_string()],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

fn merge_clean_help_data(mut data: Value) -> Value {
    if !data.is_object() {
        data = json!({});
    }

    if let Some(object) = data.as_object_mut() {
        object.insert(
            "help_command".to_string(),
            Value::String(CLEAN_HELP_COMMAND.to_string()),
        );
        object.insert(
            "help_section_title".to_string(),
            Value::String(CLEAN_HELP_SECTION_TITLE.to_string()),
        );
    }

    data
}

pub type ClientResult<T> = Result<T, ClientError>;
