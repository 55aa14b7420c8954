use std::path::Path;

use crate::ClientResult;
use crate::commands::common::clean_issue;
use crate::config::load_config;
use crate::contracts::envelope::{CommandName, SuccessEnvelope, success};
use crate::contracts::types::CleanData;
use crate::pipeline::batch::{self, BatchRequest};

#[derive(Debug, Default)]
pub struct CleanRunOptions<'a> {
    pub path: Option<String>,
    pub output: Option<String>,
    pub dry_run: bool,
    pub max_edit_distance: Option<usize>,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<Vec<u8>>,
}

pub fn run(
    path: Option<String>,
    output: Option<String>,
    dry_run: bool,
    max_edit_distance: Option<usize>,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(CleanRunOptions {
        path,
        output,
        dry_run,
        max_edit_distance,
        home_override: None,
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: CleanRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let config = load_config(options.home_override)?.with_overrides(options.max_edit_distance);
    let result = batch::execute(BatchRequest {
        path: options.path.clone(),
        output: options.output,
        dry_run: options.dry_run,
        stdin_override: options.stdin_override,
        config: config.clone(),
    })?;

    let summary = result.outcome.summary;
    let output_path = result.output_path.map(|path| path.display().to_string());
    let message = match &output_path {
        Some(path) => format!(
            "Kept {} of {} rows. Cleaned rows were written to `{path}`.",
            summary.kept_rows, summary.total_rows
        ),
        None => format!(
            "Kept {} of {} rows. No rows were written.",
            summary.kept_rows, summary.total_rows
        ),
    };

    let data = CleanData {
        dry_run: options.dry_run,
        run_id: result.run_id,
        path: options.path,
        source_used: result.source_kind.as_str().to_string(),
        output_path,
        message,
        issues: result.outcome.rejections.iter().map(clean_issue).collect(),
        summary,
        config,
    };

    success(CommandName::Clean, data)
}
