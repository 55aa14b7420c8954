use std::path::{Path, PathBuf};

use ulid::Ulid;

use crate::config::CleanerConfig;
use crate::normalize::{AmountNormalizer, CanonicalCatalog};
use crate::pipeline::input::{self, SourceKind};
use crate::pipeline::{CleaningOutcome, CleaningPipeline, parse, sink};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub(crate) struct BatchRequest {
    pub path: Option<String>,
    pub output: Option<String>,
    pub dry_run: bool,
    pub stdin_override: Option<Vec<u8>>,
    pub config: CleanerConfig,
}

#[derive(Debug, Clone)]
pub(crate) struct BatchResult {
    pub run_id: String,
    pub source_kind: SourceKind,
    pub output_path: Option<PathBuf>,
    pub outcome: CleaningOutcome,
}

pub(crate) fn execute(request: BatchRequest) -> ClientResult<BatchResult> {
    let run_id = Ulid::new().to_string();
    let span = tracing::info_span!("clean", run_id = %run_id);
    let _entered = span.enter();

    let source = input::resolve_source(request.path, request.stdin_override)?;
    let output_path = plan_output(
        source.path.as_deref(),
        request.output.as_deref(),
        request.dry_run,
    )?;
    let raw_records = parse::parse_records(&source.content)?;
    tracing::debug!(
        rows = raw_records.len(),
        source = source.source_kind.as_str(),
        "parsed input"
    );

    let catalog = CanonicalCatalog::builtin();
    let pipeline = CleaningPipeline::new(&catalog)
        .with_max_edit_distance(request.config.max_edit_distance)
        .with_amount_normalizer(AmountNormalizer::new(&request.config.currency_marker));
    let outcome = pipeline.clean(&raw_records);

    if let Some(path) = &output_path {
        sink::write_records(path, &outcome.records)?;
    }

    let summary = &outcome.summary;
    tracing::info!(
        total_rows = summary.total_rows,
        kept_rows = summary.kept_rows,
        date_errors = summary.date_errors,
        amount_errors = summary.amount_errors,
        merchant_unresolved = summary.merchant_unresolved,
        merchant_fuzzy_matches = summary.merchant_fuzzy_matches,
        dry_run = request.dry_run,
        "cleaning run finished"
    );

    Ok(BatchResult {
        run_id,
        source_kind: source.source_kind,
        output_path,
        outcome,
    })
}

/// Decides where cleaned rows go before any work is done, so a bad destination fails fast.
fn plan_output(
    input_path: Option<&Path>,
    output: Option<&str>,
    dry_run: bool,
) -> ClientResult<Option<PathBuf>> {
    if dry_run {
        return Ok(None);
    }

    let destination = match (output, input_path) {
        (Some(explicit), _) => PathBuf::from(explicit),
        (None, Some(input)) => sink::default_output_path(input)?,
        (None, None) => {
            return Err(ClientError::invalid_argument_with_recovery(
                "Stdin input needs an explicit output path.",
                vec![
                    "Pass `--output <path>` when piping rows into `tidyledger clean`.".to_string(),
                    "Or add `--dry-run` to only print the summary.".to_string(),
                ],
            ));
        }
    };

    if let Some(input) = input_path
        && sink::same_file(input, &destination)
    {
        return Err(ClientError::output_conflicts_with_input(&destination));
    }

    Ok(Some(destination))
}
