use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::normalize::format_iso_date;
use crate::pipeline::CleanRecord;
use crate::{ClientError, ClientResult};

pub(crate) const OUTPUT_HEADERS: [&str; 3] = ["date", "merchant", "amount"];

/// `<dir>/<stem>_clean.csv` next to the input file.
pub(crate) fn default_output_path(input: &Path) -> ClientResult<PathBuf> {
    let Some(stem) = input.file_stem().map(|value| value.to_string_lossy()) else {
        return Err(ClientError::invalid_argument_with_recovery(
            &format!(
                "Could not derive an output name from `{}`.",
                input.display()
            ),
            vec!["Pass an explicit `--output <path>`.".to_string()],
        ));
    };
    Ok(input.with_file_name(format!("{stem}_clean.csv")))
}

pub(crate) fn same_file(left: &Path, right: &Path) -> bool {
    match (fs::canonicalize(left), fs::canonicalize(right)) {
        (Ok(left_real), Ok(right_real)) => left_real == right_real,
        _ => left == right,
    }
}

pub(crate) fn write_records(path: &Path, records: &[CleanRecord]) -> ClientResult<()> {
    let file = fs::File::create(path)
        .map_err(|error| ClientError::output_write_failed(path, &error.to_string()))?;
    write_to(file, records).map_err(|error| ClientError::output_write_failed(path, &error))
}

fn write_to<W: Write>(sink: W, records: &[CleanRecord]) -> Result<(), String> {
    let mut writer = csv::Writer::from_writer(sink);
    writer
        .write_record(OUTPUT_HEADERS)
        .map_err(|error| error.to_string())?;

    for record in records {
        let date = format_iso_date(&record.date);
        let amount = record.amount.to_string();
        writer
            .write_record([date.as_str(), record.merchant.as_str(), amount.as_str()])
            .map_err(|error| error.to_string())?;
    }

    writer.flush().map_err(|error| error.to_string())
}
