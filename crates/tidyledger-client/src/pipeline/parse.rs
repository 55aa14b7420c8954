use std::borrow::Cow;
use std::collections::HashMap;

use crate::pipeline::RawRecord;
use crate::{ClientError, ClientResult};

pub(crate) const REQUIRED_HEADERS: [&str; 3] = ["date", "merchant", "amount"];

/// Reads `date`, `merchant`, `amount` columns by header name.
///
/// Rows may be short or long; missing cells read as empty text and extra columns are ignored.
/// Bytes that are not UTF-8 are replaced rather than rejected.
pub(crate) fn parse_records(content: &[u8]) -> ClientResult<Vec<RawRecord>> {
    if content.iter().all(|byte| byte.is_ascii_whitespace()) {
        return Err(ClientError::invalid_argument_with_recovery(
            "Input source is empty.",
            vec!["Provide a CSV with a `date,merchant,amount` header row.".to_string()],
        ));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content);

    let headers = reader
        .byte_headers()
        .map_err(|error| unreadable_csv(&error))?
        .iter()
        .map(|value| decode(value).trim().to_string())
        .collect::<Vec<String>>();

    let index_by_name = headers
        .iter()
        .enumerate()
        .rev()
        .map(|(index, name)| (name.as_str(), index))
        .collect::<HashMap<&str, usize>>();

    if REQUIRED_HEADERS
        .iter()
        .any(|required| !index_by_name.contains_key(required))
    {
        return Err(ClientError::input_schema_mismatch(
            REQUIRED_HEADERS.iter().map(|name| name.to_string()).collect(),
            headers.clone(),
        ));
    }

    let column = |name: &str| index_by_name.get(name).copied().unwrap_or_default();
    let (date_index, merchant_index, amount_index) =
        (column("date"), column("merchant"), column("amount"));

    let mut rows = Vec::new();
    for (row_index, result_row) in reader.byte_records().enumerate() {
        let record = result_row.map_err(|error| unreadable_csv(&error))?;
        let field = |index: usize| {
            record
                .get(index)
                .map(|value| decode(value).into_owned())
                .unwrap_or_default()
        };

        rows.push(RawRecord {
            row: row_index + 1,
            date_text: field(date_index),
            merchant_text: field(merchant_index),
            amount_text: field(amount_index),
        });
    }

    Ok(rows)
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

fn unreadable_csv(error: &csv::Error) -> ClientError {
    ClientError::invalid_argument_with_recovery(
        &format!("CSV input could not be read: {error}"),
        vec!["Check that the input is comma-separated text with a header row.".to_string()],
    )
}
