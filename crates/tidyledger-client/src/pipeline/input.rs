use std::fs;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum SourceKind {
    File,
    Stdin,
}

impl SourceKind {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Stdin => "stdin",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ResolvedSource {
    pub(crate) source_kind: SourceKind,
    pub(crate) path: Option<PathBuf>,
    /// Raw bytes; decoding happens per field so invalid UTF-8 never aborts a run.
    pub(crate) content: Vec<u8>,
}

/// Exactly one source is accepted: a file path, `-` for stdin, or piped stdin with no path.
pub(crate) fn resolve_source(
    path: Option<String>,
    stdin_override: Option<Vec<u8>>,
) -> ClientResult<ResolvedSource> {
    let stdin_body = read_stdin(stdin_override)?;

    if let Some(path_value) = path {
        if path_value == "-" {
            if let Some(stdin_value) = stdin_body {
                return Ok(ResolvedSource {
                    source_kind: SourceKind::Stdin,
                    path: None,
                    content: stdin_value,
                });
            }

            return Err(ClientError::invalid_argument_with_recovery(
                "Path `-` means stdin input, but stdin was empty.",
                vec![
                    "Pipe CSV rows into `tidyledger clean -`.".to_string(),
                    "Or pass a file path instead of `-`.".to_string(),
                ],
            ));
        }

        let file_body = fs::read(&path_value).map_err(|error| {
            ClientError::invalid_argument_with_recovery(
                &format!("Could not read input file `{path_value}`: {error}"),
                vec![
                    "Verify the path exists and is readable.".to_string(),
                    "Rerun `tidyledger clean <path>`.".to_string(),
                ],
            )
        })?;

        if stdin_body.is_some() {
            return Err(ClientError::invalid_argument_with_recovery(
                "Both stdin and file input were provided.",
                vec!["Pass exactly one source: either a file path or piped stdin.".to_string()],
            ));
        }

        return Ok(ResolvedSource {
            source_kind: SourceKind::File,
            path: Some(PathBuf::from(path_value)),
            content: file_body,
        });
    }

    if let Some(stdin_value) = stdin_body {
        return Ok(ResolvedSource {
            source_kind: SourceKind::Stdin,
            path: None,
            content: stdin_value,
        });
    }

    Err(ClientError::invalid_argument_with_recovery(
        "No input source provided.",
        vec![
            "Pass a CSV file path: `tidyledger clean <path>`.".to_string(),
            "Or pipe CSV rows via stdin.".to_string(),
        ],
    ))
}

fn read_stdin(stdin_override: Option<Vec<u8>>) -> ClientResult<Option<Vec<u8>>> {
    if let Some(value) = stdin_override {
        return Ok(non_blank(value));
    }

    if std::io::stdin().is_terminal() {
        return Ok(None);
    }

    let mut buffer = Vec::new();
    std::io::stdin().read_to_end(&mut buffer).map_err(|error| {
        ClientError::invalid_argument_with_recovery(
            &format!("Could not read stdin: {error}"),
            vec![
                "Retry with an explicit file path argument.".to_string(),
                "Or rerun with valid stdin content.".to_string(),
            ],
        )
    })?;

    Ok(non_blank(buffer))
}

fn non_blank(bytes: Vec<u8>) -> Option<Vec<u8>> {
    if bytes.iter().all(|byte| byte.is_ascii_whitespace()) {
        return None;
    }
    Some(bytes)
}
