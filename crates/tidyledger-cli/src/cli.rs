use clap::{Parser, Subcommand};

pub fn parse_edit_distance(value: &str) -> Result<usize, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err("max edit distance must be a whole number like 0, 2, or 4".to_string());
    }
    trimmed
        .parse::<usize>()
        .map_err(|_| "max edit distance is too large".to_string())
}

/// Extended help shown after `tidyledger clean --help`.
pub const CLEAN_AFTER_HELP: &str = "\
How cleaning works:
  The input is a CSV file with a header row containing `date`, `merchant`, and `amount`.
  Header names are lowercase; surrounding spaces and extra columns are ignored.

  Each row is normalized independently:
    date      -> ISO `YYYY-MM-DD` (rows with an unreadable date are dropped)
    amount    -> fixed two-decimal value (rows with an unreadable amount are dropped)
    merchant  -> canonical catalog name, or `UNRESOLVED` (the row is kept)

  <path> is a local file path.
  To read stdin explicitly, use `-` as the path.
  Example: cat raw.csv | tidyledger clean --dry-run -

Where cleaned rows go:
  By default next to the input as `<name>_clean.csv`.
  Use `--output <path>` to choose a destination (required for stdin).
  `--dry-run` only reports the summary and writes nothing.

Fuzzy matching:
  Without a limit every non-empty merchant falls back to its nearest catalog entry.
  `--max-edit-distance N` leaves merchants further than N edits as `UNRESOLVED`.
  Run `tidyledger inspect --merchant \"<text>\"` to see how one value resolves.

Configuration:
  Optional `config.toml` in `$TIDYLEDGER_HOME` (default `~/.tidyledger`):
    [merchant]
    max_edit_distance = 4

    [amount]
    currency_marker = \"USD\"
  Flags override values from the file.
";

pub const INSPECT_AFTER_HELP: &str = "\
Examples:
  tidyledger inspect --date \"07/06/2021\"
  tidyledger inspect --amount \"USD 1,234.50\"
  tidyledger inspect --merchant \"SQ *UBER EATS 8839\" --max-edit-distance 4
";

#[derive(Debug, Parser)]
#[command(
    name = "tidyledger",
    version,
    about = "Transaction CSV cleaner",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Print debug logs to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Normalize a transaction CSV into canonical rows
    #[command(after_long_help = CLEAN_AFTER_HELP)]
    Clean {
        /// Validate and summarize without writing output
        #[arg(long)]
        dry_run: bool,
        /// Destination for cleaned rows
        #[arg(long, short = 'o', value_name = "PATH")]
        output: Option<String>,
        /// Leave merchants further than N edits from the catalog unresolved
        #[arg(long, value_name = "N", value_parser = parse_edit_distance)]
        max_edit_distance: Option<usize>,
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
        /// CSV file to clean, or `-` for stdin
        path: Option<String>,
    },
    /// Normalize individual values and explain the result
    #[command(after_long_help = INSPECT_AFTER_HELP)]
    Inspect {
        /// Raw date text
        #[arg(long, allow_hyphen_values = true)]
        date: Option<String>,
        /// Raw merchant text
        #[arg(long, allow_hyphen_values = true)]
        merchant: Option<String>,
        /// Raw amount text
        #[arg(long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// Leave merchants further than N edits from the catalog unresolved
        #[arg(long, value_name = "N", value_parser = parse_edit_distance)]
        max_edit_distance: Option<usize>,
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// List canonical merchant catalog entries in match priority order
    Catalog {
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
