use tidyledger_client::commands;
use tidyledger_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Clean {
            dry_run,
            output,
            max_edit_distance,
            json: _,
            path,
        } => commands::clean::run(path.clone(), output.clone(), *dry_run, *max_edit_distance),
        Commands::Inspect {
            date,
            merchant,
            amount,
            max_edit_distance,
            json: _,
        } => commands::inspect::run(
            date.clone(),
            merchant.clone(),
            amount.clone(),
            *max_edit_distance,
        ),
        Commands::Catalog { json: _ } => commands::catalog::run(),
    }
}
