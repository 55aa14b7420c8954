use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "TIDYLEDGER_LOG";

/// Installs a stderr subscriber so stdout stays reserved for command output.
///
/// `--verbose` wins over `TIDYLEDGER_LOG`; without either only warnings are shown.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(default_directive(true))
    } else {
        EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(false)))
    };

    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(filter)
        .try_init();
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "tidyledger_client=debug,tidyledger=debug"
    } else {
        "warn"
    }
}
