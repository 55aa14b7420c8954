use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde_json::Value;
use tempfile::TempDir;

const EXPECTED_ROOT_HELP: &str = "tidyledger - transaction CSV cleaner

Usage:
  tidyledger <command>

Start here:
  tidyledger clean --help
  tidyledger clean --dry-run <path>
  tidyledger catalog
";

const SCENARIO: &str = "date,merchant,amount\n\
2021-6-7,UBER EATS,$12.50\n\
13/45/2021,Starbucks,5.00\n\
2021-01-01,XYZ_UNKNOWN_BRAND,10.00\n";

struct CliRun {
    code: Option<i32>,
    stdout: String,
    stderr: String,
}

struct Workspace {
    _dir: TempDir,
    root: PathBuf,
    home: PathBuf,
}

fn workspace() -> Workspace {
    let dir = tempfile::tempdir();
    assert!(dir.is_ok());
    let dir = match dir {
        Ok(value) => value,
        Err(error) => panic!("temp dir: {error}"),
    };
    let root = dir.path().to_path_buf();
    let home = root.join("home");
    assert!(fs::create_dir_all(&home).is_ok());
    Workspace {
        _dir: dir,
        root,
        home,
    }
}

fn write_source_file(root: &Path, name: &str, body: &str) -> PathBuf {
    let source_path = root.join(name);
    let write = fs::write(&source_path, body);
    assert!(write.is_ok());
    source_path
}

fn base_command(home: &Path, args: &[&str]) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_tidyledger"));
    command.args(args);
    command.env("TIDYLEDGER_HOME", home);
    command.env_remove("TIDYLEDGER_LOG");
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());
    command
}

fn run_cli_with(command: &mut Command, input: Option<&str>) -> CliRun {
    if input.is_some() {
        command.stdin(Stdio::piped());
    } else {
        command.stdin(Stdio::null());
    }

    let child_spawn = command.spawn();
    assert!(child_spawn.is_ok());
    if let Ok(mut child) = child_spawn {
        if let Some(body) = input
            && let Some(mut pipe) = child.stdin.take()
        {
            let write_result = pipe.write_all(body.as_bytes());
            assert!(write_result.is_ok());
        }

        let output = child.wait_with_output();
        assert!(output.is_ok());
        if let Ok(result) = output {
            return CliRun {
                code: result.status.code(),
                stdout: String::from_utf8_lossy(&result.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&result.stderr).into_owned(),
            };
        }
    }

    CliRun {
        code: None,
        stdout: String::new(),
        stderr: String::new(),
    }
}

fn run_cli(home: &Path, args: &[&str]) -> CliRun {
    run_cli_with(&mut base_command(home, args), None)
}

fn parse_json(body: &str) -> Value {
    let parsed = serde_json::from_str::<Value>(body);
    assert!(parsed.is_ok(), "not JSON: {body}");
    if let Ok(value) = parsed {
        return value;
    }
    Value::Null
}

fn assert_text_error_contract(body: &str, code: &str) {
    assert!(body.contains("Something went wrong, but it's easy to fix."));
    assert!(body.contains(&format!("  Error:    {code}")));
    assert!(body.contains("  Details:"));
    assert!(body.contains("What to do next:"));
}

fn assert_json_error_contract(body: &str, code: &str) -> Value {
    let payload = parse_json(body);
    assert_eq!(payload["error"]["code"], Value::String(code.to_string()));
    assert!(payload["error"]["message"].is_string());
    assert!(payload["error"]["recovery_steps"].is_array());
    assert!(payload.get("ok").is_none());
    payload
}

#[test]
fn root_command_uses_short_plaintext_help() {
    let ws = workspace();
    let run = run_cli(&ws.home, &[]);
    assert_eq!(run.code, Some(0));
    assert_eq!(run.stdout, EXPECTED_ROOT_HELP);
}

#[test]
fn help_and_version_return_success_output() {
    let ws = workspace();
    let help = run_cli(&ws.home, &["--help"]);
    assert_eq!(help.code, Some(0));
    assert!(help.stdout.starts_with("tidyledger - transaction CSV cleaner"));
    assert!(help.stdout.contains("tidyledger clean --dry-run <path>"));

    let version = run_cli(&ws.home, &["--version"]);
    assert_eq!(version.code, Some(0));
    assert_eq!(version.stdout.trim(), "tidyledger 0.1.0");
}

#[test]
fn clean_help_documents_input_and_config() {
    let ws = workspace();
    let run = run_cli(&ws.home, &["clean", "--help"]);
    assert_eq!(run.code, Some(0));
    assert!(run.stdout.contains("How cleaning works:"));
    assert!(run.stdout.contains("<name>_clean.csv"));
    assert!(run.stdout.contains("config.toml"));
}

#[test]
fn clean_writes_output_and_reports_summary_as_text() {
    let ws = workspace();
    let source = write_source_file(&ws.root, "raw.csv", SCENARIO);
    let source_arg = source.display().to_string();

    let run = run_cli(
        &ws.home,
        &["clean", &source_arg, "--max-edit-distance", "4"],
    );
    assert_eq!(run.code, Some(0), "{}", run.stdout);
    assert!(run.stdout.starts_with("Cleaning completed successfully."));
    assert!(run.stdout.contains("Dropped rows (1):"));
    assert!(run.stdout.contains("13/45/2021"));

    let written = fs::read_to_string(ws.root.join("raw_clean.csv"));
    assert!(written.is_ok());
    if let Ok(body) = written {
        assert_eq!(
            body,
            "date,merchant,amount\n2021-06-07,UBER,12.50\n2021-01-01,UNRESOLVED,10.00\n"
        );
    }
}

#[test]
fn clean_json_uses_versioned_envelope() {
    let ws = workspace();
    let source = write_source_file(&ws.root, "raw.csv", SCENARIO);
    let source_arg = source.display().to_string();

    let run = run_cli(&ws.home, &["clean", "--dry-run", &source_arg, "--json"]);
    assert_eq!(run.code, Some(0));
    let payload = parse_json(&run.stdout);
    assert_eq!(payload["ok"], Value::Bool(true));
    assert_eq!(payload["version"], Value::String("v1".to_string()));
    assert_eq!(payload["data"]["summary"]["total_rows"], 3);
    assert_eq!(payload["data"]["summary"]["kept_rows"], 2);
    assert_eq!(payload["data"]["dry_run"], Value::Bool(true));
    assert!(!ws.root.join("raw_clean.csv").exists());
}

#[test]
fn clean_reads_piped_stdin_with_dash() {
    let ws = workspace();
    let mut command = base_command(&ws.home, &["clean", "--dry-run", "-", "--json"]);
    let run = run_cli_with(&mut command, Some(SCENARIO));
    assert_eq!(run.code, Some(0));
    let payload = parse_json(&run.stdout);
    assert_eq!(
        payload["data"]["source_used"],
        Value::String("stdin".to_string())
    );
    assert_eq!(payload["data"]["summary"]["date_errors"], 1);
}

#[test]
fn stdin_without_output_is_a_user_error() {
    let ws = workspace();
    let mut command = base_command(&ws.home, &["clean", "-"]);
    let run = run_cli_with(&mut command, Some(SCENARIO));
    assert_eq!(run.code, Some(1));
    assert_text_error_contract(&run.stdout, "invalid_argument");
}

#[test]
fn schema_mismatch_returns_json_error_with_missing_headers() {
    let ws = workspace();
    let source = write_source_file(&ws.root, "bad.csv", "when,merchant,amount\nx,y,z\n");
    let source_arg = source.display().to_string();

    let run = run_cli(&ws.home, &["clean", &source_arg, "--json"]);
    assert_eq!(run.code, Some(1));
    let payload = assert_json_error_contract(&run.stdout, "input_schema_mismatch");
    assert_eq!(payload["data"]["missing_headers"][0], "date");
}

#[test]
fn unknown_flag_is_reported_with_command_hint() {
    let ws = workspace();
    let text = run_cli(&ws.home, &["clean", "--nope"]);
    assert_eq!(text.code, Some(1));
    assert_text_error_contract(&text.stdout, "invalid_argument");
    assert!(text.stdout.contains("tidyledger clean --help"));

    let json = run_cli(&ws.home, &["clean", "--nope", "--json"]);
    assert_eq!(json.code, Some(1));
    let payload = assert_json_error_contract(&json.stdout, "invalid_argument");
    assert_eq!(payload["data"]["command_hint"], "clean");
}

#[test]
fn unwritable_output_exits_with_code_two() {
    let ws = workspace();
    let source = write_source_file(&ws.root, "raw.csv", SCENARIO);
    let source_arg = source.display().to_string();
    let output = ws.root.join("missing-dir").join("out.csv");
    let output_arg = output.display().to_string();

    let run = run_cli(
        &ws.home,
        &["clean", &source_arg, "--output", &output_arg, "--json"],
    );
    assert_eq!(run.code, Some(2));
    assert_json_error_contract(&run.stdout, "output_write_failed");
}

#[test]
fn malformed_config_is_reported_before_reading_input() {
    let ws = workspace();
    write_source_file(&ws.home, "config.toml", "[merchant]\nmax_edit_distance = \"far\"\n");
    let source = write_source_file(&ws.root, "raw.csv", SCENARIO);
    let source_arg = source.display().to_string();

    let run = run_cli(&ws.home, &["clean", "--dry-run", &source_arg]);
    assert_eq!(run.code, Some(1));
    assert_text_error_contract(&run.stdout, "config_invalid");
}

#[test]
fn inspect_explains_each_value() {
    let ws = workspace();
    let run = run_cli(
        &ws.home,
        &[
            "inspect",
            "--date",
            "2021-6-7",
            "--amount",
            "$12.50",
            "--merchant",
            "UBER EATS",
            "--json",
        ],
    );
    assert_eq!(run.code, Some(0));
    let payload = parse_json(&run.stdout);
    assert_eq!(payload["data"]["date"]["value"], "2021-06-07");
    assert_eq!(payload["data"]["amount"]["value"], "12.50");
    assert_eq!(payload["data"]["merchant"]["merchant"], "UBER");
    assert_eq!(payload["data"]["merchant"]["resolved"], Value::Bool(true));

    let text = run_cli(&ws.home, &["inspect", "--date", "13/45/2021"]);
    assert_eq!(text.code, Some(0));
    assert!(text.stdout.starts_with("Date:"));
    assert!(text.stdout.contains("invalid_date"));
}

#[test]
fn inspect_without_fields_is_rejected() {
    let ws = workspace();
    let run = run_cli(&ws.home, &["inspect", "--json"]);
    assert_eq!(run.code, Some(1));
    assert_json_error_contract(&run.stdout, "invalid_argument");
}

#[test]
fn catalog_lists_entries_in_text_and_json() {
    let ws = workspace();
    let text = run_cli(&ws.home, &["catalog"]);
    assert_eq!(text.code, Some(0));
    assert!(text.stdout.contains("catalog entries across"));
    assert!(text.stdout.contains("UBER"));

    let json = run_cli(&ws.home, &["catalog", "--json"]);
    assert_eq!(json.code, Some(0));
    let payload = parse_json(&json.stdout);
    let entries = payload["data"]["entries"].as_array().cloned().unwrap_or_default();
    assert!(!entries.is_empty());
    assert_eq!(
        payload["data"]["entry_count"],
        Value::from(entries.len() as u64)
    );
}

#[test]
fn verbose_logs_go_to_stderr_and_keep_stdout_parseable() {
    let ws = workspace();
    let source = write_source_file(&ws.root, "raw.csv", SCENARIO);
    let source_arg = source.display().to_string();

    let quiet = run_cli(&ws.home, &["clean", "--dry-run", &source_arg, "--json"]);
    assert_eq!(quiet.code, Some(0));
    assert!(!quiet.stderr.contains("cleaning run finished"));

    let verbose = run_cli(
        &ws.home,
        &["--verbose", "clean", "--dry-run", &source_arg, "--json"],
    );
    assert_eq!(verbose.code, Some(0));
    assert!(verbose.stderr.contains("cleaning run finished"));
    let payload = parse_json(&verbose.stdout);
    assert_eq!(payload["ok"], Value::Bool(true));

    let mut from_env = base_command(&ws.home, &["clean", "--dry-run", &source_arg]);
    from_env.env("TIDYLEDGER_LOG", "info");
    let env_run = run_cli_with(&mut from_env, None);
    assert_eq!(env_run.code, Some(0));
    assert!(env_run.stderr.contains("cleaning run finished"));
}

#[test]
fn output_pipe_close_does_not_panic() {
    let ws = workspace();
    let mut producer = base_command(&ws.home, &["catalog"]);
    producer.stdin(Stdio::null());

    let producer_spawn = producer.spawn();
    assert!(producer_spawn.is_ok());
    if let Ok(mut producer_child) = producer_spawn {
        let producer_stdout = producer_child.stdout.take();
        let producer_stderr = producer_child.stderr.take();
        assert!(producer_stdout.is_some());

        if let Some(stdout_pipe) = producer_stdout {
            let mut reader = BufReader::new(stdout_pipe);
            let mut first_line = String::new();
            let read_result = reader.read_line(&mut first_line);
            assert!(read_result.is_ok());
            assert!(!first_line.is_empty());
            drop(reader);
        }

        let status = producer_child.wait();
        assert!(status.is_ok());
        if let Ok(exit_status) = status {
            assert!(exit_status.success());
        }

        if let Some(mut stderr_pipe) = producer_stderr {
            let mut stderr_text = String::new();
            let stderr_read = stderr_pipe.read_to_string(&mut stderr_text);
            assert!(stderr_read.is_ok());
            assert!(!stderr_text.contains("panicked"));
        }
    }
}
