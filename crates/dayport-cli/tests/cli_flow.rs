use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::{tempdir, TempDir};

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_dayport"))
}

/// Vault plus an isolated config home.
struct Sandbox {
    vault: TempDir,
    home: TempDir,
}

impl Sandbox {
    fn new(entries: Vec<serde_json::Value>) -> Self {
        let vault = tempdir().expect("vault tempdir");
        let home = tempdir().expect("home tempdir");
        let input = vault.path().join("day-one-in");
        fs::create_dir_all(&input).expect("create input dir");
        let export = serde_json::json!({ "metadata": {"version": "1.0"}, "entries": entries });
        fs::write(input.join("Journal.json"), export.to_string()).expect("write export");
        Self { vault, home }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(bin());
        cmd.args(args)
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.home.path().join("config"))
            .env("DAYPORT_VAULT", self.vault.path())
            .env("NO_COLOR", "1")
            .env_remove("DAYPORT_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().expect("run dayport")
    }

    fn note(&self, name: &str) -> String {
        fs::read_to_string(self.vault.path().join("day-one-out").join(name))
            .expect("note should exist")
    }

    fn out_dir(&self) -> PathBuf {
        self.vault.path().join("day-one-out")
    }
}

fn record(uuid: &str, created: &str, text: &str) -> serde_json::Value {
    serde_json::json!({
        "uuid": uuid,
        "creationDate": created,
        "modifiedDate": created,
        "text": text,
    })
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn json_stdout(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn list_dir(path: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(path)
        .expect("read dir")
        .map(|e| e.expect("dir entry").file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn test_import_creates_notes() {
    let sandbox = Sandbox::new(vec![
        record("AAA111", "2024-04-19T21:55:53Z", "first"),
        record("BBB222", "2024-04-20T08:00:00Z", "second"),
    ]);

    let output = sandbox.run(&["import"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        list_dir(&sandbox.out_dir()),
        vec!["AAA111.md".to_string(), "BBB222.md".to_string()]
    );
    assert!(sandbox.note("AAA111.md").ends_with("first"));

    let out = stdout(&output);
    assert!(out.contains("status=ok"));
    assert!(out.contains("created=2"));
}

#[test]
fn test_import_json_output() {
    let sandbox = Sandbox::new(vec![record("AAA111", "2024-04-19T21:55:53Z", "first")]);

    let output = sandbox.run(&["import", "--json"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value = json_stdout(&output);
    assert_eq!(value["command"], "import");
    assert_eq!(value["total"], 1);
    assert_eq!(value["success_count"], 1);
    assert_eq!(value["failure_count"], 0);
}

#[test]
fn test_date_names_in_time_zone() {
    let sandbox = Sandbox::new(vec![record("AAA111", "2024-04-19T21:55:53Z", "first")]);

    let output = sandbox.run(&[
        "import",
        "--date-names",
        "--date-format",
        "%Y-%m-%d %H%M",
        "--timezone",
        "Europe/London",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        list_dir(&sandbox.out_dir()),
        vec!["2024-04-19 2255.md".to_string()]
    );
}

#[test]
fn test_invalid_entry_exits_with_partial_failure() {
    let sandbox = Sandbox::new(vec![
        record("AAA111", "2024-04-19T21:55:53Z", "first"),
        serde_json::json!({"uuid": "BROKEN", "creationDate": "2024-01-02T10:00:00Z"}),
    ]);

    let output = sandbox.run(&["import", "--json"]);

    assert_eq!(output.status.code(), Some(5));
    let value = json_stdout(&output);
    assert_eq!(value["success_count"], 1);
    assert_eq!(value["invalid_count"], 1);
    assert_eq!(value["invalid_entries"][0]["entry_id"], "BROKEN");
}

#[test]
fn test_second_import_fails_existing_unless_ignored() {
    let sandbox = Sandbox::new(vec![record("AAA111", "2024-04-19T21:55:53Z", "first")]);
    assert!(sandbox.run(&["import"]).status.success());

    let again = sandbox.run(&["import", "--json"]);
    assert_eq!(again.status.code(), Some(5));
    let value = json_stdout(&again);
    assert_eq!(value["failure_count"], 1);

    let ignored = sandbox.run(&["import", "--json", "--ignore-existing"]);
    assert!(ignored.status.success(), "stderr: {}", stderr(&ignored));
    let value = json_stdout(&ignored);
    assert_eq!(value["ignore_count"], 1);
    assert_eq!(value["failure_count"], 0);
}

#[test]
fn test_report_is_written_for_failures() {
    let sandbox = Sandbox::new(vec![serde_json::json!({
        "uuid": "BROKEN",
        "creationDate": "2024-01-02T10:00:00Z"
    })]);

    let output = sandbox.run(&["import", "--report", "--json"]);

    assert_eq!(output.status.code(), Some(5));
    let value = json_stdout(&output);
    let report = value["report"].as_str().expect("report path");
    assert!(report.starts_with("day-one-out/Failed Imports "));

    let content =
        fs::read_to_string(sandbox.vault.path().join(report)).expect("report should exist");
    assert!(content.starts_with("- BROKEN - 2024-01-02 10:00:00\n"));
}

#[test]
fn test_update_refreshes_header() {
    let sandbox = Sandbox::new(vec![record("AAA111", "2024-04-19T21:55:53Z", "first")]);
    assert!(sandbox.run(&["import"]).status.success());

    let path = sandbox.out_dir().join("AAA111.md");
    fs::write(&path, "---\nmine: keep\n---\nedited body").expect("edit note");

    let output = sandbox.run(&["update"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let note = sandbox.note("AAA111.md");
    assert!(note.contains("mine: keep"));
    assert!(note.contains("uuid: AAA111"));
    assert!(note.ends_with("edited body"));
    assert!(stdout(&output).contains("updated=1"));
}

#[test]
fn test_update_missing_note_is_partial_failure() {
    let sandbox = Sandbox::new(vec![record("AAA111", "2024-04-19T21:55:53Z", "first")]);

    let output = sandbox.run(&["update", "--json"]);

    assert_eq!(output.status.code(), Some(5));
    let value = json_stdout(&output);
    assert_eq!(value["failures"][0]["reason"], "Could not find file AAA111.md");
}

#[test]
fn test_missing_input_directory_is_not_found() {
    let sandbox = Sandbox::new(Vec::new());

    let output = sandbox.run(&["import", "--in-dir", "nope"]);

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("Input directory does not exist."));
}

#[test]
fn test_missing_vault_is_not_found() {
    let sandbox = Sandbox::new(Vec::new());

    let output = sandbox
        .command(&["import"])
        .env("DAYPORT_VAULT", sandbox.home.path().join("no-such-vault"))
        .output()
        .expect("run dayport");

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("No vault found"));
}

#[test]
fn test_unknown_time_zone_is_invalid_input() {
    let sandbox = Sandbox::new(vec![record("AAA111", "2024-04-19T21:55:53Z", "first")]);

    let output = sandbox.run(&["import", "--date-names", "--timezone", "Mars/Olympus"]);

    assert_eq!(output.status.code(), Some(4));
    assert!(!sandbox.out_dir().exists());
}

#[test]
fn test_unknown_format_is_invalid_input() {
    let sandbox = Sandbox::new(Vec::new());
    let output = sandbox.run(&["import", "--format", "table"]);
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_config_init_and_show() {
    let sandbox = Sandbox::new(Vec::new());
    let vault = sandbox.vault.path().to_string_lossy().to_string();

    let init = sandbox.run(&["config", "init", &vault]);
    assert!(init.status.success(), "stderr: {}", stderr(&init));
    let config_path = sandbox
        .home
        .path()
        .join("config")
        .join("dayport")
        .join("config.toml");
    assert!(config_path.exists());

    let again = sandbox.run(&["config", "init", &vault]);
    assert_eq!(again.status.code(), Some(4));

    let show = sandbox.run(&["config", "show", "--json"]);
    assert!(show.status.success(), "stderr: {}", stderr(&show));
    let value = json_stdout(&show);
    assert_eq!(value["exists"], true);
    assert_eq!(value["config"]["vault"]["path"], vault.as_str());
    assert_eq!(value["config"]["import"]["in_directory"], "day-one-in");
}

#[test]
fn test_config_file_settings_apply() {
    let sandbox = Sandbox::new(vec![record("AAA111", "2024-04-19T21:55:53Z", "first")]);
    let config_dir = sandbox.home.path().join("config").join("dayport");
    fs::create_dir_all(&config_dir).expect("create config dir");
    fs::write(
        config_dir.join("config.toml"),
        "[import]\nout_directory = \"journal\"\n",
    )
    .expect("write config");

    let output = sandbox.run(&["import"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(sandbox.vault.path().join("journal").join("AAA111.md").exists());
}

#[test]
fn test_completions_generate() {
    let sandbox = Sandbox::new(Vec::new());
    let output = sandbox.run(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("dayport"));
}
