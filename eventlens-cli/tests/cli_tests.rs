//! End-to-end tests for the `eventlens` binary.
//!
//! Each test writes config and log fixtures to a temp directory and drives
//! the built binary, checking stdout and the exit code.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const PARSER_YAML: &str = r#"
timestamp_format: '%m-%d %H:%M:%S%.3f'
log_line_regex: '^(\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{3})\s+(\d+)\s+(\d+)\s+([VDIWEF])\s+([^:]+?)\s*:\s(.*)$'
json_extraction: true
event_regex: '(\{.*\})'
"#;

const FUNNEL_YAML: &str = r#"
name: checkout
steps:
  - name: View
    event_pattern: '^product_view$'
  - name: Cart
    event_pattern: '^add_to_cart$'
  - name: Buy
    event_pattern: '^purchase$'
"#;

const LOG: &str = r#"03-01 12:00:00.000  100  100 I Analytics: {"event":"product_view"}
03-01 12:00:01.000  100  100 I Analytics: {"event":"add_to_cart"}
03-01 12:00:02.000  100  100 I Analytics: {"event":"purchase"}
03-01 12:00:03.000  100  100 I Analytics: {"event":"product_view"}
03-01 12:00:04.000  100  100 I Auth: user login successful
"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().expect("should create temp dir");
        let fixture = Self { dir };
        fixture.write("parser.yaml", PARSER_YAML);
        fixture.write("funnel.yaml", FUNNEL_YAML);
        fixture.write("app.log", LOG);
        fixture
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("should write fixture");
        path
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

fn eventlens(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_eventlens"))
        .args(args)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("should run eventlens binary")
}

fn eventlens_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_eventlens"))
        .args(args)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("should spawn eventlens binary");
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(stdin.as_bytes())
        .expect("should write stdin");
    child.wait_with_output().expect("should wait for eventlens")
}

fn p(path: &Path) -> &str {
    path.to_str().expect("temp path should be UTF-8")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be a JSON document")
}

#[test]
fn test_funnel_json_output() {
    let fx = Fixture::new();
    let output = eventlens(&[
        "funnel",
        "-p",
        p(&fx.path("parser.yaml")),
        "-f",
        p(&fx.path("funnel.yaml")),
        "-l",
        p(&fx.path("app.log")),
        "-o",
        "json",
    ]);

    assert_eq!(output.status.code(), Some(0));
    let json = stdout_json(&output);
    assert_eq!(json["funnel_name"], "checkout");
    assert_eq!(json["total_events_analyzed"], 5);
    assert_eq!(json["funnel_completed"], true);
    assert_eq!(json["steps"][0]["event_count"], 2);
    assert_eq!(json["steps"][2]["event_count"], 1);
    assert_eq!(json["drop_offs"][0]["events_lost"], 1);
    assert_eq!(json["drop_offs"][0]["drop_off_rate"], 50.0);
}

#[test]
fn test_funnel_text_output_from_stdin() {
    let fx = Fixture::new();
    let output = eventlens_with_stdin(
        &[
            "funnel",
            "-p",
            p(&fx.path("parser.yaml")),
            "-f",
            p(&fx.path("funnel.yaml")),
        ],
        LOG,
    );

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✅ Funnel Analysis Complete"));
    assert!(stdout.contains("Funnel Completed: Yes"));
    assert!(stdout.contains("1. View: 2 events (100.0%)"));
    assert!(stdout.contains("- View → Cart: 1 events lost (50.0% drop-off)"));
}

#[test]
fn test_incomplete_funnel_exits_zero() {
    let fx = Fixture::new();
    let log = fx.write(
        "partial.log",
        "03-01 12:00:00.000  100  100 I Analytics: {\"event\":\"product_view\"}\n",
    );
    let output = eventlens(&[
        "funnel",
        "-p",
        p(&fx.path("parser.yaml")),
        "-f",
        p(&fx.path("funnel.yaml")),
        "-l",
        p(&log),
    ]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("❌ Funnel Analysis Complete"));
    assert!(stdout.contains("Funnel Completed: No"));
}

#[test]
fn test_funnel_empty_log_reports_no_events() {
    let fx = Fixture::new();
    let log = fx.write("empty.log", "");
    let output = eventlens(&[
        "funnel",
        "-p",
        p(&fx.path("parser.yaml")),
        "-f",
        p(&fx.path("funnel.yaml")),
        "-l",
        p(&log),
    ]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "❌ No events found"
    );
}

#[test]
fn test_count_json_output_preserves_pattern_order() {
    let fx = Fixture::new();
    let output = eventlens(&[
        "count",
        "-p",
        p(&fx.path("parser.yaml")),
        "-l",
        p(&fx.path("app.log")),
        "-o",
        "json",
        "login",
        "product_view",
        "login",
    ]);

    assert_eq!(output.status.code(), Some(0));
    let json = stdout_json(&output);
    assert_eq!(json["total_events_analyzed"], 5);
    let counts = json["pattern_counts"].as_array().expect("array");
    let pairs: Vec<_> = counts
        .iter()
        .map(|c| (c["pattern"].as_str().unwrap_or_default(), c["count"].as_u64()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("login", Some(1)),
            ("product_view", Some(2)),
            ("login", Some(1)),
        ]
    );
}

#[test]
fn test_count_text_output() {
    let fx = Fixture::new();
    let output = eventlens(&[
        "count",
        "-p",
        p(&fx.path("parser.yaml")),
        "-l",
        p(&fx.path("app.log")),
        "purchase",
    ]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("📊 Event Count Analysis Complete"));
    assert!(stdout.contains("1. purchase: 1 matches (20.0%)"));
    assert!(stdout.contains("Total Matches: 1"));
}

#[test]
fn test_count_invalid_pattern_exits_one() {
    let fx = Fixture::new();
    let output = eventlens(&[
        "count",
        "-p",
        p(&fx.path("parser.yaml")),
        "-l",
        p(&fx.path("app.log")),
        "(",
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "nothing should reach stdout");
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid pattern"));
}

#[test]
fn test_missing_log_file_exits_one() {
    let fx = Fixture::new();
    let output = eventlens(&[
        "count",
        "-p",
        p(&fx.path("parser.yaml")),
        "-l",
        p(&fx.path("missing.log")),
        "login",
    ]);

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_invalid_funnel_config_exits_two() {
    let fx = Fixture::new();
    let funnel = fx.write("bad.yaml", "name: broken\nsteps: []\n");
    let output = eventlens(&[
        "funnel",
        "-p",
        p(&fx.path("parser.yaml")),
        "-f",
        p(&funnel),
        "-l",
        p(&fx.path("app.log")),
    ]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("configuration error"));
}

#[test]
fn test_missing_parser_config_exits_two() {
    let fx = Fixture::new();
    let output = eventlens(&[
        "count",
        "-p",
        p(&fx.path("nope.yaml")),
        "-l",
        p(&fx.path("app.log")),
        "login",
    ]);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_validate_valid_files() {
    let fx = Fixture::new();
    let output = eventlens(&[
        "validate",
        "-p",
        p(&fx.path("parser.yaml")),
        "-f",
        p(&fx.path("funnel.yaml")),
    ]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("Result: VALID").count(), 2);
}

#[test]
fn test_validate_reports_every_file_before_failing() {
    let fx = Fixture::new();
    let funnel = fx.write("bad.yaml", "name: ''\nsteps: []\n");
    let output = eventlens(&[
        "validate",
        "-p",
        p(&fx.path("parser.yaml")),
        "-f",
        p(&funnel),
        "-o",
        "json",
    ]);

    assert_eq!(output.status.code(), Some(2));
    let json = stdout_json(&output);
    assert_eq!(json["files"][0]["valid"], true);
    assert_eq!(json["files"][1]["valid"], false);
    assert_eq!(
        json["files"][1]["errors"].as_array().map(Vec::len),
        Some(2)
    );
}

#[test]
fn test_version_command() {
    let output = eventlens(&["version"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with(&format!("eventlens {}", env!("CARGO_PKG_VERSION"))));
    assert!(stdout.contains("Build Date:"));
    assert!(stdout.contains("Git Commit:"));
}

#[test]
fn test_verbose_logs_go_to_stderr_only() {
    let fx = Fixture::new();
    let output = eventlens(&[
        "-v",
        "--log-format",
        "json",
        "count",
        "-p",
        p(&fx.path("parser.yaml")),
        "-l",
        p(&fx.path("app.log")),
        "-o",
        "json",
        "login",
    ]);

    assert_eq!(output.status.code(), Some(0));
    stdout_json(&output);
    assert!(
        !output.stderr.is_empty(),
        "debug diagnostics should be written to stderr"
    );
}
