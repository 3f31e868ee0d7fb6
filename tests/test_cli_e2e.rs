mod common;

use common::{DEFAULT_TIMEOUT, LogtintProcess};

const SAMPLE_RENDERED: &str = "\
3:04PM INF api | server started    port=8080
3:04PM ERR engine | build failed: exit 1    attempt=2 elapsed=1.5s
??? DBG system | cache warm    hits=12 ratio=0s
";

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ============================================================================
// version command
// ============================================================================

#[test]
fn version_human() {
    let output = LogtintProcess::spawn_command(&["version"]);
    assert!(
        output.status.success(),
        "version should exit 0: {}",
        stderr(&output)
    );

    let out = stdout(&output);
    assert!(out.contains("logtint"), "missing name: {out}");
    assert!(out.contains(env!("CARGO_PKG_VERSION")), "missing version: {out}");
}

#[test]
fn version_json() {
    let output = LogtintProcess::spawn_command(&["version", "--format", "json"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let parsed: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("version JSON should be valid");
    assert_eq!(parsed["name"], "logtint");
    assert_eq!(parsed["version"], env!("CARGO_PKG_VERSION"));
}

// ============================================================================
// completions command
// ============================================================================

#[test]
fn completions_bash() {
    let output = LogtintProcess::spawn_command(&["completions", "bash"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("logtint"));
}

#[test]
fn completions_zsh() {
    let output = LogtintProcess::spawn_command(&["completions", "zsh"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(!stdout(&output).is_empty());
}

// ============================================================================
// render command
// ============================================================================

#[test]
fn render_fixture_file() {
    let path = LogtintProcess::fixture_path("sample.jsonl");
    let output = LogtintProcess::run(&["render", "--quiet", path.to_str().unwrap()], "");

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), SAMPLE_RENDERED);
}

#[test]
fn render_stdin_matches_file() {
    let input = std::fs::read_to_string(LogtintProcess::fixture_path("sample.jsonl")).unwrap();
    let output = LogtintProcess::run(&["render", "--quiet"], &input);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), SAMPLE_RENDERED);
}

#[test]
fn render_dash_reads_stdin() {
    let output = LogtintProcess::run(
        &["render", "--quiet", "-"],
        "{\"level\":\"warn\",\"message\":\"low disk\",\"component\":\"db\"}\n",
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "??? WRN db | low disk\n");
}

#[test]
fn render_multiple_files_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.jsonl");
    let second = dir.path().join("second.jsonl");
    std::fs::write(&first, "{\"level\":\"info\",\"message\":\"one\"}\n").unwrap();
    std::fs::write(&second, "{\"level\":\"info\",\"message\":\"two\"}\n").unwrap();

    let output = LogtintProcess::run(
        &[
            "render",
            "--quiet",
            first.to_str().unwrap(),
            second.to_str().unwrap(),
        ],
        "",
    );

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "??? INF system | one\n??? INF system | two\n"
    );
}

#[test]
fn render_passthrough_keeps_plain_lines() {
    let path = LogtintProcess::fixture_path("sample.jsonl");
    let output = LogtintProcess::run(
        &["render", "--quiet", "--passthrough", path.to_str().unwrap()],
        "",
    );

    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4, "{out}");
    assert_eq!(lines[2], "plain text line");
}

#[test]
fn render_markup_output() {
    let output = LogtintProcess::run(
        &["render", "--quiet", "--markup"],
        "{\"level\":\"error\",\"message\":\"build failed\",\"error\":\"exit 1\",\"component\":\"engine\"}\n",
    );

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "??? [red]ERR[reset] [light_yellow]engine | [reset][red]build failed: exit 1[reset]\n"
    );
}

#[test]
fn render_color_always_emits_ansi() {
    let output = LogtintProcess::run(
        &["render", "--quiet", "--color", "always"],
        "{\"level\":\"info\",\"message\":\"hi\",\"component\":\"api\"}\n",
    );

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "??? \x1b[32mINF\x1b[0m \x1b[35mapi | \x1b[0mhi\x1b[0m\n"
    );
}

#[test]
fn render_color_never_is_plain() {
    let output = LogtintProcess::run(
        &["render", "--quiet", "--color", "never"],
        "{\"level\":\"info\",\"message\":\"hi\",\"component\":\"api\"}\n",
    );

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(!stdout(&output).contains('\x1b'));
}

#[test]
fn render_escapes_control_characters() {
    let output = LogtintProcess::run(
        &["render", "--quiet", "--color", "always"],
        "{\"level\":\"info\",\"message\":\"evil \\u001b[2J text\"}\n",
    );

    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("evil \\u{1b}[2J text"), "{out}");
    assert!(!out.contains("\x1b[2J"), "{out}");
}

#[test]
fn render_skips_bad_records_by_default() {
    let output = LogtintProcess::run(
        &["render"],
        "{broken\n{\"level\":\"info\",\"message\":\"fine\"}\n",
    );

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "??? INF system | fine\n");
    assert!(
        stderr(&output).contains("skipping record"),
        "expected a warning: {}",
        stderr(&output)
    );
}

#[test]
fn render_quiet_suppresses_warnings() {
    let output = LogtintProcess::run(&["render", "--quiet"], "{broken\n");

    assert!(output.status.success());
    assert!(stderr(&output).is_empty(), "{}", stderr(&output));
}

#[test]
fn render_fail_fast_exit_code() {
    let output = LogtintProcess::run(
        &["render", "--quiet", "--fail-fast"],
        "{broken\n{\"level\":\"info\",\"message\":\"never\"}\n",
    );

    assert_eq!(output.status.code(), Some(5));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("cannot decode event"));
}

#[test]
fn render_strict_timestamp_fail_fast() {
    let output = LogtintProcess::run(
        &["render", "--quiet", "--fail-fast"],
        "{\"timestamp\":\"yesterday\",\"message\":\"x\"}\n",
    );

    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("yesterday"));
}

#[test]
fn render_lenient_timestamps() {
    let output = LogtintProcess::run(
        &["render", "--quiet", "--timestamps", "lenient"],
        "{\"timestamp\":\"yesterday\",\"level\":\"info\",\"message\":\"x\"}\n",
    );

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "??? INF system | x\n");
}

#[test]
fn render_custom_time_formats() {
    let output = LogtintProcess::run(
        &[
            "render",
            "--quiet",
            "--time-format",
            "%Y-%m-%d %H:%M:%S",
            "--clock-format",
            "%H:%M:%S",
        ],
        "{\"timestamp\":\"2023-01-20 15:04:05\",\"level\":\"info\",\"message\":\"x\"}\n",
    );

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "15:04:05 INF system | x\n");
}

#[test]
fn render_clock_format_from_env() {
    let output = LogtintProcess::run_with_env(
        &["render", "--quiet"],
        &[("LOGTINT_CLOCK_FORMAT", "%H.%M")],
        "{\"timestamp\":\"2023-01-20T15:04:05Z\",\"message\":\"x\"}\n",
    );

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).starts_with("15.04 "), "{}", stdout(&output));
}

#[test]
fn render_flag_overrides_env() {
    let output = LogtintProcess::run_with_env(
        &["render", "--quiet", "--clock-format", "%H:%M"],
        &[("LOGTINT_CLOCK_FORMAT", "%H.%M")],
        "{\"timestamp\":\"2023-01-20T15:04:05Z\",\"message\":\"x\"}\n",
    );

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).starts_with("15:04 "), "{}", stdout(&output));
}

#[test]
fn render_malformed_env_value_exit_code() {
    let input = "{\"level\":\"info\",\"message\":\"x\"}\n";
    for (name, value) in [
        ("LOGTINT_MAX_RECORD_SIZE", "lots"),
        ("LOGTINT_TIMESTAMPS", "sloppy"),
    ] {
        let output = LogtintProcess::run_with_env(&["render", "--quiet"], &[(name, value)], input);

        assert_eq!(output.status.code(), Some(2), "{name}={value}");
        assert!(stdout(&output).is_empty(), "{name}={value}");
        assert!(stderr(&output).contains(name), "{}", stderr(&output));
    }
}

#[test]
fn render_align_sources() {
    let output = LogtintProcess::run(
        &["render", "--quiet", "--align-sources"],
        concat!(
            "{\"level\":\"info\",\"message\":\"a\",\"component\":\"scheduler\"}\n",
            "{\"level\":\"info\",\"message\":\"b\",\"component\":\"db\"}\n",
        ),
    );

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "??? INF scheduler | a\n??? INF db        | b\n"
    );
}

#[test]
fn render_max_record_size() {
    let output = LogtintProcess::run(
        &["render", "--quiet", "--max-record-size", "16", "--fail-fast"],
        "{\"level\":\"info\",\"message\":\"far too long for the limit\"}\n",
    );

    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("record too large"));
}

#[test]
fn render_missing_file_exit_code() {
    let output = LogtintProcess::run(
        &["render", "--quiet", "/nonexistent/logtint/input.jsonl"],
        "",
    );

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("/nonexistent/logtint/input.jsonl"));
}

#[test]
fn render_bad_clock_format_exit_code() {
    let output = LogtintProcess::run(&["render", "--quiet", "--clock-format", "%Q"], "");

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("clock_format"));
}

#[test]
fn render_invalid_flag_is_usage_error() {
    let output = LogtintProcess::run(&["render", "--timestamps", "sloppy"], "");
    assert_eq!(output.status.code(), Some(2));
}

// ============================================================================
// streaming
// ============================================================================

#[tokio::test]
async fn render_streams_line_by_line() {
    let mut proc = LogtintProcess::spawn_render(&[]);

    proc.send_line("{\"level\":\"info\",\"message\":\"first\"}")
        .await;
    assert_eq!(
        proc.read_line(DEFAULT_TIMEOUT).await,
        "??? INF system | first"
    );

    proc.send_line("{\"level\":\"warn\",\"message\":\"second\",\"component\":\"worker\"}")
        .await;
    assert_eq!(
        proc.read_line(DEFAULT_TIMEOUT).await,
        "??? WRN worker | second"
    );

    assert_eq!(proc.finish().await, Some(0));
}
