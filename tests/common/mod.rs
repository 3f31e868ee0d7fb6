//! Shared integration-test harness for running the `logtint` binary as a
//! child process.

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout};

/// Default timeout for reading a single rendered line.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Environment variables that would otherwise leak into the child.
const ENV_OVERRIDES: &[&str] = &[
    "LOGTINT_COLOR",
    "LOGTINT_LOG_FORMAT",
    "LOGTINT_LOG_LEVEL",
    "LOGTINT_TIMESTAMPS",
    "LOGTINT_TIME_FORMAT",
    "LOGTINT_CLOCK_FORMAT",
    "LOGTINT_MAX_RECORD_SIZE",
    "NO_COLOR",
];

fn command(bin: &str) -> Command {
    let mut cmd = Command::new(bin);
    for name in ENV_OVERRIDES {
        cmd.env_remove(name);
    }
    cmd
}

/// A running `logtint render` process fed through stdin.
///
/// The child process is killed on drop via `kill_on_drop(true)`.
pub struct LogtintProcess {
    child: Child,
    stdin: Option<ChildStdin>,
    reader: BufReader<ChildStdout>,
}

impl LogtintProcess {
    /// Runs `logtint` to completion with `args`, feeding `input` on stdin.
    #[allow(clippy::missing_panics_doc)]
    pub fn run(args: &[&str], input: &str) -> Output {
        Self::run_with_env(args, &[], input)
    }

    /// Like [`run`](Self::run) with extra environment variables set.
    #[allow(clippy::missing_panics_doc)]
    pub fn run_with_env(args: &[&str], env: &[(&str, &str)], input: &str) -> Output {
        let mut child = command(env!("CARGO_BIN_EXE_logtint"))
            .args(args)
            .envs(env.iter().copied())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to spawn logtint");

        let mut stdin = child.stdin.take().expect("stdin not captured");
        stdin
            .write_all(input.as_bytes())
            .expect("failed to write to stdin");
        drop(stdin);

        child.wait_with_output().expect("failed to wait for logtint")
    }

    /// Runs `logtint` with `args` and no stdin.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_command(args: &[&str]) -> Output {
        command(env!("CARGO_BIN_EXE_logtint"))
            .args(args)
            .stdin(Stdio::null())
            .output()
            .expect("failed to run logtint")
    }

    /// Spawns `logtint render` with extra `args`, keeping stdin open.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_render(args: &[&str]) -> Self {
        let std_cmd = command(env!("CARGO_BIN_EXE_logtint"));
        let mut child = tokio::process::Command::from(std_cmd)
            .arg("render")
            .args(args)
            .arg("--quiet")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .expect("failed to spawn logtint");

        let stdin = child.stdin.take().expect("stdin not captured");
        let stdout = child.stdout.take().expect("stdout not captured");

        Self {
            child,
            stdin: Some(stdin),
            reader: BufReader::new(stdout),
        }
    }

    /// Writes one record followed by a newline.
    #[allow(clippy::missing_panics_doc)]
    pub async fn send_line(&mut self, line: &str) {
        let stdin = self.stdin.as_mut().expect("stdin already closed");
        stdin
            .write_all(format!("{line}\n").as_bytes())
            .await
            .expect("failed to write to stdin");
        stdin.flush().await.expect("failed to flush stdin");
    }

    /// Reads one rendered line, without its newline.
    ///
    /// Panics on EOF, I/O error, or if nothing arrives within `timeout`.
    #[allow(clippy::missing_panics_doc)]
    pub async fn read_line(&mut self, timeout: Duration) -> String {
        let mut line = String::new();
        let n = tokio::time::timeout(timeout, self.reader.read_line(&mut line))
            .await
            .expect("timed out waiting for rendered line")
            .expect("read_line I/O error");
        assert!(n > 0, "unexpected EOF from logtint");
        line.trim_end_matches('\n').to_owned()
    }

    /// Closes stdin and returns the exit code.
    #[allow(clippy::missing_panics_doc)]
    pub async fn finish(mut self) -> Option<i32> {
        drop(self.stdin.take());
        let status = tokio::time::timeout(DEFAULT_TIMEOUT, self.child.wait())
            .await
            .expect("logtint did not exit after stdin closed")
            .expect("failed to wait for logtint");
        status.code()
    }

    /// Returns the path to a test fixture.
    #[must_use]
    pub fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }
}
