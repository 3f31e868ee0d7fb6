//! `completions` command
//!
//! Writes a completion script for `logtint` to stdout.

use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell as ClapShell;

use crate::cli::args::{Cli, CompletionsArgs, Shell};

/// Name the completion script registers for.
const BIN_NAME: &str = "logtint";

impl From<Shell> for ClapShell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => Self::Bash,
            Shell::Zsh => Self::Zsh,
            Shell::Fish => Self::Fish,
            Shell::PowerShell => Self::PowerShell,
            Shell::Elvish => Self::Elvish,
        }
    }
}

/// Writes the completion script for `shell` into `out`.
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    clap_complete::generate(ClapShell::from(shell), &mut cmd, BIN_NAME, out);
}

/// Prints the completion script for the requested shell.
pub fn run(args: &CompletionsArgs) {
    write_completions(args.shell, &mut std::io::stdout().lock());
}
