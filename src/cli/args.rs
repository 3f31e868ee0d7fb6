//! CLI argument definitions
//!
//! All Clap derive structs for `logtint` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::config::TimestampPolicy;

// ============================================================================
// Root CLI
// ============================================================================

/// Render structured JSON logs as colorized terminal lines.
#[derive(Parser, Debug)]
#[command(name = "logtint", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all diagnostics on stderr.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "LOGTINT_COLOR")]
    pub color: ColorChoice,

    /// Format of diagnostics written to stderr.
    #[arg(long, default_value = "human", global = true, env = "LOGTINT_LOG_FORMAT")]
    pub log_format: OutputFormat,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render JSON log records from files or stdin.
    Render(RenderArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version and build information.
    Version(VersionArgs),
}

// ============================================================================
// Render Command
// ============================================================================

/// Arguments for `render`.
///
/// Options left unset fall back to `LOGTINT_*` environment variables and
/// then to built-in defaults.
#[derive(Args, Debug, Default)]
pub struct RenderArgs {
    /// Input files, one JSON record per line. Reads stdin when empty or `-`.
    pub files: Vec<PathBuf>,

    /// Handling of timestamps that are present but malformed.
    #[arg(long)]
    pub timestamps: Option<TimestampPolicy>,

    /// Input timestamp format: `rfc3339` or a strftime pattern.
    #[arg(long)]
    pub time_format: Option<String>,

    /// Output clock format (strftime pattern).
    #[arg(long)]
    pub clock_format: Option<String>,

    /// Pad source tags to the widest tag seen so far.
    #[arg(long)]
    pub align_sources: bool,

    /// Write control characters from records unescaped.
    #[arg(long)]
    pub raw_controls: bool,

    /// Emit style markup instead of ANSI escapes or plain text.
    #[arg(long)]
    pub markup: bool,

    /// Echo lines that are not JSON records instead of dropping them.
    #[arg(long)]
    pub passthrough: bool,

    /// Stop at the first record that fails to render.
    #[arg(long)]
    pub fail_fast: bool,

    /// Reject records larger than this many bytes.
    #[arg(long)]
    pub max_record_size: Option<usize>,
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================
