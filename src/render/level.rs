//! Severity classification.

use std::fmt;

use serde_json::Value;

/// Severity of a record.
///
/// The seven named levels match their canonical lowercase names exactly;
/// everything else is [`Level::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// `trace`
    Trace,
    /// `debug`
    Debug,
    /// `info`
    Info,
    /// `warn`
    Warn,
    /// `error`
    Error,
    /// `fatal`
    Fatal,
    /// `panic`
    Panic,
    /// Missing, non-text, or unrecognized level.
    Unknown,
}

impl Level {
    /// All levels, in increasing severity, followed by `Unknown`.
    pub const ALL: [Self; 8] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Fatal,
        Self::Panic,
        Self::Unknown,
    ];

    /// Classifies a level name. Matching is case-sensitive.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "trace" => Self::Trace,
            "debug" => Self::Debug,
            "info" => Self::Info,
            "warn" => Self::Warn,
            "error" => Self::Error,
            "fatal" => Self::Fatal,
            "panic" => Self::Panic,
            _ => Self::Unknown,
        }
    }

    /// Classifies the `level` field of a record.
    #[must_use]
    pub fn from_field(value: Option<&Value>) -> Self {
        value.and_then(Value::as_str).map_or(Self::Unknown, Self::parse)
    }

    /// Canonical name, or `"unknown"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::Panic => "panic",
            Self::Unknown => "unknown",
        }
    }

    /// Three-letter badge text.
    #[must_use]
    pub const fn badge(self) -> &'static str {
        match self {
            Self::Trace => "TRC",
            Self::Debug => "DBG",
            Self::Info => "INF",
            Self::Warn => "WRN",
            Self::Error => "ERR",
            Self::Fatal => "FTL",
            Self::Panic => "PNC",
            Self::Unknown => "???",
        }
    }

    /// Badge with its color markup.
    #[must_use]
    pub const fn badge_markup(self) -> &'static str {
        match self {
            Self::Trace => "[magenta]TRC[reset]",
            Self::Debug => "[yellow]DBG[reset]",
            Self::Info => "[green]INF[reset]",
            Self::Warn => "[red]WRN[reset]",
            Self::Error => "[red]ERR[reset]",
            Self::Fatal => "[red]FTL[reset]",
            Self::Panic => "[red]PNC[reset]",
            Self::Unknown => "[bold]???[reset]",
        }
    }

    /// Style applied to the message of a record at this level.
    ///
    /// `None` means the message is left unstyled.
    #[must_use]
    pub const fn emphasis(self) -> Option<&'static str> {
        match self {
            Self::Trace | Self::Debug => Some("dim"),
            Self::Info => None,
            Self::Warn | Self::Error | Self::Fatal | Self::Panic => Some("red"),
            Self::Unknown => Some("bold"),
        }
    }

    /// Wraps already-escaped text in this level's emphasis.
    #[must_use]
    pub fn emphasize(self, text: &str) -> String {
        match self.emphasis() {
            Some(style) => format!("[{style}]{text}[reset]"),
            None => text.to_owned(),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
