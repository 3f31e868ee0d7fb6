//! Renderer configuration.
//!
//! [`RenderConfig`] collects every knob the renderer exposes. Defaults give
//! the reference output format; `LOGTINT_*` environment variables override
//! the defaults and CLI flags override both.

use std::fmt;
use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use clap::ValueEnum;

use crate::error::ConfigError;

/// Default maximum record size in bytes (1 MiB).
pub const DEFAULT_MAX_RECORD_SIZE: usize = 1024 * 1024;

/// Default output clock format: hour and minute with an AM/PM marker, e.g. `3:04PM`.
pub const DEFAULT_CLOCK_FORMAT: &str = "%-I:%M%p";

/// What to do with a `timestamp` field that is present but cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TimestampPolicy {
    /// Fail the record with a timestamp error.
    #[default]
    Strict,
    /// Render the placeholder and keep going.
    Lenient,
}

impl FromStr for TimestampPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}

/// How rendered lines reach the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Markup expanded into ANSI escape sequences.
    Ansi,
    /// Markup stripped, plain text only.
    #[default]
    Plain,
    /// Markup written unexpanded.
    Markup,
}

/// Format of the incoming `timestamp` field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TimeFormat {
    /// RFC 3339, with optional fractional seconds.
    #[default]
    Rfc3339,
    /// A chrono `strftime` pattern. Patterns without an offset are read as UTC.
    Custom(String),
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rfc3339 => f.write_str("rfc3339"),
            Self::Custom(pattern) => f.write_str(pattern),
        }
    }
}

impl TimeFormat {
    /// Interprets `rfc3339` (any case) as [`TimeFormat::Rfc3339`] and
    /// anything else as a strftime pattern.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("rfc3339") {
            Self::Rfc3339
        } else {
            Self::Custom(s.to_owned())
        }
    }
}

impl FromStr for TimeFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Renderer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Handling of present-but-malformed timestamps.
    pub timestamp_policy: TimestampPolicy,
    /// Format of the incoming `timestamp` field.
    pub time_format: TimeFormat,
    /// Output clock format (chrono `strftime`).
    pub clock_format: String,
    /// How markup is treated on the way to the sink.
    pub color: ColorMode,
    /// Pad source tags to the widest tag seen so far.
    pub align_sources: bool,
    /// Escape control characters found in record text.
    pub sanitize_controls: bool,
    /// Records larger than this are rejected before decoding.
    pub max_record_size: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            timestamp_policy: TimestampPolicy::default(),
            time_format: TimeFormat::default(),
            clock_format: DEFAULT_CLOCK_FORMAT.to_owned(),
            color: ColorMode::default(),
            align_sources: false,
            sanitize_controls: true,
            max_record_size: DEFAULT_MAX_RECORD_SIZE,
        }
    }
}

impl RenderConfig {
    /// Loads configuration from environment variables with defaults.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `LOGTINT_TIMESTAMPS` | `strict` |
    /// | `LOGTINT_TIME_FORMAT` | `rfc3339` |
    /// | `LOGTINT_CLOCK_FORMAT` | `%-I:%M%p` |
    /// | `LOGTINT_MAX_RECORD_SIZE` | 1 MiB |
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the variable if a set
    /// variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            timestamp_policy: env_or(
                "LOGTINT_TIMESTAMPS",
                defaults.timestamp_policy,
                "strict or lenient",
            )?,
            time_format: env_or("LOGTINT_TIME_FORMAT", defaults.time_format, "a time format")?,
            clock_format: env_or(
                "LOGTINT_CLOCK_FORMAT",
                defaults.clock_format,
                "a strftime pattern",
            )?,
            max_record_size: env_or(
                "LOGTINT_MAX_RECORD_SIZE",
                defaults.max_record_size,
                "a byte count",
            )?,
            ..defaults
        })
    }

    /// Sets the timestamp policy.
    #[must_use]
    pub const fn with_timestamp_policy(mut self, policy: TimestampPolicy) -> Self {
        self.timestamp_policy = policy;
        self
    }

    /// Sets the input time format.
    #[must_use]
    pub fn with_time_format(mut self, format: TimeFormat) -> Self {
        self.time_format = format;
        self
    }

    /// Sets the output clock format.
    #[must_use]
    pub fn with_clock_format(mut self, format: impl Into<String>) -> Self {
        self.clock_format = format.into();
        self
    }

    /// Sets the color mode.
    #[must_use]
    pub const fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    /// Enables or disables source tag alignment.
    #[must_use]
    pub const fn with_align_sources(mut self, align: bool) -> Self {
        self.align_sources = align;
        self
    }

    /// Enables or disables control character sanitizing.
    #[must_use]
    pub const fn with_sanitize_controls(mut self, sanitize: bool) -> Self {
        self.sanitize_controls = sanitize;
        self
    }

    /// Sets the maximum record size in bytes.
    #[must_use]
    pub const fn with_max_record_size(mut self, limit: usize) -> Self {
        self.max_record_size = limit;
        self
    }

    /// Checks that the configured time patterns are valid.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if either pattern contains an
    /// unknown `strftime` specifier or the record size limit is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let TimeFormat::Custom(pattern) = &self.time_format {
            check_strftime("time_format", pattern)?;
        }
        check_strftime("clock_format", &self.clock_format)?;
        if self.max_record_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_record_size".to_owned(),
                value: "0".to_owned(),
                expected: "a positive byte count".to_owned(),
            });
        }
        Ok(())
    }
}

fn check_strftime(field: &str, pattern: &str) -> Result<(), ConfigError> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::InvalidValue {
            field: field.to_owned(),
            value: pattern.to_owned(),
            expected: "a valid strftime pattern".to_owned(),
        });
    }
    Ok(())
}

/// Reads an environment variable, parsing it to type `T`, or returns the
/// default when it is unset.
fn env_or<T: FromStr>(name: &str, default: T, expected: &str) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => parse_var(name, value, expected),
        Err(std::env::VarError::NotPresent) => Ok(default),
        Err(std::env::VarError::NotUnicode(raw)) => Err(ConfigError::InvalidValue {
            field: name.to_owned(),
            value: raw.to_string_lossy().into_owned(),
            expected: expected.to_owned(),
        }),
    }
}

fn parse_var<T: FromStr>(name: &str, value: String, expected: &str) -> Result<T, ConfigError> {
    match value.parse() {
        Ok(parsed) => Ok(parsed),
        Err(_) => Err(ConfigError::InvalidValue {
            field: name.to_owned(),
            value,
            expected: expected.to_owned(),
        }),
    }
}
