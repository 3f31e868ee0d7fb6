//! Timestamp parsing and clock formatting.

use std::fmt::Write;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde_json::Value;

use crate::config::{DEFAULT_CLOCK_FORMAT, RenderConfig, TimeFormat, TimestampPolicy};
use crate::error::RenderError;

/// Shown in place of a missing or unusable timestamp.
pub const PLACEHOLDER: &str = "???";

/// Parses `text` with the configured input format.
///
/// # Errors
///
/// Returns the parser error if `text` does not match the format.
pub fn parse_timestamp(
    text: &str,
    format: &TimeFormat,
) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    match format {
        TimeFormat::Rfc3339 => DateTime::parse_from_rfc3339(text),
        TimeFormat::Custom(pattern) => DateTime::parse_from_str(text, pattern).or_else(|err| {
            NaiveDateTime::parse_from_str(text, pattern)
                .map(|naive| naive.and_utc().fixed_offset())
                .map_err(|_| err)
        }),
    }
}

/// Renders the clock time of `time` in its own offset.
///
/// Falls back to the default clock format if the configured one cannot be
/// rendered.
#[must_use]
pub fn format_clock(time: &DateTime<FixedOffset>, clock_format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", time.format(clock_format)).is_err() {
        out.clear();
        let _ = write!(out, "{}", time.format(DEFAULT_CLOCK_FORMAT));
    }
    out
}

/// Produces the timestamp segment of a line.
///
/// # Errors
///
/// Returns [`RenderError::Timestamp`] for a malformed timestamp under
/// [`TimestampPolicy::Strict`].
pub fn timestamp_segment(
    value: Option<&Value>,
    config: &RenderConfig,
) -> Result<String, RenderError> {
    let Some(text) = value.and_then(Value::as_str) else {
        return Ok(PLACEHOLDER.to_owned());
    };

    match parse_timestamp(text, &config.time_format) {
        Ok(time) => Ok(format!(
            "[dark_gray]{}[reset]",
            format_clock(&time, &config.clock_format)
        )),
        Err(source) => match config.timestamp_policy {
            TimestampPolicy::Strict => Err(RenderError::Timestamp {
                value: text.to_owned(),
                source,
            }),
            TimestampPolicy::Lenient => {
                tracing::debug!(timestamp = text, %source, "unparseable timestamp, using placeholder");
                Ok(PLACEHOLDER.to_owned())
            }
        },
    }
}
