//! Auxiliary field formatting.
//!
//! Every record key outside [`SKIP_FIELDS`] is rendered as `key=value`.
//! Fractional numbers are elapsed times in milliseconds and are shown as a
//! duration rounded to a tenth of a second. Booleans, arrays and objects are
//! dropped.

use std::borrow::Cow;
use std::fmt::Write;

use serde_json::{Map, Number, Value};

/// Fields that have dedicated formatting or are never shown.
pub const SKIP_FIELDS: [&str; 6] = [
    "message",
    "level",
    "timestamp",
    "error",
    "caller",
    "component",
];

const NANOS_PER_MILLI: i64 = 1_000_000;
const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Rounding granularity for durations: 100ms.
const ROUND_NANOS: i64 = 100 * NANOS_PER_MILLI;

/// Returns `true` if `key` is excluded from the auxiliary segment.
#[must_use]
pub fn is_skipped(key: &str) -> bool {
    SKIP_FIELDS.contains(&key)
}

/// Formats the auxiliary segment of a line.
///
/// `clean` is applied to keys and string values before they are embedded.
/// Returns an empty string when no field qualifies.
pub fn fields_segment<'a, F>(record: &'a Map<String, Value>, clean: F) -> String
where
    F: Fn(&'a str) -> Cow<'a, str>,
{
    let fields: Vec<String> = record
        .iter()
        .filter(|(key, _)| !is_skipped(key))
        .filter_map(|(key, value)| {
            let rendered = match value {
                Value::String(text) => clean(text.as_str()),
                Value::Number(number) => Cow::Owned(format_number(number)),
                Value::Null => Cow::Borrowed("null"),
                Value::Bool(_) | Value::Array(_) | Value::Object(_) => return None,
            };
            Some(format!("{}={rendered}", clean(key.as_str())))
        })
        .collect();

    if fields.is_empty() {
        return String::new();
    }
    format!("    [dim]{}[reset]", fields.join(" "))
}

fn format_number(number: &Number) -> String {
    if number.is_i64() || number.is_u64() {
        number.to_string()
    } else {
        format_millis(number.as_f64().unwrap_or_default())
    }
}

/// Formats a millisecond count as a duration rounded to 100ms.
///
/// Fractions of a millisecond are truncated before rounding; halfway values
/// round away from zero. Out-of-range values saturate.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_millis(millis: f64) -> String {
    // `as` truncates toward zero and saturates; NaN becomes 0.
    let nanos = (millis as i64).saturating_mul(NANOS_PER_MILLI);
    format_duration(round_nanos(nanos, ROUND_NANOS))
}

fn round_nanos(nanos: i64, multiple: i64) -> i64 {
    let remainder = (nanos % multiple).abs();
    if remainder + remainder < multiple {
        if nanos < 0 {
            nanos + remainder
        } else {
            nanos - remainder
        }
    } else if nanos < 0 {
        nanos.saturating_sub(multiple - remainder)
    } else {
        nanos.saturating_add(multiple - remainder)
    }
}

/// Formats signed nanoseconds like `1h2m3.4s`, `1.5s`, `300ms` or `0s`.
#[must_use]
pub fn format_duration(nanos: i64) -> String {
    let mut out = String::new();
    if nanos < 0 {
        out.push('-');
    }
    let total = nanos.unsigned_abs();

    if total == 0 {
        return "0s".to_owned();
    }

    if total < NANOS_PER_SEC {
        if total < NANOS_PER_MICRO {
            let _ = write!(out, "{total}ns");
        } else if total < NANOS_PER_SEC / 1_000 {
            let _ = write!(out, "{}", total / NANOS_PER_MICRO);
            push_fraction(&mut out, total % NANOS_PER_MICRO, 3);
            out.push_str("µs");
        } else {
            let _ = write!(out, "{}", total / 1_000_000);
            push_fraction(&mut out, total % 1_000_000, 6);
            out.push_str("ms");
        }
        return out;
    }

    let secs = total / NANOS_PER_SEC;
    let (hours, minutes, seconds) = (secs / 3600, (secs / 60) % 60, secs % 60);
    if hours > 0 {
        let _ = write!(out, "{hours}h{minutes}m");
    } else if minutes > 0 {
        let _ = write!(out, "{minutes}m");
    }
    let _ = write!(out, "{seconds}");
    push_fraction(&mut out, total % NANOS_PER_SEC, 9);
    out.push('s');
    out
}

/// Appends `.digits` for a fraction of `precision` digits, without trailing zeros.
fn push_fraction(out: &mut String, mut fraction: u64, precision: usize) {
    let mut digits = precision;
    while digits > 0 && fraction % 10 == 0 {
        fraction /= 10;
        digits -= 1;
    }
    if digits > 0 {
        let _ = write!(out, ".{fraction:0digits$}");
    }
}
