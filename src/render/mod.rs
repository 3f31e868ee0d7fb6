//! Event renderer.
//!
//! Turns one JSON log record into one human-readable line:
//!
//! ```text
//! 3:04PM ERR engine | build failed: exit 1    attempt=2 elapsed=1.5s
//! ```
//!
//! Lines are first composed as markup (see [`crate::markup`]) and then
//! expanded or stripped according to [`ColorMode`] on the way to the sink.
//! Each line reaches the sink through a single `write_all` under the sink
//! lock, so concurrent callers never interleave partial lines.

pub mod fields;
pub mod level;
pub mod source;
pub mod text;
pub mod timestamp;

use std::borrow::Cow;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use serde_json::{Map, Value};

use crate::config::{ColorMode, RenderConfig};
use crate::error::RenderError;
use crate::markup::{self, Colorize};
use crate::observability::RenderStats;

pub use fields::{SKIP_FIELDS, format_millis};
pub use level::Level;
pub use source::{DEFAULT_SOURCE, PALETTE, source_color};
pub use timestamp::PLACEHOLDER;

/// Renders structured log records onto a sink.
///
/// One instance per output stream. The instance owns the widest source tag
/// seen so far, which is only a layout hint.
pub struct Renderer {
    sink: Mutex<Box<dyn Write + Send>>,
    config: RenderConfig,
    source_width: AtomicUsize,
    stats: RenderStats,
}

// Box<dyn Write> is not Debug, so this is written by hand.
impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("config", &self.config)
            .field("source_width", &self.max_source_width())
            .finish_non_exhaustive()
    }
}

impl Renderer {
    /// Creates a renderer writing to `sink`.
    #[must_use]
    pub fn new(sink: Box<dyn Write + Send>, config: RenderConfig) -> Self {
        Self {
            sink: Mutex::new(sink),
            config,
            source_width: AtomicUsize::new(0),
            stats: RenderStats::default(),
        }
    }

    /// Creates a renderer writing to stdout.
    #[must_use]
    pub fn stdout(config: RenderConfig) -> Self {
        Self::new(Box::new(std::io::stdout()), config)
    }

    /// The configuration this renderer was built with.
    #[must_use]
    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Outcome counters for this renderer.
    #[must_use]
    pub const fn stats(&self) -> &RenderStats {
        &self.stats
    }

    /// Width, in characters, of the widest source tag seen so far.
    #[must_use]
    pub fn max_source_width(&self) -> usize {
        self.source_width.load(Ordering::Relaxed)
    }

    /// Formats one record as a markup line, without a trailing newline.
    ///
    /// Nothing is written to the sink.
    ///
    /// # Errors
    ///
    /// - [`RenderError::TooLarge`] if `raw` exceeds the configured limit.
    /// - [`RenderError::Decode`] if `raw` is not a JSON object.
    /// - [`RenderError::Timestamp`] if the timestamp is malformed and the
    ///   policy is strict.
    pub fn format_event(&self, raw: &[u8]) -> Result<String, RenderError> {
        let result = self.format_record(raw);
        self.stats.record(&result);
        result
    }

    /// Formats one record and writes it to the sink as a single line.
    ///
    /// # Errors
    ///
    /// Any error from [`format_event`](Self::format_event), in which case
    /// nothing is written, or [`RenderError::Io`] if the sink fails.
    pub fn render(&self, raw: &[u8]) -> Result<(), RenderError> {
        let line = self.format_event(raw)?;
        self.write_markup(&line)
    }

    /// Writes `raw` as a line of plain text, without interpreting it.
    ///
    /// Used for input lines that are not records at all. The text goes
    /// through the same filters as record text.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Io`] if the sink fails.
    pub fn passthrough(&self, raw: &[u8]) -> Result<(), RenderError> {
        let text = String::from_utf8_lossy(raw);
        let text = text.trim_end_matches(['\r', '\n']);
        self.stats.record_passthrough();
        self.write_markup(&self.clean(text))
    }

    fn format_record(&self, raw: &[u8]) -> Result<String, RenderError> {
        if raw.len() > self.config.max_record_size {
            return Err(RenderError::TooLarge {
                size: raw.len(),
                limit: self.config.max_record_size,
            });
        }

        let record: Map<String, Value> =
            serde_json::from_slice(raw).map_err(RenderError::Decode)?;

        let level = Level::from_field(record.get("level"));
        let time = timestamp::timestamp_segment(record.get("timestamp"), &self.config)?;
        let source = self.source_segment(source::resolve_source(record.get("component")));
        let message = self.message_segment(&record, level);
        let sanitize = self.config.sanitize_controls;
        let fields = fields::fields_segment(&record, |s| text::clean_text(s, sanitize));

        Ok(format!(
            "{time} {badge} {source}{message}{fields}",
            badge = level.badge_markup()
        ))
    }

    fn source_segment(&self, tag: &str) -> String {
        let color = source_color(tag);
        let tag = self.clean(tag);

        // Width as displayed, after escaping and markup expansion.
        let width = markup::strip(&tag).chars().count();
        let widest = self
            .source_width
            .fetch_max(width, Ordering::Relaxed)
            .max(width);

        if self.config.align_sources {
            let pad = widest - width;
            format!("[{color}]{tag}{:pad$} | [reset]", "")
        } else {
            format!("[{color}]{tag} | [reset]")
        }
    }

    fn message_segment(&self, record: &Map<String, Value>, level: Level) -> String {
        let message = record
            .get("message")
            .and_then(Value::as_str)
            .map_or("", str::trim);
        let error = record
            .get("error")
            .and_then(Value::as_str)
            .filter(|e| !e.is_empty());

        let text: Cow<'_, str> = match error {
            Some(error) if !message.is_empty() => Cow::Owned(format!("{message}: {error}")),
            Some(error) => Cow::Borrowed(error),
            None => Cow::Borrowed(message),
        };
        if text.is_empty() {
            return String::new();
        }
        level.emphasize(&self.clean(&text))
    }

    fn clean<'a>(&self, text: &'a str) -> Cow<'a, str> {
        text::clean_text(text, self.config.sanitize_controls)
    }

    fn write_markup(&self, markup: &str) -> Result<(), RenderError> {
        let mut line = match self.config.color {
            ColorMode::Ansi => Colorize::ansi().colorize(markup),
            ColorMode::Plain => markup::strip(markup),
            ColorMode::Markup => markup.to_owned(),
        };
        line.push('\n');

        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        sink.write_all(line.as_bytes())?;
        sink.flush()?;
        Ok(())
    }
}

/// Byte-oriented sink interface: each `write` call carries one complete
/// record.
impl Write for &Renderer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.render(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()
    }
}
