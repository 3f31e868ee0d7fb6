//! `logtint` - Render structured JSON logs as colorized terminal lines
//!
//! This library turns newline-delimited JSON log records into compact,
//! color-coded lines for humans: a clock time, a severity badge, a
//! color-stable source tag, the message, and any remaining fields.
//!
//! ```
//! use logtint::config::{ColorMode, RenderConfig};
//! use logtint::render::Renderer;
//!
//! let renderer = Renderer::new(
//!     Box::new(std::io::sink()),
//!     RenderConfig::default().with_color(ColorMode::Markup),
//! );
//! let line = renderer
//!     .format_event(br#"{"level":"error","message":"build failed","error":"exit 1","component":"engine"}"#)
//!     .unwrap();
//! assert!(line.contains("[red]ERR[reset]"));
//! assert!(line.contains("build failed: exit 1"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod markup;
pub mod observability;
pub mod render;
