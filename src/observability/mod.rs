//! Observability module
//!
//! Diagnostics for the `logtint` binary itself and outcome counters for
//! renderers. Diagnostics always go to stderr so they never mix with
//! rendered output.

pub mod logging;
pub mod stats;

pub use logging::{LogFormat, init_logging};
pub use stats::{RenderStats, StatsSnapshot};
