//! `render` command
//!
//! Streams newline-delimited JSON records from files or stdin through a
//! [`Renderer`] writing to stdout.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::cli::args::{ColorChoice, RenderArgs};
use crate::config::{ColorMode, RenderConfig, TimeFormat};
use crate::error::{ConfigError, LogtintError, RenderError};
use crate::render::Renderer;

/// How a stream reacts to records that fail to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamOptions {
    /// Echo undecodable lines instead of dropping them.
    pub passthrough: bool,
    /// Return the first record error instead of continuing.
    pub fail_fast: bool,
}

impl From<&RenderArgs> for StreamOptions {
    fn from(args: &RenderArgs) -> Self {
        Self {
            passthrough: args.passthrough,
            fail_fast: args.fail_fast,
        }
    }
}

/// Resolves the color mode for output written to stdout.
#[must_use]
pub fn stdout_color_mode(color: ColorChoice) -> ColorMode {
    let enabled = match color {
        ColorChoice::Auto => {
            std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
        }
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };
    if enabled {
        ColorMode::Ansi
    } else {
        ColorMode::Plain
    }
}

/// Builds the renderer configuration: environment first, then flags.
///
/// # Errors
///
/// Returns [`ConfigError`] if the resulting configuration is invalid.
pub fn build_config(args: &RenderArgs, color: ColorChoice) -> Result<RenderConfig, ConfigError> {
    let mut config = RenderConfig::from_env()?
        .with_align_sources(args.align_sources)
        .with_sanitize_controls(!args.raw_controls);

    if let Some(policy) = args.timestamps {
        config.timestamp_policy = policy;
    }
    if let Some(format) = &args.time_format {
        config.time_format = TimeFormat::parse(format);
    }
    if let Some(format) = &args.clock_format {
        config.clock_format.clone_from(format);
    }
    if let Some(limit) = args.max_record_size {
        config.max_record_size = limit;
    }
    config.color = if args.markup {
        ColorMode::Markup
    } else {
        stdout_color_mode(color)
    };

    config.validate()?;
    Ok(config)
}

/// Renders every input named in `args` to stdout.
///
/// # Errors
///
/// Returns an error if an input cannot be read, stdout fails, or a record
/// fails under `--fail-fast`.
pub async fn run(args: &RenderArgs, color: ColorChoice) -> Result<(), LogtintError> {
    let config = build_config(args, color)?;
    tracing::debug!(?config, "renderer configured");

    let renderer = Renderer::stdout(config);
    let options = StreamOptions::from(args);

    let inputs: Vec<&Path> = if args.files.is_empty() {
        vec![Path::new("-")]
    } else {
        args.files.iter().map(PathBuf::as_path).collect()
    };

    for path in inputs {
        if path == Path::new("-") {
            let reader = BufReader::new(tokio::io::stdin());
            render_stream(&renderer, reader, "<stdin>", options).await?;
        } else {
            let file = tokio::fs::File::open(path)
                .await
                .map_err(|source| LogtintError::Input {
                    path: path.to_path_buf(),
                    source,
                })?;
            let name = path.display().to_string();
            render_stream(&renderer, BufReader::new(file), &name, options).await?;
        }
    }

    let stats = renderer.stats().snapshot();
    tracing::info!(
        rendered = stats.rendered,
        decode_errors = stats.decode_errors,
        timestamp_errors = stats.timestamp_errors,
        oversized = stats.oversized,
        passed_through = stats.passed_through,
        "render complete"
    );
    Ok(())
}

/// Renders one newline-delimited stream, returning the number of lines read.
///
/// Blank lines are skipped. Record failures are logged and skipped unless
/// `options.fail_fast` is set; sink failures always end the stream.
///
/// # Errors
///
/// Returns [`LogtintError::Input`] if reading fails, or the render error
/// that ended the stream.
pub async fn render_stream<R>(
    renderer: &Renderer,
    mut reader: R,
    source: &str,
    options: StreamOptions,
) -> Result<u64, LogtintError>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::new();
    let mut line_no = 0_u64;

    loop {
        line.clear();
        let n = reader
            .read_until(b'\n', &mut line)
            .await
            .map_err(|source_err| LogtintError::Input {
                path: PathBuf::from(source),
                source: source_err,
            })?;
        if n == 0 {
            break;
        }
        line_no += 1;

        if line.trim_ascii().is_empty() {
            continue;
        }

        match renderer.render(&line) {
            Ok(()) => {}
            Err(err) if !err.is_record_error() || options.fail_fast => {
                tracing::error!(source, line = line_no, error = %err, "render failed");
                return Err(err.into());
            }
            Err(RenderError::Decode(_)) if options.passthrough => {
                renderer.passthrough(&line)?;
            }
            Err(err) => {
                tracing::warn!(source, line = line_no, error = %err, "skipping record");
            }
        }
    }

    tracing::debug!(source, lines = line_no, "input exhausted");
    Ok(line_no)
}
