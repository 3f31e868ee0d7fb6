//! Color markup expansion.
//!
//! Rendered lines carry style directives as bracketed names, e.g.
//! `[red]failed[reset]`. [`Colorize`] turns them into ANSI SGR escape
//! sequences, or removes them when colors are off. A doubled bracket `[[`
//! is a literal `[`; [`escape`] applies that to untrusted text so it cannot
//! restyle the line.

use std::borrow::Cow;
use std::fmt::Write;

/// Longest style name in [`STYLES`].
const MAX_NAME_LEN: usize = 16;

/// Style names and their SGR codes.
const STYLES: &[(&str, u8)] = &[
    ("default", 39),
    ("black", 30),
    ("red", 31),
    ("green", 32),
    ("yellow", 33),
    ("blue", 34),
    ("magenta", 35),
    ("cyan", 36),
    ("light_gray", 37),
    ("dark_gray", 90),
    ("light_red", 91),
    ("light_green", 92),
    ("light_yellow", 93),
    ("light_blue", 94),
    ("light_magenta", 95),
    ("light_cyan", 96),
    ("white", 97),
    ("bg_default", 49),
    ("bg_black", 40),
    ("bg_red", 41),
    ("bg_green", 42),
    ("bg_yellow", 43),
    ("bg_blue", 44),
    ("bg_magenta", 45),
    ("bg_cyan", 46),
    ("bg_light_gray", 47),
    ("bg_dark_gray", 100),
    ("bg_light_red", 101),
    ("bg_light_green", 102),
    ("bg_light_yellow", 103),
    ("bg_light_blue", 104),
    ("bg_light_magenta", 105),
    ("bg_light_cyan", 106),
    ("bg_white", 107),
    ("bold", 1),
    ("dim", 2),
    ("underline", 4),
    ("blink_slow", 5),
    ("blink_fast", 6),
    ("invert", 7),
    ("hidden", 8),
    ("reset", 0),
];

/// Returns the SGR code for a style name.
#[must_use]
pub fn style_code(name: &str) -> Option<u8> {
    STYLES
        .iter()
        .find_map(|(style, code)| (*style == name).then_some(*code))
}

/// If `s` starts with a known `[name]` tag, returns its code and byte length.
fn parse_tag(s: &str) -> Option<(u8, usize)> {
    let inner = s.strip_prefix('[')?;
    let close = inner
        .char_indices()
        .take(MAX_NAME_LEN + 1)
        .find_map(|(i, c)| (c == ']').then_some(i))?;
    style_code(&inner[..close]).map(|code| (code, close + 2))
}

/// Expands or strips style markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colorize {
    colors: bool,
    reset: bool,
}

impl Colorize {
    /// ANSI output with a trailing reset.
    #[must_use]
    pub const fn ansi() -> Self {
        Self {
            colors: true,
            reset: true,
        }
    }

    /// Plain text output: tags are removed.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            colors: false,
            reset: false,
        }
    }

    /// Controls whether a reset sequence is appended after colored output.
    #[must_use]
    pub const fn with_reset(mut self, reset: bool) -> Self {
        self.reset = reset;
        self
    }

    /// Returns `true` if tags expand to escape sequences.
    #[must_use]
    pub const fn colors_enabled(&self) -> bool {
        self.colors
    }

    /// Expands every known tag in `s`.
    ///
    /// Unknown bracketed text is kept verbatim and `[[` becomes `[`.
    #[must_use]
    pub fn colorize(&self, s: &str) -> String {
        let mut out = String::with_capacity(s.len() + 16);
        let mut emitted = false;
        let mut rest = s;

        while let Some(pos) = rest.find('[') {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];

            if tail.starts_with("[[") {
                out.push('[');
                rest = &tail[2..];
            } else if let Some((code, len)) = parse_tag(tail) {
                if self.colors {
                    let _ = write!(out, "\x1b[{code}m");
                    emitted = true;
                }
                rest = &tail[len..];
            } else {
                out.push('[');
                rest = &tail[1..];
            }
        }
        out.push_str(rest);

        if self.colors && self.reset && emitted {
            out.push_str("\x1b[0m");
        }
        out
    }
}

impl Default for Colorize {
    fn default() -> Self {
        Self::ansi()
    }
}

/// Removes all markup from `s`.
#[must_use]
pub fn strip(s: &str) -> String {
    Colorize::plain().colorize(s)
}

/// Escapes `s` so that [`Colorize`] reproduces it literally.
///
/// Brackets that would otherwise be interpreted are doubled, and so is a
/// trailing `[`, which could pair with markup appended after the text. Text
/// like `[1, 2]` passes through untouched.
#[must_use]
pub fn escape(s: &str) -> Cow<'_, str> {
    let needs_escape =
        |tail: &str| tail == "[" || tail.starts_with("[[") || parse_tag(tail).is_some();

    if !s
        .match_indices('[')
        .any(|(pos, _)| needs_escape(&s[pos..]))
    {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 8);
    let mut last = 0;
    for (pos, _) in s.match_indices('[') {
        out.push_str(&s[last..pos]);
        if needs_escape(&s[pos..]) {
            out.push_str("[[");
        } else {
            out.push('[');
        }
        last = pos + 1;
    }
    out.push_str(&s[last..]);
    Cow::Owned(out)
}
