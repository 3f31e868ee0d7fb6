//! Filters for text taken from records.

use std::borrow::Cow;
use std::fmt::Write;

use crate::markup;

/// C0 and C1 controls and DEL, except tab.
fn is_unsafe(c: char) -> bool {
    c.is_control() && c != '\t'
}

/// Replaces control characters with their `\u{..}` escape form.
#[must_use]
pub fn sanitize_controls(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_unsafe) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if is_unsafe(c) {
            let _ = write!(out, "{}", c.escape_unicode());
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// Prepares record text for embedding in a markup line.
///
/// Control characters are escaped when `sanitize` is set; markup is always
/// escaped.
#[must_use]
pub fn clean_text(text: &str, sanitize: bool) -> Cow<'_, str> {
    let text = if sanitize {
        sanitize_controls(text)
    } else {
        Cow::Borrowed(text)
    };
    match text {
        Cow::Borrowed(s) => markup::escape(s),
        Cow::Owned(s) => Cow::Owned(markup::escape(&s).into_owned()),
    }
}
