//! Source tag resolution and color assignment.

use serde_json::Value;

/// Tag used for records without a `component`.
pub const DEFAULT_SOURCE: &str = "system";

/// Colors assigned to source tags. Order is significant.
pub const PALETTE: [&str; 11] = [
    "green",
    "light_green",
    "light_blue",
    "blue",
    "magenta",
    "light_magenta",
    "light_yellow",
    "cyan",
    "light_cyan",
    "red",
    "light_red",
];

const ADLER_MOD: u32 = 65_521;

/// Adler-32 checksum of `bytes`.
#[must_use]
pub fn adler32(bytes: &[u8]) -> u32 {
    let (mut a, mut b) = (1_u32, 0_u32);
    for &byte in bytes {
        a = (a + u32::from(byte)) % ADLER_MOD;
        b = (b + a) % ADLER_MOD;
    }
    (b << 16) | a
}

/// Palette color for a source tag.
///
/// A pure function of the tag text, so the same tag gets the same color in
/// every run.
#[must_use]
pub fn source_color(tag: &str) -> &'static str {
    PALETTE[adler32(tag.as_bytes()) as usize % PALETTE.len()]
}

/// Resolves the source tag of a record from its `component` field.
#[must_use]
pub fn resolve_source(component: Option<&Value>) -> &str {
    match component.and_then(Value::as_str) {
        Some(tag) if !tag.is_empty() => tag,
        _ => DEFAULT_SOURCE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn adler32_reference_vectors() {
        assert_eq!(adler32(b""), 1);
        assert_eq!(adler32(b"Wikipedia"), 0x11E6_0398);
    }

    #[test]
    fn known_tag_colors() {
        assert_eq!(source_color("system"), "cyan");
        assert_eq!(source_color("engine"), "light_yellow");
        assert_eq!(source_color("worker"), "light_green");
        assert_eq!(source_color("api"), "magenta");
    }

    #[test]
    fn color_is_deterministic() {
        for tag in ["engine", "builder", "registry", "ünïcode"] {
            assert_eq!(source_color(tag), source_color(tag));
            assert!(PALETTE.contains(&source_color(tag)));
        }
    }

    #[test]
    fn palette_names_are_markup_styles() {
        for color in PALETTE {
            assert!(crate::markup::style_code(color).is_some(), "{color}");
        }
    }

    #[test]
    fn resolve_source_defaults() {
        assert_eq!(resolve_source(None), "system");
        assert_eq!(resolve_source(Some(&json!(""))), "system");
        assert_eq!(resolve_source(Some(&json!(42))), "system");
        assert_eq!(resolve_source(Some(&Value::Null)), "system");
        assert_eq!(resolve_source(Some(&json!("engine"))), "engine");
    }
}
