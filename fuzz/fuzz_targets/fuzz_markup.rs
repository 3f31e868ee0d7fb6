#![no_main]

use libfuzzer_sys::fuzz_target;
use logtint::markup::{self, Colorize};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Escaped text must come back unchanged once stripped
        let escaped = markup::escape(text);
        assert_eq!(markup::strip(&escaped), text);
        // Nor may it pair with a tag that follows it
        assert_eq!(markup::strip(&format!("{escaped}[reset]")), text);

        let _ = Colorize::ansi().colorize(text);
    }
});
