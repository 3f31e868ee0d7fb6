#![no_main]

use libfuzzer_sys::fuzz_target;
use logtint::config::{ColorMode, RenderConfig, TimestampPolicy};
use logtint::render::Renderer;

fuzz_target!(|data: &[u8]| {
    // Strict and lenient renderers must both survive any input
    for policy in [TimestampPolicy::Strict, TimestampPolicy::Lenient] {
        let config = RenderConfig::default()
            .with_color(ColorMode::Ansi)
            .with_timestamp_policy(policy);
        let renderer = Renderer::new(Box::new(std::io::sink()), config);
        let _ = renderer.render(data);
    }
});
