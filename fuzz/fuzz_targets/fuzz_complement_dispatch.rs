#![no_main]

use cfdi_transform::{ComplementRegistry, HandlerConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let registry = ComplementRegistry::with_defaults();
        let _ = registry.parse_from_text(s, &HandlerConfig::default());
    }
});
