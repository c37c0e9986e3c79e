#![no_main]

use cfdi_transform::{Cfdi40Handler, DocumentHandler, HandlerConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Errors are fine, panics are bugs.
        let handler = Cfdi40Handler::new(HandlerConfig::new().with_safe_numerics(true))
            .use_concepts_with_taxes()
            .use_related_cfdis()
            .use_pagos20()
            .use_nomina12()
            .use_venta_vehiculos11();
        let _ = handler.parse_from_text(s);
    }
});
