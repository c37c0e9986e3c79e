//! Decode a CFDI file and print it as JSON.
//!
//! ```text
//! RUST_LOG=cfdi_transform=debug cargo run --example parse_cfdi -- factura.xml
//! ```

use cfdi_transform::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: parse_cfdi <file.xml>");
        std::process::exit(2);
    };

    // ── Everything on, absent amounts as zero ─────────────────────────
    let handler = Cfdi40Handler::new(HandlerConfig::new().with_safe_numerics(true))
        .use_concepts_with_taxes()
        .use_related_cfdis()
        .use_pagos20()
        .use_nomina12()
        .use_venta_vehiculos11()
        .with_complement(
            QualifiedName::new("http://www.sat.gob.mx/implocal", "ImpuestosLocales"),
            AttributeComplementDecoder::factory,
        );

    match handler.parse_from_path(&path) {
        Ok(cfdi) => {
            eprintln!(
                "{} {}-{} uuid={} complements=[{}]",
                cfdi.voucher_type,
                cfdi.series,
                cfdi.folio,
                cfdi.uuid().unwrap_or("-"),
                cfdi.complements
            );
            match serde_json::to_string_pretty(&cfdi) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("serialization failed: {e}"),
            }
        }
        Err(e @ CfdiError::SchemaVersionMismatch { .. }) => {
            eprintln!("unsupported document: {e}");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("decode failed: {e}");
            std::process::exit(1);
        }
    }
}
