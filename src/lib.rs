//! # cfdi-transform
//!
//! Streaming decoder for Mexican CFDI 4.0 electronic invoices and the SAT
//! complements that travel inside them.
//!
//! Documents are decoded in a single forward pass over the XML tokens into
//! plain serde-ready records. Amounts, rates and dates stay textual exactly
//! as issued, so no precision is lost between the SAT and your ledger.
//!
//! ## Quick Start
//!
//! ```rust
//! use cfdi_transform::{Cfdi40Handler, DocumentHandler, HandlerConfig};
//!
//! let xml = r#"<cfdi:Comprobante xmlns:cfdi="http://www.sat.gob.mx/cfd/4"
//!     Version="4.0" Serie="AAA" Folio="12345" SubTotal="1000.00" Total="1160.00" Moneda="MXN">
//!   <cfdi:Emisor Rfc="AAA010101AAA" Nombre="EMISOR DE PRUEBA SA DE CV" RegimenFiscal="601"/>
//!   <cfdi:Complemento>
//!     <tfd:TimbreFiscalDigital xmlns:tfd="http://www.sat.gob.mx/TimbreFiscalDigital"
//!       Version="1.1" UUID="a3c6a0d7-8f4b-4e2a-9b5c-1d8e9f7a6b2c"/>
//!   </cfdi:Complemento>
//! </cfdi:Comprobante>"#;
//!
//! let handler = Cfdi40Handler::new(HandlerConfig::default().with_safe_numerics(true));
//! let cfdi = handler.parse_from_text(xml).unwrap();
//!
//! assert_eq!(cfdi.issuer.rfc, "AAA010101AAA");
//! assert_eq!(cfdi.exchange_rate, "1.00");
//! assert_eq!(cfdi.uuid(), Some("A3C6A0D7-8F4B-4E2A-9B5C-1D8E9F7A6B2C"));
//! assert_eq!(cfdi.complements, "TimbreFiscalDigital");
//! ```
//!
//! ## Supported documents
//!
//! | Document | Version | Handler | Enabled by |
//! |----------|---------|---------|------------|
//! | CFDI (`Comprobante`) | 4.0 | [`Cfdi40Handler`] | always |
//! | Timbre Fiscal Digital | 1.1 | [`Tfd11Handler`] | always |
//! | Pagos | 2.0 | [`Pagos20Handler`] | `parse_pagos20` |
//! | Nómina | 1.2 | [`Nomina12Handler`] | `parse_nomina12` |
//! | Venta de Vehículos | 1.1 | [`VentaVehiculos11Handler`] | `parse_venta_vehiculos11` |
//!
//! Other complements can be plugged in through [`ComplementRegistry`] and
//! [`Cfdi40Handler::with_complement`].

pub mod core;
pub mod decode;
pub mod types;
pub mod xml;

pub use crate::core::{CfdiError, HandlerConfig, Result};
pub use crate::decode::{
    AttributeComplementDecoder, Cfdi40Handler, ComplementDecoder, ComplementFactory,
    ComplementRegistry, DocumentHandler, Nomina12Handler, Pagos20Handler, QualifiedName,
    Tfd11Handler, VentaVehiculos11Handler,
};
pub use crate::types::*;
