//! Decoded record types.
//!
//! Field names are English in Rust and serialize under the snake_case Spanish
//! keys (`emisor`, `fecha_timbrado`, `total_una_exhibicion`) that downstream
//! CFDI tooling already consumes. Sequences are always present (possibly
//! empty); optional sub-records are omitted when absent.

mod cfdi40;
mod complement;
mod nomina12;
mod pagos20;
mod tfd11;
mod venta_vehiculos11;

pub use cfdi40::*;
pub use complement::*;
pub use nomina12::*;
pub use pagos20::*;
pub use tfd11::*;
pub use venta_vehiculos11::*;
