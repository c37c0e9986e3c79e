//! Streaming decoders.
//!
//! One handler per document type. Each handler owns an immutable
//! [`HandlerConfig`](crate::core::HandlerConfig) and decodes in a single
//! forward pass over an [`XmlCursor`].

mod cfdi40;
mod fields;
mod nomina12;
mod pagos20;
mod registry;
mod tfd11;
mod venta_vehiculos11;

use std::path::Path;

use crate::core::{CfdiError, Result};
use crate::xml::{StartTag, XmlCursor};

pub use cfdi40::Cfdi40Handler;
pub use nomina12::Nomina12Handler;
pub use pagos20::Pagos20Handler;
pub use registry::{
    AttributeComplementDecoder, ComplementDecoder, ComplementFactory, ComplementRegistry,
    QualifiedName,
};
pub use tfd11::Tfd11Handler;
pub use venta_vehiculos11::VentaVehiculos11Handler;

/// `cfdi` namespace of CFDI 4.0.
pub const CFDI40_NAMESPACE: &str = "http://www.sat.gob.mx/cfd/4";
pub const TFD11_NAMESPACE: &str = "http://www.sat.gob.mx/TimbreFiscalDigital";
pub const PAGOS20_NAMESPACE: &str = "http://www.sat.gob.mx/Pagos20";
pub const NOMINA12_NAMESPACE: &str = "http://www.sat.gob.mx/nomina12";
pub const VENTA_VEHICULOS11_NAMESPACE: &str = "http://www.sat.gob.mx/ventavehiculos";

/// Entry points shared by every handler.
///
/// Handlers are immutable once built, so one instance can decode any number
/// of documents, from any number of threads.
pub trait DocumentHandler {
    type Output;

    /// Decode an in-memory document.
    fn parse_from_text(&self, xml: &str) -> Result<Self::Output>;

    /// Read a `.xml` file fully, then decode it.
    ///
    /// The extension is checked, case-insensitively, before the file is opened.
    fn parse_from_path(&self, path: impl AsRef<Path>) -> Result<Self::Output> {
        let xml = read_xml_file(path.as_ref())?;
        self.parse_from_text(&xml)
    }
}

fn read_xml_file(path: &Path) -> Result<String> {
    let is_xml = path
        .to_string_lossy()
        .to_lowercase()
        .ends_with(".xml");
    if !is_xml {
        return Err(CfdiError::FormatRejected(format!(
            "{} is not an .xml file",
            path.display()
        )));
    }

    let bytes = std::fs::read(path)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read XML source");

    String::from_utf8(bytes).map_err(|err| {
        CfdiError::FormatRejected(format!("{} is not valid UTF-8: {err}", path.display()))
    })
}

/// Decode the first element named `element` of a standalone document.
fn decode_first<T>(
    xml: &str,
    element: &str,
    decode: impl FnOnce(&mut XmlCursor<'_>, &StartTag) -> Result<T>,
) -> Result<T> {
    let mut cursor = XmlCursor::new(xml);
    let start = cursor
        .find_element(element)?
        .ok_or_else(|| CfdiError::FormatRejected(format!("{element} element not found")))?;
    let decoded = decode(&mut cursor, &start)?;
    cursor.drain()?;
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_checked_before_io() {
        let err = read_xml_file(Path::new("/definitely/missing/invoice.json")).unwrap_err();
        assert!(matches!(err, CfdiError::FormatRejected(_)));
    }

    #[test]
    fn missing_xml_file_is_io() {
        let err = read_xml_file(Path::new("/definitely/missing/invoice.XML")).unwrap_err();
        assert!(matches!(err, CfdiError::UnderlyingIo(_)));
    }

    #[test]
    fn decode_first_reads_the_whole_document() {
        let err = decode_first("<a><Pagos/><b>", "Pagos", |cursor, start| {
            cursor.skip(start.local_name())
        })
        .unwrap_err();
        assert!(matches!(err, CfdiError::TruncatedInput(_)));

        let err = decode_first("<a><Pagos/></c>", "Pagos", |cursor, start| {
            cursor.skip(start.local_name())
        })
        .unwrap_err();
        assert!(matches!(err, CfdiError::FormatRejected(_)));
    }

    #[test]
    fn decode_first_reports_absence() {
        let err = decode_first("<a/>", "Pagos", |_, _| Ok(())).unwrap_err();
        assert_eq!(err.to_string(), "format rejected: Pagos element not found");
    }
}
