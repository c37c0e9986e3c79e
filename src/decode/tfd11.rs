use crate::core::{HandlerConfig, Result};
use crate::types::{Complement, Tfd11};
use crate::xml::{StartTag, XmlCursor};

use super::fields::{Fields, VersionMatch, check_version};
use super::{ComplementDecoder, DocumentHandler, decode_first};

const ELEMENT: &str = "TimbreFiscalDigital";
const VERSION: &str = "1.1";

/// Decoder for the Timbre Fiscal Digital 1.1.
#[derive(Debug, Clone, Default)]
pub struct Tfd11Handler {
    config: HandlerConfig,
}

impl Tfd11Handler {
    pub fn new(config: HandlerConfig) -> Self {
        Self { config }
    }

    /// Decode a `TimbreFiscalDigital` element the cursor has just opened.
    pub fn decode_element(&self, cursor: &mut XmlCursor<'_>, start: &StartTag) -> Result<Tfd11> {
        let version = check_version(start, ELEMENT, VERSION, VersionMatch::Exact)?;
        let f = Fields::new(start, &self.config);

        let tfd = Tfd11 {
            version,
            sat_certificate_number: f.raw("NoCertificadoSAT"),
            uuid: f.upper("UUID"),
            stamp_date: f.raw("FechaTimbrado"),
            provider_rfc: f.raw("RfcProvCertif"),
            cfd_seal: f.compact("SelloCFD"),
            sat_seal: f.compact("SelloSAT"),
        };

        cursor.skip(ELEMENT)?;
        Ok(tfd)
    }

    pub fn factory(config: &HandlerConfig) -> Box<dyn ComplementDecoder> {
        Box::new(Self::new(config.clone()))
    }
}

impl DocumentHandler for Tfd11Handler {
    type Output = Tfd11;

    fn parse_from_text(&self, xml: &str) -> Result<Tfd11> {
        decode_first(xml, ELEMENT, |cursor, start| self.decode_element(cursor, start))
    }
}

impl ComplementDecoder for Tfd11Handler {
    fn decode(&self, cursor: &mut XmlCursor<'_>, start: &StartTag) -> Result<Complement> {
        self.decode_element(cursor, start).map(Complement::Tfd11)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CfdiError;

    const STAMP: &str = r#"<tfd:TimbreFiscalDigital xmlns:tfd="http://www.sat.gob.mx/TimbreFiscalDigital" Version="1.1" UUID="a3c6a0d7-8f4b-4e2a-9b5c-1d8e9f7a6b2c" FechaTimbrado="2025-01-15T10:30:01" RfcProvCertif="AAA010101AAA" SelloCFD="ABC&#10;DEF" NoCertificadoSAT="30001000000300023789" SelloSAT="XYZ=="/>"#;

    #[test]
    fn standalone_stamp() {
        let tfd = Tfd11Handler::default().parse_from_text(STAMP).unwrap();
        assert_eq!(tfd.version, "1.1");
        assert_eq!(tfd.uuid, "A3C6A0D7-8F4B-4E2A-9B5C-1D8E9F7A6B2C");
        assert_eq!(tfd.provider_rfc, "AAA010101AAA");
        assert_eq!(tfd.cfd_seal, "ABC DEF");
        assert_eq!(tfd.sat_seal, "XYZ==");
    }

    #[test]
    fn wrong_version() {
        let xml = STAMP.replace(r#"Version="1.1""#, r#"Version="1.0""#);
        let err = Tfd11Handler::default().parse_from_text(&xml).unwrap_err();
        assert!(matches!(
            err,
            CfdiError::SchemaVersionMismatch { element: "TimbreFiscalDigital", .. }
        ));
    }

    #[test]
    fn padded_version_is_rejected() {
        let xml = STAMP.replace(r#"Version="1.1""#, r#"Version=" 1.1 ""#);
        let err = Tfd11Handler::default().parse_from_text(&xml).unwrap_err();
        assert!(err.is_version_mismatch());
    }

    #[test]
    fn missing_stamp() {
        let err = Tfd11Handler::default()
            .parse_from_text("<cfdi:Comprobante xmlns:cfdi=\"http://www.sat.gob.mx/cfd/4\"/>")
            .unwrap_err();
        assert!(matches!(err, CfdiError::FormatRejected(_)));
    }
}
