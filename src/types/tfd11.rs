use serde::{Deserialize, Serialize};

/// Timbre Fiscal Digital 1.1, the SAT stamp that makes a CFDI valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tfd11 {
    pub version: String,
    /// `NoCertificadoSAT`.
    #[serde(rename = "no_certificado_sat")]
    pub sat_certificate_number: String,
    /// Folio fiscal, upper-cased.
    pub uuid: String,
    /// `FechaTimbrado`.
    #[serde(rename = "fecha_timbrado")]
    pub stamp_date: String,
    /// `RfcProvCertif`, the certifying provider.
    #[serde(rename = "rfc_prov_cert")]
    pub provider_rfc: String,
    /// `SelloCFD`.
    #[serde(rename = "sello_cfd")]
    pub cfd_seal: String,
    /// `SelloSAT`.
    #[serde(rename = "sello_sat")]
    pub sat_seal: String,
}
