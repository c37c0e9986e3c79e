use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Nomina12, Pagos20, Tfd11, VentaVehiculos11};

/// Result of decoding one complement element through the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Complement {
    Tfd11(Tfd11),
    Pagos20(Pagos20),
    Nomina12(Nomina12),
    VentaVehiculos11(VentaVehiculos11),
    Extension(ExtensionComplement),
}

impl Complement {
    /// Local element name the complement is written under.
    pub fn element_name(&self) -> &str {
        match self {
            Complement::Tfd11(_) => "TimbreFiscalDigital",
            Complement::Pagos20(_) => "Pagos",
            Complement::Nomina12(_) => "Nomina",
            Complement::VentaVehiculos11(_) => "VentaVehiculos",
            Complement::Extension(ext) => &ext.name,
        }
    }
}

/// A complement the crate has no model for, decoded by a caller-registered decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionComplement {
    pub namespace: String,
    #[serde(rename = "nombre")]
    pub name: String,
    pub version: String,
    #[serde(rename = "atributos")]
    pub attributes: BTreeMap<String, String>,
}
