use serde::{Deserialize, Serialize};

/// Complemento concepto venta de vehículos 1.1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VentaVehiculos11 {
    pub version: String,
    /// `ClaveVehicular`.
    #[serde(rename = "clave_vehicular")]
    pub vehicle_key: String,
    /// Vehicle identification number.
    pub niv: String,
    #[serde(rename = "informacion_aduanera")]
    pub customs_info: Vec<CustomsInfo>,
    pub parts: Vec<VehiclePart>,
}

/// `InformacionAduanera`: the import declaration (pedimento).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomsInfo {
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "aduana")]
    pub customs_office: String,
}

/// `Parte`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehiclePart {
    #[serde(rename = "no_identificacion")]
    pub identification_number: String,
    #[serde(rename = "cantidad")]
    pub quantity: String,
    #[serde(rename = "unidad")]
    pub unit: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "valor_unitario")]
    pub unit_value: String,
    #[serde(rename = "importe")]
    pub amount: String,
    #[serde(rename = "informacion_aduanera")]
    pub customs_info: Vec<CustomsInfo>,
}
