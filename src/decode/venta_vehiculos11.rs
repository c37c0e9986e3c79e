use crate::core::{HandlerConfig, Result};
use crate::types::{Complement, CustomsInfo, VehiclePart, VentaVehiculos11};
use crate::xml::{StartTag, XmlCursor};

use super::fields::{Fields, VersionMatch, check_version};
use super::{ComplementDecoder, DocumentHandler, decode_first};

const ELEMENT: &str = "VentaVehiculos";
const VERSION: &str = "1.1";

/// Decoder for the Venta de Vehículos 1.1 complement.
#[derive(Debug, Clone, Default)]
pub struct VentaVehiculos11Handler {
    config: HandlerConfig,
}

impl VentaVehiculos11Handler {
    pub fn new(config: HandlerConfig) -> Self {
        Self { config }
    }

    /// Decode a `VentaVehiculos` element the cursor has just opened.
    pub fn decode_element(
        &self,
        cursor: &mut XmlCursor<'_>,
        start: &StartTag,
    ) -> Result<VentaVehiculos11> {
        let version = check_version(start, ELEMENT, VERSION, VersionMatch::Trimmed)?;
        let f = Fields::new(start, &self.config);
        let mut sale = VentaVehiculos11 {
            version,
            vehicle_key: f.raw("ClaveVehicular"),
            niv: f.raw("Niv"),
            customs_info: Vec::new(),
            parts: Vec::new(),
        };

        while let Some(child) = cursor.next_child(ELEMENT)? {
            match child.local_name() {
                "InformacionAduanera" => {
                    sale.customs_info.push(self.customs_info(&child));
                    cursor.skip("InformacionAduanera")?;
                }
                "Parte" => sale.parts.push(self.part(cursor, &child)?),
                other => cursor.skip(other)?,
            }
        }

        Ok(sale)
    }

    pub fn factory(config: &HandlerConfig) -> Box<dyn ComplementDecoder> {
        Box::new(Self::new(config.clone()))
    }

    fn customs_info(&self, tag: &StartTag) -> CustomsInfo {
        let f = Fields::new(tag, &self.config);
        CustomsInfo {
            number: f.raw("Numero"),
            date: f.raw("Fecha"),
            customs_office: f.raw("Aduana"),
        }
    }

    fn part(&self, cursor: &mut XmlCursor<'_>, tag: &StartTag) -> Result<VehiclePart> {
        let f = Fields::new(tag, &self.config);
        let mut part = VehiclePart {
            identification_number: f.raw("NoIdentificacion"),
            quantity: f.raw("Cantidad"),
            unit: f.raw("Unidad"),
            description: f.raw("Descripcion"),
            unit_value: f.raw("ValorUnitario"),
            amount: f.raw("Importe"),
            customs_info: Vec::new(),
        };

        while let Some(child) = cursor.next_child("Parte")? {
            if child.local_name() == "InformacionAduanera" {
                part.customs_info.push(self.customs_info(&child));
            }
            cursor.skip(child.local_name())?;
        }

        Ok(part)
    }
}

impl DocumentHandler for VentaVehiculos11Handler {
    type Output = VentaVehiculos11;

    fn parse_from_text(&self, xml: &str) -> Result<VentaVehiculos11> {
        decode_first(xml, ELEMENT, |cursor, start| self.decode_element(cursor, start))
    }
}

impl ComplementDecoder for VentaVehiculos11Handler {
    fn decode(&self, cursor: &mut XmlCursor<'_>, start: &StartTag) -> Result<Complement> {
        self.decode_element(cursor, start).map(Complement::VentaVehiculos11)
    }
}
