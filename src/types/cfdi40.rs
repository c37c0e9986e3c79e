use serde::{Deserialize, Serialize};

use super::{ExtensionComplement, Nomina12, Pagos20, Tfd11, VentaVehiculos11};

/// A decoded CFDI 4.0 document (`cfdi:Comprobante`).
///
/// Amounts, rates and dates are kept exactly as written in the source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cfdi40 {
    /// `Version`, always `"4.0"`.
    pub version: String,
    /// `Serie`.
    #[serde(rename = "serie")]
    pub series: String,
    /// `Folio`.
    pub folio: String,
    /// `Fecha`, ISO 8601 local time.
    #[serde(rename = "fecha")]
    pub date: String,
    /// `NoCertificado`.
    #[serde(rename = "no_certificado")]
    pub certificate_number: String,
    /// `SubTotal`.
    pub subtotal: String,
    /// `Descuento`.
    #[serde(rename = "descuento")]
    pub discount: String,
    /// `Total`.
    pub total: String,
    /// `Moneda`.
    #[serde(rename = "moneda")]
    pub currency: String,
    /// `TipoCambio`.
    #[serde(rename = "tipo_cambio")]
    pub exchange_rate: String,
    /// `TipoDeComprobante` (I, E, T, N, P).
    #[serde(rename = "tipo_comprobante")]
    pub voucher_type: String,
    /// `MetodoPago` (PUE, PPD).
    #[serde(rename = "metodo_pago")]
    pub payment_method: String,
    /// `FormaPago`.
    #[serde(rename = "forma_pago")]
    pub payment_form: String,
    /// `CondicionesDePago`.
    #[serde(rename = "condiciones_pago")]
    pub payment_conditions: String,
    /// `LugarExpedicion`, a postal code.
    #[serde(rename = "lugar_expedicion")]
    pub expedition_place: String,
    /// `Exportacion`.
    #[serde(rename = "exportacion")]
    pub export: String,
    /// `Sello`.
    #[serde(rename = "sello")]
    pub seal: String,
    /// `Certificado`.
    #[serde(rename = "certificado")]
    pub certificate: String,
    /// `Confirmacion`.
    #[serde(rename = "confirmacion")]
    pub confirmation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "informacion_global")]
    pub global_information: Option<GlobalInformation>,
    #[serde(rename = "emisor")]
    pub issuer: Issuer,
    #[serde(rename = "receptor")]
    pub recipient: Recipient,
    #[serde(rename = "conceptos")]
    pub concepts: Vec<Concept>,
    #[serde(rename = "impuestos")]
    pub taxes: TaxSummary,
    #[serde(rename = "cfdis_relacionados")]
    pub related_cfdis: Vec<RelatedCfdi>,
    /// Local names of the `Complemento` children, space separated.
    #[serde(rename = "complementos")]
    pub complements: String,
    /// Local names of every element inside `Addenda`, space separated.
    #[serde(rename = "addendas")]
    pub addenda: String,
    pub tfd11: Vec<Tfd11>,
    pub pagos20: Vec<Pagos20>,
    pub nomina12: Vec<Nomina12>,
    pub venta_vehiculos11: Vec<VentaVehiculos11>,
    /// Complements decoded by caller-registered decoders.
    #[serde(rename = "extensiones")]
    pub extensions: Vec<ExtensionComplement>,
}

impl Cfdi40 {
    /// UUID of the first digital stamp, if the document was stamped.
    pub fn uuid(&self) -> Option<&str> {
        self.tfd11.first().map(|tfd| tfd.uuid.as_str())
    }
}

/// `cfdi:InformacionGlobal`, present on invoices issued to the general public.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalInformation {
    #[serde(rename = "periodicidad")]
    pub periodicity: String,
    #[serde(rename = "meses")]
    pub months: String,
    /// `Año`.
    #[serde(rename = "año")]
    pub year: String,
}

/// `cfdi:Emisor`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issuer {
    pub rfc: String,
    #[serde(rename = "nombre")]
    pub name: String,
    /// `RegimenFiscal`.
    #[serde(rename = "regimen_fiscal")]
    pub tax_regime: String,
    /// `FacAtrAdquirente`.
    #[serde(rename = "fac_atr_adquirente")]
    pub acquirer_attribute: String,
}

/// `cfdi:Receptor`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub rfc: String,
    #[serde(rename = "nombre")]
    pub name: String,
    /// `DomicilioFiscalReceptor`, a postal code.
    #[serde(rename = "domicilio_fiscal_receptor")]
    pub tax_address: String,
    /// `ResidenciaFiscal`, only for foreign recipients.
    #[serde(rename = "residencia_fiscal")]
    pub tax_residence: String,
    /// `NumRegIdTrib`.
    #[serde(rename = "num_reg_id_trib")]
    pub tax_id_number: String,
    /// `RegimenFiscalReceptor`.
    #[serde(rename = "regimen_fiscal_receptor")]
    pub tax_regime: String,
    /// `UsoCFDI`.
    #[serde(rename = "uso_cfdi")]
    pub cfdi_use: String,
}

/// `cfdi:Concepto`, one invoice line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    /// `ClaveProdServ`.
    #[serde(rename = "clave_prod_serv")]
    pub product_code: String,
    /// `NoIdentificacion`.
    #[serde(rename = "no_identificacion")]
    pub identification_number: String,
    #[serde(rename = "cantidad")]
    pub quantity: String,
    /// `ClaveUnidad`.
    #[serde(rename = "clave_unidad")]
    pub unit_code: String,
    #[serde(rename = "unidad")]
    pub unit: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "valor_unitario")]
    pub unit_value: String,
    #[serde(rename = "importe")]
    pub amount: String,
    #[serde(rename = "descuento")]
    pub discount: String,
    /// `ObjetoImp`.
    #[serde(rename = "objeto_imp")]
    pub tax_object: String,
    /// `ACuentaTerceros`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "terceros")]
    pub third_party: Option<ThirdParty>,
    #[serde(rename = "traslados")]
    pub transfers: Vec<TaxLine>,
    #[serde(rename = "retenciones")]
    pub withholdings: Vec<TaxLine>,
}

/// `cfdi:ACuentaTerceros`: the line was billed on behalf of someone else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThirdParty {
    pub rfc: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "regimenFiscal")]
    pub tax_regime: String,
    #[serde(rename = "domicilioFiscal")]
    pub tax_address: String,
}

/// A transferred (`Traslado`) or withheld (`Retencion`) tax line.
///
/// Document-level withholdings only carry `tax` and `amount`. Their absent
/// `base` and `rate_or_fee` read `"0.00"` under safe numerics and the empty
/// placeholder otherwise; `factor_type` always holds the placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxLine {
    pub base: String,
    /// SAT tax code: `001` ISR, `002` IVA, `003` IEPS.
    #[serde(rename = "impuesto")]
    pub tax: String,
    /// `Tasa`, `Cuota` or `Exento`.
    #[serde(rename = "tipo_factor")]
    pub factor_type: String,
    #[serde(rename = "tasa_o_cuota")]
    pub rate_or_fee: String,
    #[serde(rename = "importe")]
    pub amount: String,
}

/// Document-level `cfdi:Impuestos`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSummary {
    #[serde(rename = "total_impuestos_trasladados")]
    pub total_transferred: String,
    #[serde(rename = "total_impuestos_retenidos")]
    pub total_withheld: String,
    #[serde(rename = "traslados")]
    pub transfers: Vec<TaxLine>,
    #[serde(rename = "retenciones")]
    pub withholdings: Vec<TaxLine>,
    /// Transfer amounts summed per tax code.
    #[serde(rename = "trasladados_por_impuesto")]
    pub transferred_by_tax: TaxTotals,
    /// Withholding amounts summed per tax code.
    #[serde(rename = "retenidos_por_impuesto")]
    pub withheld_by_tax: TaxTotals,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTotals {
    pub isr: String,
    pub iva: String,
    pub ieps: String,
}

/// `cfdi:CfdiRelacionado`, with the relation type of its group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedCfdi {
    pub uuid: String,
    /// `TipoRelacion` of the enclosing `CfdiRelacionados`.
    #[serde(rename = "tipo_relacion")]
    pub relation_type: String,
}
