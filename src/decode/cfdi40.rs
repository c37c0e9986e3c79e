use crate::core::{CfdiError, HandlerConfig, Result, sum_amounts};
use crate::types::{
    Cfdi40, Complement, Concept, GlobalInformation, Issuer, Recipient, RelatedCfdi, TaxLine,
    TaxSummary, TaxTotals, ThirdParty,
};
use crate::xml::{StartTag, XmlCursor};

use super::fields::{Fields, VersionMatch, check_version};
use super::{
    ComplementFactory, ComplementRegistry, DocumentHandler, NOMINA12_NAMESPACE,
    PAGOS20_NAMESPACE, QualifiedName, TFD11_NAMESPACE, VENTA_VEHICULOS11_NAMESPACE,
};

const ROOT: &str = "Comprobante";
const VERSION: &str = "4.0";

const ISR: &str = "001";
const IVA: &str = "002";
const IEPS: &str = "003";

/// Entry point for CFDI 4.0 documents.
///
/// Concepts, related documents and every complement except the digital
/// stamp are opt-in, either through [`HandlerConfig`] or the `use_*` toggles:
///
/// ```
/// use cfdi_transform::{Cfdi40Handler, DocumentHandler, HandlerConfig};
///
/// let handler = Cfdi40Handler::new(HandlerConfig::default())
///     .use_concepts()
///     .use_pagos20();
/// let xml = r#"<cfdi:Comprobante xmlns:cfdi="http://www.sat.gob.mx/cfd/4" Version="3.3"/>"#;
/// let err = handler.parse_from_text(xml).unwrap_err();
/// assert!(err.is_version_mismatch());
/// ```
///
/// The toggles consume the handler, so a handler shared between threads is
/// never reconfigured while a parse is running.
#[derive(Debug, Clone)]
pub struct Cfdi40Handler {
    config: HandlerConfig,
    complements: ComplementRegistry,
}

impl Default for Cfdi40Handler {
    fn default() -> Self {
        Self::new(HandlerConfig::default())
    }
}

impl Cfdi40Handler {
    pub fn new(config: HandlerConfig) -> Self {
        Self {
            config,
            complements: ComplementRegistry::with_defaults(),
        }
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    pub fn use_concepts(mut self) -> Self {
        self.config.parse_concepts = true;
        self
    }

    /// Decode concepts together with their own taxes.
    pub fn use_concepts_with_taxes(mut self) -> Self {
        self.config.parse_concepts = true;
        self.config.parse_concepts_taxes = true;
        self
    }

    pub fn use_related_cfdis(mut self) -> Self {
        self.config.parse_related_cfdis = true;
        self
    }

    pub fn use_pagos20(mut self) -> Self {
        self.config.parse_pagos20 = true;
        self
    }

    pub fn use_nomina12(mut self) -> Self {
        self.config.parse_nomina12 = true;
        self
    }

    pub fn use_venta_vehiculos11(mut self) -> Self {
        self.config.parse_venta_vehiculos11 = true;
        self
    }

    /// Decode complements named `name` with `factory`. Results land in
    /// [`Cfdi40::extensions`] unless the decoder yields a built-in record.
    pub fn with_complement(mut self, name: QualifiedName, factory: ComplementFactory) -> Self {
        self.complements.register(name, factory);
        self
    }

    fn decode(&self, cursor: &mut XmlCursor<'_>, root: &StartTag) -> Result<Cfdi40> {
        let version = check_version(root, ROOT, VERSION, VersionMatch::Exact)?;
        let mut doc = self.header(root, version);
        let mut complement_names = Vec::new();
        let mut addenda_names = Vec::new();

        while let Some(child) = cursor.next_child(ROOT)? {
            match RootChild::of(&child) {
                RootChild::GlobalInformation => {
                    let f = Fields::new(&child, &self.config);
                    doc.global_information = Some(GlobalInformation {
                        periodicity: f.raw("Periodicidad"),
                        months: f.raw("Meses"),
                        year: f.raw("Año"),
                    });
                    cursor.skip(child.local_name())?;
                }
                RootChild::RelatedCfdis if self.config.parse_related_cfdis => {
                    self.related_cfdis(cursor, &child, &mut doc.related_cfdis)?;
                }
                RootChild::Issuer => {
                    doc.issuer = self.issuer(&child);
                    cursor.skip(child.local_name())?;
                }
                RootChild::Recipient => {
                    doc.recipient = self.recipient(&child);
                    cursor.skip(child.local_name())?;
                }
                RootChild::Concepts if self.config.parse_concepts => {
                    self.concepts(cursor, &mut doc.concepts)?;
                }
                RootChild::Taxes => doc.taxes = self.tax_summary(cursor, &child)?,
                RootChild::Complements => {
                    self.complement_section(cursor, &mut doc, &mut complement_names)?;
                }
                RootChild::Addenda => {
                    addenda_names.extend(cursor.collect_descendant_names(child.local_name())?);
                }
                _ => cursor.skip(child.local_name())?,
            }
        }

        if !complement_names.is_empty() {
            doc.complements = complement_names.join(" ");
        }
        if !addenda_names.is_empty() {
            doc.addenda = addenda_names.join(" ");
        }

        Ok(doc)
    }

    fn header(&self, root: &StartTag, version: String) -> Cfdi40 {
        let f = Fields::new(root, &self.config);
        let zero = self.config.empty_or_zero();
        Cfdi40 {
            version,
            series: f.compact_or_empty("Serie"),
            folio: f.compact_or_empty("Folio"),
            date: f.raw("Fecha"),
            certificate_number: f.raw("NoCertificado"),
            subtotal: f.raw("SubTotal"),
            discount: f.zero("Descuento"),
            total: f.raw("Total"),
            currency: f.raw("Moneda"),
            exchange_rate: f.one("TipoCambio"),
            voucher_type: f.raw("TipoDeComprobante"),
            payment_method: f.compact_or_empty("MetodoPago"),
            payment_form: f.compact_or_empty("FormaPago"),
            payment_conditions: f.compact_or_empty("CondicionesDePago"),
            expedition_place: f.raw("LugarExpedicion"),
            export: f.raw("Exportacion"),
            seal: f.compact("Sello"),
            certificate: f.compact("Certificado"),
            confirmation: f.or_empty("Confirmacion"),
            taxes: TaxSummary {
                total_transferred: zero.to_string(),
                total_withheld: zero.to_string(),
                transferred_by_tax: TaxTotals::starting_at(zero),
                withheld_by_tax: TaxTotals::starting_at(zero),
                ..Default::default()
            },
            complements: self.config.empty_char.clone(),
            addenda: self.config.empty_char.clone(),
            ..Default::default()
        }
    }

    fn issuer(&self, tag: &StartTag) -> Issuer {
        let f = Fields::new(tag, &self.config);
        Issuer {
            rfc: f.raw("Rfc"),
            name: f.compact_or_empty("Nombre"),
            tax_regime: f.raw("RegimenFiscal"),
            acquirer_attribute: f.compact_or_empty("FacAtrAdquirente"),
        }
    }

    fn recipient(&self, tag: &StartTag) -> Recipient {
        let f = Fields::new(tag, &self.config);
        Recipient {
            rfc: f.raw("Rfc"),
            name: f.compact_or_empty("Nombre"),
            tax_address: f.raw("DomicilioFiscalReceptor"),
            tax_residence: f.or_empty("ResidenciaFiscal"),
            tax_id_number: f.compact_or_empty("NumRegIdTrib"),
            tax_regime: f.raw("RegimenFiscalReceptor"),
            cfdi_use: f.raw("UsoCFDI"),
        }
    }

    fn related_cfdis(
        &self,
        cursor: &mut XmlCursor<'_>,
        group: &StartTag,
        related: &mut Vec<RelatedCfdi>,
    ) -> Result<()> {
        let relation_type = group.attr("TipoRelacion");
        while let Some(child) = cursor.next_child(group.local_name())? {
            if child.local_name() == "CfdiRelacionado" {
                related.push(RelatedCfdi {
                    uuid: Fields::new(&child, &self.config).upper("UUID"),
                    relation_type: relation_type.to_string(),
                });
            }
            cursor.skip(child.local_name())?;
        }
        Ok(())
    }

    fn concepts(&self, cursor: &mut XmlCursor<'_>, concepts: &mut Vec<Concept>) -> Result<()> {
        while let Some(child) = cursor.next_child("Conceptos")? {
            match child.local_name() {
                "Concepto" => concepts.push(self.concept(cursor, &child)?),
                other => cursor.skip(other)?,
            }
        }
        Ok(())
    }

    fn concept(&self, cursor: &mut XmlCursor<'_>, tag: &StartTag) -> Result<Concept> {
        let f = Fields::new(tag, &self.config);
        let mut concept = Concept {
            product_code: f.raw("ClaveProdServ"),
            identification_number: f.compact_or_empty("NoIdentificacion"),
            quantity: f.raw("Cantidad"),
            unit_code: f.raw("ClaveUnidad"),
            unit: f.compact_or_empty("Unidad"),
            description: f.compact("Descripcion"),
            unit_value: f.raw("ValorUnitario"),
            amount: f.raw("Importe"),
            discount: f.zero("Descuento"),
            tax_object: f.raw("ObjetoImp"),
            ..Default::default()
        };

        while let Some(child) = cursor.next_child("Concepto")? {
            match ConceptChild::of(&child) {
                ConceptChild::Taxes if self.config.decodes_concept_taxes() => {
                    self.tax_groups(
                        cursor,
                        child.local_name(),
                        &mut concept.transfers,
                        &mut concept.withholdings,
                    )?;
                }
                ConceptChild::ThirdParty => {
                    let f = Fields::new(&child, &self.config);
                    concept.third_party = Some(ThirdParty {
                        rfc: f.raw("RfcACuentaTerceros"),
                        name: f.compact_or_empty("NombreACuentaTerceros"),
                        tax_regime: f.raw("RegimenFiscalACuentaTerceros"),
                        tax_address: f.raw("DomicilioFiscalACuentaTerceros"),
                    });
                    cursor.skip(child.local_name())?;
                }
                _ => cursor.skip(child.local_name())?,
            }
        }

        Ok(concept)
    }

    fn tax_summary(&self, cursor: &mut XmlCursor<'_>, tag: &StartTag) -> Result<TaxSummary> {
        let f = Fields::new(tag, &self.config);
        let zero = self.config.empty_or_zero();
        let mut taxes = TaxSummary {
            total_transferred: f.zero("TotalImpuestosTrasladados"),
            total_withheld: f.zero("TotalImpuestosRetenidos"),
            transferred_by_tax: TaxTotals::starting_at(zero),
            withheld_by_tax: TaxTotals::starting_at(zero),
            ..Default::default()
        };

        self.tax_groups(
            cursor,
            tag.local_name(),
            &mut taxes.transfers,
            &mut taxes.withholdings,
        )?;

        for line in &taxes.transfers {
            taxes.transferred_by_tax.add(line);
        }
        for line in &taxes.withholdings {
            taxes.withheld_by_tax.add(line);
        }

        Ok(taxes)
    }

    /// Walk `Traslados/Traslado` and `Retenciones/Retencion` up to the
    /// closing tag of the enclosing `Impuestos`.
    fn tax_groups(
        &self,
        cursor: &mut XmlCursor<'_>,
        parent: &str,
        transfers: &mut Vec<TaxLine>,
        withholdings: &mut Vec<TaxLine>,
    ) -> Result<()> {
        while let Some(group) = cursor.next_child(parent)? {
            let (lines, item) = match TaxGroup::of(&group) {
                TaxGroup::Transfers => (&mut *transfers, "Traslado"),
                TaxGroup::Withholdings => (&mut *withholdings, "Retencion"),
                TaxGroup::Other => {
                    cursor.skip(group.local_name())?;
                    continue;
                }
            };

            while let Some(line) = cursor.next_child(group.local_name())? {
                if line.local_name() == item {
                    lines.push(self.tax_line(&line));
                }
                cursor.skip(line.local_name())?;
            }
        }
        Ok(())
    }

    fn tax_line(&self, tag: &StartTag) -> TaxLine {
        let f = Fields::new(tag, &self.config);
        TaxLine {
            base: f.zero("Base"),
            tax: f.compact_or_empty("Impuesto"),
            factor_type: f.compact_or_empty("TipoFactor"),
            rate_or_fee: f.zero("TasaOCuota"),
            amount: f.zero("Importe"),
        }
    }

    fn complement_section(
        &self,
        cursor: &mut XmlCursor<'_>,
        doc: &mut Cfdi40,
        names: &mut Vec<String>,
    ) -> Result<()> {
        while let Some(child) = cursor.next_child("Complemento")? {
            names.push(child.local_name().to_string());

            if !ComplementKind::of(&child).enabled(&self.config) {
                cursor.skip(child.local_name())?;
                continue;
            }
            let Some(decoder) = self.complements.decoder_for(&child, &self.config) else {
                cursor.skip(child.local_name())?;
                continue;
            };

            match decoder.decode(cursor, &child) {
                Ok(complement) => attach(doc, complement),
                Err(err) if err.is_version_mismatch() => {
                    tracing::debug!(
                        complement = %QualifiedName::of(&child),
                        error = %err,
                        "skipping complement"
                    );
                    cursor.skip(child.local_name())?;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }
}

impl DocumentHandler for Cfdi40Handler {
    type Output = Cfdi40;

    fn parse_from_text(&self, xml: &str) -> Result<Cfdi40> {
        let mut cursor = XmlCursor::new(xml);
        let root = cursor.root()?;
        if root.local_name() != ROOT {
            return Err(CfdiError::FormatRejected(format!(
                "expected <{ROOT}> root element, found <{}>",
                root.local_name()
            )));
        }
        let doc = self.decode(&mut cursor, &root)?;
        cursor.finish()?;
        Ok(doc)
    }
}

fn attach(doc: &mut Cfdi40, complement: Complement) {
    match complement {
        Complement::Tfd11(tfd) => doc.tfd11.push(tfd),
        Complement::Pagos20(pagos) => doc.pagos20.push(pagos),
        Complement::Nomina12(nomina) => doc.nomina12.push(nomina),
        Complement::VentaVehiculos11(sale) => doc.venta_vehiculos11.push(sale),
        Complement::Extension(ext) => doc.extensions.push(ext),
    }
}

impl TaxTotals {
    fn starting_at(value: &str) -> Self {
        Self {
            isr: value.to_string(),
            iva: value.to_string(),
            ieps: value.to_string(),
        }
    }

    fn add(&mut self, line: &TaxLine) {
        let slot = match line.tax.as_str() {
            ISR => &mut self.isr,
            IVA => &mut self.iva,
            IEPS => &mut self.ieps,
            _ => return,
        };
        *slot = sum_amounts(slot.as_str(), &line.amount);
    }
}

/// Direct children of `Comprobante`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RootChild {
    GlobalInformation,
    RelatedCfdis,
    Issuer,
    Recipient,
    Concepts,
    Taxes,
    Complements,
    Addenda,
    Other,
}

impl RootChild {
    fn of(tag: &StartTag) -> Self {
        match tag.local_name() {
            "InformacionGlobal" => Self::GlobalInformation,
            "CfdiRelacionados" => Self::RelatedCfdis,
            "Emisor" => Self::Issuer,
            "Receptor" => Self::Recipient,
            "Conceptos" => Self::Concepts,
            "Impuestos" => Self::Taxes,
            "Complemento" => Self::Complements,
            "Addenda" => Self::Addenda,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConceptChild {
    Taxes,
    ThirdParty,
    Other,
}

impl ConceptChild {
    fn of(tag: &StartTag) -> Self {
        match tag.local_name() {
            "Impuestos" => Self::Taxes,
            "ACuentaTerceros" => Self::ThirdParty,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaxGroup {
    Transfers,
    Withholdings,
    Other,
}

impl TaxGroup {
    fn of(tag: &StartTag) -> Self {
        match tag.local_name() {
            "Traslados" => Self::Transfers,
            "Retenciones" => Self::Withholdings,
            _ => Self::Other,
        }
    }
}

/// Built-in complements are classified by namespace as well as name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ComplementKind {
    Tfd11,
    Pagos20,
    Nomina12,
    VentaVehiculos11,
    Other,
}

impl ComplementKind {
    fn of(tag: &StartTag) -> Self {
        match (tag.namespace().unwrap_or_default(), tag.local_name()) {
            (TFD11_NAMESPACE, "TimbreFiscalDigital") => Self::Tfd11,
            (PAGOS20_NAMESPACE, "Pagos") => Self::Pagos20,
            (NOMINA12_NAMESPACE, "Nomina") => Self::Nomina12,
            (VENTA_VEHICULOS11_NAMESPACE, "VentaVehiculos") => Self::VentaVehiculos11,
            _ => Self::Other,
        }
    }

    fn enabled(self, config: &HandlerConfig) -> bool {
        match self {
            Self::Tfd11 | Self::Other => true,
            Self::Pagos20 => config.parse_pagos20,
            Self::Nomina12 => config.parse_nomina12,
            Self::VentaVehiculos11 => config.parse_venta_vehiculos11,
        }
    }
}
