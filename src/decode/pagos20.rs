use crate::core::{HandlerConfig, Result};
use crate::types::{
    Complement, Pagos20, Payment, PaymentRelatedDocument, PaymentTaxes, PaymentTotals,
    RelatedDocumentTaxes, TaxLine,
};
use crate::xml::{StartTag, XmlCursor};

use super::fields::{Fields, VersionMatch, check_version};
use super::{ComplementDecoder, DocumentHandler, decode_first};

const ELEMENT: &str = "Pagos";
const VERSION: &str = "2.0";

/// Decoder for the Pagos 2.0 payment-receipt complement.
#[derive(Debug, Clone, Default)]
pub struct Pagos20Handler {
    config: HandlerConfig,
}

impl Pagos20Handler {
    pub fn new(config: HandlerConfig) -> Self {
        Self { config }
    }

    /// Decode a `Pagos` element the cursor has just opened.
    pub fn decode_element(&self, cursor: &mut XmlCursor<'_>, start: &StartTag) -> Result<Pagos20> {
        let version = check_version(start, ELEMENT, VERSION, VersionMatch::Trimmed)?;
        let mut pagos = Pagos20 {
            version,
            ..Default::default()
        };

        while let Some(child) = cursor.next_child(ELEMENT)? {
            match child.local_name() {
                "Totales" => {
                    pagos.totals = self.totals(&child);
                    cursor.skip("Totales")?;
                }
                "Pago" => pagos.payments.push(self.payment(cursor, &child)?),
                other => cursor.skip(other)?,
            }
        }

        Ok(pagos)
    }

    pub fn factory(config: &HandlerConfig) -> Box<dyn ComplementDecoder> {
        Box::new(Self::new(config.clone()))
    }

    fn totals(&self, tag: &StartTag) -> PaymentTotals {
        let f = Fields::new(tag, &self.config);
        PaymentTotals {
            withheld_iva: f.zero("TotalRetencionesIVA"),
            withheld_isr: f.zero("TotalRetencionesISR"),
            withheld_ieps: f.zero("TotalRetencionesIEPS"),
            transferred_base_iva16: f.zero("TotalTrasladosBaseIVA16"),
            transferred_tax_iva16: f.zero("TotalTrasladosImpuestoIVA16"),
            transferred_base_iva8: f.zero("TotalTrasladosBaseIVA8"),
            transferred_tax_iva8: f.zero("TotalTrasladosImpuestoIVA8"),
            transferred_base_iva0: f.zero("TotalTrasladosBaseIVA0"),
            transferred_tax_iva0: f.zero("TotalTrasladosImpuestoIVA0"),
            transferred_base_iva_exempt: f.zero("TotalTrasladosBaseIVAExento"),
            total_payments: f.zero("MontoTotalPagos"),
        }
    }

    fn payment(&self, cursor: &mut XmlCursor<'_>, tag: &StartTag) -> Result<Payment> {
        let f = Fields::new(tag, &self.config);
        let mut payment = Payment {
            date: f.raw("FechaPago"),
            payment_form: f.raw("FormaDePagoP"),
            currency: f.raw("MonedaP"),
            exchange_rate: f.one("TipoCambioP"),
            amount: f.raw("Monto"),
            operation_number: f.compact_or_empty("NumOperacion"),
            payer_bank_rfc: f.or_empty("RfcEmisorCtaOrd"),
            foreign_bank_name: f.compact_or_empty("NomBancoOrdExt"),
            payer_account: f.or_empty("CtaOrdenante"),
            beneficiary_bank_rfc: f.or_empty("RfcEmisorCtaBen"),
            beneficiary_account: f.or_empty("CtaBeneficiario"),
            chain_type: f.or_empty("TipoCadPago"),
            payment_certificate: f.compact_or_empty("CertPago"),
            payment_chain: f.compact_or_empty("CadPago"),
            payment_seal: f.compact_or_empty("SelloPago"),
            related_documents: Vec::new(),
            taxes: Vec::new(),
        };

        while let Some(child) = cursor.next_child("Pago")? {
            match child.local_name() {
                "DoctoRelacionado" => payment
                    .related_documents
                    .push(self.related_document(cursor, &child)?),
                "ImpuestosP" => payment.taxes.push(self.payment_taxes(cursor)?),
                other => cursor.skip(other)?,
            }
        }

        Ok(payment)
    }

    fn related_document(
        &self,
        cursor: &mut XmlCursor<'_>,
        tag: &StartTag,
    ) -> Result<PaymentRelatedDocument> {
        let f = Fields::new(tag, &self.config);
        let mut document = PaymentRelatedDocument {
            document_id: f.upper("IdDocumento"),
            series: f.compact_or_empty("Serie"),
            folio: f.compact_or_empty("Folio"),
            currency: f.raw("MonedaDR"),
            equivalence: f.one("EquivalenciaDR"),
            installment: f.or_empty("NumParcialidad"),
            previous_balance: f.zero("ImpSaldoAnt"),
            amount_paid: f.zero("ImpPagado"),
            outstanding_balance: f.zero("ImpSaldoInsoluto"),
            tax_object: f.raw("ObjetoImpDR"),
            taxes: Vec::new(),
        };

        while let Some(child) = cursor.next_child("DoctoRelacionado")? {
            match child.local_name() {
                "ImpuestosDR" => {
                    let (withholdings, transfers) = self.tax_groups(
                        cursor,
                        "ImpuestosDR",
                        TaxSuffix::RelatedDocument,
                    )?;
                    document.taxes.push(RelatedDocumentTaxes {
                        withholdings,
                        transfers,
                    });
                }
                other => cursor.skip(other)?,
            }
        }

        Ok(document)
    }

    fn payment_taxes(&self, cursor: &mut XmlCursor<'_>) -> Result<PaymentTaxes> {
        let (withholdings, transfers) = self.tax_groups(cursor, "ImpuestosP", TaxSuffix::Payment)?;
        Ok(PaymentTaxes {
            withholdings,
            transfers,
        })
    }

    /// Walk `RetencionesX/RetencionX` and `TrasladosX/TrasladoX` below an
    /// `ImpuestosX` element, returning (withholdings, transfers).
    fn tax_groups<L: From<TaxLine>>(
        &self,
        cursor: &mut XmlCursor<'_>,
        parent: &str,
        suffix: TaxSuffix,
    ) -> Result<(Vec<L>, Vec<L>)> {
        let mut withholdings = Vec::new();
        let mut transfers = Vec::new();

        while let Some(group) = cursor.next_child(parent)? {
            let group_name = group.local_name().to_string();
            let target = if group_name == suffix.name("Retenciones") {
                Some((&mut withholdings, suffix.name("Retencion")))
            } else if group_name == suffix.name("Traslados") {
                Some((&mut transfers, suffix.name("Traslado")))
            } else {
                None
            };

            let Some((lines, item)) = target else {
                cursor.skip(&group_name)?;
                continue;
            };

            while let Some(line) = cursor.next_child(&group_name)? {
                if line.local_name() == item {
                    lines.push(self.tax_line(&line, suffix).into());
                }
                cursor.skip(line.local_name())?;
            }
        }

        Ok((withholdings, transfers))
    }

    fn tax_line(&self, tag: &StartTag, suffix: TaxSuffix) -> TaxLine {
        let f = Fields::new(tag, &self.config);
        TaxLine {
            base: f.raw(&suffix.name("Base")),
            tax: f.raw(&suffix.name("Impuesto")),
            factor_type: f.raw(&suffix.name("TipoFactor")),
            rate_or_fee: f.zero(&suffix.name("TasaOCuota")),
            amount: f.zero(&suffix.name("Importe")),
        }
    }
}

/// Pagos 2.0 spells the same tax attributes with a per-level suffix:
/// `ImpuestoDR` on related documents, `ImpuestoP` on the payment.
#[derive(Debug, Clone, Copy)]
enum TaxSuffix {
    RelatedDocument,
    Payment,
}

impl TaxSuffix {
    fn name(self, stem: &str) -> String {
        match self {
            TaxSuffix::RelatedDocument => format!("{stem}DR"),
            TaxSuffix::Payment => format!("{stem}P"),
        }
    }
}

impl DocumentHandler for Pagos20Handler {
    type Output = Pagos20;

    fn parse_from_text(&self, xml: &str) -> Result<Pagos20> {
        decode_first(xml, ELEMENT, |cursor, start| self.decode_element(cursor, start))
    }
}

impl ComplementDecoder for Pagos20Handler {
    fn decode(&self, cursor: &mut XmlCursor<'_>, start: &StartTag) -> Result<Complement> {
        self.decode_element(cursor, start).map(Complement::Pagos20)
    }
}
