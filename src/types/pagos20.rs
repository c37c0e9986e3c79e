use serde::{Deserialize, Serialize};

use super::TaxLine;

/// Complemento para recepción de pagos 2.0 (`pago20:Pagos`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagos20 {
    pub version: String,
    #[serde(rename = "totales")]
    pub totals: PaymentTotals,
    #[serde(rename = "pago")]
    pub payments: Vec<Payment>,
}

/// `pago20:Totales`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTotals {
    #[serde(rename = "total_retenciones_iva")]
    pub withheld_iva: String,
    #[serde(rename = "total_retenciones_isr")]
    pub withheld_isr: String,
    #[serde(rename = "total_retenciones_ieps")]
    pub withheld_ieps: String,
    #[serde(rename = "total_traslados_base_iva_16")]
    pub transferred_base_iva16: String,
    #[serde(rename = "total_traslados_impuesto_iva_16")]
    pub transferred_tax_iva16: String,
    #[serde(rename = "total_traslados_base_iva_8")]
    pub transferred_base_iva8: String,
    #[serde(rename = "total_traslados_impuesto_iva_8")]
    pub transferred_tax_iva8: String,
    #[serde(rename = "total_traslados_base_iva_0")]
    pub transferred_base_iva0: String,
    #[serde(rename = "total_traslados_impuesto_iva_0")]
    pub transferred_tax_iva0: String,
    #[serde(rename = "total_traslados_base_iva_exento")]
    pub transferred_base_iva_exempt: String,
    /// `MontoTotalPagos`.
    #[serde(rename = "monto_total_pagos")]
    pub total_payments: String,
}

/// `pago20:Pago`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// `FechaPago`.
    #[serde(rename = "fecha_pago")]
    pub date: String,
    /// `FormaDePagoP`.
    #[serde(rename = "forma_de_pago_p")]
    pub payment_form: String,
    /// `MonedaP`.
    #[serde(rename = "moneda_p")]
    pub currency: String,
    /// `TipoCambioP`.
    #[serde(rename = "tipo_cambio_p")]
    pub exchange_rate: String,
    /// `Monto`.
    #[serde(rename = "monto")]
    pub amount: String,
    #[serde(rename = "num_operacion")]
    pub operation_number: String,
    /// `RfcEmisorCtaOrd`.
    #[serde(rename = "rfc_emisor_cta_ord")]
    pub payer_bank_rfc: String,
    /// `NomBancoOrdExt`.
    #[serde(rename = "nom_banco_ord_ext")]
    pub foreign_bank_name: String,
    /// `CtaOrdenante`.
    #[serde(rename = "cta_ordenante")]
    pub payer_account: String,
    /// `RfcEmisorCtaBen`.
    #[serde(rename = "rfc_emisor_cta_ben")]
    pub beneficiary_bank_rfc: String,
    /// `CtaBeneficiario`.
    #[serde(rename = "cta_beneficiario")]
    pub beneficiary_account: String,
    /// `TipoCadPago`.
    #[serde(rename = "tipo_cad_pago")]
    pub chain_type: String,
    #[serde(rename = "cert_pago")]
    pub payment_certificate: String,
    #[serde(rename = "cad_pago")]
    pub payment_chain: String,
    #[serde(rename = "sello_pago")]
    pub payment_seal: String,
    #[serde(rename = "docto_relacionado")]
    pub related_documents: Vec<PaymentRelatedDocument>,
    #[serde(rename = "impuestos_p")]
    pub taxes: Vec<PaymentTaxes>,
}

/// `pago20:DoctoRelacionado`, an invoice settled (in part) by the payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRelatedDocument {
    /// `IdDocumento`, the UUID of the paid invoice, upper-cased.
    #[serde(rename = "id_documento")]
    pub document_id: String,
    #[serde(rename = "serie")]
    pub series: String,
    pub folio: String,
    /// `MonedaDR`.
    #[serde(rename = "moneda_dr")]
    pub currency: String,
    /// `EquivalenciaDR`.
    #[serde(rename = "equivalencia_dr")]
    pub equivalence: String,
    /// `NumParcialidad`.
    #[serde(rename = "num_parcialidad")]
    pub installment: String,
    /// `ImpSaldoAnt`.
    #[serde(rename = "imp_saldo_ant")]
    pub previous_balance: String,
    /// `ImpPagado`.
    #[serde(rename = "imp_pagado")]
    pub amount_paid: String,
    /// `ImpSaldoInsoluto`.
    #[serde(rename = "imp_saldo_insoluto")]
    pub outstanding_balance: String,
    /// `ObjetoImpDR`.
    #[serde(rename = "objecto_imp_dr")]
    pub tax_object: String,
    #[serde(rename = "impuestos_dr")]
    pub taxes: Vec<RelatedDocumentTaxes>,
}

/// `pago20:ImpuestosDR`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedDocumentTaxes {
    #[serde(rename = "retenciones_dr")]
    pub withholdings: Vec<RelatedDocumentTaxLine>,
    #[serde(rename = "traslados_dr")]
    pub transfers: Vec<RelatedDocumentTaxLine>,
}

/// `pago20:ImpuestosP`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTaxes {
    #[serde(rename = "retenciones_p")]
    pub withholdings: Vec<PaymentTaxLine>,
    #[serde(rename = "traslados_p")]
    pub transfers: Vec<PaymentTaxLine>,
}

/// `RetencionDR` or `TrasladoDR`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedDocumentTaxLine {
    #[serde(rename = "base_dr")]
    pub base: String,
    #[serde(rename = "impuesto_dr")]
    pub tax: String,
    #[serde(rename = "tipo_factor_dr")]
    pub factor_type: String,
    #[serde(rename = "tasa_o_cuota_dr")]
    pub rate_or_fee: String,
    #[serde(rename = "importe_dr")]
    pub amount: String,
}

impl From<TaxLine> for RelatedDocumentTaxLine {
    fn from(line: TaxLine) -> Self {
        Self {
            base: line.base,
            tax: line.tax,
            factor_type: line.factor_type,
            rate_or_fee: line.rate_or_fee,
            amount: line.amount,
        }
    }
}

/// `RetencionP` or `TrasladoP`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTaxLine {
    #[serde(rename = "base_p")]
    pub base: String,
    #[serde(rename = "impuesto_p")]
    pub tax: String,
    #[serde(rename = "tipo_factor_p")]
    pub factor_type: String,
    #[serde(rename = "tasa_o_cuota_p")]
    pub rate_or_fee: String,
    #[serde(rename = "importe_p")]
    pub amount: String,
}

impl From<TaxLine> for PaymentTaxLine {
    fn from(line: TaxLine) -> Self {
        Self {
            base: line.base,
            tax: line.tax,
            factor_type: line.factor_type,
            rate_or_fee: line.rate_or_fee,
            amount: line.amount,
        }
    }
}
