use crate::core::{HandlerConfig, Result};
use crate::types::{
    BalanceCompensation, Complement, Deduction, Deductions, Disability, EmploymentSubsidy,
    Nomina12, OtherPayment, Overtime, PayrollEmitter, PayrollReceiver, Perception, Perceptions,
    Retirement, Severance, SncfEntity, StockOptions, Subcontracting,
};
use crate::xml::{StartTag, XmlCursor};

use super::fields::{Fields, VersionMatch, check_version};
use super::{ComplementDecoder, DocumentHandler, decode_first};

const ELEMENT: &str = "Nomina";
const VERSION: &str = "1.2";

/// Decoder for the Nómina 1.2 payroll complement.
#[derive(Debug, Clone, Default)]
pub struct Nomina12Handler {
    config: HandlerConfig,
}

impl Nomina12Handler {
    pub fn new(config: HandlerConfig) -> Self {
        Self { config }
    }

    /// Decode a `Nomina` element the cursor has just opened.
    pub fn decode_element(&self, cursor: &mut XmlCursor<'_>, start: &StartTag) -> Result<Nomina12> {
        let version = check_version(start, ELEMENT, VERSION, VersionMatch::Trimmed)?;
        let f = Fields::new(start, &self.config);
        let mut nomina = Nomina12 {
            version,
            payroll_type: f.raw("TipoNomina"),
            payment_date: f.raw("FechaPago"),
            initial_payment_date: f.raw("FechaInicialPago"),
            final_payment_date: f.raw("FechaFinalPago"),
            days_paid: f.zero("NumDiasPagados"),
            total_perceptions: f.zero("TotalPercepciones"),
            total_deductions: f.zero("TotalDeducciones"),
            total_other_payments: f.zero("TotalOtrosPagos"),
            ..Default::default()
        };

        while let Some(child) = cursor.next_child(ELEMENT)? {
            match child.local_name() {
                "Emisor" => nomina.emitter = Some(self.emitter(cursor, &child)?),
                "Receptor" => nomina.receiver = self.receiver(cursor, &child)?,
                "Percepciones" => nomina.perceptions = self.perceptions(cursor, &child)?,
                "Deducciones" => nomina.deductions = self.deductions(cursor, &child)?,
                "OtrosPagos" => {
                    while let Some(item) = cursor.next_child("OtrosPagos")? {
                        match item.local_name() {
                            "OtroPago" => nomina
                                .other_payments
                                .push(self.other_payment(cursor, &item)?),
                            other => cursor.skip(other)?,
                        }
                    }
                }
                "Incapacidades" => {
                    while let Some(item) = cursor.next_child("Incapacidades")? {
                        if item.local_name() == "Incapacidad" {
                            let f = Fields::new(&item, &self.config);
                            nomina.disabilities.push(Disability {
                                days: f.zero("DiasIncapacidad"),
                                disability_type: f.raw("TipoIncapacidad"),
                                amount: f.zero("ImporteMonetario"),
                            });
                        }
                        cursor.skip(item.local_name())?;
                    }
                }
                other => cursor.skip(other)?,
            }
        }

        Ok(nomina)
    }

    pub fn factory(config: &HandlerConfig) -> Box<dyn ComplementDecoder> {
        Box::new(Self::new(config.clone()))
    }

    fn emitter(&self, cursor: &mut XmlCursor<'_>, tag: &StartTag) -> Result<PayrollEmitter> {
        let f = Fields::new(tag, &self.config);
        let mut emitter = PayrollEmitter {
            curp: f.raw("Curp"),
            employer_registration: f.compact_or_empty("RegistroPatronal"),
            origin_employer_rfc: f.or_empty("RfcPatronOrigen"),
            sncf_entity: None,
        };

        while let Some(child) = cursor.next_child("Emisor")? {
            if child.local_name() == "EntidadSNCF" {
                let f = Fields::new(&child, &self.config);
                emitter.sncf_entity = Some(SncfEntity {
                    resource_origin: f.raw("OrigenRecurso"),
                    own_resource_amount: f.zero("MontoRecursoPropio"),
                });
            }
            cursor.skip(child.local_name())?;
        }

        Ok(emitter)
    }

    fn receiver(&self, cursor: &mut XmlCursor<'_>, tag: &StartTag) -> Result<PayrollReceiver> {
        let f = Fields::new(tag, &self.config);
        let mut receiver = PayrollReceiver {
            curp: f.raw("Curp"),
            social_security_number: f.or_empty("NumSeguridadSocial"),
            employment_start_date: f.or_empty("FechaInicioRelLaboral"),
            seniority: f.or_empty("Antigüedad"),
            contract_type: f.raw("TipoContrato"),
            unionized: f.or_empty("Sindicalizado"),
            workday_type: f.or_empty("TipoJornada"),
            regime_type: f.raw("TipoRegimen"),
            employee_number: f.compact("NumEmpleado"),
            department: f.compact_or_empty("Departamento"),
            position: f.compact_or_empty("Puesto"),
            position_risk: f.or_empty("RiesgoPuesto"),
            payment_frequency: f.raw("PeriodicidadPago"),
            bank: f.or_empty("Banco"),
            bank_account: f.or_empty("CuentaBancaria"),
            base_salary: f.zero("SalarioBaseCotApor"),
            integrated_daily_salary: f.zero("SalarioDiarioIntegrado"),
            federal_entity: f.raw("ClaveEntFed"),
            subcontracting: Vec::new(),
        };

        while let Some(child) = cursor.next_child("Receptor")? {
            if child.local_name() == "SubContratacion" {
                let f = Fields::new(&child, &self.config);
                receiver.subcontracting.push(Subcontracting {
                    rfc: f.raw("RfcLabora"),
                    time_percentage: f.zero("PorcentajeTiempo"),
                });
            }
            cursor.skip(child.local_name())?;
        }

        Ok(receiver)
    }

    fn perceptions(&self, cursor: &mut XmlCursor<'_>, tag: &StartTag) -> Result<Perceptions> {
        let f = Fields::new(tag, &self.config);
        let mut perceptions = Perceptions {
            total_salaries: f.zero("TotalSueldos"),
            total_severance: f.zero("TotalSeparacionIndemnizacion"),
            total_retirement: f.zero("TotalJubilacionPensionRetiro"),
            total_taxed: f.zero("TotalGravado"),
            total_exempt: f.zero("TotalExento"),
            ..Default::default()
        };

        while let Some(child) = cursor.next_child("Percepciones")? {
            let f = Fields::new(&child, &self.config);
            match child.local_name() {
                "Percepcion" => perceptions.items.push(self.perception(cursor, &child)?),
                "JubilacionPensionRetiro" => {
                    perceptions.retirement = Some(Retirement {
                        single_payment_total: f.zero("TotalUnaExhibicion"),
                        installment_total: f.zero("TotalParcialidad"),
                        daily_amount: f.zero("MontoDiario"),
                        cumulative_income: f.zero("IngresoAcumulable"),
                        non_cumulative_income: f.zero("IngresoNoAcumulable"),
                    });
                    cursor.skip("JubilacionPensionRetiro")?;
                }
                "SeparacionIndemnizacion" => {
                    perceptions.severance = Some(Severance {
                        total_paid: f.zero("TotalPagado"),
                        years_of_service: f.zero("NumAñosServicio"),
                        last_monthly_salary: f.zero("UltimoSueldoMensOrd"),
                        cumulative_income: f.zero("IngresoAcumulable"),
                        non_cumulative_income: f.zero("IngresoNoAcumulable"),
                    });
                    cursor.skip("SeparacionIndemnizacion")?;
                }
                other => cursor.skip(other)?,
            }
        }

        Ok(perceptions)
    }

    fn perception(&self, cursor: &mut XmlCursor<'_>, tag: &StartTag) -> Result<Perception> {
        let f = Fields::new(tag, &self.config);
        let mut perception = Perception {
            perception_type: f.raw("TipoPercepcion"),
            code: f.raw("Clave"),
            concept: f.compact("Concepto"),
            taxed_amount: f.zero("ImporteGravado"),
            exempt_amount: f.zero("ImporteExento"),
            stock_options: None,
            overtime: Vec::new(),
        };

        while let Some(child) = cursor.next_child("Percepcion")? {
            let f = Fields::new(&child, &self.config);
            match child.local_name() {
                "AccionesOTitulos" => {
                    perception.stock_options = Some(StockOptions {
                        market_value: f.zero("ValorMercado"),
                        grant_price: f.zero("PrecioAlOtorgarse"),
                    });
                }
                "HorasExtra" => perception.overtime.push(Overtime {
                    days: f.zero("Dias"),
                    hours_type: f.raw("TipoHoras"),
                    hours: f.zero("HorasExtra"),
                    amount_paid: f.zero("ImportePagado"),
                }),
                _ => {}
            }
            cursor.skip(child.local_name())?;
        }

        Ok(perception)
    }

    fn deductions(&self, cursor: &mut XmlCursor<'_>, tag: &StartTag) -> Result<Deductions> {
        let f = Fields::new(tag, &self.config);
        let mut deductions = Deductions {
            total_other_deductions: f.zero("TotalOtrasDeducciones"),
            total_taxes_withheld: f.zero("TotalImpuestosRetenidos"),
            items: Vec::new(),
        };

        while let Some(child) = cursor.next_child("Deducciones")? {
            if child.local_name() == "Deduccion" {
                let f = Fields::new(&child, &self.config);
                deductions.items.push(Deduction {
                    deduction_type: f.raw("TipoDeduccion"),
                    code: f.raw("Clave"),
                    concept: f.compact("Concepto"),
                    amount: f.zero("Importe"),
                });
            }
            cursor.skip(child.local_name())?;
        }

        Ok(deductions)
    }

    fn other_payment(&self, cursor: &mut XmlCursor<'_>, tag: &StartTag) -> Result<OtherPayment> {
        let f = Fields::new(tag, &self.config);
        let mut payment = OtherPayment {
            other_payment_type: f.raw("TipoOtroPago"),
            code: f.raw("Clave"),
            concept: f.compact("Concepto"),
            amount: f.zero("Importe"),
            employment_subsidy: None,
            balance_compensation: None,
        };

        while let Some(child) = cursor.next_child("OtroPago")? {
            let f = Fields::new(&child, &self.config);
            match child.local_name() {
                "SubsidioAlEmpleo" => {
                    payment.employment_subsidy = Some(EmploymentSubsidy {
                        subsidy_caused: f.zero("SubsidioCausado"),
                    });
                }
                "CompensacionSaldosAFavor" => {
                    payment.balance_compensation = Some(BalanceCompensation {
                        favorable_balance: f.zero("SaldoAFavor"),
                        year: f.raw("Año"),
                        remaining_balance: f.zero("RemanenteSalFav"),
                    });
                }
                _ => {}
            }
            cursor.skip(child.local_name())?;
        }

        Ok(payment)
    }
}

impl DocumentHandler for Nomina12Handler {
    type Output = Nomina12;

    fn parse_from_text(&self, xml: &str) -> Result<Nomina12> {
        decode_first(xml, ELEMENT, |cursor, start| self.decode_element(cursor, start))
    }
}

impl ComplementDecoder for Nomina12Handler {
    fn decode(&self, cursor: &mut XmlCursor<'_>, start: &StartTag) -> Result<Complement> {
        self.decode_element(cursor, start).map(Complement::Nomina12)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CfdiError;

    #[test]
    fn accented_attribute_names() {
        let xml = r#"<nomina12:Nomina xmlns:nomina12="http://www.sat.gob.mx/nomina12" Version="1.2" TipoNomina="E" FechaPago="2016-10-15" FechaInicialPago="2016-10-01" FechaFinalPago="2016-10-15" NumDiasPagados="15">
  <nomina12:Receptor Curp="XEXX010101HNEXXXA4" Antigüedad="P3Y2M23D" TipoContrato="01" TipoRegimen="02" NumEmpleado="120" PeriodicidadPago="04" ClaveEntFed="JAL"/>
  <nomina12:Percepciones TotalGravado="500.00" TotalExento="0">
    <nomina12:SeparacionIndemnizacion TotalPagado="500.00" NumAñosServicio="3" UltimoSueldoMensOrd="9000.00" IngresoAcumulable="500.00" IngresoNoAcumulable="0"/>
  </nomina12:Percepciones>
  <nomina12:OtrosPagos>
    <nomina12:OtroPago TipoOtroPago="004" Clave="004" Concepto="Compensacion" Importe="10.00">
      <nomina12:CompensacionSaldosAFavor SaldoAFavor="100.00" Año="2015" RemanenteSalFav="90.00"/>
    </nomina12:OtroPago>
  </nomina12:OtrosPagos>
</nomina12:Nomina>"#;

        let nomina = Nomina12Handler::default().parse_from_text(xml).unwrap();
        assert_eq!(nomina.receiver.seniority, "P3Y2M23D");
        assert!(nomina.emitter.is_none());
        let severance = nomina.perceptions.severance.unwrap();
        assert_eq!(severance.years_of_service, "3");
        let compensation = nomina.other_payments[0].balance_compensation.as_ref().unwrap();
        assert_eq!(compensation.year, "2015");
        assert!(nomina.disabilities.is_empty());
    }

    #[test]
    fn payroll_version_checked() {
        let xml = r#"<nomina12:Nomina xmlns:nomina12="http://www.sat.gob.mx/nomina12" Version="1.1"/>"#;
        let err = Nomina12Handler::default().parse_from_text(xml).unwrap_err();
        assert!(matches!(err, CfdiError::SchemaVersionMismatch { expected: "1.2", .. }));
    }
}
