use serde::{Deserialize, Serialize};

/// Complemento de nómina 1.2 (`nomina12:Nomina`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nomina12 {
    pub version: String,
    /// `TipoNomina`: `O` ordinary, `E` extraordinary.
    #[serde(rename = "tipo_nomina")]
    pub payroll_type: String,
    #[serde(rename = "fecha_pago")]
    pub payment_date: String,
    #[serde(rename = "fecha_inicial_pago")]
    pub initial_payment_date: String,
    #[serde(rename = "fecha_final_pago")]
    pub final_payment_date: String,
    #[serde(rename = "num_dias_pagados")]
    pub days_paid: String,
    #[serde(rename = "total_percepciones")]
    pub total_perceptions: String,
    #[serde(rename = "total_deducciones")]
    pub total_deductions: String,
    #[serde(rename = "total_otros_pagos")]
    pub total_other_payments: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "emisor")]
    pub emitter: Option<PayrollEmitter>,
    #[serde(rename = "receptor")]
    pub receiver: PayrollReceiver,
    #[serde(rename = "percepciones")]
    pub perceptions: Perceptions,
    #[serde(rename = "deducciones")]
    pub deductions: Deductions,
    #[serde(rename = "otros_pagos")]
    pub other_payments: Vec<OtherPayment>,
    #[serde(rename = "incapacidades")]
    pub disabilities: Vec<Disability>,
}

/// `nomina12:Emisor`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollEmitter {
    pub curp: String,
    /// `RegistroPatronal`.
    #[serde(rename = "registro_patronal")]
    pub employer_registration: String,
    /// `RfcPatronOrigen`.
    #[serde(rename = "rfc_patron_origen")]
    pub origin_employer_rfc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "entidad_sncf")]
    pub sncf_entity: Option<SncfEntity>,
}

/// `nomina12:EntidadSNCF`, for federal entities paying from their own resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SncfEntity {
    /// `OrigenRecurso`: `IP`, `IF` or `IM`.
    #[serde(rename = "origen_recurso")]
    pub resource_origin: String,
    #[serde(rename = "monto_recurso_propio")]
    pub own_resource_amount: String,
}

/// `nomina12:Receptor`, the employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollReceiver {
    pub curp: String,
    #[serde(rename = "num_seguridad_social")]
    pub social_security_number: String,
    #[serde(rename = "fecha_inicia_rel_laboral")]
    pub employment_start_date: String,
    /// `Antigüedad`, an ISO 8601 duration.
    #[serde(rename = "antigüedad")]
    pub seniority: String,
    #[serde(rename = "tipo_contrato")]
    pub contract_type: String,
    #[serde(rename = "sindicalizado")]
    pub unionized: String,
    #[serde(rename = "tipo_jornada")]
    pub workday_type: String,
    #[serde(rename = "tipo_regimen")]
    pub regime_type: String,
    #[serde(rename = "num_empleado")]
    pub employee_number: String,
    #[serde(rename = "departamento")]
    pub department: String,
    #[serde(rename = "puesto")]
    pub position: String,
    #[serde(rename = "riesgo_puesto")]
    pub position_risk: String,
    #[serde(rename = "periodicidad_pago")]
    pub payment_frequency: String,
    #[serde(rename = "banco")]
    pub bank: String,
    #[serde(rename = "cuenta_bancaria")]
    pub bank_account: String,
    /// `SalarioBaseCotApor`.
    #[serde(rename = "salario_base_cot_apor")]
    pub base_salary: String,
    /// `SalarioDiarioIntegrado`.
    #[serde(rename = "salario_diario_integrado")]
    pub integrated_daily_salary: String,
    /// `ClaveEntFed`.
    #[serde(rename = "clave_ent_fed")]
    pub federal_entity: String,
    #[serde(rename = "subcontratacion")]
    pub subcontracting: Vec<Subcontracting>,
}

/// `nomina12:SubContratacion`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcontracting {
    #[serde(rename = "rfc_labora")]
    pub rfc: String,
    #[serde(rename = "porcentaje_tiempo")]
    pub time_percentage: String,
}

/// `nomina12:Percepciones`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Perceptions {
    #[serde(rename = "total_sueldos")]
    pub total_salaries: String,
    #[serde(rename = "total_separacion_indemnizacion")]
    pub total_severance: String,
    #[serde(rename = "total_jubilacion_pension_retiro")]
    pub total_retirement: String,
    #[serde(rename = "total_gravado")]
    pub total_taxed: String,
    #[serde(rename = "total_exento")]
    pub total_exempt: String,
    #[serde(rename = "percepcion")]
    pub items: Vec<Perception>,
    /// `JubilacionPensionRetiro`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "jubilacion_pension_retiro")]
    pub retirement: Option<Retirement>,
    /// `SeparacionIndemnizacion`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "separacion_indemnizacion")]
    pub severance: Option<Severance>,
}

/// `nomina12:Percepcion`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Perception {
    #[serde(rename = "tipo_percepcion")]
    pub perception_type: String,
    #[serde(rename = "clave")]
    pub code: String,
    #[serde(rename = "concepto")]
    pub concept: String,
    #[serde(rename = "importe_gravado")]
    pub taxed_amount: String,
    #[serde(rename = "importe_exento")]
    pub exempt_amount: String,
    /// `AccionesOTitulos`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "acciones_o_titulos")]
    pub stock_options: Option<StockOptions>,
    /// `HorasExtra`.
    #[serde(rename = "horas_extra")]
    pub overtime: Vec<Overtime>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockOptions {
    #[serde(rename = "valor_mercado")]
    pub market_value: String,
    #[serde(rename = "precio_al_otorgarse")]
    pub grant_price: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overtime {
    #[serde(rename = "dias")]
    pub days: String,
    /// `TipoHoras`: `Dobles` or `Triples`.
    #[serde(rename = "tipo_horas")]
    pub hours_type: String,
    #[serde(rename = "horas_extra")]
    pub hours: String,
    #[serde(rename = "importe_pagado")]
    pub amount_paid: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retirement {
    #[serde(rename = "total_una_exhibicion")]
    pub single_payment_total: String,
    #[serde(rename = "total_parcialidad")]
    pub installment_total: String,
    #[serde(rename = "monto_diario")]
    pub daily_amount: String,
    #[serde(rename = "ingreso_acumulable")]
    pub cumulative_income: String,
    #[serde(rename = "ingreso_no_acumulable")]
    pub non_cumulative_income: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Severance {
    #[serde(rename = "total_pagado")]
    pub total_paid: String,
    /// `NumAñosServicio`.
    #[serde(rename = "num_años_servicio")]
    pub years_of_service: String,
    #[serde(rename = "ultimo_sueldo_mens_ord")]
    pub last_monthly_salary: String,
    #[serde(rename = "ingreso_acumulable")]
    pub cumulative_income: String,
    #[serde(rename = "ingreso_no_acumulable")]
    pub non_cumulative_income: String,
}

/// `nomina12:Deducciones`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    #[serde(rename = "total_otras_deducciones")]
    pub total_other_deductions: String,
    #[serde(rename = "total_impuestos_retenidos")]
    pub total_taxes_withheld: String,
    #[serde(rename = "deduccion")]
    pub items: Vec<Deduction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    #[serde(rename = "tipo_deduccion")]
    pub deduction_type: String,
    #[serde(rename = "clave")]
    pub code: String,
    #[serde(rename = "concepto")]
    pub concept: String,
    #[serde(rename = "importe")]
    pub amount: String,
}

/// `nomina12:OtroPago`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherPayment {
    #[serde(rename = "tipo_otro_pago")]
    pub other_payment_type: String,
    #[serde(rename = "clave")]
    pub code: String,
    #[serde(rename = "concepto")]
    pub concept: String,
    #[serde(rename = "importe")]
    pub amount: String,
    /// `SubsidioAlEmpleo`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "subsidio_al_empleo")]
    pub employment_subsidy: Option<EmploymentSubsidy>,
    /// `CompensacionSaldosAFavor`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "compensacion_saldos_a_favor")]
    pub balance_compensation: Option<BalanceCompensation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentSubsidy {
    #[serde(rename = "subsidio_causado")]
    pub subsidy_caused: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceCompensation {
    #[serde(rename = "saldo_a_favor")]
    pub favorable_balance: String,
    /// `Año`.
    #[serde(rename = "año")]
    pub year: String,
    #[serde(rename = "remanente_sal_fav")]
    pub remaining_balance: String,
}

/// `nomina12:Incapacidad`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disability {
    #[serde(rename = "dias_incapacidad")]
    pub days: String,
    #[serde(rename = "tipo_incapacidad")]
    pub disability_type: String,
    #[serde(rename = "importe_monetario")]
    pub amount: String,
}
