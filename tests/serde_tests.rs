//! Serialization of decoded records and configuration.

use cfdi_transform::*;
use pretty_assertions::assert_eq;

const PAGOS: &str = include_str!("fixtures/cfdi40_pagos.xml");
const NOMINA: &str = include_str!("fixtures/cfdi40_nomina.xml");

#[test]
fn decoded_document_survives_json() {
    let cfdi = Cfdi40Handler::default()
        .use_concepts_with_taxes()
        .use_pagos20()
        .parse_from_text(PAGOS)
        .unwrap();

    let json = serde_json::to_string(&cfdi).unwrap();
    let back: Cfdi40 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cfdi);
}

#[test]
fn absent_optional_records_are_omitted() {
    let cfdi = Cfdi40Handler::default().parse_from_text(PAGOS).unwrap();
    let value = serde_json::to_value(&cfdi).unwrap();

    assert!(value.get("informacion_global").is_none());
    assert_eq!(value["emisor"]["rfc"], "TEST010203001");
    assert_eq!(value["tipo_comprobante"], "P");
    assert_eq!(value["tfd11"][0]["uuid"], "0D6B1C9E-7A1F-4B55-9C3E-2F6A8B4D1E70");
    assert_eq!(value["tfd11"][0]["rfc_prov_cert"], "SAT970701NN3");
}

#[test]
fn payment_keys_carry_level_suffixes() {
    let cfdi = Cfdi40Handler::default()
        .use_pagos20()
        .parse_from_text(PAGOS)
        .unwrap();
    let value = serde_json::to_value(&cfdi.pagos20[0]).unwrap();

    assert_eq!(value["totales"]["monto_total_pagos"], "1160.00");
    assert_eq!(value["totales"]["total_traslados_base_iva_16"], "1000.00");
    let payment = &value["pago"][0];
    assert_eq!(payment["forma_de_pago_p"], "03");
    assert_eq!(payment["monto"], "1160.00");

    let document = &payment["docto_relacionado"][0];
    assert_eq!(document["id_documento"], "00000000-0000-0000-0000-000000000001");
    assert_eq!(document["imp_pagado"], "1160.00");
    assert_eq!(document["impuestos_dr"][0]["traslados_dr"][0]["tasa_o_cuota_dr"], "0.160000");
    assert_eq!(payment["impuestos_p"][0]["traslados_p"][0]["base_p"], "1000.00");
}

#[test]
fn payroll_optional_sections() {
    let cfdi = Cfdi40Handler::default()
        .use_nomina12()
        .parse_from_text(NOMINA)
        .unwrap();
    let value = serde_json::to_value(&cfdi.nomina12[0]).unwrap();

    assert_eq!(value["tipo_nomina"], "O");
    assert_eq!(value["receptor"]["antigüedad"], "P3Y2M23D");
    assert_eq!(
        value["percepciones"]["jubilacion_pension_retiro"]["total_una_exhibicion"],
        "223.45"
    );
    assert!(value["percepciones"].get("separacion_indemnizacion").is_none());
    assert!(value["percepciones"]["percepcion"][1].get("acciones_o_titulos").is_none());
    assert_eq!(value["otros_pagos"][0]["compensacion_saldos_a_favor"]["año"], "2015");
}

#[test]
fn complement_is_tagged_by_kind() {
    let stamp = r#"<tfd:TimbreFiscalDigital xmlns:tfd="http://www.sat.gob.mx/TimbreFiscalDigital" Version="1.1" UUID="a3c6a0d7-8f4b-4e2a-9b5c-1d8e9f7a6b2c" FechaTimbrado="2025-01-15T10:30:01" RfcProvCertif="SAT970701NN3" SelloCFD="CFD==" NoCertificadoSAT="30001000000300023789" SelloSAT="SAT=="/>"#;
    let complement = ComplementRegistry::with_defaults()
        .parse_from_text(stamp, &HandlerConfig::default())
        .unwrap();

    let json = serde_json::to_string_pretty(&complement).unwrap();
    insta::assert_snapshot!(json, @r#"
    {
      "kind": "tfd11",
      "version": "1.1",
      "no_certificado_sat": "30001000000300023789",
      "uuid": "A3C6A0D7-8F4B-4E2A-9B5C-1D8E9F7A6B2C",
      "fecha_timbrado": "2025-01-15T10:30:01",
      "rfc_prov_cert": "SAT970701NN3",
      "sello_cfd": "CFD==",
      "sello_sat": "SAT=="
    }
    "#);

    let back: Complement = serde_json::from_str(&json).unwrap();
    assert_eq!(back, complement);
}

#[test]
fn extension_complement_kind() {
    let ext = Complement::Extension(ExtensionComplement {
        namespace: "http://www.sat.gob.mx/implocal".into(),
        name: "ImpuestosLocales".into(),
        version: "1.0".into(),
        attributes: [("TotaldeTraslados".to_string(), "30.00".to_string())].into(),
    });
    let value = serde_json::to_value(&ext).unwrap();
    assert_eq!(value["kind"], "extension");
    assert_eq!(value["nombre"], "ImpuestosLocales");
    assert_eq!(value["atributos"]["TotaldeTraslados"], "30.00");
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn config_fields_default_when_missing() {
    let config: HandlerConfig =
        serde_json::from_str(r#"{"safe_numerics": true, "parse_pagos20": true}"#).unwrap();

    assert_eq!(
        config,
        HandlerConfig {
            safe_numerics: true,
            parse_pagos20: true,
            ..Default::default()
        }
    );
}

#[test]
fn config_from_file_drives_handler() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("decoder.json");
    std::fs::write(
        &path,
        r#"{"empty_char": "-", "parse_concepts": true, "parse_concepts_taxes": true}"#,
    )
    .unwrap();

    let config: HandlerConfig =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(config.decodes_concept_taxes());

    let cfdi = Cfdi40Handler::new(config).parse_from_text(PAGOS).unwrap();
    assert_eq!(cfdi.concepts.len(), 1);
    assert_eq!(cfdi.payment_method, "-");
    assert!(cfdi.pagos20.is_empty());
}
