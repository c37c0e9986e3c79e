//! Property-based tests for normalization and decoding.
//!
//! Run with: `cargo test --test proptest_tests`

use std::str::FromStr;

use cfdi_transform::core::{compact_string, default_if_empty, sum_amounts};
use cfdi_transform::{Cfdi40Handler, DocumentHandler, HandlerConfig};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000, 0u32..=6).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn stamped(uuid: &str) -> String {
    format!(
        r#"<cfdi:Comprobante xmlns:cfdi="http://www.sat.gob.mx/cfd/4" Version="4.0">
  <cfdi:CfdiRelacionados TipoRelacion="04"><cfdi:CfdiRelacionado UUID="{uuid}"/></cfdi:CfdiRelacionados>
  <cfdi:Complemento>
    <tfd:TimbreFiscalDigital xmlns:tfd="http://www.sat.gob.mx/TimbreFiscalDigital" Version="1.1" UUID="{uuid}"/>
  </cfdi:Complemento>
</cfdi:Comprobante>"#
    )
}

// ---------------------------------------------------------------------------
// Text compaction
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn compacted_text_is_tidy(text in "[a-zA-Z0-9 \t\r\n|;ñé]{0,64}", delims in "[|;]{0,2}") {
        let out = compact_string(&delims, &text);

        prop_assert_eq!(out.trim(), out.as_str());
        prop_assert!(!out.contains("  "));
        prop_assert!(!out.contains(['\n', '\t', '\r']));
        for d in delims.chars() {
            prop_assert!(!out.contains(d));
        }
    }

    #[test]
    fn compaction_is_idempotent(text in "\\PC{0,64}", delims in "[|;,]{0,3}") {
        let once = compact_string(&delims, &text);
        prop_assert_eq!(compact_string(&delims, &once), once);
    }

    #[test]
    fn compaction_keeps_words(words in prop::collection::vec("[A-Za-z0-9]{1,8}", 1..8)) {
        let spaced = words.join(" \t\n  ");
        prop_assert_eq!(compact_string("", &spaced), words.join(" "));
    }
}

// ---------------------------------------------------------------------------
// Amount arithmetic
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn sum_matches_decimal_addition(a in amount(), b in amount()) {
        let sum = sum_amounts(&a.to_string(), &b.to_string());
        prop_assert_eq!(Decimal::from_str(&sum).unwrap(), a + b);
    }

    #[test]
    fn sum_is_commutative(a in amount(), b in amount()) {
        prop_assert_eq!(
            sum_amounts(&a.to_string(), &b.to_string()),
            sum_amounts(&b.to_string(), &a.to_string())
        );
    }

    #[test]
    fn sum_is_exact_past_decimal_precision(a in 0u128..u128::MAX / 2, b in 0u128..u128::MAX / 2, scale in 0usize..4) {
        let with_scale = |n: u128| {
            let text = format!("{n:0>width$}", width = scale + 1);
            let (whole, fraction) = text.split_at(text.len() - scale);
            if scale == 0 { whole.to_string() } else { format!("{whole}.{fraction}") }
        };
        prop_assert_eq!(sum_amounts(&with_scale(a), &with_scale(b)), with_scale(a + b));
    }

    #[test]
    fn empty_operand_is_identity(a in "[0-9]{1,6}(\\.[0-9]{1,6})?") {
        prop_assert_eq!(sum_amounts("", &a), a.clone());
        prop_assert_eq!(sum_amounts(&a, ""), a);
    }

    #[test]
    fn present_values_are_never_replaced(value in "[^\\s]{1,16}", placeholder in "[A-Z/]{0,3}", safe in any::<bool>()) {
        prop_assert_eq!(default_if_empty(&value, &placeholder, safe), value);
    }
}

#[test]
fn sum_keeps_scale() {
    assert_eq!(sum_amounts("160.00", "8.00"), "168.00");
    assert_eq!(sum_amounts("0.10", "0.2"), "0.30");
    assert_eq!(Decimal::from_str(&sum_amounts("1.5", "abc")).unwrap(), dec!(1.5));
}

#[test]
fn sum_beyond_decimal_range() {
    assert_eq!(
        sum_amounts("123456789012345678901234567890", "1"),
        "123456789012345678901234567891"
    );
    assert_eq!(
        sum_amounts(&Decimal::MAX.to_string(), "1"),
        "79228162514264337593543950336"
    );
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn uuids_come_out_uppercase(uuid in "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}") {
        let cfdi = Cfdi40Handler::default()
            .use_related_cfdis()
            .parse_from_text(&stamped(&uuid))
            .unwrap();

        let expected = uuid.to_uppercase();
        prop_assert_eq!(cfdi.uuid(), Some(expected.as_str()));
        prop_assert_eq!(&cfdi.related_cfdis[0].uuid, &expected);
    }

    #[test]
    fn arbitrary_input_never_panics(input in "\\PC{0,256}") {
        let handler = Cfdi40Handler::new(HandlerConfig::new().with_safe_numerics(true))
            .use_concepts_with_taxes()
            .use_pagos20()
            .use_nomina12();
        let _ = handler.parse_from_text(&input);
    }

    #[test]
    fn series_attribute_is_compacted(text in "[a-zA-Z0-9 \t\n.,/-]{0,64}") {
        let xml = format!(
            r#"<cfdi:Comprobante xmlns:cfdi="http://www.sat.gob.mx/cfd/4" Version="4.0" Serie="{text}"/>"#
        );
        let cfdi = Cfdi40Handler::default().parse_from_text(&xml).unwrap();
        prop_assert_eq!(cfdi.series, compact_string("", &text));
    }
}
