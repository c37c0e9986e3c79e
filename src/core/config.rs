use serde::{Deserialize, Serialize};

use super::normalize::{SAFE_NUMBER_ONE, SAFE_NUMBER_ZERO};

/// Decoding options shared by the root handler and every complement handler.
///
/// Everything is off by default: the root document, its issuer, recipient,
/// root-level taxes and the digital stamp are always decoded, every other
/// subtree must be opted into.
///
/// The struct deserializes with missing fields taking their defaults, so it
/// can be loaded from any serde format a host application already uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerConfig {
    /// Substitute for absent non-numeric attributes.
    pub empty_char: String,
    /// Absent numeric attributes become `"0.00"` (or `"1.00"` for multipliers).
    pub safe_numerics: bool,
    /// Extra characters stripped by text compaction.
    pub esc_delimiters: String,
    pub parse_concepts: bool,
    /// Only honoured together with `parse_concepts`.
    pub parse_concepts_taxes: bool,
    pub parse_related_cfdis: bool,
    pub parse_pagos20: bool,
    pub parse_nomina12: bool,
    pub parse_venta_vehiculos11: bool,
}

impl HandlerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_empty_char(mut self, empty_char: impl Into<String>) -> Self {
        self.empty_char = empty_char.into();
        self
    }

    pub fn with_safe_numerics(mut self, enabled: bool) -> Self {
        self.safe_numerics = enabled;
        self
    }

    pub fn with_esc_delimiters(mut self, delimiters: impl Into<String>) -> Self {
        self.esc_delimiters = delimiters.into();
        self
    }

    /// Placeholder used for absent amounts.
    pub fn empty_or_zero(&self) -> &str {
        if self.safe_numerics {
            SAFE_NUMBER_ZERO
        } else {
            &self.empty_char
        }
    }

    /// Placeholder used for absent multipliers.
    pub fn empty_or_one(&self) -> &str {
        if self.safe_numerics {
            SAFE_NUMBER_ONE
        } else {
            &self.empty_char
        }
    }

    /// Per-concept taxes need both concept flags.
    pub fn decodes_concept_taxes(&self) -> bool {
        self.parse_concepts && self.parse_concepts_taxes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_all_off() {
        let cfg = HandlerConfig::default();
        assert_eq!(cfg.empty_char, "");
        assert!(!cfg.safe_numerics);
        assert!(!cfg.parse_concepts);
        assert!(!cfg.parse_pagos20);
        assert_eq!(cfg.empty_or_zero(), "");
    }

    #[test]
    fn safe_placeholders() {
        let cfg = HandlerConfig::new().with_safe_numerics(true);
        assert_eq!(cfg.empty_or_zero(), "0.00");
        assert_eq!(cfg.empty_or_one(), "1.00");
    }

    #[test]
    fn concept_taxes_require_concepts() {
        let cfg = HandlerConfig {
            parse_concepts_taxes: true,
            ..Default::default()
        };
        assert!(!cfg.decodes_concept_taxes());
    }
}
