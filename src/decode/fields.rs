//! Per-field normalization policies.
//!
//! Every attribute read by a decoder goes through exactly one of these, so
//! the policy of a field is visible at the line that reads it.

use crate::core::{
    CfdiError, HandlerConfig, Result, compact_string, default_if_empty, default_if_empty_one,
};
use crate::xml::StartTag;

pub(crate) struct Fields<'a> {
    tag: &'a StartTag,
    config: &'a HandlerConfig,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(tag: &'a StartTag, config: &'a HandlerConfig) -> Self {
        Self { tag, config }
    }

    /// As written; `""` when absent.
    pub(crate) fn raw(&self, name: &str) -> String {
        self.tag.attr(name).to_string()
    }

    /// As written; the empty placeholder when absent.
    pub(crate) fn or_empty(&self, name: &str) -> String {
        default_if_empty(self.tag.attr(name), &self.config.empty_char, false)
    }

    /// Compacted free text, `""` when absent.
    pub(crate) fn compact(&self, name: &str) -> String {
        compact_string(&self.config.esc_delimiters, self.tag.attr(name))
    }

    /// Compacted free text, the empty placeholder when absent.
    pub(crate) fn compact_or_empty(&self, name: &str) -> String {
        compact_string(&self.config.esc_delimiters, &self.or_empty(name))
    }

    /// Amount; `"0.00"` or the placeholder when absent.
    pub(crate) fn zero(&self, name: &str) -> String {
        default_if_empty(
            self.tag.attr(name),
            &self.config.empty_char,
            self.config.safe_numerics,
        )
    }

    /// Multiplier; `"1.00"` or the placeholder when absent.
    pub(crate) fn one(&self, name: &str) -> String {
        default_if_empty_one(
            self.tag.attr(name),
            &self.config.empty_char,
            self.config.safe_numerics,
        )
    }

    /// UUIDs.
    pub(crate) fn upper(&self, name: &str) -> String {
        self.tag.attr(name).to_uppercase()
    }
}

/// How a `Version` attribute is compared against the supported literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VersionMatch {
    Exact,
    Trimmed,
}

/// Reject the element unless its `Version` is `expected`.
pub(crate) fn check_version(
    tag: &StartTag,
    element: &'static str,
    expected: &'static str,
    mode: VersionMatch,
) -> Result<String> {
    let found = match mode {
        VersionMatch::Exact => tag.attr("Version"),
        VersionMatch::Trimmed => tag.attr("Version").trim(),
    };
    if found == expected {
        Ok(found.to_string())
    } else {
        Err(CfdiError::SchemaVersionMismatch {
            element,
            expected,
            found: found.to_string(),
        })
    }
}
