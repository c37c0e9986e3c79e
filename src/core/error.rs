use quick_xml::errors::{Error as XmlError, IllFormedError, SyntaxError};
use quick_xml::events::attributes::AttrError;
use thiserror::Error;

/// Errors that can occur while decoding a CFDI document or one of its complements.
///
/// A decode call either yields a complete record or exactly one of these.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CfdiError {
    /// The input is not something this crate decodes: wrong file extension,
    /// non-UTF-8 bytes, markup that is not well-formed, or an unexpected root element.
    #[error("format rejected: {0}")]
    FormatRejected(String),

    /// A versioned element declared a version other than the one its decoder supports.
    #[error("schema version mismatch on {element}: expected {expected}, found {found:?}")]
    SchemaVersionMismatch {
        /// Local name of the versioned element (e.g. `Comprobante`).
        element: &'static str,
        /// Version literal the decoder supports.
        expected: &'static str,
        /// Version attribute as found in the document.
        found: String,
    },

    /// The input ended before the element being decoded was closed.
    #[error("truncated input: {0}")]
    TruncatedInput(String),

    /// Reading the source failed.
    #[error("I/O error: {0}")]
    UnderlyingIo(#[from] std::io::Error),
}

impl CfdiError {
    /// Whether this error reports an unsupported schema version rather than
    /// broken input. Version mismatches leave the token stream usable.
    pub fn is_version_mismatch(&self) -> bool {
        matches!(self, CfdiError::SchemaVersionMismatch { .. })
    }
}

impl From<XmlError> for CfdiError {
    fn from(err: XmlError) -> Self {
        match err {
            XmlError::Syntax(SyntaxError::InvalidBangMarkup) => {
                CfdiError::FormatRejected(err.to_string())
            }
            XmlError::Syntax(_) | XmlError::IllFormed(IllFormedError::MissingEndTag(_)) => {
                CfdiError::TruncatedInput(err.to_string())
            }
            other => CfdiError::FormatRejected(other.to_string()),
        }
    }
}

impl From<AttrError> for CfdiError {
    fn from(err: AttrError) -> Self {
        CfdiError::FormatRejected(format!("malformed attribute: {err}"))
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CfdiError>;
