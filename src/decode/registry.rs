use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::core::{CfdiError, HandlerConfig, Result};
use crate::types::{Complement, ExtensionComplement};
use crate::xml::{StartTag, XmlCursor};

use super::{
    NOMINA12_NAMESPACE, Nomina12Handler, PAGOS20_NAMESPACE, Pagos20Handler, TFD11_NAMESPACE,
    Tfd11Handler, VENTA_VEHICULOS11_NAMESPACE, VentaVehiculos11Handler,
};

/// Namespace URI plus local name: the key complements are dispatched on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    pub namespace: String,
    pub local: String,
}

impl QualifiedName {
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            local: local.into(),
        }
    }

    pub fn of(tag: &StartTag) -> Self {
        Self::new(tag.namespace().unwrap_or_default(), tag.local_name())
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}{}", self.namespace, self.local)
    }
}

/// Decodes one complement element that the cursor has just opened.
///
/// Implementations must check the element's version before pulling any
/// token, and on success must have consumed the element's closing tag.
pub trait ComplementDecoder: Send + Sync {
    fn decode(&self, cursor: &mut XmlCursor<'_>, start: &StartTag) -> Result<Complement>;
}

/// Builds a decoder carrying the caller's configuration.
pub type ComplementFactory = fn(&HandlerConfig) -> Box<dyn ComplementDecoder>;

/// Dispatch table from qualified element names to complement decoders.
#[derive(Debug, Clone, Default)]
pub struct ComplementRegistry {
    factories: HashMap<QualifiedName, ComplementFactory>,
}

impl ComplementRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the four built-in SAT complements.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(
            QualifiedName::new(TFD11_NAMESPACE, "TimbreFiscalDigital"),
            Tfd11Handler::factory,
        );
        registry.register(
            QualifiedName::new(PAGOS20_NAMESPACE, "Pagos"),
            Pagos20Handler::factory,
        );
        registry.register(
            QualifiedName::new(NOMINA12_NAMESPACE, "Nomina"),
            Nomina12Handler::factory,
        );
        registry.register(
            QualifiedName::new(VENTA_VEHICULOS11_NAMESPACE, "VentaVehiculos"),
            VentaVehiculos11Handler::factory,
        );
        registry
    }

    /// Add or replace the factory for `name`, returning the previous one.
    pub fn register(
        &mut self,
        name: QualifiedName,
        factory: ComplementFactory,
    ) -> Option<ComplementFactory> {
        self.factories.insert(name, factory)
    }

    pub fn get(&self, name: &QualifiedName) -> Option<ComplementFactory> {
        self.factories.get(name).copied()
    }

    pub fn contains(&self, name: &QualifiedName) -> bool {
        self.factories.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&QualifiedName> {
        let mut names: Vec<_> = self.factories.keys().collect();
        names.sort();
        names
    }

    pub(crate) fn decoder_for(
        &self,
        tag: &StartTag,
        config: &HandlerConfig,
    ) -> Option<Box<dyn ComplementDecoder>> {
        self.get(&QualifiedName::of(tag)).map(|factory| factory(config))
    }

    /// Decode a standalone complement document, dispatching on its root element.
    pub fn parse_from_text(&self, xml: &str, config: &HandlerConfig) -> Result<Complement> {
        let mut cursor = XmlCursor::new(xml);
        let root = cursor.root()?;
        let decoder = self.decoder_for(&root, config).ok_or_else(|| {
            CfdiError::FormatRejected(format!(
                "no complement decoder registered for {}",
                QualifiedName::of(&root)
            ))
        })?;
        let complement = decoder.decode(&mut cursor, &root)?;
        cursor.finish()?;
        Ok(complement)
    }
}

/// Generic decoder for complements without a dedicated model: keeps the
/// element's attributes and skips its children.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeComplementDecoder;

impl AttributeComplementDecoder {
    pub fn factory(_config: &HandlerConfig) -> Box<dyn ComplementDecoder> {
        Box::new(AttributeComplementDecoder)
    }
}

impl ComplementDecoder for AttributeComplementDecoder {
    fn decode(&self, cursor: &mut XmlCursor<'_>, start: &StartTag) -> Result<Complement> {
        let attributes: BTreeMap<String, String> = start
            .attributes()
            .iter()
            .filter(|(key, _)| key != "schemaLocation")
            .cloned()
            .collect();
        cursor.skip(start.local_name())?;

        Ok(Complement::Extension(ExtensionComplement {
            namespace: start.namespace().unwrap_or_default().to_string(),
            name: start.local_name().to_string(),
            version: start.attr("Version").trim().to_string(),
            attributes,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_builtin_complements() {
        let registry = ComplementRegistry::with_defaults();
        assert_eq!(registry.len(), 4);
        assert!(registry.contains(&QualifiedName::new(TFD11_NAMESPACE, "TimbreFiscalDigital")));
        assert!(!registry.contains(&QualifiedName::new("urn:other", "TimbreFiscalDigital")));
        assert!(ComplementRegistry::new().is_empty());
    }

    #[test]
    fn register_replaces() {
        let mut registry = ComplementRegistry::new();
        let name = QualifiedName::new("http://www.sat.gob.mx/implocal", "ImpuestosLocales");
        assert!(registry.register(name.clone(), AttributeComplementDecoder::factory).is_none());
        assert!(registry.register(name, AttributeComplementDecoder::factory).is_some());
    }

    #[test]
    fn qualified_name_display() {
        let name = QualifiedName::new(PAGOS20_NAMESPACE, "Pagos");
        assert_eq!(name.to_string(), "{http://www.sat.gob.mx/Pagos20}Pagos");
    }

    #[test]
    fn unregistered_root_is_rejected() {
        let err = ComplementRegistry::with_defaults()
            .parse_from_text(r#"<x:Foo xmlns:x="urn:foo"/>"#, &HandlerConfig::default())
            .unwrap_err();
        assert!(matches!(err, CfdiError::FormatRejected(_)));
    }

    #[test]
    fn attribute_decoder_keeps_attributes() {
        let mut registry = ComplementRegistry::new();
        registry.register(
            QualifiedName::new("http://www.sat.gob.mx/implocal", "ImpuestosLocales"),
            AttributeComplementDecoder::factory,
        );
        let xml = r#"<implocal:ImpuestosLocales xmlns:implocal="http://www.sat.gob.mx/implocal" version="1.0" TotaldeRetenciones="0.00" TotaldeTraslados="25.00"><implocal:TrasladosLocales ImpLocTrasladado="ISH" TasadeTraslado="3.00" Importe="25.00"/></implocal:ImpuestosLocales>"#;

        let Complement::Extension(ext) = registry
            .parse_from_text(xml, &HandlerConfig::default())
            .unwrap()
        else {
            panic!("expected an extension complement");
        };
        assert_eq!(ext.name, "ImpuestosLocales");
        assert_eq!(ext.attributes["TotaldeTraslados"], "25.00");
        assert_eq!(ext.version, "");
    }
}
