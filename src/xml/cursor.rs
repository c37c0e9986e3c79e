use quick_xml::NsReader;
use quick_xml::events::Event;
use quick_xml::name::ResolveResult;

use crate::core::{CfdiError, Result};

/// An opened element: namespace-resolved name plus its attributes, unescaped.
///
/// Namespace declarations (`xmlns`, `xmlns:*`) are not part of the attribute list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    local: String,
    namespace: Option<String>,
    attributes: Vec<(String, String)>,
}

impl StartTag {
    pub fn new(
        local: impl Into<String>,
        namespace: Option<String>,
        attributes: Vec<(String, String)>,
    ) -> Self {
        Self {
            local: local.into(),
            namespace,
            attributes,
        }
    }

    pub fn local_name(&self) -> &str {
        &self.local
    }

    /// Namespace URI the element's prefix is bound to, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Value of the attribute with the given local name, or `""` when absent.
    pub fn attr(&self, name: &str) -> &str {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|(key, _)| key == name)
    }

    /// Attributes in document order, keyed by local name.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }
}

/// One step of the forward walk. Text, comments, processing instructions
/// and declarations never surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Start(StartTag),
    End,
    Eof,
}

/// Forward-only cursor over an in-memory document.
///
/// Empty elements are expanded, so every [`Token::Start`] is matched by a
/// later [`Token::End`] unless the input is truncated.
pub struct XmlCursor<'i> {
    reader: NsReader<&'i [u8]>,
    depth: usize,
}

impl<'i> XmlCursor<'i> {
    pub fn new(xml: &'i str) -> Self {
        let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
        let mut reader = NsReader::from_str(xml);
        reader.config_mut().expand_empty_elements = true;
        Self { reader, depth: 0 }
    }

    /// Number of currently open elements.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Pull the next structural token.
    pub fn next_token(&mut self) -> Result<Token> {
        loop {
            let (resolved, event) = self.reader.read_resolved_event()?;
            match event {
                Event::Start(start) => {
                    let namespace = match resolved {
                        ResolveResult::Bound(ns) => {
                            Some(String::from_utf8_lossy(ns.into_inner()).into_owned())
                        }
                        _ => None,
                    };
                    let local = String::from_utf8_lossy(start.local_name().into_inner()).into_owned();

                    let mut attributes = Vec::new();
                    for attr in start.attributes() {
                        let attr = attr?;
                        if attr.key.as_namespace_binding().is_some() {
                            continue;
                        }
                        let key =
                            String::from_utf8_lossy(attr.key.local_name().into_inner()).into_owned();
                        let value = attr.unescape_value()?.into_owned();
                        attributes.push((key, value));
                    }

                    self.depth += 1;
                    return Ok(Token::Start(StartTag::new(local, namespace, attributes)));
                }
                Event::End(_) => {
                    self.depth = self.depth.saturating_sub(1);
                    return Ok(Token::End);
                }
                Event::Eof => return Ok(Token::Eof),
                _ => continue,
            }
        }
    }

    /// Next child of the element named `parent`, or `None` once its closing
    /// tag has been consumed.
    pub fn next_child(&mut self, parent: &str) -> Result<Option<StartTag>> {
        match self.next_token()? {
            Token::Start(tag) => Ok(Some(tag)),
            Token::End => Ok(None),
            Token::Eof => Err(truncated(parent)),
        }
    }

    /// Consume everything up to and including the closing tag of the element
    /// most recently opened.
    pub fn skip(&mut self, name: &str) -> Result<()> {
        let mut depth = 1usize;
        loop {
            match self.next_token()? {
                Token::Start(_) => depth += 1,
                Token::End => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Token::Eof => return Err(truncated(name)),
            }
        }
    }

    /// Like [`skip`](Self::skip), recording the local name of every
    /// descendant element on the way.
    pub fn collect_descendant_names(&mut self, name: &str) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut depth = 1usize;
        loop {
            match self.next_token()? {
                Token::Start(tag) => {
                    depth += 1;
                    names.push(tag.local);
                }
                Token::End => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(names);
                    }
                }
                Token::Eof => return Err(truncated(name)),
            }
        }
    }

    /// First element in the document, wherever it sits, with the given local name.
    pub fn find_element(&mut self, local: &str) -> Result<Option<StartTag>> {
        loop {
            match self.next_token()? {
                Token::Start(tag) if tag.local_name() == local => return Ok(Some(tag)),
                Token::Start(_) | Token::End => {}
                Token::Eof if self.depth > 0 => return Err(truncated(local)),
                Token::Eof => return Ok(None),
            }
        }
    }

    /// The document element.
    pub fn root(&mut self) -> Result<StartTag> {
        match self.next_token()? {
            Token::Start(tag) => Ok(tag),
            Token::End | Token::Eof => Err(CfdiError::FormatRejected(
                "document has no root element".into(),
            )),
        }
    }

    /// Consume what follows the closed root element. Only comments,
    /// processing instructions and whitespace may remain.
    pub fn finish(&mut self) -> Result<()> {
        match self.next_token()? {
            Token::Eof => Ok(()),
            Token::Start(tag) => Err(CfdiError::FormatRejected(format!(
                "unexpected <{}> after the root element",
                tag.local_name()
            ))),
            Token::End => Err(CfdiError::FormatRejected(
                "unexpected closing tag after the root element".into(),
            )),
        }
    }

    /// Read to the end of input, requiring every open element to close.
    pub fn drain(&mut self) -> Result<()> {
        loop {
            match self.next_token()? {
                Token::Start(_) | Token::End => {}
                Token::Eof if self.depth > 0 => {
                    return Err(CfdiError::TruncatedInput(format!(
                        "input ended with {} element(s) open",
                        self.depth
                    )));
                }
                Token::Eof => return Ok(()),
            }
        }
    }
}

fn truncated(element: &str) -> CfdiError {
    CfdiError::TruncatedInput(format!("input ended inside <{element}>"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(cursor: &mut XmlCursor<'_>) -> StartTag {
        match cursor.next_token().unwrap() {
            Token::Start(tag) => tag,
            other => panic!("expected start tag, got {other:?}"),
        }
    }

    #[test]
    fn resolves_namespace_and_attributes() {
        let mut cursor = XmlCursor::new(
            r#"<?xml version="1.0"?><c:Root xmlns:c="urn:x" c:Version="4.0" Serie="A&amp;B"/>"#,
        );
        let root = start(&mut cursor);
        assert_eq!(root.local_name(), "Root");
        assert_eq!(root.namespace(), Some("urn:x"));
        assert_eq!(root.attr("Version"), "4.0");
        assert_eq!(root.attr("Serie"), "A&B");
        assert_eq!(root.attr("Missing"), "");
        assert_eq!(root.attributes().len(), 2);
        assert_eq!(cursor.next_token().unwrap(), Token::End);
        assert_eq!(cursor.next_token().unwrap(), Token::Eof);
    }

    #[test]
    fn skip_resumes_at_sibling() {
        let mut cursor = XmlCursor::new("<a><b><c><d/></c><!-- x --><c/></b><e/></a>");
        start(&mut cursor);
        let b = start(&mut cursor);
        cursor.skip(b.local_name()).unwrap();
        assert_eq!(start(&mut cursor).local_name(), "e");
        assert_eq!(cursor.depth(), 2);
    }

    #[test]
    fn descendant_names_in_order() {
        let mut cursor = XmlCursor::new("<Addenda><x><y/></x><z/></Addenda>");
        start(&mut cursor);
        let names = cursor.collect_descendant_names("Addenda").unwrap();
        assert_eq!(names, vec!["x", "y", "z"]);
        assert_eq!(cursor.depth(), 0);
    }

    #[test]
    fn skip_reports_truncation() {
        let mut cursor = XmlCursor::new("<a><b><c>");
        start(&mut cursor);
        start(&mut cursor);
        let err = cursor.skip("b").unwrap_err();
        assert!(matches!(err, CfdiError::TruncatedInput(_)));
    }

    #[test]
    fn find_element_anywhere() {
        let mut cursor = XmlCursor::new("<a><b><Target Version=\"1.1\"/></b></a>");
        let tag = cursor.find_element("Target").unwrap().unwrap();
        assert_eq!(tag.attr("Version"), "1.1");
    }

    #[test]
    fn find_element_missing() {
        let mut cursor = XmlCursor::new("<a><b/></a>");
        assert!(cursor.find_element("Target").unwrap().is_none());
    }

    #[test]
    fn finish_accepts_trailing_comments() {
        let mut cursor = XmlCursor::new("<a/>\n<!-- c -->\n<?pi x?>\n");
        start(&mut cursor);
        assert_eq!(cursor.next_token().unwrap(), Token::End);
        cursor.finish().unwrap();
    }

    #[test]
    fn finish_rejects_second_element() {
        let mut cursor = XmlCursor::new("<a/><b/>");
        start(&mut cursor);
        cursor.next_token().unwrap();
        let err = cursor.finish().unwrap_err();
        assert!(matches!(err, CfdiError::FormatRejected(_)));
        assert!(err.to_string().contains("<b>"));
    }

    #[test]
    fn finish_reports_unterminated_tag() {
        let mut cursor = XmlCursor::new("<a/><unterminated");
        start(&mut cursor);
        cursor.next_token().unwrap();
        assert!(matches!(cursor.finish(), Err(CfdiError::TruncatedInput(_))));
    }

    #[test]
    fn drain_requires_closed_elements() {
        let mut cursor = XmlCursor::new("<a><b/><c>");
        cursor.find_element("b").unwrap();
        assert!(matches!(cursor.drain(), Err(CfdiError::TruncatedInput(_))));

        let mut cursor = XmlCursor::new("<a><b/><c/></a><!-- end -->");
        cursor.find_element("b").unwrap();
        cursor.drain().unwrap();
    }

    #[test]
    fn mismatched_end_is_rejected() {
        let mut cursor = XmlCursor::new("<a><b></a>");
        start(&mut cursor);
        start(&mut cursor);
        let err = cursor.next_token().unwrap_err();
        assert!(matches!(err, CfdiError::FormatRejected(_)));
    }
}
