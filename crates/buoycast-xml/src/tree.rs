//! Owned element tree and the `quick-xml` loader that builds it.

use std::fmt;

use quick_xml::events::Event;
use quick_xml::Reader;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors produced while building a [`Document`] from XML text.
#[derive(Debug, PartialEq, Eq)]
pub enum XmlError {
    /// The underlying parser rejected the input.
    Syntax(String),
    /// The input was token-valid but not a usable document
    /// (no root element, multiple root elements, truncated tree).
    MalformedDocument(String),
}

impl fmt::Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmlError::Syntax(msg) => write!(f, "xml syntax error: {msg}"),
            XmlError::MalformedDocument(msg) => write!(f, "malformed document: {msg}"),
        }
    }
}

impl std::error::Error for XmlError {}

// ---------------------------------------------------------------------------
// Tree types
// ---------------------------------------------------------------------------

/// A child of an [`Element`]: either a nested element or a run of text.
///
/// Whitespace-only text runs are dropped at parse time; surviving text
/// is stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// One XML element with its attributes and children, all owned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Tag name of this element (namespace prefix included verbatim).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the named attribute, or `None` if not declared.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Direct child elements, in document order.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// Direct child elements with the given tag name, in document order.
    pub fn children_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.children().filter(move |el| el.name == name)
    }

    /// First direct child element with the given tag name.
    ///
    /// The returned borrow is tied to `self` only, not to `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children().find(|el| el.name == name)
    }

    /// Concatenated direct text content of this element.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            if let Node::Text(t) = node {
                out.push_str(t);
            }
        }
        out
    }

    /// Text of the first direct child element with the given tag name.
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name).map(Element::text)
    }

    /// All descendant elements of this element, pre-order
    /// (document order), excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children().rev().collect(),
        }
    }

    /// First descendant matching `pred`, in document order.
    pub fn find_first<P>(&self, pred: P) -> Option<&Element>
    where
        P: Fn(&Element) -> bool,
    {
        self.descendants().find(|el| pred(el))
    }

    /// Every descendant matching `pred`, in document order.
    pub fn find_all<P>(&self, pred: P) -> Vec<&Element>
    where
        P: Fn(&Element) -> bool,
    {
        self.descendants().filter(|el| pred(el)).collect()
    }
}

/// Pre-order descendant traversal; see [`Element::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<&'a Element> {
        let el = self.stack.pop()?;
        for child in el.children().rev() {
            self.stack.push(child);
        }
        Some(el)
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A parsed XML document: one root element plus traversal helpers.
///
/// The tree is immutable after construction; every accessor borrows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Parse `xml` into an owned tree.
    ///
    /// Comments, processing instructions and the XML declaration are
    /// discarded. Exactly one root element is required.
    pub fn parse(xml: &str) -> Result<Document, XmlError> {
        let mut reader = Reader::from_str(xml);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| XmlError::Syntax(e.to_string()))?;
            match event {
                Event::Start(start) => {
                    if stack.is_empty() && root.is_some() {
                        return Err(XmlError::MalformedDocument(
                            "multiple root elements".to_string(),
                        ));
                    }
                    stack.push(element_from_start(&start)?);
                }
                Event::Empty(start) => {
                    let el = element_from_start(&start)?;
                    attach(&mut stack, &mut root, el)?;
                }
                Event::End(_) => {
                    // quick-xml has already verified tag pairing.
                    let el = stack.pop().ok_or_else(|| {
                        XmlError::MalformedDocument("unexpected closing tag".to_string())
                    })?;
                    attach(&mut stack, &mut root, el)?;
                }
                Event::Text(t) => {
                    let text = t.unescape().map_err(|e| XmlError::Syntax(e.to_string()))?;
                    push_text(&mut stack, &text);
                }
                Event::CData(c) => {
                    let text = String::from_utf8_lossy(&c).into_owned();
                    push_text(&mut stack, &text);
                }
                Event::Eof => break,
                // Declaration, comments, PIs, DOCTYPE.
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(XmlError::MalformedDocument(
                "document ended inside an open element".to_string(),
            ));
        }
        match root {
            Some(root) => Ok(Document { root }),
            None => Err(XmlError::MalformedDocument("no root element".to_string())),
        }
    }

    /// The document's root element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// First element in the document matching `pred` (root excluded),
    /// in document order.
    pub fn find_first<P>(&self, pred: P) -> Option<&Element>
    where
        P: Fn(&Element) -> bool,
    {
        self.root.find_first(pred)
    }

    /// Every element in the document matching `pred` (root excluded),
    /// in document order.
    pub fn find_all<P>(&self, pred: P) -> Vec<&Element>
    where
        P: Fn(&Element) -> bool,
    {
        self.root.find_all(pred)
    }

    /// Every element in the document with the given tag name.
    pub fn find_all_named(&self, name: &str) -> Vec<&Element> {
        self.find_all(|el| el.name() == name)
    }
}

// ---------------------------------------------------------------------------
// Parse helpers
// ---------------------------------------------------------------------------

fn element_from_start(start: &quick_xml::events::BytesStart<'_>) -> Result<Element, XmlError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlError::Syntax(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| XmlError::Syntax(e.to_string()))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn attach(
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
    el: Element,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(Node::Element(el));
            Ok(())
        }
        None => {
            if root.is_some() {
                return Err(XmlError::MalformedDocument(
                    "multiple root elements".to_string(),
                ));
            }
            *root = Some(el);
            Ok(())
        }
    }
}

fn push_text(stack: &mut [Element], text: &str) {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return;
    }
    // Text outside the root element is ignored.
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Text(trimmed.to_string()));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(xml: &str) -> Document {
        Document::parse(xml).unwrap()
    }

    // --- parsing ---

    #[test]
    fn parses_minimal_document() {
        let d = doc("<root/>");
        assert_eq!(d.root().name(), "root");
        assert!(d.root().children().next().is_none());
    }

    #[test]
    fn parses_nested_elements_and_text() {
        let d = doc("<a><b>hello</b><c><d>world</d></c></a>");
        assert_eq!(d.root().child_text("b").unwrap(), "hello");
        let c = d.root().child("c").unwrap();
        assert_eq!(c.child_text("d").unwrap(), "world");
    }

    #[test]
    fn parses_attributes() {
        let d = doc(r#"<root><wind-speed type="sustained" time-layout="k1"/></root>"#);
        let el = d.root().child("wind-speed").unwrap();
        assert_eq!(el.attr("type"), Some("sustained"));
        assert_eq!(el.attr("time-layout"), Some("k1"));
        assert_eq!(el.attr("absent"), None);
    }

    #[test]
    fn unescapes_entities_in_text_and_attributes() {
        let d = doc(r#"<r a="x &amp; y"><t>1 &lt; 2</t></r>"#);
        assert_eq!(d.root().attr("a"), Some("x & y"));
        assert_eq!(d.root().child_text("t").unwrap(), "1 < 2");
    }

    #[test]
    fn whitespace_only_text_is_dropped() {
        let d = doc("<a>\n  <b>v</b>\n</a>");
        assert_eq!(d.root().text(), "");
        assert_eq!(d.root().child_text("b").unwrap(), "v");
    }

    #[test]
    fn declaration_and_comments_are_ignored() {
        let d = doc("<?xml version=\"1.0\"?><!-- hi --><root><x/></root>");
        assert_eq!(d.root().name(), "root");
    }

    // --- malformed input ---

    #[test]
    fn rejects_mismatched_tags() {
        let err = Document::parse("<a><b></a></b>").unwrap_err();
        assert!(matches!(err, XmlError::Syntax(_)));
    }

    #[test]
    fn rejects_truncated_document() {
        // Either our open-element check or the parser's own
        // missing-end-tag detection fires first; both are rejections.
        let err = Document::parse("<a><b>").unwrap_err();
        assert!(matches!(
            err,
            XmlError::MalformedDocument(_) | XmlError::Syntax(_)
        ));
    }

    #[test]
    fn rejects_empty_input() {
        let err = Document::parse("").unwrap_err();
        assert!(matches!(err, XmlError::MalformedDocument(_)));
    }

    #[test]
    fn rejects_multiple_roots() {
        let err = Document::parse("<a/><b/>").unwrap_err();
        assert_eq!(
            err,
            XmlError::MalformedDocument("multiple root elements".to_string())
        );
    }

    // --- traversal ---

    #[test]
    fn descendants_pre_order_excludes_self() {
        let d = doc("<a><b><c/></b><d/></a>");
        let names: Vec<&str> = d.root().descendants().map(Element::name).collect();
        assert_eq!(names, vec!["b", "c", "d"]);
    }

    #[test]
    fn find_first_returns_document_order_match() {
        let d = doc(r#"<r><v type="gust">1</v><v type="gust">2</v></r>"#);
        let el = d.find_first(|e| e.attr("type") == Some("gust")).unwrap();
        assert_eq!(el.text(), "1");
    }

    #[test]
    fn find_all_named_collects_in_document_order() {
        let d = doc("<r><value>a</value><x><value>b</value></x><value>c</value></r>");
        let texts: Vec<String> = d
            .find_all_named("value")
            .into_iter()
            .map(Element::text)
            .collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn child_borrow_outlives_the_name_borrow() {
        // The returned element must stay usable after the lookup name
        // is dropped.
        let d = doc("<r><b>v</b></r>");
        let el = {
            let name = String::from("b");
            d.root().child(&name)
        };
        assert_eq!(el.unwrap().text(), "v");
    }

    #[test]
    fn children_named_is_direct_only() {
        let d = doc("<r><value>top</value><x><value>nested</value></x></r>");
        let direct: Vec<String> = d
            .root()
            .children_named("value")
            .map(Element::text)
            .collect();
        assert_eq!(direct, vec!["top"]);
    }

    #[test]
    fn text_concatenates_direct_runs() {
        let d = doc("<r>alpha<x>skip</x>beta</r>");
        assert_eq!(d.root().text(), "alphabeta");
    }
}
