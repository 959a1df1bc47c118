//! Navigable XML document used for catalog objects and SOAP payloads.
//!
//! Parsing is done with `quick-xml`'s pull reader into an owned tree that
//! keeps qualified names, attribute order, namespace declarations, text,
//! CDATA, comments and processing instructions, so an unpatched document
//! serializes back to the same structure.
//!
//! Lookups compare only the local part of each element name, so
//! `saw:recipients` and `recipients` both match `"recipients"` whatever
//! prefix the service used.

use quick_xml::escape::{escape, partial_escape, unescape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::domain::error::MalformedObjectError;

/// Local part of a qualified name: `saw:user` → `user`.
#[must_use]
pub fn local_name(qualified: &str) -> &str {
    qualified.rsplit_once(':').map_or(qualified, |(_, local)| local)
}

/// Qualify `local` with `prefix` when one is given.
#[must_use]
pub fn qualify(prefix: Option<&str>, local: &str) -> String {
    match prefix {
        Some(p) => format!("{p}:{local}"),
        None => local.to_string(),
    }
}

/// Markup outside the element tree, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    Declaration(String),
    Instruction(String),
    Comment(String),
    DocType(String),
}

impl Markup {
    fn render(&self, out: &mut String) {
        match self {
            Self::Declaration(raw) | Self::Instruction(raw) => {
                out.push_str("<?");
                out.push_str(raw);
                out.push_str("?>");
            }
            Self::Comment(raw) => {
                out.push_str("<!--");
                out.push_str(raw);
                out.push_str("-->");
            }
            Self::DocType(raw) => {
                out.push_str("<!DOCTYPE ");
                out.push_str(raw);
                out.push('>');
            }
        }
    }
}

/// A child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Unescaped character data.
    Text(String),
    CData(String),
    Markup(Markup),
}

/// An element with its qualified name, attributes in source order, and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.children.push(Node::Text(text.to_string()));
        self
    }

    /// Qualified name as written in the source, e.g. `saw:ibot`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.name.rsplit_once(':').map(|(prefix, _)| prefix)
    }

    /// Attribute value by exact (qualified) name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Replace an attribute in place, or append it when absent.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self
                .attributes
                .push((name.to_string(), value.to_string())),
        }
    }

    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Direct element children in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// First direct child with the given local name.
    #[must_use]
    pub fn child(&self, local: &str) -> Option<&Element> {
        self.elements().find(|el| el.local_name() == local)
    }

    /// Concatenated text and CDATA of the direct children.
    #[must_use]
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(t) | Node::CData(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Text of the first direct child with the given local name.
    #[must_use]
    pub fn child_text(&self, local: &str) -> Option<String> {
        self.child(local).map(Element::text)
    }

    /// Drop every child node, leaving the element itself in place.
    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    pub fn push_element(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Find by local-name path below this element.
    ///
    /// The first segment matches any descendant; each further segment must
    /// be a direct child of the previous match. `["recipients",
    /// "specificRecipients"]` behaves like `.//{*}recipients/{*}specificRecipients`.
    /// The first match in document order wins.
    #[must_use]
    pub fn find(&self, path: &[&str]) -> Option<&Element> {
        let route = self.locate(path)?;
        let mut el = self;
        for idx in route {
            el = match el.children.get(idx)? {
                Node::Element(child) => child,
                _ => return None,
            };
        }
        Some(el)
    }

    /// Mutable variant of [`Element::find`].
    pub fn find_mut(&mut self, path: &[&str]) -> Option<&mut Element> {
        let route = self.locate(path)?;
        let mut el = self;
        for idx in route {
            el = match el.children.get_mut(idx)? {
                Node::Element(child) => child,
                _ => return None,
            };
        }
        Some(el)
    }

    /// Every descendant with the given local name, in document order.
    #[must_use]
    pub fn find_all(&self, local: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_named(local, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, local: &str, found: &mut Vec<&'a Element>) {
        for child in self.elements() {
            if child.local_name() == local {
                found.push(child);
            }
            child.collect_named(local, found);
        }
    }

    /// Child-index route to the first match of `path`.
    fn locate(&self, path: &[&str]) -> Option<Vec<usize>> {
        let (first, rest) = path.split_first()?;
        let mut route = Vec::new();
        self.locate_descendant(first, rest, &mut route)
            .then_some(route)
    }

    fn locate_descendant(&self, first: &str, rest: &[&str], route: &mut Vec<usize>) -> bool {
        for (idx, node) in self.children.iter().enumerate() {
            let Node::Element(child) = node else {
                continue;
            };
            route.push(idx);
            if child.local_name() == first && child.locate_chain(rest, route) {
                return true;
            }
            if child.locate_descendant(first, rest, route) {
                return true;
            }
            route.pop();
        }
        false
    }

    fn locate_chain(&self, chain: &[&str], route: &mut Vec<usize>) -> bool {
        let Some((next, rest)) = chain.split_first() else {
            return true;
        };
        for (idx, node) in self.children.iter().enumerate() {
            let Node::Element(child) = node else {
                continue;
            };
            if child.local_name() != *next {
                continue;
            }
            route.push(idx);
            if child.locate_chain(rest, route) {
                return true;
            }
            route.pop();
        }
        false
    }

    fn render(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape_attribute(value));
            out.push('"');
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Element(el) => el.render(out),
                Node::Text(text) => out.push_str(&escape_text(text)),
                Node::CData(data) => {
                    out.push_str("<![CDATA[");
                    out.push_str(data);
                    out.push_str("]]>");
                }
                Node::Markup(markup) => markup.render(out),
            }
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

/// A parsed XML document: markup before the root, the root, markup after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    prolog: Vec<Markup>,
    root: Element,
    epilog: Vec<Markup>,
}

impl Document {
    #[must_use]
    pub fn new(root: Element) -> Self {
        Self {
            prolog: Vec::new(),
            root,
            epilog: Vec::new(),
        }
    }

    /// Parse a raw object body.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedObjectError`] when the bytes are not UTF-8 or not
    /// a well-formed single-rooted XML document.
    pub fn decode(raw: &[u8]) -> Result<Self, MalformedObjectError> {
        let text = std::str::from_utf8(raw)
            .map_err(|e| MalformedObjectError::new(format!("body is not UTF-8: {e}")))?;
        Self::parse(text)
    }

    /// Parse XML text.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedObjectError`] on any well-formedness problem.
    pub fn parse(text: &str) -> Result<Self, MalformedObjectError> {
        let mut reader = Reader::from_str(text);
        let mut builder = TreeBuilder::default();

        loop {
            let event = reader.read_event().map_err(|e| {
                MalformedObjectError::new(format!("at byte {}: {e}", reader.buffer_position()))
            })?;
            match event {
                Event::Start(start) => builder.stack.push(open_element(&start)?),
                Event::Empty(start) => builder.attach(Node::Element(open_element(&start)?))?,
                Event::End(_) => {
                    let el = builder
                        .stack
                        .pop()
                        .ok_or_else(|| MalformedObjectError::new("unexpected closing tag"))?;
                    builder.attach(Node::Element(el))?;
                }
                Event::Text(text) => {
                    let raw = utf8(&text)?;
                    if builder.stack.is_empty() {
                        if raw.trim().is_empty() {
                            continue;
                        }
                        return Err(MalformedObjectError::new("text outside the root element"));
                    }
                    let value = unescape(raw).map_err(|e| {
                        MalformedObjectError::new(format!("bad character reference: {e}"))
                    })?;
                    builder.attach(Node::Text(value.into_owned()))?;
                }
                Event::CData(data) => {
                    builder.attach(Node::CData(utf8(&data)?.to_string()))?;
                }
                Event::Comment(comment) => {
                    builder.attach(Node::Markup(Markup::Comment(utf8(&comment)?.to_string())))?;
                }
                Event::Decl(decl) => {
                    builder.attach(Node::Markup(Markup::Declaration(utf8(&decl)?.to_string())))?;
                }
                Event::PI(instruction) => {
                    builder.attach(Node::Markup(Markup::Instruction(
                        utf8(&instruction)?.to_string(),
                    )))?;
                }
                Event::DocType(doctype) => {
                    builder.attach(Node::Markup(Markup::DocType(
                        utf8(&doctype)?.trim().to_string(),
                    )))?;
                }
                Event::Eof => break,
            }
        }

        builder.finish()
    }

    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// See [`Element::find`]; searches below the root.
    #[must_use]
    pub fn find(&self, path: &[&str]) -> Option<&Element> {
        self.root.find(path)
    }

    pub fn find_mut(&mut self, path: &[&str]) -> Option<&mut Element> {
        self.root.find_mut(path)
    }

    /// Serialize to XML text.
    #[must_use]
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        for markup in &self.prolog {
            markup.render(&mut out);
            out.push('\n');
        }
        self.root.render(&mut out);
        for markup in &self.epilog {
            out.push('\n');
            markup.render(&mut out);
        }
        out
    }

    /// Serialize to the wire representation (UTF-8 bytes).
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        self.to_xml().into_bytes()
    }
}

#[derive(Default)]
struct TreeBuilder {
    prolog: Vec<Markup>,
    root: Option<Element>,
    epilog: Vec<Markup>,
    stack: Vec<Element>,
}

impl TreeBuilder {
    fn attach(&mut self, node: Node) -> Result<(), MalformedObjectError> {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
            return Ok(());
        }
        match node {
            Node::Element(el) => {
                if self.root.is_some() {
                    return Err(MalformedObjectError::new("more than one root element"));
                }
                self.root = Some(el);
            }
            Node::Markup(markup) if self.root.is_none() => self.prolog.push(markup),
            Node::Markup(markup) => self.epilog.push(markup),
            Node::Text(_) | Node::CData(_) => {
                return Err(MalformedObjectError::new("character data outside the root element"));
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<Document, MalformedObjectError> {
        if let Some(open) = self.stack.last() {
            return Err(MalformedObjectError::new(format!(
                "element <{}> is never closed",
                open.name
            )));
        }
        let root = self
            .root
            .ok_or_else(|| MalformedObjectError::new("document has no root element"))?;
        Ok(Document {
            prolog: self.prolog,
            root,
            epilog: self.epilog,
        })
    }
}

fn open_element(start: &BytesStart<'_>) -> Result<Element, MalformedObjectError> {
    let name = utf8(start.name().as_ref())?.to_string();
    let mut el = Element::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| {
            MalformedObjectError::new(format!("bad attribute on <{}>: {e}", el.name))
        })?;
        let key = utf8(attr.key.as_ref())?.to_string();
        let value = unescape(utf8(&attr.value)?)
            .map_err(|e| MalformedObjectError::new(format!("bad attribute value '{key}': {e}")))?
            .into_owned();
        el.attributes.push((key, value));
    }
    Ok(el)
}

fn utf8(bytes: &[u8]) -> Result<&str, MalformedObjectError> {
    std::str::from_utf8(bytes).map_err(|e| MalformedObjectError::new(format!("invalid UTF-8: {e}")))
}

/// Attribute value escaping. Whitespace other than a plain space is
/// written as a character reference, or a reader would normalize it.
fn escape_attribute(value: &str) -> String {
    escape(value)
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
        .replace('\t', "&#9;")
}

/// Character data escaping. A literal CR would be read back as LF.
fn escape_text(text: &str) -> String {
    partial_escape(text).replace('\r', "&#13;")
}
