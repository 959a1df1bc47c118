//! SOAP 1.1 envelopes, built and read with the catalog document codec.

use crate::domain::RemoteError;
use crate::domain::document::{Document, Element, Node};

pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const SERVICE_NS: &str = "urn://oracle.bi.webservices/v6";

const SERVICE_PREFIX: &str = "v6";

/// Request parameter `<v6:name>value</v6:name>`.
#[must_use]
pub fn param(name: &str, value: &str) -> Element {
    let el = Element::new(format!("{SERVICE_PREFIX}:{name}"));
    if value.is_empty() { el } else { el.with_text(value) }
}

/// Boolean request parameter.
#[must_use]
pub fn flag(name: &str, value: bool) -> Element {
    param(name, if value { "true" } else { "false" })
}

/// Parameter wrapping child parameters, e.g. a `CatalogObject`.
#[must_use]
pub fn nested(name: &str, children: Vec<Element>) -> Element {
    children
        .into_iter()
        .fold(Element::new(format!("{SERVICE_PREFIX}:{name}")), Element::with_child)
}

/// Full request envelope for `operation`.
#[must_use]
pub fn request(operation: &str, params: Vec<Element>) -> String {
    let call = nested(operation, params);
    let envelope = Element::new("soapenv:Envelope")
        .with_attribute("xmlns:soapenv", SOAP_ENVELOPE_NS)
        .with_attribute(&format!("xmlns:{SERVICE_PREFIX}"), SERVICE_NS)
        .with_child(Element::new("soapenv:Header"))
        .with_child(Element::new("soapenv:Body").with_child(call));
    Document::new(envelope).to_xml()
}

/// The first element inside `Body`: the operation result.
///
/// # Errors
///
/// [`RemoteError::Fault`] when the body holds a SOAP fault,
/// [`RemoteError::UnexpectedResponse`] when the text is not an envelope.
pub fn response_payload(operation: &str, text: &str) -> Result<Element, RemoteError> {
    let unexpected = |reason: String| RemoteError::UnexpectedResponse {
        operation: operation.to_string(),
        reason,
    };
    let doc = Document::parse(text).map_err(|e| unexpected(e.to_string()))?;
    if doc.root().local_name() != "Envelope" {
        return Err(unexpected(format!(
            "root element is <{}>, not a SOAP envelope",
            doc.root().name()
        )));
    }
    let body = doc
        .root()
        .child("Body")
        .ok_or_else(|| unexpected("envelope has no Body".to_string()))?;
    let payload = body
        .elements()
        .next()
        .ok_or_else(|| unexpected("Body is empty".to_string()))?;

    if payload.local_name() == "Fault" {
        return Err(fault(payload));
    }
    Ok(payload.clone())
}

fn fault(el: &Element) -> RemoteError {
    let code = el
        .child_text("faultcode")
        .map(|c| c.trim().to_string())
        .unwrap_or_default();
    let message = el
        .child_text("faultstring")
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "no fault description".to_string());
    RemoteError::Fault { code, message }
}

/// Text of the first descendant named `local`, trimmed.
#[must_use]
pub fn field(el: &Element, local: &str) -> Option<String> {
    el.find_all(local)
        .first()
        .map(|found| found.text().trim().to_string())
}

/// All text below `el`, in document order.
#[must_use]
pub fn deep_text(el: &Element) -> String {
    let mut out = String::new();
    for node in el.children() {
        match node {
            Node::Text(text) | Node::CData(text) => out.push_str(text),
            Node::Element(child) => out.push_str(&deep_text(child)),
            Node::Markup(_) => {}
        }
    }
    out
}
