//! Typed reads and in-place patches of agent and analysis definitions.
//!
//! Every patch edits an element that already exists in the source
//! document. A missing target is reported as [`PatchTargetMissingError`];
//! structure is never created to make a patch succeed.

use oas_common::StatusDetails;

use crate::domain::document::{Document, Element, qualify};
use crate::domain::error::{PatchTarget, PatchTargetMissingError};

const DATA_VISIBILITY: &[&str] = &["dataVisibility"];
const SPECIFIC_RECIPIENTS: &[&str] = &["recipients", "specificRecipients"];
const EMAIL_RECIPIENTS: &[&str] = &["emailRecipients"];
const CRITERIA: &[&str] = &["criteria"];

/// Delivery type written on every email recipient.
pub const EMAIL_DELIVERY_TYPE: &str = "HTML";

/// Value reported for analyses whose criteria carry no subject area.
pub const SUBJECT_AREA_UNKNOWN: &str = "N/A";

/// Run-as identity and recipient lists of an agent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentDefinition {
    pub run_as: Option<String>,
    pub specific_recipients: Vec<String>,
    pub email_recipients: Vec<String>,
}

impl AgentDefinition {
    #[must_use]
    pub fn from_document(doc: &Document) -> Self {
        let run_as = find_run_as_node(doc)
            .and_then(|node| node.attribute("runAs"))
            .map(str::to_string);

        let specific_recipients = doc
            .find(SPECIFIC_RECIPIENTS)
            .map(|container| {
                container
                    .elements()
                    .filter_map(|el| el.attribute("name"))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let email_recipients = doc
            .find(EMAIL_RECIPIENTS)
            .map(|container| {
                container
                    .elements()
                    .filter_map(|el| el.attribute("address"))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            run_as,
            specific_recipients,
            email_recipients,
        }
    }
}

/// The data-visibility element, under whatever prefix the document uses.
#[must_use]
pub fn find_run_as_node(doc: &Document) -> Option<&Element> {
    doc.find(DATA_VISIBILITY)
}

/// Set `runAs` and the parallel `runAsGuid` attribute.
///
/// # Errors
///
/// Fails when the document has no data-visibility element.
pub fn set_run_as(doc: &mut Document, identity: &str) -> Result<(), PatchTargetMissingError> {
    let node = doc
        .find_mut(DATA_VISIBILITY)
        .ok_or(PatchTargetMissingError(PatchTarget::DataVisibility))?;
    node.set_attribute("runAs", identity);
    node.set_attribute("runAsGuid", identity);
    Ok(())
}

/// Replace every child of `recipients/specificRecipients` with one `user`
/// element per name, in order. The display name doubles as the guid.
///
/// # Errors
///
/// Fails when the container is absent.
pub fn replace_specific_recipients(
    doc: &mut Document,
    names: &[String],
) -> Result<(), PatchTargetMissingError> {
    let container = doc
        .find_mut(SPECIFIC_RECIPIENTS)
        .ok_or(PatchTargetMissingError(PatchTarget::SpecificRecipients))?;
    let tag = qualify(container.prefix(), "user");
    container.clear_children();
    for name in names {
        container.push_element(
            Element::new(tag.clone())
                .with_attribute("name", name)
                .with_attribute("guid", name),
        );
    }
    Ok(())
}

/// Replace every child of `emailRecipients` with one `emailRecipient` per
/// address, each typed [`EMAIL_DELIVERY_TYPE`].
///
/// # Errors
///
/// Fails when the container is absent.
pub fn replace_email_recipients(
    doc: &mut Document,
    addresses: &[String],
) -> Result<(), PatchTargetMissingError> {
    let container = doc
        .find_mut(EMAIL_RECIPIENTS)
        .ok_or(PatchTargetMissingError(PatchTarget::EmailRecipients))?;
    let tag = qualify(container.prefix(), "emailRecipient");
    container.clear_children();
    for address in addresses {
        container.push_element(
            Element::new(tag.clone())
                .with_attribute("address", address)
                .with_attribute("type", EMAIL_DELIVERY_TYPE),
        );
    }
    Ok(())
}

/// `subjectArea` of the criteria element of an analysis.
#[must_use]
pub fn extract_subject_area(doc: &Document) -> Option<String> {
    doc.find(CRITERIA)
        .and_then(|criteria| criteria.attribute("subjectArea"))
        .map(str::to_string)
}

/// Report view of an agent: run-as plus comma-joined recipient lists.
#[must_use]
pub fn extract_status_details(doc: &Document) -> StatusDetails {
    let definition = AgentDefinition::from_document(doc);
    StatusDetails {
        run_as: definition.run_as,
        specific_recipients: definition.specific_recipients.join(","),
        email_recipients: definition.email_recipients.join(","),
    }
}
