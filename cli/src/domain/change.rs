//! Change rows: what one line of an input file asks the batch to do.

use oas_common::{CatalogPath, EnableRow, ModifyRow};

use crate::domain::agent::{replace_email_recipients, replace_specific_recipients, set_run_as};
use crate::domain::document::Document;
use crate::domain::error::PatchTargetMissingError;

/// Split a comma-joined cell into trimmed, non-empty entries.
#[must_use]
pub fn split_list(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Replacement delivery lists for an agent.
///
/// The two lists are replaced together: a row naming only email addresses
/// also clears the specific recipients, and vice versa.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientChange {
    pub specific: Vec<String>,
    pub email: Vec<String>,
}

/// Patches requested by one modify row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentChange {
    /// `None` leaves the current run-as identity untouched.
    pub run_as: Option<String>,
    /// `None` leaves both recipient lists untouched.
    pub recipients: Option<RecipientChange>,
}

impl AgentChange {
    #[must_use]
    pub fn from_row(row: &ModifyRow) -> Self {
        let run_as = Some(row.run_as.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let specific = split_list(&row.specific_recipients);
        let email = split_list(&row.email_recipients);
        let recipients =
            (!specific.is_empty() || !email.is_empty()).then_some(RecipientChange { specific, email });

        Self { run_as, recipients }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.run_as.is_none() && self.recipients.is_none()
    }

    /// Apply every requested patch; stops at the first missing target.
    ///
    /// # Errors
    ///
    /// Returns the first [`PatchTargetMissingError`]. The caller must not
    /// write the document back in that case.
    pub fn apply(&self, doc: &mut Document) -> Result<(), PatchTargetMissingError> {
        if let Some(identity) = &self.run_as {
            set_run_as(doc, identity)?;
        }
        if let Some(recipients) = &self.recipients {
            replace_specific_recipients(doc, &recipients.specific)?;
            replace_email_recipients(doc, &recipients.email)?;
        }
        Ok(())
    }
}

/// What a row asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeKind {
    SetEnabled(bool),
    Modify(AgentChange),
}

/// One validated input row: the unit of work for the batch driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRow {
    pub path: CatalogPath,
    pub kind: ChangeKind,
}

impl ChangeRow {
    /// # Errors
    ///
    /// Returns a reason string when the path is not a valid catalog path.
    pub fn from_enable(row: &EnableRow) -> Result<Self, String> {
        let path = CatalogPath::parse(&row.path).map_err(|e| e.to_string())?;
        Ok(Self {
            path,
            kind: ChangeKind::SetEnabled(row.enabled()),
        })
    }

    /// # Errors
    ///
    /// Returns a reason string when the path is not a valid catalog path.
    pub fn from_modify(row: &ModifyRow) -> Result<Self, String> {
        let path = CatalogPath::parse(&row.path).map_err(|e| e.to_string())?;
        Ok(Self {
            path,
            kind: ChangeKind::Modify(AgentChange::from_row(row)),
        })
    }
}
