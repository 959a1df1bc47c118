use serde::{Deserialize, Serialize};

/// Read-only status snapshot of a scheduled agent as reported by the service.
///
/// Values are kept as the service renders them; absent values stay `None`
/// and render as empty CSV cells.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AgentStatus {
    pub last_run: Option<String>,
    pub next_run: Option<String>,
    pub last_run_status: Option<String>,
    pub priority: Option<String>,
    pub agent_enabled: Option<String>,
    pub subscribed: Option<String>,
    pub specific_recipient: Option<String>,
}

/// Run-as and recipient details read from an agent definition.
///
/// Recipient lists are comma-joined; an empty list is an empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusDetails {
    pub run_as: Option<String>,
    pub specific_recipients: String,
    pub email_recipients: String,
}

/// One row of the enable/disable input file (`path,agentEnabled`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnableRow {
    pub path: String,
    #[serde(rename = "agentEnabled")]
    pub agent_enabled: String,
}

impl EnableRow {
    /// Only the literal `true` (any case, surrounding whitespace ignored)
    /// enables; every other value disables.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.agent_enabled.trim().eq_ignore_ascii_case("true")
    }
}

/// One row of the modify input file
/// (`path,runAs,specificRecipients,emailRecipients`).
///
/// Empty cells and missing columns both read as an empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModifyRow {
    pub path: String,
    #[serde(rename = "runAs", default)]
    pub run_as: String,
    #[serde(rename = "specificRecipients", default)]
    pub specific_recipients: String,
    #[serde(rename = "emailRecipients", default)]
    pub email_recipients: String,
}

/// One row of the agent status report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentReportRow {
    pub path: String,
    pub status: AgentStatus,
    /// `None` when details were not requested or could not be read.
    pub details: Option<StatusDetails>,
}

impl AgentReportRow {
    pub const STATUS_COLUMNS: [&'static str; 8] = [
        "path",
        "lastRun",
        "nextRun",
        "lastRunStatus",
        "priority",
        "agentEnabled",
        "subscribed",
        "specificRecipient",
    ];

    pub const DETAIL_COLUMNS: [&'static str; 3] = ["runAs", "specificRecipients", "emailRecipients"];

    /// Report header; detail columns are present only when requested.
    #[must_use]
    pub fn header(with_details: bool) -> Vec<&'static str> {
        let mut columns = Self::STATUS_COLUMNS.to_vec();
        if with_details {
            columns.extend(Self::DETAIL_COLUMNS);
        }
        columns
    }

    /// Cells in header order.
    #[must_use]
    pub fn record(&self, with_details: bool) -> Vec<String> {
        let cell = |v: &Option<String>| v.clone().unwrap_or_default();
        let mut cells = vec![
            self.path.clone(),
            cell(&self.status.last_run),
            cell(&self.status.next_run),
            cell(&self.status.last_run_status),
            cell(&self.status.priority),
            cell(&self.status.agent_enabled),
            cell(&self.status.subscribed),
            cell(&self.status.specific_recipient),
        ];
        if with_details {
            let details = self.details.clone().unwrap_or_default();
            cells.push(details.run_as.unwrap_or_default());
            cells.push(details.specific_recipients);
            cells.push(details.email_recipients);
        }
        cells
    }
}

/// One row of the analysis subject-area inventory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubjectAreaRow {
    #[serde(rename = "Analysis")]
    pub analysis: String,
    #[serde(rename = "Subject Area")]
    pub subject_area: String,
}
