pub mod agent;
pub mod catalog;

pub use agent::{AgentReportRow, AgentStatus, EnableRow, ModifyRow, StatusDetails, SubjectAreaRow};
pub use catalog::{
    AGENT_SIGNATURE, ANALYSIS_SIGNATURE, CatalogEntry, CatalogPath, CatalogPathError, ItemKind,
};
