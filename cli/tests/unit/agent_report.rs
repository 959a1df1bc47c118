//! Agent status report and analysis inventory services.

#![allow(clippy::expect_used)]

use oas_cli::application::ports::SilentProgress;
use oas_cli::application::services::{report, subject_areas};
use oas_common::{AGENT_SIGNATURE, ANALYSIS_SIGNATURE, AgentStatus};

use crate::fakes::{AGENT_XML, Call, FakeAnalytics, analysis_xml, folder, leaf, token};

fn enabled_status() -> AgentStatus {
    AgentStatus {
        last_run: Some("2025-01-01T06:00:00".to_string()),
        agent_enabled: Some("true".to_string()),
        priority: Some("normal".to_string()),
        ..AgentStatus::default()
    }
}

fn agents() -> FakeAnalytics {
    FakeAnalytics::new()
        .folder(
            "/shared",
            vec![
                leaf("/shared/A", AGENT_SIGNATURE),
                folder("/shared/Sub"),
                leaf("/shared/Report", ANALYSIS_SIGNATURE),
            ],
        )
        .folder("/shared/Sub", vec![leaf("/shared/Sub/B", AGENT_SIGNATURE)])
        .object("/shared/A", AGENT_XML)
        .object("/shared/Sub/B", AGENT_XML)
        .status("/shared/A", enabled_status())
        .status("/shared/Sub/B", AgentStatus::default())
}

// ── Agent report ──────────────────────────────────────────────────────────────

#[test]
fn test_report_rows_follow_traversal_order() {
    let api = agents();
    let built = report::build(&api, &token(), "/shared", false, &SilentProgress);
    let paths: Vec<_> = built.rows.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, ["/shared/A", "/shared/Sub/B"]);
    assert_eq!(built.rows[0].status, enabled_status());
    assert!(built.rows.iter().all(|r| r.details.is_none()));
    assert_eq!(built.summary.applied, 2);
}

#[test]
fn test_report_without_details_never_reads_objects() {
    let api = agents();
    report::build(&api, &token(), "/shared", false, &SilentProgress);
    assert!(!api.calls().iter().any(|c| matches!(c, Call::Read(_))));
}

#[test]
fn test_report_details_carry_run_as_and_recipients() {
    let api = agents();
    let built = report::build(&api, &token(), "/shared", true, &SilentProgress);
    let details = built.rows[0].details.as_ref().expect("details");
    assert_eq!(details.run_as.as_deref(), Some("olduser"));
    assert_eq!(details.specific_recipients, "alice");
    assert_eq!(details.email_recipients, "old@example.com");
}

#[test]
fn test_status_failure_omits_agent_and_counts_it() {
    let api = agents().failing("status", "/shared/A");
    let built = report::build(&api, &token(), "/shared", false, &SilentProgress);
    let paths: Vec<_> = built.rows.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, ["/shared/Sub/B"]);
    assert_eq!(built.summary.failed, 1);
    assert_eq!(built.summary.failures[0].kind, "status");
}

#[test]
fn test_detail_failure_keeps_row_with_empty_details() {
    let api = agents().failing("read", "/shared/Sub/B");
    let built = report::build(&api, &token(), "/shared", true, &SilentProgress);
    assert_eq!(built.rows.len(), 2);
    assert!(built.rows[0].details.is_some());
    assert!(built.rows[1].details.is_none());
    assert_eq!(built.summary.failed, 0);
}

#[test]
fn test_unlisted_folder_is_reported_in_summary() {
    let api = agents().failing("list", "/shared/Sub");
    let built = report::build(&api, &token(), "/shared", false, &SilentProgress);
    assert_eq!(built.rows.len(), 1);
    assert_eq!(built.summary.unlisted_folders[0].path, "/shared/Sub");
}

// ── Subject-area inventory ────────────────────────────────────────────────────

fn analyses() -> FakeAnalytics {
    FakeAnalytics::new()
        .folder(
            "/shared",
            vec![
                leaf("/shared/Sales", ANALYSIS_SIGNATURE),
                leaf("/shared/Loose", ANALYSIS_SIGNATURE),
                leaf("/shared/Agent", AGENT_SIGNATURE),
            ],
        )
        .object("/shared/Sales", &analysis_xml(Some("&quot;Sales - CRM&quot;")))
        .object("/shared/Loose", &analysis_xml(None))
}

#[test]
fn test_inventory_reports_subject_area_or_placeholder() {
    let api = analyses();
    let inventory = subject_areas::build(&api, &token(), "/shared", &SilentProgress);
    let rows: Vec<_> = inventory
        .rows
        .iter()
        .map(|r| (r.analysis.as_str(), r.subject_area.as_str()))
        .collect();
    assert_eq!(
        rows,
        [("/shared/Sales", "\"Sales - CRM\""), ("/shared/Loose", "N/A")]
    );
}

#[test]
fn test_inventory_skips_unreadable_analysis() {
    let api = analyses().failing("read", "/shared/Sales");
    let inventory = subject_areas::build(&api, &token(), "/shared", &SilentProgress);
    assert_eq!(inventory.rows.len(), 1);
    assert_eq!(inventory.rows[0].analysis, "/shared/Loose");
    assert_eq!(inventory.summary.failures[0].kind, "read");
}
