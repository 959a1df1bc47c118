//! Catalog traversal against an in-memory catalog.

use oas_cli::application::services::catalog_walk::traverse;
use oas_common::{AGENT_SIGNATURE, ANALYSIS_SIGNATURE};

use crate::fakes::{Call, FakeAnalytics, folder, leaf, token};

fn sample_tree() -> FakeAnalytics {
    FakeAnalytics::new()
        .folder("/shared", vec![folder("/shared/F1"), folder("/shared/F2")])
        .folder("/shared/F1", vec![leaf("/shared/F1/agentA", AGENT_SIGNATURE)])
        .folder(
            "/shared/F2",
            vec![leaf("/shared/F2/analysisB", ANALYSIS_SIGNATURE)],
        )
}

#[test]
fn test_traverse_filters_by_signature() {
    let api = sample_tree();
    let walk = traverse(&api, &token(), "/shared", AGENT_SIGNATURE);
    assert_eq!(walk.paths(), ["/shared/F1/agentA"]);
    assert!(walk.is_complete());
}

#[test]
fn test_traverse_lists_each_folder_once_in_pre_order() {
    let api = sample_tree();
    traverse(&api, &token(), "/shared", ANALYSIS_SIGNATURE);
    assert_eq!(
        api.calls(),
        [
            Call::List("/shared".to_string()),
            Call::List("/shared/F1".to_string()),
            Call::List("/shared/F2".to_string()),
        ]
    );
}

#[test]
fn test_traverse_preserves_listing_order() {
    let api = FakeAnalytics::new()
        .folder(
            "/shared",
            vec![
                leaf("/shared/Z", AGENT_SIGNATURE),
                folder("/shared/Sub"),
                leaf("/shared/A", AGENT_SIGNATURE),
            ],
        )
        .folder("/shared/Sub", vec![leaf("/shared/Sub/M", AGENT_SIGNATURE)]);
    let walk = traverse(&api, &token(), "/shared", AGENT_SIGNATURE);
    assert_eq!(walk.paths(), ["/shared/Z", "/shared/Sub/M", "/shared/A"]);
}

#[test]
fn test_failed_folder_skips_subtree_only() {
    let api = sample_tree()
        .folder(
            "/shared/F2",
            vec![folder("/shared/F2/Deep"), leaf("/shared/F2/agentC", AGENT_SIGNATURE)],
        )
        .folder("/shared/F2/Deep", vec![leaf("/shared/F2/Deep/agentD", AGENT_SIGNATURE)])
        .failing("list", "/shared/F1");

    let walk = traverse(&api, &token(), "/shared", AGENT_SIGNATURE);
    assert_eq!(walk.paths(), ["/shared/F2/Deep/agentD", "/shared/F2/agentC"]);
    assert!(!walk.is_complete());
    assert_eq!(walk.failures.len(), 1);
    assert_eq!(walk.failures[0].folder, "/shared/F1");
}

#[test]
fn test_failed_root_yields_empty_walk() {
    let api = sample_tree().failing("list", "/shared");
    let walk = traverse(&api, &token(), "/shared", AGENT_SIGNATURE);
    assert!(walk.entries.is_empty());
    assert_eq!(walk.failures.len(), 1);
}

#[test]
fn test_folder_reported_twice_is_listed_once() {
    let api = FakeAnalytics::new()
        .folder("/shared", vec![folder("/shared/Loop"), folder("/shared/Loop")])
        .folder("/shared/Loop", vec![leaf("/shared/Loop/agent", AGENT_SIGNATURE)]);
    let walk = traverse(&api, &token(), "/shared", AGENT_SIGNATURE);
    assert_eq!(walk.paths(), ["/shared/Loop/agent"]);
    let listings = api
        .calls()
        .iter()
        .filter(|c| **c == Call::List("/shared/Loop".to_string()))
        .count();
    assert_eq!(listings, 1);
}

#[test]
fn test_second_traversal_reissues_listings() {
    let api = sample_tree();
    traverse(&api, &token(), "/shared", AGENT_SIGNATURE);
    traverse(&api, &token(), "/shared", AGENT_SIGNATURE);
    assert_eq!(api.calls().len(), 6);
}
