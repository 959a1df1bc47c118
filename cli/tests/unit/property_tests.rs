//! Property-based tests for the document codec and backup paths.

use oas_cli::domain::backup::snapshot_relative_path;
use oas_cli::domain::{Document, Element};
use oas_common::CatalogPath;
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]([A-Za-z0-9 _-]{0,10}[A-Za-z0-9])?"
}

proptest! {
    /// Parsing re-serialized output reproduces the same tree.
    #[test]
    fn prop_document_reparse_is_stable(
        run_as in "[A-Za-z0-9@._ <>&\"']{0,24}",
        recipients in proptest::collection::vec("[A-Za-z0-9@.]{1,16}", 0..5),
    ) {
        let mut container = Element::new("saw:specificRecipients");
        for name in &recipients {
            container.push_element(
                Element::new("saw:user")
                    .with_attribute("name", name)
                    .with_attribute("guid", name),
            );
        }
        let root = Element::new("saw:ibot")
            .with_attribute("xmlns:saw", "com.siebel.analytics.web/report/v1.1")
            .with_child(
                Element::new("saw:dataVisibility").with_attribute("runAs", &run_as),
            )
            .with_child(Element::new("saw:recipients").with_child(container));
        let doc = Document::new(root);

        let reparsed = Document::parse(&doc.to_xml()).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(&reparsed, &doc);
        prop_assert_eq!(reparsed.to_xml(), doc.to_xml());
    }

    /// Snapshot files mirror the folder chain and never escape the run directory.
    #[test]
    fn prop_snapshot_path_mirrors_folders(segments in proptest::collection::vec(segment(), 1..6)) {
        let raw = format!("/{}", segments.join("/"));
        let path = CatalogPath::parse(&raw).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let relative = snapshot_relative_path(&path);

        prop_assert!(relative.is_relative());
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        prop_assert_eq!(parts.len(), segments.len());
        prop_assert_eq!(&parts[..parts.len() - 1], &segments[..segments.len() - 1]);
        let last = segments.last().map(|s| format!("{s}.snapshot")).unwrap_or_default();
        prop_assert_eq!(parts.last().cloned().unwrap_or_default(), last);
    }
}
