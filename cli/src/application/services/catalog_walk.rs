//! Recursive catalog traversal with folder-level failure isolation.

use std::collections::HashSet;

use oas_common::CatalogEntry;

use crate::application::ports::{CatalogApi, SessionToken};
use crate::domain::TraversalError;

/// Result of one traversal.
///
/// `entries` holds matching leaves in depth-first pre-order; `failures`
/// lists every folder whose listing failed (and whose subtree is absent
/// from `entries`).
#[derive(Debug, Default)]
pub struct Walk {
    pub entries: Vec<CatalogEntry>,
    pub failures: Vec<TraversalError>,
}

impl Walk {
    /// True when every reachable folder was listed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.path.as_str()).collect()
    }
}

/// Enumerate leaves under `root` whose signature equals `wanted_signature`.
///
/// Each folder is listed at most once, even if the service reports it
/// twice. Calling this again re-issues every listing.
pub fn traverse<A: CatalogApi + ?Sized>(
    api: &A,
    token: &SessionToken,
    root: &str,
    wanted_signature: &str,
) -> Walk {
    let mut walker = Walker {
        api,
        token,
        wanted_signature,
        visited: HashSet::new(),
        walk: Walk::default(),
    };
    walker.visit(root);
    tracing::info!(
        root,
        signature = wanted_signature,
        found = walker.walk.entries.len(),
        folders = walker.visited.len(),
        failed_folders = walker.walk.failures.len(),
        "Traversal finished"
    );
    walker.walk
}

struct Walker<'a, A: ?Sized> {
    api: &'a A,
    token: &'a SessionToken,
    wanted_signature: &'a str,
    visited: HashSet<String>,
    walk: Walk,
}

impl<A: CatalogApi + ?Sized> Walker<'_, A> {
    fn visit(&mut self, folder: &str) {
        if !self.visited.insert(folder.to_string()) {
            tracing::debug!(folder, "already visited; skipping");
            return;
        }
        tracing::debug!(folder, "listing folder");

        let children = match self.api.list_children(folder, self.token) {
            Ok(children) => children,
            Err(source) => {
                tracing::warn!(folder, error = %source, "Cannot list folder; skipping subtree");
                self.walk.failures.push(TraversalError {
                    folder: folder.to_string(),
                    source,
                });
                return;
            }
        };

        for child in children {
            if child.is_folder() {
                self.visit(&child.path);
            } else if child.signature == self.wanted_signature {
                tracing::debug!(path = %child.path, "matched");
                self.walk.entries.push(child);
            }
        }
    }
}
