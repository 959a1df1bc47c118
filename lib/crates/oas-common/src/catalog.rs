use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Signature carried by scheduled agent (iBot) objects.
pub const AGENT_SIGNATURE: &str = "coibot1";

/// Signature carried by analysis (query item) objects.
pub const ANALYSIS_SIGNATURE: &str = "queryitem1";

/// Whether a catalog entry can be descended into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Folder,
    Leaf,
}

impl ItemKind {
    /// Classify the `type` reported by a catalog listing.
    ///
    /// Only `Folder` is descended into; objects, links and anything the
    /// service adds later are leaves.
    #[must_use]
    pub fn from_item_type(item_type: &str) -> Self {
        if item_type == "Folder" {
            Self::Folder
        } else {
            Self::Leaf
        }
    }
}

/// One entry of a catalog listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    pub path: String,
    pub kind: ItemKind,
    /// Type tag distinguishing leaf kinds, e.g. [`AGENT_SIGNATURE`].
    #[serde(default)]
    pub signature: String,
}

impl CatalogEntry {
    #[must_use]
    pub fn is_folder(&self) -> bool {
        self.kind == ItemKind::Folder
    }
}

/// Reasons a string is not usable as an absolute catalog path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogPathError {
    #[error("catalog path is empty")]
    Empty,

    #[error("catalog path '{0}' must start with '/'")]
    NotAbsolute(String),

    #[error("catalog path '{0}' contains an empty segment")]
    EmptySegment(String),

    #[error("catalog path '{0}' contains a relative segment ('.' or '..')")]
    RelativeSegment(String),
}

/// A validated absolute catalog path such as `/shared/Sales/Daily Agent`.
///
/// Segments are separated by `/`; a literal slash inside a name is escaped
/// as `\/` the way the catalog itself reports it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogPath {
    raw: String,
    segments: Vec<String>,
}

impl CatalogPath {
    /// Parse and validate an absolute catalog path.
    pub fn parse(raw: &str) -> Result<Self, CatalogPathError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CatalogPathError::Empty);
        }
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Err(CatalogPathError::NotAbsolute(trimmed.to_string()));
        };

        let segments = split_segments(rest);
        if segments.iter().any(String::is_empty) {
            return Err(CatalogPathError::EmptySegment(trimmed.to_string()));
        }
        if segments.iter().any(|s| s == "." || s == "..") {
            return Err(CatalogPathError::RelativeSegment(trimmed.to_string()));
        }

        Ok(Self {
            raw: trimmed.to_string(),
            segments,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Unescaped path segments, root first.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Unescaped name of the final segment.
    #[must_use]
    pub fn name(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    /// Unescaped folder segments above the final one.
    #[must_use]
    pub fn folders(&self) -> &[String] {
        &self.segments[..self.segments.len().saturating_sub(1)]
    }
}

impl fmt::Display for CatalogPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Split on unescaped `/`, resolving `\x` escapes to `x`.
fn split_segments(rest: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = rest.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            '/' => segments.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    segments.push(current);
    segments
}
