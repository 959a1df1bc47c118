//! Terminal stylesheet.
//!
//! Every field is a plain `Style` until [`Styles::colored`] is chosen, so
//! callers style unconditionally and `--no-color` costs nothing.

use owo_colors::Style;

#[derive(Default, Clone)]
pub struct Styles {
    /// Applied items and completed steps.
    pub success: Style,
    /// Skipped items and unlisted folders.
    pub warning: Style,
    /// Failed items and setup errors.
    pub error: Style,
    pub info: Style,
    /// Labels and progress arrows.
    pub dim: Style,
    pub header: Style,
    /// Catalog paths inside messages.
    pub catalog_path: Style,
    /// Failure kind tags such as `[write]`.
    pub failure_kind: Style,
}

impl Styles {
    /// No escape codes at all.
    #[must_use]
    pub fn plain() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn colored() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red(),
            info: Style::new().blue(),
            dim: Style::new().dimmed(),
            header: Style::new().bold().cyan(),
            catalog_path: Style::new().bold(),
            failure_kind: Style::new().magenta(),
        }
    }
}
