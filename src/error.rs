use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a chart from being produced
///
/// None of these are retried. A failure only affects the chart that was
/// being built; the rest of the page is still rendered.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("workbook not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("`{}` is not a readable workbook: {message}", .path.display())]
    InvalidFormat { path: PathBuf, message: String },

    #[error("sheet `{sheet}` does not exist in `{}`", .path.display())]
    SheetNotFound { path: PathBuf, sheet: String },

    #[error("unknown selection `{0}`")]
    UnknownCategory(String),

    #[error("unknown scenario `{sub_scenario}` for `{category}`")]
    UnknownSubScenario {
        category: String,
        sub_scenario: String,
    },

    #[error("malformed layout: {0}")]
    MalformedLayout(String),

    #[error("missing query parameter `{0}`")]
    MissingParameter(&'static str),

    #[error("failed to render chart: {0}")]
    Render(String),

    #[error("failed to render page: {0}")]
    Template(String),
}

impl DashboardError {
    /// True when the error comes from a selection or sheet name that does
    /// not exist, as opposed to broken data.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DashboardError::FileNotFound(_)
                | DashboardError::SheetNotFound { .. }
                | DashboardError::UnknownCategory(_)
                | DashboardError::UnknownSubScenario { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
