use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the cityroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Unknown cities and disconnected endpoints are not errors; the route
/// facade reports them through [`crate::RouteOutcome`]. Everything here is an
/// internal or environmental failure.
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// The dataset file parsed as JSON but does not describe a usable graph.
    #[error("invalid dataset: {message}")]
    InvalidDataset { message: String },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the dataset location")]
    ProjectDirsUnavailable,

    /// Raised when a successful search produced an empty path.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Raised when the activity collaborator rejected a record.
    #[error("activity sink failed: {message}")]
    ActivitySink { message: String },

    /// Wrapper for JSON decoding and encoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Render fuzzy suggestions as a trailing sentence, or nothing when empty.
pub(crate) fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(" Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            " Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
