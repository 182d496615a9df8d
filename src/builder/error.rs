//! Build errors for the list controller builder.

use thiserror::Error;

/// A builder step that must be taken before `build()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Requirement {
    #[error("view not specified. Call .view(view)")]
    View,

    #[error("merge strategy not specified. Call .merge(f)")]
    Merge,

    #[error("pagination predicate not specified. Call .has_more(f)")]
    HasMore,

    #[error("error classifier not specified. Call .classify(f) or .classify_by_trait()")]
    Classify,
}

/// Errors that can occur when building a list controller.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{} builder step(s) missing: {}", .0.len(), join(.0))]
    Missing(Vec<Requirement>),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

fn join(requirements: &[Requirement]) -> String {
    requirements
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
