use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a route tree
///
/// Matching never fails with an error: an unmatched path is `None`.
#[derive(Debug, Error)]
pub enum RouteError {
    /// More than one grouping directory under one parent can close a match
    #[error("ambiguous routes at {at}: {} all resolve the same URL", .branches.join(", "))]
    Ambiguous { at: String, branches: Vec<String> },

    /// Two dynamic directories compete for the same singleton child
    #[error("conflicting dynamic segments at {at}: {existing} and {found}")]
    ConflictingSegment {
        at: String,
        existing: String,
        found: String,
    },

    /// The filesystem port failed
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Invalid build configuration
    #[error("invalid route configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RouteError>;
