//! Reference resolution error types.

use std::path::PathBuf;

use fsbuild_project::ProjectError;

/// Errors that can occur while resolving references.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Assembly metadata could not be read for facade detection.
    #[error("cannot read assembly metadata from {}: {detail}", path.display())]
    Metadata { path: PathBuf, detail: String },

    /// The facade directory could not be listed.
    #[error("cannot list facade directory {}: {source}", path.display())]
    FacadeListing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A relative reference could not be made absolute.
    #[error("cannot make {} absolute: {source}", path.display())]
    AbsolutePath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A project reference names a descriptor kind that cannot be loaded.
    #[error("project reference {} has unsupported kind '{kind}'", descriptor.display())]
    UnsupportedProjectReference { descriptor: PathBuf, kind: String },

    /// Loading or querying a referenced project failed.
    #[error(transparent)]
    Project(#[from] ProjectError),
}

/// Result type alias for resolution operations.
pub type Result<T> = std::result::Result<T, ResolveError>;
