//! Error types for compiler argument assembly.

use fsbuild_project::ProjectError;
use fsbuild_resolve::ResolveError;

/// Errors that can occur while assembling a compiler invocation.
#[derive(Debug, thiserror::Error)]
pub enum CompilerError {
    /// The project model could not be queried (e.g. no configuration for the target).
    #[error(transparent)]
    Project(#[from] ProjectError),

    /// A reference or project reference could not be resolved.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, CompilerError>;
