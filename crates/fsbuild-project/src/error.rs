//! Error types for project descriptor operations.

use std::path::PathBuf;

/// Errors that can occur while loading or querying a project descriptor.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error reading a descriptor.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Descriptor file not found.
    #[error("project descriptor not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// A framework version string could not be parsed.
    #[error("invalid framework version '{value}'")]
    InvalidFrameworkVersion { value: String },

    /// A platform name is not one of the known platforms.
    #[error("unknown platform '{value}'")]
    UnknownPlatform { value: String },

    /// A build target string could not be parsed.
    #[error("invalid build target '{value}': {detail}")]
    InvalidTarget { value: String, detail: String },

    /// Two configuration blocks declare the same build target.
    #[error("project '{project}' declares more than one configuration for {target}")]
    DuplicateConfiguration { project: String, target: String },

    /// No configuration block matches the requested build target.
    #[error("project '{project}' has no configuration for {target}")]
    MissingConfiguration { project: String, target: String },
}

/// Result type for project operations.
pub type Result<T> = std::result::Result<T, ProjectError>;
