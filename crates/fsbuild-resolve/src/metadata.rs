//! Assembly metadata capability.
//!
//! Facade detection only needs the names of the assemblies a binary depends
//! on. How those names are read is up to the implementation.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use crate::error::{ResolveError, Result};

/// Reads the assembly dependency names recorded in a binary.
pub trait AssemblyMetadata {
    /// Names of the assemblies the binary at `path` references.
    fn assembly_references(&self, path: &Path) -> Result<BTreeSet<String>>;
}

/// A fixed table of assembly dependencies, keyed by path.
///
/// Reading a path that has no entry fails the same way an unreadable
/// binary would.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMetadata {
    entries: HashMap<PathBuf, BTreeSet<String>>,
}

impl InMemoryMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the dependency names of `path`.
    pub fn insert<I, S>(&mut self, path: impl Into<PathBuf>, references: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .insert(path.into(), references.into_iter().map(Into::into).collect());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with<I, S>(mut self, path: impl Into<PathBuf>, references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(path, references);
        self
    }
}

impl AssemblyMetadata for InMemoryMetadata {
    fn assembly_references(&self, path: &Path) -> Result<BTreeSet<String>> {
        self.entries
            .get(path)
            .cloned()
            .ok_or_else(|| ResolveError::Metadata {
                path: path.to_path_buf(),
                detail: "no metadata recorded".into(),
            })
    }
}
