//! Compatibility facade detection.
//!
//! An assembly built against the split contract layout references
//! `System.Runtime`. Compiling against it needs every facade of the target
//! framework so its type forwarders resolve. Any match pulls in the whole
//! facade directory: this over-includes but never under-includes.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use fsbuild_project::FrameworkVersion;

use crate::error::{ResolveError, Result};
use crate::layout::FrameworkLayout;
use crate::metadata::AssemblyMetadata;

/// Substring identifying the compatibility-facade assembly family.
pub const FACADE_MARKER: &str = "System.Runtime";

/// Whether any dependency name belongs to the facade family.
pub fn depends_on_compatibility_facades(references: &BTreeSet<String>) -> bool {
    references.iter().any(|name| name.contains(FACADE_MARKER))
}

/// Detects facade-dependent assemblies and lists the facades to supply.
pub struct FacadeResolver<'a> {
    layout: &'a FrameworkLayout,
    metadata: &'a dyn AssemblyMetadata,
}

impl<'a> FacadeResolver<'a> {
    pub fn new(layout: &'a FrameworkLayout, metadata: &'a dyn AssemblyMetadata) -> Self {
        Self { layout, metadata }
    }

    /// Whether the assembly at `assembly_path` needs the facade set.
    ///
    /// Metadata read failures propagate.
    pub fn is_facade_dependent(&self, assembly_path: &Path) -> Result<bool> {
        let references = self.metadata.assembly_references(assembly_path)?;
        Ok(depends_on_compatibility_facades(&references))
    }

    /// Every file in the facade directory of `version`, sorted by path.
    pub fn facade_assemblies(&self, version: &FrameworkVersion) -> Result<Vec<PathBuf>> {
        let dir = self.layout.facade_directory(version);
        let listing_error = |source| ResolveError::FacadeListing {
            path: dir.clone(),
            source,
        };

        let mut facades = Vec::new();
        for entry in std::fs::read_dir(&dir).map_err(listing_error)? {
            let path = entry.map_err(listing_error)?.path();
            if path.is_file() {
                facades.push(path);
            }
        }
        facades.sort();
        Ok(facades)
    }

    /// `assembly_path` followed by the facades it needs, if any.
    pub fn expand(&self, assembly_path: PathBuf, version: &FrameworkVersion) -> Result<Vec<PathBuf>> {
        if !self.is_facade_dependent(&assembly_path)? {
            return Ok(vec![assembly_path]);
        }
        let facades = self.facade_assemblies(version)?;
        tracing::debug!(
            assembly = %assembly_path.display(),
            facades = facades.len(),
            "assembly depends on compatibility facades"
        );
        let mut paths = Vec::with_capacity(facades.len() + 1);
        paths.push(assembly_path);
        paths.extend(facades);
        Ok(paths)
    }
}
