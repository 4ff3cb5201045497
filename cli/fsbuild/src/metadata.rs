//! Assembly metadata backend selected at build time.

use std::collections::BTreeSet;
use std::path::Path;

use fsbuild_resolve::{AssemblyMetadata, ResolveError};

/// Whether this binary can read metadata from real assemblies.
pub const METADATA_AVAILABLE: bool = cfg!(feature = "dotscope");

/// Reads `AssemblyRef` entries with dotscope.
#[cfg(feature = "dotscope")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DotscopeMetadata;

#[cfg(feature = "dotscope")]
impl AssemblyMetadata for DotscopeMetadata {
    fn assembly_references(&self, path: &Path) -> fsbuild_resolve::Result<BTreeSet<String>> {
        let assembly =
            dotscope::CilObject::from_path(path).map_err(|e| ResolveError::Metadata {
                path: path.to_path_buf(),
                detail: e.to_string(),
            })?;
        let names = assembly
            .refs_assembly()
            .iter()
            .map(|entry| entry.value().name.clone())
            .collect();
        Ok(names)
    }
}

/// Stand-in used when no metadata reader is compiled in.
#[cfg(not(feature = "dotscope"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableMetadata;

#[cfg(not(feature = "dotscope"))]
impl AssemblyMetadata for UnavailableMetadata {
    fn assembly_references(&self, path: &Path) -> fsbuild_resolve::Result<BTreeSet<String>> {
        Err(ResolveError::Metadata {
            path: path.to_path_buf(),
            detail: "assembly metadata reader not compiled (rebuild with --features dotscope)"
                .into(),
        })
    }
}

/// The metadata backend for this build.
pub fn backend() -> Box<dyn AssemblyMetadata> {
    #[cfg(feature = "dotscope")]
    {
        Box::new(DotscopeMetadata)
    }
    #[cfg(not(feature = "dotscope"))]
    {
        Box::new(UnavailableMetadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "dotscope")]
    #[test]
    fn non_assembly_file_is_a_metadata_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("NotAnAssembly.dll");
        std::fs::write(&path, b"plain text, no PE header").unwrap();

        let err = DotscopeMetadata.assembly_references(&path).unwrap_err();
        assert!(matches!(err, ResolveError::Metadata { path: ref failed, .. } if failed.ends_with("NotAnAssembly.dll")));
        assert!(METADATA_AVAILABLE);
    }

    #[cfg(feature = "dotscope")]
    #[test]
    fn missing_file_is_a_metadata_error() {
        let err = backend()
            .assembly_references(Path::new("/nonexistent/Missing.dll"))
            .unwrap_err();
        assert!(matches!(err, ResolveError::Metadata { .. }));
    }

    #[cfg(not(feature = "dotscope"))]
    #[test]
    fn unavailable_backend_names_the_feature() {
        let err = backend()
            .assembly_references(Path::new("/lib/A.dll"))
            .unwrap_err();
        assert!(err.to_string().contains("--features dotscope"));
        assert!(!METADATA_AVAILABLE);
    }
}
