//! Assembly reference resolution.
//!
//! A declared reference is either a path to a binary or a bare framework
//! assembly name. Path references may expand to the facade set. The base
//! class library and the language core library are always supplied through
//! two leading `-r:` flags and are filtered out of everything else.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use fsbuild_project::{BuildTarget, FrameworkVersion, Reference};

use crate::error::{ResolveError, Result};
use crate::facade::FacadeResolver;
use crate::layout::FrameworkLayout;
use crate::metadata::AssemblyMetadata;

/// Family name of the language core library.
pub const LANGUAGE_CORE_ASSEMBLY: &str = "FSharp.Core";

/// Name of the base class library bootstrap assembly.
pub const BCL_BOOTSTRAP_ASSEMBLY: &str = "mscorlib";

/// Resolves declared references to assembly paths.
pub struct ReferenceResolver<'a> {
    layout: &'a FrameworkLayout,
    facades: FacadeResolver<'a>,
    base_dir: PathBuf,
}

impl<'a> ReferenceResolver<'a> {
    /// `base_dir` anchors relative reference paths, normally the project directory.
    pub fn new(
        layout: &'a FrameworkLayout,
        metadata: &'a dyn AssemblyMetadata,
        base_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            layout,
            facades: FacadeResolver::new(layout, metadata),
            base_dir: base_dir.into(),
        }
    }

    /// Physical paths for one reference.
    ///
    /// - absolute path: used as-is, plus facades when it depends on them
    /// - relative path to an existing file: made absolute, plus facades likewise
    /// - anything else: a framework assembly name for the target's framework
    pub fn resolve(&self, target: &BuildTarget, reference: &Reference) -> Result<Vec<PathBuf>> {
        let version = &target.framework_version;
        let include = Path::new(&reference.include);

        if include.is_absolute() {
            return self.facades.expand(include.to_path_buf(), version);
        }

        let candidate = self.base_dir.join(include);
        if candidate.is_file() {
            let absolute = std::path::absolute(&candidate).map_err(|source| {
                ResolveError::AbsolutePath {
                    path: candidate.clone(),
                    source,
                }
            })?;
            return self.facades.expand(absolute, version);
        }

        Ok(vec![self.layout.system_library_path(version, &reference.include)])
    }

    /// `-r:` flags for a project's references.
    ///
    /// The base class library and the language core library come first,
    /// exactly once. Remaining paths are deduplicated in resolution order.
    pub fn compiler_params(
        &self,
        target: &BuildTarget,
        core_version: &str,
        references: &[Reference],
    ) -> Result<Vec<String>> {
        let mut seen = HashSet::new();
        let mut resolved = Vec::new();
        for reference in references {
            for path in self.resolve(target, reference)? {
                if is_implicit_assembly(&path) {
                    tracing::debug!(path = %path.display(), "dropping implicit assembly reference");
                    continue;
                }
                if seen.insert(path.clone()) {
                    resolved.push(path);
                }
            }
        }

        let mut params = Vec::with_capacity(resolved.len() + 2);
        params.push(reference_flag(&self.bcl_path(&target.framework_version)));
        params.push(reference_flag(&self.layout.core_library_path(core_version)));
        params.extend(resolved.iter().map(|p| reference_flag(p)));
        Ok(params)
    }

    fn bcl_path(&self, version: &FrameworkVersion) -> PathBuf {
        self.layout
            .system_library_path(version, BCL_BOOTSTRAP_ASSEMBLY)
    }
}

/// Whether `path` names one of the two implicitly supplied assemblies.
fn is_implicit_assembly(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    name.contains(LANGUAGE_CORE_ASSEMBLY) || name.contains(BCL_BOOTSTRAP_ASSEMBLY)
}

/// `-r:<path>`.
pub fn reference_flag(path: &Path) -> String {
    format!("-r:{}", path.display())
}
