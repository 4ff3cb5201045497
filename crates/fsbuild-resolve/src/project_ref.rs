//! Project-to-project reference resolution.
//!
//! A referenced project is never built here. Its descriptor is loaded, its
//! configuration for the same build target is selected, and its expected
//! output path is computed the same way its own build would compute it.

use std::path::{Path, PathBuf};

use fsbuild_project::{BuildTarget, DescriptorParser, ProjectReference};
use serde::{Deserialize, Serialize};

use crate::error::{ResolveError, Result};
use crate::reference::reference_flag;

/// Descriptor kinds recognized when no other set is configured.
pub const DEFAULT_RECOGNIZED_KINDS: &[&str] = &["fsproj"];

/// Outcome of resolving one project reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectReferenceResolution {
    /// Expected build output of the referenced project.
    Output(PathBuf),
    /// The descriptor kind is not one this resolver can load.
    Unsupported { descriptor: PathBuf, kind: String },
}

/// What to emit for a project reference of an unsupported kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnsupportedPolicy {
    /// Emit a bare `-r:` placeholder.
    #[default]
    EmitEmpty,
    /// Emit nothing.
    Skip,
    /// Fail the resolution.
    Error,
}

/// Resolves project references to the output paths of the referenced projects.
pub struct ProjectReferenceResolver<'a> {
    parser: &'a dyn DescriptorParser,
    recognized_kinds: Vec<String>,
    base_dir: PathBuf,
}

impl<'a> ProjectReferenceResolver<'a> {
    /// `base_dir` anchors relative descriptor paths, normally the referencing
    /// project's directory.
    pub fn new(parser: &'a dyn DescriptorParser, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            parser,
            recognized_kinds: DEFAULT_RECOGNIZED_KINDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            base_dir: base_dir.into(),
        }
    }

    /// Replace the set of recognized descriptor extensions.
    pub fn with_recognized_kinds<I, S>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recognized_kinds = kinds.into_iter().map(Into::into).collect();
        self
    }

    fn is_recognized(&self, kind: &str) -> bool {
        self.recognized_kinds
            .iter()
            .any(|k| k.eq_ignore_ascii_case(kind))
    }

    fn descriptor_path(&self, reference: &ProjectReference) -> PathBuf {
        if reference.include.is_absolute() {
            reference.include.clone()
        } else {
            self.base_dir.join(&reference.include)
        }
    }

    /// Resolve one project reference for `target`.
    ///
    /// Relative output directories of the referenced project are anchored at
    /// that project's own directory.
    pub fn resolve(
        &self,
        target: &BuildTarget,
        reference: &ProjectReference,
    ) -> Result<ProjectReferenceResolution> {
        let descriptor = self.descriptor_path(reference);
        let kind = reference.kind().unwrap_or_default();
        if !self.is_recognized(kind) {
            return Ok(ProjectReferenceResolution::Unsupported {
                descriptor,
                kind: kind.to_string(),
            });
        }

        let project = self.parser.parse_descriptor(&descriptor)?;
        let configuration = project.configuration_for(target)?;
        let output = project.output_path(configuration);
        let output = match (&project.directory, output.is_absolute()) {
            (Some(dir), false) => dir.join(output),
            _ => output,
        };
        tracing::debug!(
            project = %project.name,
            output = %output.display(),
            "resolved project reference"
        );
        Ok(ProjectReferenceResolution::Output(output))
    }

    /// One `-r:` flag per project reference, applying `policy` to unsupported kinds.
    pub fn compiler_params(
        &self,
        target: &BuildTarget,
        references: &[ProjectReference],
        policy: UnsupportedPolicy,
    ) -> Result<Vec<String>> {
        let mut params = Vec::with_capacity(references.len());
        for reference in references {
            match self.resolve(target, reference)? {
                ProjectReferenceResolution::Output(path) => params.push(reference_flag(&path)),
                ProjectReferenceResolution::Unsupported { descriptor, kind } => match policy {
                    UnsupportedPolicy::EmitEmpty => {
                        tracing::warn!(
                            descriptor = %descriptor.display(),
                            kind = %kind,
                            "unsupported project reference kind, emitting empty reference"
                        );
                        params.push(reference_flag(Path::new("")));
                    }
                    UnsupportedPolicy::Skip => {
                        tracing::warn!(
                            descriptor = %descriptor.display(),
                            kind = %kind,
                            "skipping project reference of unsupported kind"
                        );
                    }
                    UnsupportedPolicy::Error => {
                        return Err(ResolveError::UnsupportedProjectReference { descriptor, kind });
                    }
                },
            }
        }
        Ok(params)
    }
}
