//! Invocation assembly: the full, ordered compiler argument list for one
//! project and build target.
//!
//! Order is fixed: prefix flags, `--target:`, configuration flags, assembly
//! references, project references, source files. Nothing reorders or
//! disables the prefix.

use std::path::PathBuf;

use fsbuild_project::{BuildTarget, DescriptorParser, ProjectModel};
use fsbuild_resolve::project_ref::DEFAULT_RECOGNIZED_KINDS;
use fsbuild_resolve::{
    AssemblyMetadata, FrameworkLayout, ProjectReferenceResolver, ReferenceResolver,
    UnsupportedPolicy,
};
use serde::Serialize;

use crate::error::Result;
use crate::fingerprint::fingerprint;
use crate::flags::compiler_flags;
use crate::session::{CompilerService, SessionOptions};
use crate::sources::select_sources;

/// Flags that open every invocation.
pub const FIXED_PREFIX: [&str; 5] = [
    "--noframework",
    "--fullpaths",
    "--flaterrors",
    "--subsystemversion:6.00",
    "--highentropyva+",
];

/// Knobs for project-reference handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblerOptions {
    /// Descriptor extensions that project references may point at.
    pub recognized_kinds: Vec<String>,
    /// What to emit for any other project reference.
    pub unsupported: UnsupportedPolicy,
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self {
            recognized_kinds: DEFAULT_RECOGNIZED_KINDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            unsupported: UnsupportedPolicy::default(),
        }
    }
}

/// A computed compiler invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    #[serde(rename = "project")]
    pub project_name: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn into_args(self) -> Vec<String> {
        self.args
    }

    /// SHA-256 fingerprint of the argument list.
    pub fn fingerprint(&self) -> String {
        fingerprint(&self.args)
    }

    /// One argument per line, the form the compiler reads from `@file`.
    pub fn to_response_file(&self) -> String {
        let mut out = String::new();
        for arg in &self.args {
            out.push_str(arg);
            out.push('\n');
        }
        out
    }

    /// Session options for an in-process compiler.
    pub fn session_options(&self, service: &dyn CompilerService) -> SessionOptions {
        service.options_from_arguments(&self.project_name, &self.args)
    }
}

/// Computes invocations from a project model and a build target.
///
/// Holds only shared references to its collaborators; assembling one
/// project never mutates state another computation can see.
pub struct InvocationAssembler<'a> {
    layout: &'a FrameworkLayout,
    metadata: &'a dyn AssemblyMetadata,
    parser: &'a dyn DescriptorParser,
    options: AssemblerOptions,
}

impl<'a> InvocationAssembler<'a> {
    pub fn new(
        layout: &'a FrameworkLayout,
        metadata: &'a dyn AssemblyMetadata,
        parser: &'a dyn DescriptorParser,
    ) -> Self {
        Self {
            layout,
            metadata,
            parser,
            options: AssemblerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AssemblerOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolve `project` for `target` into the full argument list.
    pub fn assemble(&self, target: &BuildTarget, project: &ProjectModel) -> Result<Invocation> {
        let configuration = project.configuration_for(target)?;
        let base_dir = project
            .directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let mut args: Vec<String> = FIXED_PREFIX.iter().map(|f| f.to_string()).collect();
        args.push(format!("--target:{}", project.output_type.compiler_target()));

        args.extend(compiler_flags(
            target,
            &project.output_file_name(),
            configuration,
        ));

        let references = ReferenceResolver::new(self.layout, self.metadata, &base_dir);
        args.extend(references.compiler_params(
            target,
            &project.framework_core_version,
            &project.references,
        )?);

        let project_references = ProjectReferenceResolver::new(self.parser, &base_dir)
            .with_recognized_kinds(self.options.recognized_kinds.iter().cloned());
        args.extend(project_references.compiler_params(
            target,
            &project.project_references,
            self.options.unsupported,
        )?);

        args.extend(select_sources(&project.files));

        tracing::debug!(
            project = %project.name,
            target = %target,
            args = args.len(),
            "assembled compiler invocation"
        );
        Ok(Invocation {
            project_name: project.name.clone(),
            args,
        })
    }
}
