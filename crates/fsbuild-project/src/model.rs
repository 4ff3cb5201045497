//! In-memory project model.
//!
//! Everything here is a read-only input to one compiler-argument computation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ProjectError, Result};
use crate::target::BuildTarget;

/// Output directory used when a configuration does not declare one.
pub const DEFAULT_OUTPUT_DIR: &str = "bin";

/// Warning level used when a configuration does not declare one.
pub const DEFAULT_WARNING_LEVEL: u32 = 3;

/// Debug information kind requested from the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebugType {
    None,
    Full,
    PdbOnly,
}

/// What a project builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    #[default]
    Library,
    Exe,
    WinExe,
    Module,
}

impl OutputType {
    /// Output file extension: libraries build `.dll`, everything else `.exe`.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputType::Library => "dll",
            _ => "exe",
        }
    }

    /// Token for the compiler's `--target:` option.
    pub fn compiler_target(&self) -> &'static str {
        match self {
            OutputType::Library => "library",
            OutputType::Exe => "exe",
            OutputType::WinExe => "winexe",
            OutputType::Module => "module",
        }
    }
}

/// Compiler configuration for one build target. Every field is optional;
/// absent fields take the compiler-flag builder's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Configuration {
    #[serde(default)]
    pub debug_symbols: Option<bool>,
    #[serde(default)]
    pub debug_type: Option<DebugType>,
    #[serde(default)]
    pub tailcalls: Option<bool>,
    #[serde(default)]
    pub warnings_as_errors: Option<bool>,
    #[serde(default)]
    pub optimize: Option<bool>,
    #[serde(default, rename = "prefer-32bit")]
    pub prefer_32bit: Option<bool>,
    #[serde(default)]
    pub warning_level: Option<u32>,
    #[serde(default)]
    pub no_warn: Vec<u32>,
    #[serde(default)]
    pub constants: Vec<String>,
    #[serde(default)]
    pub other_flags: Vec<String>,
    #[serde(default)]
    pub output_path: Option<PathBuf>,
    #[serde(default)]
    pub documentation_file: Option<PathBuf>,
}

impl Configuration {
    /// Configured output directory, or [`DEFAULT_OUTPUT_DIR`].
    pub fn output_directory(&self) -> PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    /// Configured warning level, or [`DEFAULT_WARNING_LEVEL`].
    pub fn warning_level(&self) -> u32 {
        self.warning_level.unwrap_or(DEFAULT_WARNING_LEVEL)
    }

    /// Configured documentation file, or the output path with `.xml` appended.
    pub fn documentation_path(&self, output_path: &Path) -> PathBuf {
        match &self.documentation_file {
            Some(doc) => doc.clone(),
            None => {
                let mut doc = output_path.as_os_str().to_owned();
                doc.push(".xml");
                PathBuf::from(doc)
            }
        }
    }
}

/// A declared assembly reference: a path to a binary or a bare assembly name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub include: String,
}

impl Reference {
    pub fn new(include: impl Into<String>) -> Self {
        Self {
            include: include.into(),
        }
    }
}

/// A reference to another project's descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectReference {
    pub include: PathBuf,
}

impl ProjectReference {
    pub fn new(include: impl Into<PathBuf>) -> Self {
        Self {
            include: include.into(),
        }
    }

    /// Descriptor kind, taken from the file extension.
    pub fn kind(&self) -> Option<&str> {
        self.include.extension().and_then(|e| e.to_str())
    }
}

/// Build action of a declared file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildAction {
    #[default]
    Compile,
    None,
    Content,
    EmbeddedResource,
    Resource,
}

/// A file declared by a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SourceFile {
    pub include: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub on_build: BuildAction,
}

impl SourceFile {
    pub fn compile(include: impl Into<String>) -> Self {
        Self {
            include: include.into(),
            link: None,
            on_build: BuildAction::Compile,
        }
    }

    /// Path handed to the compiler: the link path when declared, else the include.
    pub fn compiled_path(&self) -> &str {
        self.link.as_deref().unwrap_or(&self.include)
    }
}

/// A parsed project descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectModel {
    pub name: String,
    pub assembly_name: String,
    pub output_type: OutputType,
    pub framework_core_version: String,
    pub configurations: BTreeMap<BuildTarget, Configuration>,
    pub references: Vec<Reference>,
    pub project_references: Vec<ProjectReference>,
    pub files: Vec<SourceFile>,
    /// Directory the descriptor was loaded from, when it came from disk.
    pub directory: Option<PathBuf>,
}

impl ProjectModel {
    /// Select the configuration declared for `target`.
    pub fn configuration_for(&self, target: &BuildTarget) -> Result<&Configuration> {
        self.configurations
            .get(target)
            .ok_or_else(|| ProjectError::MissingConfiguration {
                project: self.name.clone(),
                target: target.to_string(),
            })
    }

    /// Build targets this project declares a configuration for.
    pub fn targets(&self) -> impl Iterator<Item = &BuildTarget> {
        self.configurations.keys()
    }

    /// `<assembly name>.<extension for the output type>`.
    pub fn output_file_name(&self) -> String {
        format!("{}.{}", self.assembly_name, self.output_type.extension())
    }

    /// Output directory of `configuration` joined with the output file name.
    pub fn output_path(&self, configuration: &Configuration) -> PathBuf {
        configuration
            .output_directory()
            .join(self.output_file_name())
    }
}
