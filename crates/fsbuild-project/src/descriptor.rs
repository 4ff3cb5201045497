//! Project descriptor loading.
//!
//! Descriptors are TOML documents with kebab-case keys. Each declared target
//! gets its own `[[configurations]]` block:
//!
//! ```toml
//! name = "App"
//! output-type = "exe"
//!
//! [[configurations]]
//! framework = "v4.5"
//! platform = "AnyCPU"
//! warning-level = 2
//!
//! [[files]]
//! include = "Main.fs"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ProjectError, Result};
use crate::model::{Configuration, OutputType, ProjectModel, ProjectReference, Reference, SourceFile};
use crate::target::{BuildTarget, FrameworkVersion, PlatformType};

/// Language core library version used when a descriptor does not name one.
pub const DEFAULT_CORE_VERSION: &str = "4.4.0.0";

/// Capability that turns a descriptor file into a [`ProjectModel`].
///
/// Project-reference resolution loads referenced descriptors through this
/// trait, so callers can substitute their own descriptor format.
pub trait DescriptorParser {
    /// Parse the descriptor at `path`.
    fn parse_descriptor(&self, path: &Path) -> Result<ProjectModel>;
}

/// The bundled TOML descriptor format.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlDescriptorParser;

impl DescriptorParser for TomlDescriptorParser {
    fn parse_descriptor(&self, path: &Path) -> Result<ProjectModel> {
        load_descriptor(path)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawDescriptor {
    name: String,
    #[serde(default)]
    assembly_name: Option<String>,
    #[serde(default)]
    output_type: OutputType,
    #[serde(default = "default_core_version")]
    framework_core_version: String,
    #[serde(default)]
    configurations: Vec<RawConfiguration>,
    #[serde(default)]
    references: Vec<Reference>,
    #[serde(default)]
    project_references: Vec<ProjectReference>,
    #[serde(default)]
    files: Vec<SourceFile>,
}

#[derive(Debug, Deserialize)]
struct RawConfiguration {
    framework: FrameworkVersion,
    #[serde(default = "default_platform")]
    platform: PlatformType,
    #[serde(flatten)]
    configuration: Configuration,
}

fn default_core_version() -> String {
    DEFAULT_CORE_VERSION.to_string()
}

fn default_platform() -> PlatformType {
    PlatformType::AnyCpu
}

/// Load a descriptor from disk. The model records the descriptor's directory.
pub fn load_descriptor(path: &Path) -> Result<ProjectModel> {
    if !path.is_file() {
        return Err(ProjectError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    let mut model = parse_descriptor_str(&content)?;
    model.directory = path.parent().map(Path::to_path_buf);
    tracing::debug!(
        project = %model.name,
        descriptor = %path.display(),
        targets = model.configurations.len(),
        "loaded project descriptor"
    );
    Ok(model)
}

/// Parse a descriptor from a TOML string.
pub fn parse_descriptor_str(toml_str: &str) -> Result<ProjectModel> {
    let raw: RawDescriptor = toml::from_str(toml_str)?;

    let mut configurations = BTreeMap::new();
    for block in raw.configurations {
        let target = BuildTarget::new(block.framework, block.platform);
        if configurations.contains_key(&target) {
            return Err(ProjectError::DuplicateConfiguration {
                project: raw.name,
                target: target.to_string(),
            });
        }
        configurations.insert(target, block.configuration);
    }

    let assembly_name = raw.assembly_name.unwrap_or_else(|| raw.name.clone());
    Ok(ProjectModel {
        name: raw.name,
        assembly_name,
        output_type: raw.output_type,
        framework_core_version: raw.framework_core_version,
        configurations,
        references: raw.references,
        project_references: raw.project_references,
        files: raw.files,
        directory: None,
    })
}

/// Template descriptor for `fsbuild init`.
pub fn template(name: &str) -> String {
    format!(
        r#"name = "{name}"
output-type = "exe"

[[configurations]]
framework = "v4.5"
platform = "AnyCPU"
debug-symbols = true
constants = ["DEBUG", "TRACE"]

[[references]]
include = "System"

[[references]]
include = "System.Core"

[[files]]
include = "Program.fs"
"#
    )
}
