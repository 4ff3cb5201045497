//! `fsbuild.toml` workspace configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fsbuild_compiler::AssemblerOptions;
use fsbuild_resolve::{FrameworkLayout, HostFamily, UnsupportedPolicy};
use serde::Deserialize;

/// File name searched for from the working directory upward.
pub const CONFIG_FILE: &str = "fsbuild.toml";

/// Workspace configuration. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FsbuildConfig {
    /// Host assembly layout.
    #[serde(default)]
    pub host: HostConfig,
    /// Project-reference handling.
    #[serde(default)]
    pub project_references: ProjectReferencesConfig,
}

/// `[host]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HostConfig {
    /// Host family override; detected from the build host when absent.
    #[serde(default)]
    pub family: Option<HostFamily>,
    /// Root of the versioned reference-assemblies directory.
    #[serde(default)]
    pub reference_assemblies: Option<PathBuf>,
    /// Installation directory of the active runtime.
    #[serde(default)]
    pub runtime_dir: Option<PathBuf>,
}

/// `[project-references]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectReferencesConfig {
    /// Descriptor extensions project references may point at.
    #[serde(default)]
    pub recognized_kinds: Option<Vec<String>>,
    /// Handling of project references of any other kind.
    #[serde(default)]
    pub unsupported: Option<UnsupportedPolicy>,
}

impl FsbuildConfig {
    /// Search upward from `start_dir` for `fsbuild.toml`, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let config: FsbuildConfig = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((config, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a configuration from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing fsbuild.toml")
    }

    /// Effective host family.
    pub fn host_family(&self) -> HostFamily {
        self.host.family.unwrap_or_else(HostFamily::current)
    }

    /// Assembly layout for the effective host family, with configured roots applied.
    pub fn layout(&self) -> FrameworkLayout {
        let mut layout = FrameworkLayout::for_host(self.host_family());
        match &mut layout {
            FrameworkLayout::ReferenceAssemblies { root } => {
                if let Some(configured) = &self.host.reference_assemblies {
                    *root = configured.clone();
                }
            }
            FrameworkLayout::Runtime { runtime_dir } => {
                if let Some(configured) = &self.host.runtime_dir {
                    *runtime_dir = configured.clone();
                }
            }
        }
        layout
    }

    /// Project-reference options for the invocation assembler.
    pub fn assembler_options(&self) -> AssemblerOptions {
        let mut options = AssemblerOptions::default();
        if let Some(kinds) = &self.project_references.recognized_kinds {
            options.recognized_kinds = kinds.clone();
        }
        if let Some(policy) = self.project_references.unsupported {
            options.unsupported = policy;
        }
        options
    }

    /// Generate the default template for `fsbuild init`.
    pub fn template() -> String {
        r#"[host]
# family = "unix"
# runtime-dir = "/usr/lib/mono/4.5"
# reference-assemblies = 'C:\Program Files (x86)\Reference Assemblies\Microsoft'

[project-references]
recognized-kinds = ["fsproj"]
unsupported = "emit-empty"
"#
        .to_string()
    }
}
