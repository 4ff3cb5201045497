//! `fsbuild references`: show where each declared reference resolves.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fsbuild_project::{BuildTarget, ProjectModel, TomlDescriptorParser};
use fsbuild_resolve::{
    AssemblyMetadata, FrameworkLayout, ProjectReferenceResolution, ProjectReferenceResolver,
    ReferenceResolver,
};

use crate::config::FsbuildConfig;

/// One declared reference and what it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub declared: String,
    pub resolved: Vec<String>,
}

/// Resolve every assembly and project reference of `project` for `target`.
pub fn resolve_all(
    project: &ProjectModel,
    target: &BuildTarget,
    layout: &FrameworkLayout,
    metadata: &dyn AssemblyMetadata,
    recognized_kinds: &[String],
) -> Result<Vec<ResolvedEntry>> {
    let base_dir = project
        .directory
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let mut entries = Vec::new();

    let references = ReferenceResolver::new(layout, metadata, &base_dir);
    for reference in &project.references {
        let paths = references
            .resolve(target, reference)
            .with_context(|| format!("resolving reference '{}'", reference.include))?;
        entries.push(ResolvedEntry {
            declared: reference.include.clone(),
            resolved: paths.iter().map(|p| p.display().to_string()).collect(),
        });
    }

    let project_refs = ProjectReferenceResolver::new(&TomlDescriptorParser, &base_dir)
        .with_recognized_kinds(recognized_kinds.iter().cloned());
    for reference in &project.project_references {
        let resolution = project_refs
            .resolve(target, reference)
            .with_context(|| format!("resolving project reference '{}'", reference.include.display()))?;
        let resolved = match resolution {
            ProjectReferenceResolution::Output(path) => path.display().to_string(),
            ProjectReferenceResolution::Unsupported { kind, .. } => {
                format!("(unsupported project kind '{kind}')")
            }
        };
        entries.push(ResolvedEntry {
            declared: reference.include.display().to_string(),
            resolved: vec![resolved],
        });
    }
    Ok(entries)
}

pub fn run(
    descriptor: &Path,
    config: &FsbuildConfig,
    metadata: &dyn AssemblyMetadata,
    target: Option<&str>,
) -> Result<()> {
    let project = super::load_project(descriptor)?;
    let target = super::select_target(&project, target)?;
    let layout = config.layout();
    let options = config.assembler_options();
    let entries = resolve_all(&project, &target, &layout, metadata, &options.recognized_kinds)?;

    println!("References of '{}' ({target}):", project.name);
    if entries.is_empty() {
        println!("  (none)");
    }
    for entry in entries {
        println!("  {}", entry.declared);
        for path in entry.resolved {
            println!("    -> {path}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsbuild_project::descriptor::load_descriptor;
    use fsbuild_resolve::InMemoryMetadata;

    #[test]
    fn resolves_assemblies_and_project_references() {
        let dir = tempfile::tempdir().unwrap();
        let runtime = dir.path().join("runtime");
        std::fs::create_dir_all(runtime.join("Facades")).unwrap();
        std::fs::write(runtime.join("Facades/System.Runtime.dll"), b"").unwrap();
        let portable = dir.path().join("Portable.dll");
        std::fs::write(&portable, b"").unwrap();

        let descriptor = dir.path().join("App.fsproj");
        std::fs::write(
            &descriptor,
            r#"
name = "App"

[[configurations]]
framework = "v4.5"

[[references]]
include = "System.Xml"

[[references]]
include = "Portable.dll"

[[project-references]]
include = "Tools/Tools.csproj"
"#,
        )
        .unwrap();

        let project = load_descriptor(&descriptor).unwrap();
        let target: BuildTarget = "v4.5".parse().unwrap();
        let layout = FrameworkLayout::Runtime {
            runtime_dir: runtime.clone(),
        };
        let metadata = InMemoryMetadata::new().with(&portable, ["System.Runtime"]);

        let entries =
            resolve_all(&project, &target, &layout, &metadata, &["fsproj".to_string()]).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries[0].resolved,
            vec![runtime.join("System.Xml.dll").display().to_string()]
        );
        assert_eq!(
            entries[1].resolved,
            vec![
                portable.display().to_string(),
                runtime.join("Facades/System.Runtime.dll").display().to_string(),
            ]
        );
        assert_eq!(entries[2].resolved, vec!["(unsupported project kind 'csproj')"]);
    }
}
