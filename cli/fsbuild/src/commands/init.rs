//! `fsbuild init`: project scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use fsbuild_project::descriptor::template;

use crate::config::{FsbuildConfig, CONFIG_FILE};

/// Create a new project directory `name` relative to the working directory.
pub fn run(name: &str) -> Result<()> {
    create_project(Path::new(name), name)
}

pub(crate) fn create_project(project_dir: &Path, name: &str) -> Result<()> {
    if project_dir.exists() {
        bail!("directory '{}' already exists", project_dir.display());
    }
    fs::create_dir_all(project_dir)
        .with_context(|| format!("creating {}", project_dir.display()))?;

    let descriptor = format!("{name}.fsproj");
    fs::write(project_dir.join(&descriptor), template(name))
        .with_context(|| format!("writing {descriptor}"))?;
    fs::write(project_dir.join(CONFIG_FILE), FsbuildConfig::template())
        .with_context(|| format!("writing {CONFIG_FILE}"))?;
    fs::write(
        project_dir.join("Program.fs"),
        "[<EntryPoint>]\nlet main _ =\n    0\n",
    )
    .context("writing Program.fs")?;
    fs::write(project_dir.join(".gitignore"), "bin/\n").context("writing .gitignore")?;

    println!("Created project '{name}'");
    println!("  {name}/{descriptor}");
    println!("  {name}/{CONFIG_FILE}");
    println!("  {name}/Program.fs");
    println!("  {name}/.gitignore");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsbuild_project::descriptor::load_descriptor;

    #[test]
    fn init_creates_project_structure() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("Hello");

        create_project(&project_path, "Hello").unwrap();

        assert!(project_path.join("Hello.fsproj").is_file());
        assert!(project_path.join(CONFIG_FILE).is_file());
        assert!(project_path.join("Program.fs").is_file());
        assert!(project_path.join(".gitignore").is_file());
    }

    #[test]
    fn init_generates_loadable_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("Hello");
        create_project(&project_path, "Hello").unwrap();

        let project = load_descriptor(&project_path.join("Hello.fsproj")).unwrap();
        assert_eq!(project.name, "Hello");
        assert_eq!(project.targets().count(), 1);
        assert_eq!(project.directory.as_deref(), Some(project_path.as_path()));
    }

    #[test]
    fn init_refuses_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("existing");
        fs::create_dir_all(&project_path).unwrap();

        let result = create_project(&project_path, "existing");
        assert!(result.is_err());
    }
}
