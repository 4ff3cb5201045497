//! CLI command implementations.

pub mod args;
pub mod doctor;
pub mod init;
pub mod references;
pub mod targets;

use std::path::Path;

use anyhow::{bail, Context, Result};
use fsbuild_project::descriptor::load_descriptor;
use fsbuild_project::{BuildTarget, ProjectModel};

/// Load a project descriptor, attaching the path to any error.
pub(crate) fn load_project(descriptor: &Path) -> Result<ProjectModel> {
    load_descriptor(descriptor).with_context(|| format!("loading {}", descriptor.display()))
}

/// The requested target, or the only declared one when none is requested.
pub(crate) fn select_target(project: &ProjectModel, requested: Option<&str>) -> Result<BuildTarget> {
    if let Some(value) = requested {
        return value
            .parse()
            .with_context(|| format!("invalid --target '{value}'"));
    }
    let declared: Vec<&BuildTarget> = project.targets().collect();
    match declared.as_slice() {
        [only] => Ok((*only).clone()),
        [] => bail!("project '{}' declares no configurations", project.name),
        many => {
            let names: Vec<String> = many.iter().map(|t| t.to_string()).collect();
            bail!(
                "project '{}' declares several targets, pass --target with one of: {}",
                project.name,
                names.join(", ")
            )
        }
    }
}
