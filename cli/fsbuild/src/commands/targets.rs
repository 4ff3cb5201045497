//! `fsbuild targets`: list the build targets a project declares.

use std::path::Path;

use anyhow::Result;
use fsbuild_project::ProjectModel;

/// Declared targets in display form, in target order.
pub fn describe(project: &ProjectModel) -> Vec<String> {
    project
        .configurations
        .iter()
        .map(|(target, configuration)| {
            format!("{target}  -> {}", project.output_path(configuration).display())
        })
        .collect()
}

pub fn run(descriptor: &Path) -> Result<()> {
    let project = super::load_project(descriptor)?;
    let lines = describe(&project);
    if lines.is_empty() {
        println!("Project '{}' declares no targets.", project.name);
        return Ok(());
    }
    println!("Targets of '{}':", project.name);
    for line in lines {
        println!("  {line}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsbuild_project::descriptor::parse_descriptor_str;
    use std::path::PathBuf;

    #[test]
    fn lists_targets_with_outputs() {
        let project = parse_descriptor_str(
            r#"
name = "Lib"

[[configurations]]
framework = "v4.5"
platform = "x86"
output-path = "out/x86"

[[configurations]]
framework = "v4.0"
"#,
        )
        .unwrap();
        let lines = describe(&project);
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            format!("v4.0|AnyCPU  -> {}", PathBuf::from("bin").join("Lib.dll").display())
        );
        assert_eq!(
            lines[1],
            format!("v4.5|x86  -> {}", PathBuf::from("out/x86").join("Lib.dll").display())
        );
    }
}
