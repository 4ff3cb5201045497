//! `fsbuild args`: compute the compiler argument list for one target.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use fsbuild_compiler::{Invocation, InvocationAssembler};
use fsbuild_project::{BuildTarget, TomlDescriptorParser};
use fsbuild_resolve::AssemblyMetadata;
use serde::Serialize;

use crate::config::FsbuildConfig;

/// How the argument list is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// One argument per line, optionally followed by the fingerprint.
    Text,
    /// A JSON report.
    Json,
    /// Response-file body for `fsc @file`.
    Rsp,
}

impl Format {
    pub fn parse(s: Option<&str>) -> Result<Self> {
        match s.unwrap_or("text") {
            "text" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            "rsp" => Ok(Format::Rsp),
            other => bail!("unknown format '{other}' (expected text, json or rsp)"),
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    invocation: &'a Invocation,
    target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fingerprint: Option<String>,
}

/// Assemble the invocation for `descriptor` under `config`.
pub fn assemble(
    descriptor: &Path,
    config: &FsbuildConfig,
    metadata: &dyn AssemblyMetadata,
    target: Option<&str>,
) -> Result<(BuildTarget, Invocation)> {
    let project = super::load_project(descriptor)?;
    let target = super::select_target(&project, target)?;
    let layout = config.layout();
    let assembler = InvocationAssembler::new(&layout, metadata, &TomlDescriptorParser)
        .with_options(config.assembler_options());
    let invocation = assembler
        .assemble(&target, &project)
        .with_context(|| format!("assembling '{}' for {target}", project.name))?;
    Ok((target, invocation))
}

/// Render an invocation in the requested format.
pub fn render(
    target: &BuildTarget,
    invocation: &Invocation,
    format: Format,
    with_fingerprint: bool,
) -> Result<String> {
    let fingerprint = with_fingerprint.then(|| invocation.fingerprint());
    let rendered = match format {
        Format::Text => {
            let mut out = invocation.to_response_file();
            if let Some(fp) = &fingerprint {
                out.push_str(&format!("# fingerprint: {fp}\n"));
            }
            out
        }
        Format::Rsp => invocation.to_response_file(),
        Format::Json => {
            let report = Report {
                invocation,
                target: target.to_string(),
                fingerprint,
            };
            let mut out =
                serde_json::to_string_pretty(&report).context("serializing invocation")?;
            out.push('\n');
            out
        }
    };
    Ok(rendered)
}

pub fn run(
    descriptor: &Path,
    config: &FsbuildConfig,
    metadata: &dyn AssemblyMetadata,
    target: Option<&str>,
    format: Option<&str>,
    output: Option<&Path>,
    with_fingerprint: bool,
) -> Result<()> {
    let format = Format::parse(format)?;
    let (target, invocation) = assemble(descriptor, config, metadata, target)?;
    let rendered = render(&target, &invocation, format, with_fingerprint)?;

    match output {
        Some(path) => {
            fs::write(path, &rendered).with_context(|| format!("writing {}", path.display()))?;
            eprintln!(
                "Wrote {} arguments for '{}' ({target}) to {}",
                invocation.args().len(),
                invocation.project_name,
                path.display()
            );
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsbuild_compiler::FIXED_PREFIX;
    use fsbuild_resolve::InMemoryMetadata;

    fn invocation() -> (BuildTarget, Invocation) {
        let target: BuildTarget = "v4.5|AnyCPU".parse().unwrap();
        let invocation = Invocation {
            project_name: "App".into(),
            args: vec!["--noframework".into(), "--target:exe".into(), "Program.fs".into()],
        };
        (target, invocation)
    }

    #[test]
    fn parse_formats() {
        assert_eq!(Format::parse(None).unwrap(), Format::Text);
        assert_eq!(Format::parse(Some("json")).unwrap(), Format::Json);
        assert_eq!(Format::parse(Some("rsp")).unwrap(), Format::Rsp);
        assert!(Format::parse(Some("yaml")).is_err());
    }

    #[test]
    fn text_appends_fingerprint_on_request() {
        let (target, invocation) = invocation();
        let plain = render(&target, &invocation, Format::Text, false).unwrap();
        assert_eq!(plain, "--noframework\n--target:exe\nProgram.fs\n");

        let with_fp = render(&target, &invocation, Format::Text, true).unwrap();
        assert!(with_fp.ends_with(&format!("# fingerprint: {}\n", invocation.fingerprint())));
    }

    #[test]
    fn rsp_never_carries_fingerprint() {
        let (target, invocation) = invocation();
        let rsp = render(&target, &invocation, Format::Rsp, true).unwrap();
        assert_eq!(rsp, invocation.to_response_file());
    }

    #[test]
    fn json_report() {
        let (target, invocation) = invocation();
        let json = render(&target, &invocation, Format::Json, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["project"], "App");
        assert_eq!(value["target"], "v4.5|AnyCPU");
        assert_eq!(value["args"].as_array().unwrap().len(), 3);
        assert_eq!(value["fingerprint"], invocation.fingerprint());

        let json = render(&target, &invocation, Format::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("fingerprint").is_none());
    }

    #[test]
    fn assemble_from_descriptor_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let descriptor = dir.path().join("App.fsproj");
        fs::write(&descriptor, fsbuild_project::descriptor::template("App")).unwrap();
        let config = FsbuildConfig::default();

        let (target, invocation) =
            assemble(&descriptor, &config, &InMemoryMetadata::new(), None).unwrap();
        assert_eq!(target.to_string(), "v4.5|AnyCPU");
        let prefix: Vec<&str> = invocation.args()[..5].iter().map(String::as_str).collect();
        assert_eq!(prefix, FIXED_PREFIX);
        assert_eq!(invocation.args().last().unwrap(), "Program.fs");
    }
}
