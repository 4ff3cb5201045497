//! fsbuild CLI: computes compiler invocations for fsbuild project descriptors.

mod commands;
mod config;
mod metadata;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use config::FsbuildConfig;

#[derive(Parser)]
#[command(name = "fsbuild", version, about = "Compiler invocations for fsbuild projects")]
struct Cli {
    /// Log resolution steps to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the compiler argument list for a project and build target
    Args {
        /// Project descriptor (.fsproj)
        descriptor: PathBuf,
        /// Build target as <framework>|<platform> (e.g. "v4.5|AnyCPU")
        #[arg(long)]
        target: Option<String>,
        /// Output format (text, json, rsp)
        #[arg(long)]
        format: Option<String>,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Include the SHA-256 fingerprint of the argument list
        #[arg(long)]
        fingerprint: bool,
    },
    /// List the build targets a project declares
    Targets {
        /// Project descriptor (.fsproj)
        descriptor: PathBuf,
    },
    /// Show where each declared reference resolves
    References {
        /// Project descriptor (.fsproj)
        descriptor: PathBuf,
        /// Build target as <framework>|<platform>
        #[arg(long)]
        target: Option<String>,
    },
    /// Create a new project
    Init {
        /// Project name
        name: String,
    },
    /// Check host layout and configuration
    Doctor,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose > 0 {
            EnvFilter::new("warn,fsbuild=debug,fsbuild_project=debug,fsbuild_resolve=debug,fsbuild_compiler=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Args {
            descriptor,
            target,
            format,
            output,
            fingerprint,
        } => {
            let config = load_config(&cwd, Some(&descriptor))?;
            let metadata = metadata::backend();
            commands::args::run(
                &descriptor,
                &config,
                metadata.as_ref(),
                target.as_deref(),
                format.as_deref(),
                output.as_deref(),
                fingerprint,
            )
        }

        Commands::Targets { descriptor } => commands::targets::run(&descriptor),

        Commands::References { descriptor, target } => {
            let config = load_config(&cwd, Some(&descriptor))?;
            let metadata = metadata::backend();
            commands::references::run(&descriptor, &config, metadata.as_ref(), target.as_deref())
        }

        Commands::Init { name } => commands::init::run(&name),

        Commands::Doctor => {
            let (config, dir) = match FsbuildConfig::find_and_load(&cwd)? {
                Some((config, dir)) => (config, Some(dir)),
                None => (FsbuildConfig::default(), None),
            };
            commands::doctor::run(&config, dir.as_deref())
        }
    }
}

/// Workspace config nearest to the descriptor, else nearest to `cwd`, else defaults.
fn load_config(cwd: &Path, descriptor: Option<&Path>) -> anyhow::Result<FsbuildConfig> {
    let start = descriptor
        .and_then(Path::parent)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| cwd.join(dir))
        .unwrap_or_else(|| cwd.to_path_buf());
    match FsbuildConfig::find_and_load(&start)? {
        Some((config, dir)) => {
            tracing::debug!(config_dir = %dir.display(), "loaded workspace config");
            Ok(config)
        }
        None => Ok(FsbuildConfig::default()),
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use fsbuild_resolve::{InMemoryMetadata, UnsupportedPolicy};

    fn unix_config(runtime: &Path) -> String {
        format!(
            "[host]\nfamily = \"unix\"\nruntime-dir = '{}'\n",
            runtime.display()
        )
    }

    /// Full workflow: init, point the workspace at a runtime dir, compute args.
    #[test]
    fn init_then_args_workflow() {
        let dir = tempfile::tempdir().unwrap();
        let runtime = dir.path().join("mono/4.5");
        std::fs::create_dir_all(&runtime).unwrap();
        let project_path = dir.path().join("Hello");

        // 1. Init
        commands::init::create_project(&project_path, "Hello").unwrap();
        std::fs::write(project_path.join(config::CONFIG_FILE), unix_config(&runtime)).unwrap();

        // 2. Config is found from the descriptor's directory
        let descriptor = project_path.join("Hello.fsproj");
        let config = load_config(dir.path(), Some(&descriptor)).unwrap();
        assert_eq!(config.host_family(), fsbuild_resolve::HostFamily::Unix);

        // 3. Args
        let metadata = InMemoryMetadata::new();
        let (_, invocation) =
            commands::args::assemble(&descriptor, &config, &metadata, None).unwrap();
        let args = invocation.args();
        assert_eq!(args[5], "--target:exe");
        assert!(args.contains(&format!("-r:{}", runtime.join("mscorlib.dll").display())));
        assert!(args.contains(&format!("-r:{}", runtime.join("FSharp.Core.dll").display())));
        assert!(args.contains(&format!("-r:{}", runtime.join("System.Core.dll").display())));
        assert_eq!(args.last().unwrap(), "Program.fs");

        // 4. Response file written through the command entry point
        let rsp = dir.path().join("Hello.rsp");
        commands::args::run(
            &descriptor,
            &config,
            &metadata,
            None,
            Some("rsp"),
            Some(&rsp),
            false,
        )
        .unwrap();
        assert_eq!(
            std::fs::read_to_string(&rsp).unwrap(),
            invocation.to_response_file()
        );
    }

    /// Two projects in one workspace: App references Lib by descriptor.
    #[test]
    fn project_reference_workflow() {
        let dir = tempfile::tempdir().unwrap();
        let runtime = dir.path().join("runtime");
        std::fs::create_dir_all(&runtime).unwrap();
        std::fs::write(
            dir.path().join(config::CONFIG_FILE),
            format!("{}\n[project-references]\nunsupported = \"skip\"\n", unix_config(&runtime)),
        )
        .unwrap();

        commands::init::create_project(&dir.path().join("Lib"), "Lib").unwrap();
        let lib_descriptor = dir.path().join("Lib/Lib.fsproj");
        let lib = std::fs::read_to_string(&lib_descriptor)
            .unwrap()
            .replace("output-type = \"exe\"", "output-type = \"library\"");
        std::fs::write(&lib_descriptor, lib).unwrap();

        commands::init::create_project(&dir.path().join("App"), "App").unwrap();
        // The per-project config would shadow the workspace one.
        std::fs::remove_file(dir.path().join("App").join(config::CONFIG_FILE)).unwrap();
        let app_descriptor = dir.path().join("App/App.fsproj");
        let mut app = std::fs::read_to_string(&app_descriptor).unwrap();
        app.push_str(
            "\n[[project-references]]\ninclude = \"../Lib/Lib.fsproj\"\n\n[[project-references]]\ninclude = \"../Tools/Tools.csproj\"\n",
        );
        std::fs::write(&app_descriptor, app).unwrap();

        let config = load_config(dir.path(), Some(&app_descriptor)).unwrap();
        assert_eq!(config.assembler_options().unsupported, UnsupportedPolicy::Skip);

        let (_, invocation) =
            commands::args::assemble(&app_descriptor, &config, &InMemoryMetadata::new(), None)
                .unwrap();
        let lib_output = dir.path().join("App").join("../Lib").join("bin").join("Lib.dll");
        assert!(invocation
            .args()
            .contains(&format!("-r:{}", lib_output.display())));
        assert!(!invocation.args().contains(&"-r:".to_string()));
    }

    #[test]
    fn targets_and_missing_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("Tool");
        commands::init::create_project(&project_path, "Tool").unwrap();

        commands::targets::run(&project_path.join("Tool.fsproj")).unwrap();
        assert!(commands::targets::run(&project_path.join("Missing.fsproj")).is_err());
    }

    #[test]
    fn undeclared_target_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("Tool");
        commands::init::create_project(&project_path, "Tool").unwrap();
        let config = FsbuildConfig::default();

        let err = commands::args::assemble(
            &project_path.join("Tool.fsproj"),
            &config,
            &InMemoryMetadata::new(),
            Some("v4.6.1|x64"),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("v4.6.1|x64"));
    }
}
