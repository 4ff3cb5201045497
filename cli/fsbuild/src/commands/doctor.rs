//! `fsbuild doctor`: host layout diagnostics.

use std::path::Path;

use anyhow::Result;
use fsbuild_resolve::FrameworkLayout;

use crate::config::FsbuildConfig;
use crate::metadata::METADATA_AVAILABLE;

/// Print the effective configuration and host layout.
pub fn run(config: &FsbuildConfig, config_dir: Option<&Path>) -> Result<()> {
    println!("=== fsbuild doctor ===");
    println!();
    println!("fsbuild version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("--- Feature Support ---");
    println!(
        "  Assembly metadata: {}",
        if METADATA_AVAILABLE {
            "available"
        } else {
            "not compiled (rebuild with --features dotscope)"
        }
    );
    println!();

    println!("--- Configuration ---");
    match config_dir {
        Some(dir) => println!("  fsbuild.toml: found at {}", dir.display()),
        None => println!("  fsbuild.toml: not found (using defaults)"),
    }
    let options = config.assembler_options();
    println!("  Recognized project kinds: {}", options.recognized_kinds.join(", "));
    println!("  Unsupported project references: {:?}", options.unsupported);
    println!();

    println!("--- Host Layout ---");
    println!("  Family: {:?}", config.host_family());
    println!("  {}", layout_line(&config.layout()));
    Ok(())
}

/// Describe the layout's root directory and whether it exists.
fn layout_line(layout: &FrameworkLayout) -> String {
    let (label, dir) = match layout {
        FrameworkLayout::ReferenceAssemblies { root } => ("Reference assemblies", root),
        FrameworkLayout::Runtime { runtime_dir } => ("Runtime directory", runtime_dir),
    };
    let status = if dir.is_dir() { "present" } else { "missing" };
    format!("{label}: {} ({status})", dir.display())
}
