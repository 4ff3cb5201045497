//! Where framework assemblies live on the build host.
//!
//! Hosts in the Windows family install versioned reference assemblies under
//! a well-known root. Other hosts have no such layout, so framework, core
//! library, and facade assemblies are taken from the active runtime's own
//! installation directory instead.

use std::path::{Path, PathBuf};

use fsbuild_project::FrameworkVersion;
use serde::{Deserialize, Serialize};

/// Default root of the versioned reference-assemblies layout.
pub const DEFAULT_REFERENCE_ASSEMBLIES_ROOT: &str =
    r"C:\Program Files (x86)\Reference Assemblies\Microsoft";

/// File name of the language core library.
pub const CORE_LIBRARY_FILE: &str = "FSharp.Core.dll";

/// Framework profile the core library is installed under.
const CORE_LIBRARY_PROFILE: &str = "v4.0";

/// Host operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostFamily {
    Windows,
    Unix,
}

impl HostFamily {
    /// The family of the host this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(windows) {
            HostFamily::Windows
        } else {
            HostFamily::Unix
        }
    }

    /// Whether this family installs a versioned reference-assemblies directory.
    pub fn has_reference_assemblies(&self) -> bool {
        matches!(self, HostFamily::Windows)
    }
}

/// Which assembly directory to resolve.
#[derive(Debug, Clone, Copy)]
pub enum AssemblyLocation<'a> {
    /// Framework assemblies for a framework version.
    Framework(&'a FrameworkVersion),
    /// Compatibility facades for a framework version.
    Facades(&'a FrameworkVersion),
    /// The language core library at a core library version.
    LanguageCore(&'a str),
}

/// Assembly directory layout of the build host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameworkLayout {
    /// Versioned reference assemblies under `root`.
    ReferenceAssemblies { root: PathBuf },
    /// Assemblies shipped with the active runtime in `runtime_dir`.
    Runtime { runtime_dir: PathBuf },
}

impl FrameworkLayout {
    /// The default layout for a host family.
    pub fn for_host(host: HostFamily) -> Self {
        if host.has_reference_assemblies() {
            FrameworkLayout::ReferenceAssemblies {
                root: PathBuf::from(DEFAULT_REFERENCE_ASSEMBLIES_ROOT),
            }
        } else {
            FrameworkLayout::Runtime {
                runtime_dir: default_runtime_dir(),
            }
        }
    }

    /// The directory holding the assemblies for `location`.
    pub fn directory(&self, location: AssemblyLocation<'_>) -> PathBuf {
        match self {
            FrameworkLayout::ReferenceAssemblies { root } => match location {
                AssemblyLocation::Framework(version) => framework_dir(root, version),
                AssemblyLocation::Facades(version) => {
                    framework_dir(root, version).join("Facades")
                }
                AssemblyLocation::LanguageCore(core_version) => root
                    .join("FSharp")
                    .join(".NETFramework")
                    .join(CORE_LIBRARY_PROFILE)
                    .join(core_version),
            },
            FrameworkLayout::Runtime { runtime_dir } => match location {
                AssemblyLocation::Framework(_) | AssemblyLocation::LanguageCore(_) => {
                    runtime_dir.clone()
                }
                AssemblyLocation::Facades(_) => runtime_dir.join("Facades"),
            },
        }
    }

    /// Path of the framework assembly `assembly_name` for `version`.
    pub fn system_library_path(&self, version: &FrameworkVersion, assembly_name: &str) -> PathBuf {
        self.directory(AssemblyLocation::Framework(version))
            .join(assembly_file_name(assembly_name))
    }

    /// Path of the language core library at `core_version`.
    pub fn core_library_path(&self, core_version: &str) -> PathBuf {
        self.directory(AssemblyLocation::LanguageCore(core_version))
            .join(CORE_LIBRARY_FILE)
    }

    /// Directory holding the compatibility facades for `version`.
    pub fn facade_directory(&self, version: &FrameworkVersion) -> PathBuf {
        self.directory(AssemblyLocation::Facades(version))
    }
}

fn framework_dir(root: &Path, version: &FrameworkVersion) -> PathBuf {
    root.join("Framework")
        .join(".NETFramework")
        .join(version.to_string())
}

/// Append the binary extension unless the name already carries one.
fn assembly_file_name(assembly_name: &str) -> String {
    let lower = assembly_name.to_ascii_lowercase();
    if lower.ends_with(".dll") || lower.ends_with(".exe") {
        assembly_name.to_string()
    } else {
        format!("{assembly_name}.dll")
    }
}

/// Installation directory of the default runtime on non-Windows hosts.
pub fn default_runtime_dir() -> PathBuf {
    if cfg!(target_os = "macos") {
        PathBuf::from("/Library/Frameworks/Mono.framework/Versions/Current/lib/mono/4.5")
    } else {
        PathBuf::from("/usr/lib/mono/4.5")
    }
}
