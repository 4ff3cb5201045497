//! Build targets: the (framework version, platform) pair a build is performed for.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ProjectError, Result};

/// A target framework version such as `v4.5` or `v4.6.1`.
///
/// Accepts an optional leading `v` and one to four numeric components.
/// Always displayed with the `v` prefix, which is also the name of the
/// versioned reference-assemblies directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FrameworkVersion {
    components: Vec<u32>,
}

impl FrameworkVersion {
    /// Construct from numeric components (e.g. `&[4, 5]`).
    pub fn new(components: &[u32]) -> Result<Self> {
        if components.is_empty() || components.len() > 4 {
            return Err(ProjectError::InvalidFrameworkVersion {
                value: format!("{components:?}"),
            });
        }
        Ok(Self {
            components: components.to_vec(),
        })
    }

    /// The numeric components, most significant first.
    pub fn components(&self) -> &[u32] {
        &self.components
    }
}

impl fmt::Display for FrameworkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.components.iter().map(u32::to_string).collect();
        write!(f, "v{}", parts.join("."))
    }
}

impl FromStr for FrameworkVersion {
    type Err = ProjectError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ProjectError::InvalidFrameworkVersion {
            value: s.to_string(),
        };
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);
        let components = digits
            .split('.')
            .map(|part| part.parse::<u32>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(&components).map_err(|_| invalid())
    }
}

impl TryFrom<String> for FrameworkVersion {
    type Error = ProjectError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<FrameworkVersion> for String {
    fn from(value: FrameworkVersion) -> Self {
        value.to_string()
    }
}

/// Processor platform a build targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PlatformType {
    AnyCpu,
    X86,
    X64,
    Itanium,
    Arm,
}

impl PlatformType {
    /// Name as written in project descriptors.
    pub fn name(&self) -> &'static str {
        match self {
            PlatformType::AnyCpu => "AnyCPU",
            PlatformType::X86 => "x86",
            PlatformType::X64 => "x64",
            PlatformType::Itanium => "Itanium",
            PlatformType::Arm => "ARM",
        }
    }

    /// Token accepted by the compiler's `--platform:` option.
    pub fn compiler_token(&self) -> &'static str {
        match self {
            PlatformType::AnyCpu => "anycpu",
            PlatformType::X86 => "x86",
            PlatformType::X64 => "x64",
            PlatformType::Itanium => "Itanium",
            PlatformType::Arm => "arm",
        }
    }
}

impl fmt::Display for PlatformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlatformType {
    type Err = ProjectError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anycpu" | "any cpu" => Ok(PlatformType::AnyCpu),
            "x86" => Ok(PlatformType::X86),
            "x64" => Ok(PlatformType::X64),
            "itanium" => Ok(PlatformType::Itanium),
            "arm" => Ok(PlatformType::Arm),
            _ => Err(ProjectError::UnknownPlatform {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for PlatformType {
    type Error = ProjectError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<PlatformType> for String {
    fn from(value: PlatformType) -> Self {
        value.name().to_string()
    }
}

/// The (framework version, platform) pair one build is performed for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildTarget {
    pub framework_version: FrameworkVersion,
    pub platform_type: PlatformType,
}

impl BuildTarget {
    pub fn new(framework_version: FrameworkVersion, platform_type: PlatformType) -> Self {
        Self {
            framework_version,
            platform_type,
        }
    }
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.framework_version, self.platform_type)
    }
}

/// Parses `<framework>|<platform>`; the platform defaults to AnyCPU.
impl FromStr for BuildTarget {
    type Err = ProjectError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |detail: String| ProjectError::InvalidTarget {
            value: s.to_string(),
            detail,
        };
        let (framework, platform) = match s.split_once('|') {
            Some((framework, platform)) => (framework, Some(platform)),
            None => (s, None),
        };
        let framework_version = framework
            .parse::<FrameworkVersion>()
            .map_err(|e| invalid(e.to_string()))?;
        let platform_type = match platform {
            Some(p) => p.parse::<PlatformType>().map_err(|e| invalid(e.to_string()))?,
            None => PlatformType::AnyCpu,
        };
        Ok(Self::new(framework_version, platform_type))
    }
}
