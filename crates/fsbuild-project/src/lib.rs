//! Project descriptor model and build-target definitions for fsbuild.
//!
//! A project descriptor declares, per build target, everything needed to
//! compute one compiler invocation:
//! - **Build target:** framework version + platform
//! - **Configurations:** one compiler configuration per declared target
//! - **Inputs:** assembly references, project references, source files

pub mod descriptor;
pub mod error;
pub mod model;
pub mod target;

pub use descriptor::{DescriptorParser, TomlDescriptorParser};
pub use error::{ProjectError, Result};
pub use model::{
    BuildAction, Configuration, DebugType, OutputType, ProjectModel, ProjectReference,
    Reference, SourceFile,
};
pub use target::{BuildTarget, FrameworkVersion, PlatformType};
