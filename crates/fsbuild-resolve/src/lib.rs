//! Reference resolution for fsbuild.
//!
//! Turns the references a project declares into the physical assembly paths
//! the compiler must see:
//! - **Framework layout:** where framework and core library assemblies live on this host
//! - **Facades:** compatibility assemblies pulled in for facade-built dependencies
//! - **References:** path and bare-name references, deduplicated
//! - **Project references:** expected build outputs of referenced projects
//!
//! Nothing here checks that a resolved path exists; a missing assembly
//! surfaces when the compiler runs.

pub mod error;
pub mod facade;
pub mod layout;
pub mod metadata;
pub mod project_ref;
pub mod reference;

pub use error::{ResolveError, Result};
pub use facade::{depends_on_compatibility_facades, FacadeResolver, FACADE_MARKER};
pub use layout::{AssemblyLocation, FrameworkLayout, HostFamily};
pub use metadata::{AssemblyMetadata, InMemoryMetadata};
pub use project_ref::{ProjectReferenceResolution, ProjectReferenceResolver, UnsupportedPolicy};
pub use reference::{ReferenceResolver, BCL_BOOTSTRAP_ASSEMBLY, LANGUAGE_CORE_ASSEMBLY};
