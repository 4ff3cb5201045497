//! Compiler argument assembly for fsbuild projects.
//!
//! Composes, in a fixed order, the argument list for one compiler invocation:
//! fixed prefix flags, configuration flags, assembly references, project
//! references, and source files.

pub mod error;
pub mod fingerprint;
pub mod flags;
pub mod invocation;
pub mod session;
pub mod sources;

pub use error::{CompilerError, Result};
pub use fingerprint::fingerprint;
pub use flags::compiler_flags;
pub use invocation::{AssemblerOptions, Invocation, InvocationAssembler, FIXED_PREFIX};
pub use session::{ArgumentSplitter, CompilerService, SessionOptions};
pub use sources::select_sources;
