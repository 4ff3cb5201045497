//! Source file selection.

use fsbuild_project::{BuildAction, SourceFile};

/// Paths of the files to compile, in declaration order.
///
/// Only files whose build action is compile are kept; a declared link path
/// replaces the include path. Order matters: the compiler resolves symbols
/// in file order.
pub fn select_sources(files: &[SourceFile]) -> Vec<String> {
    files
        .iter()
        .filter(|f| f.on_build == BuildAction::Compile)
        .map(|f| f.compiled_path().to_string())
        .collect()
}
