//! Compiler session service.
//!
//! Tools that host the compiler in-process need the argument list split into
//! session options. The service is passed explicitly so no process-wide
//! checker instance is needed.

/// Options for an in-process compiler session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub project_name: String,
    /// Option tokens, in argument order.
    pub options: Vec<String>,
    /// Source files, in argument order.
    pub source_files: Vec<String>,
}

/// Builds session options from a compiler argument list.
pub trait CompilerService {
    fn options_from_arguments(&self, project_name: &str, args: &[String]) -> SessionOptions;
}

/// Treats every `-`-prefixed token as an option and everything else as a source file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArgumentSplitter;

impl CompilerService for ArgumentSplitter {
    fn options_from_arguments(&self, project_name: &str, args: &[String]) -> SessionOptions {
        let (options, source_files): (Vec<String>, Vec<String>) =
            args.iter().cloned().partition(|a| a.starts_with('-'));
        SessionOptions {
            project_name: project_name.to_string(),
            options,
            source_files,
        }
    }
}
