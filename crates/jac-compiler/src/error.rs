//! Internal error type for the compiler driver.
//!
//! Mirrors `jac-analyzer`'s own split: ordinary problems with the program
//! under compilation (an unresolved name, a feature with no Python lowering)
//! are [`jac_source::diagnostic::Diagnostic`]s collected in a
//! [`jac_source::diagnostic::DiagnosticSink`] and never stop the pipeline.
//! [`CompileError`] is reserved for failures the driver itself can't recover
//! from — a source file that can't be read, an output directory that can't
//! be created, an AST with no root.

use std::path::PathBuf;

use thiserror::Error;

/// A fatal failure of the compilation pipeline itself.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The input source file could not be read.
    #[error("could not read {path}: {source}")]
    SourceIo {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// The parser produced an `AST` with no root node set.
    #[error("parser produced no module root for {path}")]
    NoModuleRoot {
        /// The source file that failed to produce a root.
        path: PathBuf,
    },

    /// The generated Python source could not be written to `__jac_gen__`.
    #[error("could not write generated output to {path}: {source}")]
    OutputIo {
        /// The path that failed to write.
        path: PathBuf,
        /// The underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// An import could not be resolved under [`crate::config::CompilerConfig::strict_imports`].
    /// Every other diagnostic the analyzer can raise is a non-aborting user
    /// error; an unresolved import is the one case the spec calls out as
    /// fatal, and only when strict mode was requested.
    #[error("{path} has an unresolved import and strict import mode is on")]
    StrictImportFailed {
        /// The source file the unresolved import was found in.
        path: PathBuf,
    },
}
