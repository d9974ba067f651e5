//! Internal error type for the analyzer.
//!
//! Ordinary semantic problems (redeclarations, unresolved names, unmatched
//! declarations) are not modeled here — they go through
//! [`jac_source::diagnostic::DiagnosticSink`] as [`jac_source::diagnostic::Diagnostic`]s,
//! since they're expected outcomes of analyzing real source and a schedule
//! should keep running after one. `AnalysisError` is reserved for failures
//! a pass cannot recover from: a missing root node, a corrupt arena
//! reference, an import target that can't be read from disk.

use thiserror::Error;

/// A fatal failure of the analysis pipeline itself, as opposed to a
/// diagnostic about the program being analyzed.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// An `AST` was handed to a pass with no root node set.
    #[error("AST has no root node")]
    MissingRoot,

    /// An imported file could not be read from disk.
    #[error("could not read imported file {path}: {source}")]
    ImportIo {
        /// The path that failed to read.
        path: std::path::PathBuf,
        /// The underlying IO failure.
        #[source]
        source: std::io::Error,
    },
}
