//! Semantic analysis for the Jac-to-Python compiler.
//!
//! This crate runs the five passes `SPEC_FULL.md` §4 specifies over a parsed
//! module: sub-node indexing, import resolution, symbol-table construction,
//! decl/def matching, and def-use resolution. Each pass is a
//! [`pass::Pass`] implementor driven by [`pass::run_pass`], reporting
//! through a [`jac_source::diagnostic::DiagnosticSink`] rather than failing
//! the whole run on the first problem — real source has more than one
//! mistake in it, and a schedule should surface all of them in one pass.
//!
//! ## Architecture
//!
//! - **Symbol Management** ([`symbol`]): scopes, symbols, and the symbol table.
//! - **Passes** ([`passes`]): the five analysis passes themselves.
//! - **Registry** ([`registry`]): the cross-module cache of parsed imports.
//! - **Context** ([`context`]): wires the five passes into one pipeline.
//! - **Error Handling** ([`error`]): fatal pipeline failures, as opposed to
//!   ordinary diagnostics about the program being analyzed.

pub mod context;
pub mod error;
pub mod pass;
pub mod passes;
pub mod registry;
pub mod symbol;

pub use context::AnalysisContext;
