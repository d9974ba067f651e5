//! Source file handling, span tracking and diagnostics for the Jac compiler.
//!
//! This crate provides the fundamental types shared by every stage of the Jac
//! compiler pipeline: source file representation and content access, precise
//! line/column tracking through [`types::Position`] and [`types::Span`],
//! and the structured [`diagnostic::Diagnostic`] type passes use to report
//! problems without ever throwing across a traversal boundary.
//!
//! The crate consists of two modules:
//! - [`types`]: source files, the [`types::SourceManager`] registry, and spans
//! - [`diagnostic`]: diagnostic severities and the ordered
//!   [`diagnostic::DiagnosticSink`] every pass owns

pub mod diagnostic;
pub mod types;
