//! # jac-parser
//!
//! A recursive-descent parser for Jac, a data-spatial programming language
//! that compiles down to Python.
//!
//! This crate turns Jac source text into a [`jac_ast::ast::AST`]: a
//! [`lexer`] built on `logos` tokenizes the source, and a hand-written
//! [`parser`] walks the token stream, allocating nodes directly into the
//! arena rather than building an intermediate tree first. Malformed
//! constructs are recorded as diagnostics and the parser resynchronizes at
//! the next safe boundary, so one broken declaration or statement doesn't
//! abort the whole file.
//!
//! ## Example
//!
//! ```
//! use jac_parser::parser::parse;
//! use jac_source::types::FileID;
//!
//! let source = "object Foo { has x: int = 0; }";
//! let (ast, sink) = parse(source, FileID::new(1));
//! assert!(!sink.has_errors());
//! assert!(ast.root().is_some());
//! ```

pub mod lexer;
pub mod parser;
