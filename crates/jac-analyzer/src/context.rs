//! Semantic analysis context.
//!
//! [`AnalysisContext`] wires the five passes into the one order
//! `SPEC_FULL.md` §4 lays out: sub-node table, import, symbol-table build,
//! decl/def match, def-use. Each pass owns its own state and reports
//! through the shared [`DiagnosticSink`]; this module's only job is running
//! them in order and handing the finished [`SymbolTable`] back to the
//! caller.

use std::path::PathBuf;

use jac_ast::ast::AST;
use jac_ast::nodes::NodeID;
use jac_source::diagnostic::DiagnosticSink;
use jac_source::types::SourceManager;
use rustc_hash::FxHashMap;

use crate::pass::run_pass;
use crate::passes::{DeclDefMatchPass, DefUsePass, ImportPass, SubNodeTablePass, SymbolTableBuildPass};
use crate::registry::ModuleRegistry;
use crate::symbol::SymbolTable;

/// The result of running the full pass pipeline over one module.
#[derive(Debug)]
pub struct AnalysisContext {
    /// The symbol table built and resolved for this module.
    pub symbol_table: SymbolTable,
    /// Canonical path each resolved `import` node points at, as found by
    /// the import pass.
    pub resolved_imports: FxHashMap<NodeID, PathBuf>,
}

impl AnalysisContext {
    /// Runs the full five-pass pipeline over `ast`, rooted at `module_root`,
    /// recursively resolving and registering any module it imports into
    /// `registry` along the way.
    ///
    /// `current_dir` is the directory `ast`'s source file lives in, used to
    /// resolve relative imports before falling back to `search_roots`.
    #[must_use]
    pub fn analyze_module(
        source_manager: &mut SourceManager,
        registry: &ModuleRegistry,
        search_roots: &[PathBuf],
        current_dir: PathBuf,
        ast: &mut AST,
        module_root: NodeID,
        sink: &mut DiagnosticSink,
    ) -> Self {
        run_pass(&mut SubNodeTablePass::new(), ast, module_root, sink);

        let mut import_pass = ImportPass::new(source_manager, registry, search_roots, current_dir);
        run_pass(&mut import_pass, ast, module_root, sink);
        let resolved_imports = import_pass.resolved;

        let mut build_pass = SymbolTableBuildPass::new(registry, &resolved_imports);
        run_pass(&mut build_pass, ast, module_root, sink);
        let mut symbol_table = build_pass.table;

        run_pass(&mut DeclDefMatchPass::new(&mut symbol_table), ast, module_root, sink);
        DeclDefMatchPass::new(&mut symbol_table).check_all_matched(ast, sink);

        run_pass(&mut DefUsePass::new(&mut symbol_table), ast, module_root, sink);

        Self { symbol_table, resolved_imports }
    }
}
