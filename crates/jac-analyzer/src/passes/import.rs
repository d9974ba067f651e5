//! The import pass: resolves `import` declarations of other source-language
//! modules against the filesystem, parses them if they haven't been seen
//! yet, and recursively runs the sub-node-table and import passes on them
//! so transitive imports are themselves resolved before anyone needs their
//! names.
//!
//! Target-language imports (`import py os;`) need no resolution: they're
//! lowered to a plain target-language import statement verbatim by the code
//! generator and this pass leaves them untouched.
//!
//! This pass does not itself bind names — the symbol-table-build pass does
//! that when it reaches an `Import` node, by reading [`ImportPass::resolved`]
//! and the now fully-registered imported module straight out of the
//! [`ModuleRegistry`]. Splitting the work this way avoids a dependency
//! cycle: building the alias symbols needs the imported module's top-level
//! names, which only exist once its own import pass (this same pass,
//! recursively) has finished.

use std::path::{Path, PathBuf};

use jac_ast::ast::AST;
use jac_ast::nodes::{AnyNode, ImportLang, NodeID};
use jac_parser::parser::parse;
use jac_source::diagnostic::DiagnosticSink;
use jac_source::types::SourceManager;
use rustc_hash::FxHashMap;

use super::common::bare_name;
use super::sub_node_table::SubNodeTablePass;
use crate::pass::{mark_incomplete, run_pass};
use crate::registry::{ImportState, ModuleRegistry};

const SOURCE_EXTENSION: &str = "jac";

/// Resolves and registers the source-language modules a module imports.
pub struct ImportPass<'a> {
    source_manager: &'a mut SourceManager,
    registry: &'a ModuleRegistry,
    search_roots: &'a [PathBuf],
    /// Directory the module currently being walked was loaded from; relative
    /// imports resolve against this before falling back to `search_roots`.
    current_dir: PathBuf,
    /// Canonical path each resolved `Import` node points at. Absent for
    /// target-language imports and imports that failed to resolve.
    pub resolved: FxHashMap<NodeID, PathBuf>,
}

impl<'a> ImportPass<'a> {
    /// Creates a new import pass rooted at `current_dir` (the directory of
    /// the module it's about to walk), consulting `search_roots` for
    /// imports a relative lookup doesn't find.
    #[must_use]
    pub fn new(
        source_manager: &'a mut SourceManager,
        registry: &'a ModuleRegistry,
        search_roots: &'a [PathBuf],
        current_dir: PathBuf,
    ) -> Self {
        Self { source_manager, registry, search_roots, current_dir, resolved: FxHashMap::default() }
    }

    fn module_relative_path(&self, ast: &AST, path_node: NodeID) -> Option<PathBuf> {
        let AnyNode::ModulePath(path) = &ast.get_node(path_node)?.data else { return None };
        let mut rel = PathBuf::new();
        for (index, segment) in path.segments.iter().enumerate() {
            let mut name = bare_name(ast, *segment)?;
            if index == path.segments.len() - 1 {
                name.push('.');
                name.push_str(SOURCE_EXTENSION);
            }
            rel.push(name);
        }
        Some(rel)
    }

    fn candidate_paths(&self, rel: &Path) -> Vec<PathBuf> {
        let mut candidates = vec![self.current_dir.join(rel)];
        candidates.extend(self.search_roots.iter().map(|root| root.join(rel)));
        candidates.retain(|candidate| candidate.is_file());
        candidates
    }

    fn resolve_import(&mut self, ast: &mut AST, import_id: NodeID, sink: &mut DiagnosticSink) {
        let Some(entry) = ast.get_node(import_id) else { return };
        let AnyNode::Import(import) = &entry.data else { return };
        if import.lang == ImportLang::Target {
            return;
        }
        let span = entry.span;
        let path_node = import.path;

        let Some(rel) = self.module_relative_path(ast, path_node) else {
            sink.error("import path must be a dotted list of plain names", span, "import");
            mark_incomplete(ast, import_id, "import");
            return;
        };

        let candidates = self.candidate_paths(&rel);
        let resolved_path = match candidates.as_slice() {
            [] => {
                sink.error(format!("cannot resolve import `{}`", rel.display()), span, "import");
                mark_incomplete(ast, import_id, "import");
                return;
            }
            [single] => single.clone(),
            [first, ..] => {
                sink.error(
                    format!("import `{}` is ambiguous across multiple search roots", rel.display()),
                    span,
                    "import",
                );
                first.clone()
            }
        };

        let canonical = jac_source::types::canonical_key(&resolved_path);
        self.load(&canonical, span, sink);
        let _ = self.resolved.insert(import_id, canonical);
    }

    fn load(&mut self, canonical: &Path, span: jac_source::types::Span, sink: &mut DiagnosticSink) {
        match self.registry.state_of(canonical) {
            ImportState::Cached => log::debug!("import cache hit for {}", canonical.display()),
            ImportState::InProgress => log::debug!("import cycle detected, deferring to {}", canonical.display()),
            ImportState::Unseen => {
                log::debug!("import cache miss for {}, parsing", canonical.display());
                self.registry.begin(canonical.to_path_buf());
                let text = match std::fs::read_to_string(canonical) {
                    Ok(text) => text,
                    Err(source) => {
                        sink.error(
                            format!("failed to read imported module `{}`: {source}", canonical.display()),
                            span,
                            "import",
                        );
                        return;
                    }
                };

                let file_id = self.source_manager.add_file_with_path(
                    canonical.display().to_string(),
                    canonical.to_path_buf(),
                    text.clone(),
                );
                let (mut imported_ast, parse_sink) = parse(&text, file_id);
                sink.extend(parse_sink);

                let Some(imported_root) = imported_ast.root() else {
                    sink.error(
                        format!("imported module `{}` produced no root node", canonical.display()),
                        span,
                        "import",
                    );
                    return;
                };

                let mut scratch = DiagnosticSink::new();
                run_pass(&mut SubNodeTablePass::new(), &mut imported_ast, imported_root, &mut scratch);
                let child_dir =
                    canonical.parent().map_or_else(|| self.current_dir.clone(), Path::to_path_buf);
                let mut nested =
                    ImportPass::new(self.source_manager, self.registry, self.search_roots, child_dir);
                run_pass(&mut nested, &mut imported_ast, imported_root, &mut scratch);
                sink.extend(scratch);

                self.registry.finish(canonical.to_path_buf(), file_id, imported_ast, imported_root);
            }
        }
    }
}

impl crate::pass::Pass for ImportPass<'_> {
    fn name(&self) -> &'static str { "import" }

    fn enter(&mut self, ast: &mut AST, node: NodeID, sink: &mut DiagnosticSink) {
        let is_import = matches!(ast.get_node(node).map(|n| &n.data), Some(AnyNode::Import(_)));
        if is_import {
            self.resolve_import(ast, node, sink);
        }
    }
}
