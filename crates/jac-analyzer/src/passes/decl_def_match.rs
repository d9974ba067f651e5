//! The decl/def-match pass: pairs every out-of-line `ArchDef`/`AbilityDef`
//! body with the forward `ArchDecl`/`AbilityDecl` it completes.
//!
//! Matching is by name only, against the symbol table the previous pass
//! already built: for each out-of-line definition, find an unmatched
//! forward-declaration symbol with the same name and attach this node as
//! its [`crate::symbol::Symbol::definition`]. A definition that matches
//! nothing, and a forward declaration nothing ever matches, both become
//! diagnostics rather than a panic — the pipeline keeps going so later
//! passes (and `--verbose` tooling) see every problem in one run, not just
//! the first.
//!
//! Ties — two out-of-line bodies naming the same forward declaration — are
//! broken in document order: the first one walked wins the match, and
//! every later one is reported as a duplicate definition.

use jac_ast::ast::AST;
use jac_ast::nodes::{AnyNode, NodeID};
use jac_source::diagnostic::DiagnosticSink;

use super::common::bare_name;
use crate::pass::Pass;
use crate::symbol::SymbolTable;

/// Matches out-of-line definitions to their forward declarations in an
/// already-built [`SymbolTable`].
pub struct DeclDefMatchPass<'a> {
    table: &'a mut SymbolTable,
}

impl<'a> DeclDefMatchPass<'a> {
    /// Creates a new pass operating on `table`, which must already have
    /// every declaration from the symbol-table-build pass.
    #[must_use]
    pub fn new(table: &'a mut SymbolTable) -> Self { Self { table } }

    /// After the walk, reports every forward declaration that never got a
    /// matching out-of-line definition.
    ///
    /// Every unmatched declaration is reported, with no exemption for an
    /// "abstract" access level: this AST's `AccessLevel` has only
    /// `Public`/`Private`/`Protected`, so the exemption the property this
    /// pass satisfies describes never applies to anything this compiler can
    /// parse, and always requiring a match is the safe reading.
    pub fn check_all_matched(&self, ast: &AST, sink: &mut DiagnosticSink) {
        for (_, scope) in self.table.scopes() {
            for symbol in scope.symbols.values() {
                if symbol.definition.is_some() {
                    continue;
                }
                let is_forward_decl = matches!(
                    ast.get_node(symbol.declaration).map(|n| &n.data),
                    Some(AnyNode::ArchDecl(_) | AnyNode::AbilityDecl(_))
                );
                if is_forward_decl {
                    sink.warn(
                        format!("`{}` is declared but never defined", symbol.name),
                        symbol.span,
                        "decl_def_match",
                    );
                }
            }
        }
    }

    fn match_definition(
        &mut self,
        ast: &AST,
        def_id: NodeID,
        target_name: NodeID,
        is_arch: bool,
        sink: &mut DiagnosticSink,
    ) {
        let Some(name) = bare_name(ast, target_name) else {
            let span = ast.get_node(def_id).map(|n| n.span).unwrap_or_default();
            sink.error(
                "out-of-line definition's target name must be a plain identifier",
                span,
                "decl_def_match",
            );
            return;
        };
        let span = ast.get_node(def_id).map(|n| n.span).unwrap_or_default();

        let scope_ids: Vec<_> = self.table.scopes().map(|(id, _)| id).collect();
        for scope_id in scope_ids {
            let Some(scope) = self.table.get_scope(scope_id) else { continue };
            let Some(symbol) = scope.symbols.get(&name) else { continue };
            let decl_kind = ast.get_node(symbol.declaration).map(|n| &n.data);
            let matches_kind = if is_arch {
                matches!(decl_kind, Some(AnyNode::ArchDecl(_)))
            } else {
                matches!(decl_kind, Some(AnyNode::AbilityDecl(_)))
            };
            if !matches_kind {
                continue;
            }

            if symbol.definition.is_some() {
                sink.error(format!("`{name}` already has a matching definition"), span, "decl_def_match");
                return;
            }

            if let Some(scope_mut) = self.table.get_scope_mut(scope_id)
                && let Some(symbol_mut) = scope_mut.get_symbol_mut(&name)
            {
                symbol_mut.definition = Some(def_id);
            }
            return;
        }

        sink.error(format!("no forward declaration found for `{name}`"), span, "decl_def_match");
    }
}

impl Pass for DeclDefMatchPass<'_> {
    fn name(&self) -> &'static str { "decl_def_match" }

    fn enter(&mut self, ast: &mut AST, node: NodeID, sink: &mut DiagnosticSink) {
        let Some(entry) = ast.get_node(node) else { return };
        match entry.data.clone() {
            AnyNode::ArchDef(def) => self.match_definition(ast, node, def.target_name, true, sink),
            AnyNode::AbilityDef(def) => self.match_definition(ast, node, def.target_name, false, sink),
            _ => {}
        }
    }
}
