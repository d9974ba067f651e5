//! The def-use pass: the last of the five, resolving every name used in an
//! expression against the [`SymbolTable`] the earlier passes built, and
//! recording the result on the node itself (`Meta::sym`) and on the symbol
//! (`Symbol::references`) so later stages — code generation, `--verbose`
//! diagnostics — don't need to re-walk scopes to answer "what does this name
//! mean here".
//!
//! Re-entering the same scopes the symbol-table-build pass pushed is done by
//! mirroring its push/pop triggers exactly (`Architype`, `Ability`,
//! `AbilityDecl`, `ArchBlock`, `CodeBlock`) and looking the scope up by node
//! in [`SymbolTable::get_node_scope`] rather than creating new ones.
//!
//! Only the base of an `AtomTrailerExpr` chain is resolved against the scope
//! chain — `a.b.c`'s `b` and `c` are attribute accesses on whatever `a`
//! evaluates to, not lexical bindings, and reusing the scope-chain lookup for
//! them would both be wrong and risk matching an unrelated same-named local.
//! The reserved data-spatial keywords (`here`, `visitor`, `self`, ...) parse
//! to a distinct `KindRef` node, not a `NameTok`, so they never reach this
//! pass's lookup at all.

use jac_ast::ast::AST;
use jac_ast::nodes::{AnyNode, NodeID};
use jac_source::diagnostic::DiagnosticSink;

use crate::pass::Pass;
use crate::symbol::{ScopeID, SymbolTable};

/// Resolves name uses against an already-built [`SymbolTable`].
pub struct DefUsePass<'a> {
    table: &'a mut SymbolTable,
    scope_stack: Vec<ScopeID>,
}

impl<'a> DefUsePass<'a> {
    /// Creates a new pass over `table`, starting resolution from the module
    /// scope.
    #[must_use]
    pub fn new(table: &'a mut SymbolTable) -> Self {
        let module_scope = table.module_scope();
        Self { table, scope_stack: module_scope.into_iter().collect() }
    }

    fn push_scope_for(&mut self, node: NodeID) {
        if let Some(scope_id) = self.table.get_node_scope(node) {
            self.scope_stack.push(scope_id);
        }
    }

    fn pop_scope(&mut self) { let _ = self.scope_stack.pop(); }

    /// Unwraps a trailer-less `AtomTrailerExpr` chain down to its terminal
    /// `NameTok`, returning that node's id and text. Returns `None` for
    /// anything more complex than a bare name (a literal, a parenthesized
    /// expression, a call result used as a base).
    fn base_name(ast: &AST, id: NodeID) -> Option<(NodeID, String)> {
        match &ast.get_node(id)?.data {
            AnyNode::NameTok(tok) => Some((id, tok.text.clone())),
            AnyNode::AtomTrailerExpr(trailer) if trailer.trailers.is_empty() => {
                Self::base_name(ast, trailer.atom)
            }
            _ => None,
        }
    }

    fn resolve_base(&mut self, ast: &mut AST, atom_id: NodeID, sink: &mut DiagnosticSink) {
        let Some((name_node, name)) = Self::base_name(ast, atom_id) else { return };

        let Some(symbol) = self.table.lookup_in_scope_chain(&name).cloned() else {
            let span = ast.get_node(name_node).map(|n| n.span).unwrap_or_default();
            sink.error(format!("undefined name `{name}`"), span, "def_use");
            return;
        };

        if let Some(mutable) = self.table.resolve_id_mut(symbol.id) {
            mutable.add_reference(name_node);
        }

        if let Some(entry) = ast.get_node_mut(name_node) {
            entry.data.meta_mut().sym = Some(symbol.id);
        }
    }
}

impl Pass for DefUsePass<'_> {
    fn name(&self) -> &'static str { "def_use" }

    fn enter(&mut self, ast: &mut AST, node: NodeID, sink: &mut DiagnosticSink) {
        let Some(entry) = ast.get_node(node) else { return };

        match &entry.data {
            AnyNode::Architype(_) | AnyNode::Ability(_) | AnyNode::AbilityDecl(_) => {
                self.push_scope_for(node);
            }
            AnyNode::ArchBlock(_) | AnyNode::CodeBlock(_) => self.push_scope_for(node),

            AnyNode::AtomTrailerExpr(trailer) => {
                let atom = trailer.atom;
                self.resolve_base(ast, atom, sink);
            }

            _ => {}
        }
    }

    fn exit(&mut self, ast: &mut AST, node: NodeID, _sink: &mut DiagnosticSink) {
        let Some(entry) = ast.get_node(node) else { return };
        if matches!(
            entry.data,
            AnyNode::Architype(_)
                | AnyNode::Ability(_)
                | AnyNode::AbilityDecl(_)
                | AnyNode::ArchBlock(_)
                | AnyNode::CodeBlock(_)
        ) {
            self.pop_scope();
        }
    }
}
