//! The shared pass framework every analysis pass runs under.
//!
//! A pass walks the tree in pre-order, calling [`Pass::enter`] on the way
//! down and [`Pass::exit`] on the way back up; both are no-ops by default so
//! a pass overrides only the hook it cares about. Rather than one trait
//! method per node variant (the AST has around sixty), hooks receive the
//! node generically and match on [`jac_ast::nodes::AnyNode::tag`] or the
//! node's `data` directly — the same amount of dispatch work, without a
//! hundred-plus near-empty default bodies cluttering every implementor.

use jac_ast::ast::AST;
use jac_ast::nodes::{ASTNode, NodeID};
use jac_source::diagnostic::DiagnosticSink;
use log::debug;

/// One phase of semantic analysis.
///
/// Implementors own whatever state they accumulate while walking (a symbol
/// table, a scope stack, a registry handle) and report findings into the
/// shared [`DiagnosticSink`] rather than failing the walk.
pub trait Pass {
    /// A short, stable name used in diagnostics and log lines.
    fn name(&self) -> &'static str;

    /// Called when a node is first reached, before its children.
    fn enter(&mut self, ast: &mut AST, node: NodeID, sink: &mut DiagnosticSink) {
        let _ = (ast, node, sink);
    }

    /// Called after all of a node's children have been visited.
    fn exit(&mut self, ast: &mut AST, node: NodeID, sink: &mut DiagnosticSink) {
        let _ = (ast, node, sink);
    }
}

/// Runs `pass` over every node reachable from `root`, pre-order on the way
/// down and post-order on the way up.
pub fn run_pass(pass: &mut dyn Pass, ast: &mut AST, root: NodeID, sink: &mut DiagnosticSink) {
    debug!("entering pass {}", pass.name());
    walk(pass, ast, root, sink);
    debug!("exiting pass {} ({} diagnostics so far)", pass.name(), sink.len());
}

fn walk(pass: &mut dyn Pass, ast: &mut AST, node: NodeID, sink: &mut DiagnosticSink) {
    pass.enter(ast, node, sink);

    let children = ast.get_node(node).map(|n| n.data.children()).unwrap_or_default();
    for child in children {
        walk(pass, ast, child, sink);
    }

    pass.exit(ast, node, sink);
}

/// Marks a node incomplete and records why, for passes that can't finish
/// processing a node (an unresolved import target, a malformed signature)
/// but need to let the schedule continue.
pub fn mark_incomplete(ast: &mut AST, node: NodeID, pass_name: &'static str) {
    let Some(entry) = ast.get_node_mut(node) else { return };
    entry.data.meta_mut().mark_incomplete();
    debug!("{pass_name} marked {node} incomplete");
}
