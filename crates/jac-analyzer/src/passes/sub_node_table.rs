//! The sub-node-table pass: for every node, index its descendants by kind
//! tag, in document order. Every later pass that needs "all the `HasVar`s
//! under this architype" or "all the `Ability`s under this module" reads
//! this table instead of re-walking the tree.

use std::collections::BTreeMap;

use jac_ast::ast::AST;
use jac_ast::meta::SubNodeTab;
use jac_ast::nodes::NodeID;
use jac_source::diagnostic::DiagnosticSink;

use crate::pass::Pass;

/// Builds [`jac_ast::meta::Meta::sub_node_tab`] bottom-up.
///
/// Runs as a single tree walk; the actual table for a node is computed on
/// exit by asking the arena for that node's whole subtree in document
/// order and grouping it by tag, rather than merging child tables by hand.
/// Re-running the pass recomputes the same table, so it's safe to run more
/// than once (e.g. after the import pass splices in freshly parsed nodes).
#[derive(Debug, Default)]
pub struct SubNodeTablePass;

impl SubNodeTablePass {
    /// Creates a new pass instance.
    #[must_use]
    pub fn new() -> Self { Self }
}

impl Pass for SubNodeTablePass {
    fn name(&self) -> &'static str { "sub_node_table" }

    fn exit(&mut self, ast: &mut AST, node: NodeID, _sink: &mut DiagnosticSink) {
        let descendants = ast.collect_nodes_pre_order(node);
        let mut table: SubNodeTab = BTreeMap::new();
        for id in descendants {
            if id == node {
                continue;
            }
            if let Some(entry) = ast.get_node(id) {
                table.entry(entry.data.tag()).or_default().push(id);
            }
        }

        if let Some(entry) = ast.get_node_mut(node) {
            entry.data.meta_mut().sub_node_tab = Some(table);
        }
    }
}

#[cfg(test)]
mod tests {
    use jac_parser::parser::parse;
    use jac_source::types::FileID;

    use super::*;
    use crate::pass::run_pass;

    #[test]
    fn indexes_has_vars_under_their_architype() {
        let source = "node Room {\n    has name: str;\n    has capacity: int = 4;\n}\n";
        let (mut ast, parse_sink) = parse(source, FileID::new(0));
        assert!(!parse_sink.has_errors());
        let root = ast.root().expect("parsed module has a root");

        let mut sink = DiagnosticSink::new();
        run_pass(&mut SubNodeTablePass::new(), &mut ast, root, &mut sink);
        assert!(sink.is_empty());

        let module_table =
            ast.get_node(root).and_then(|n| n.data.meta().sub_node_tab.clone()).expect("module sub-node table");
        let has_vars = module_table.get("HasVar").expect("HasVar entries");
        assert_eq!(has_vars.len(), 2);
    }

    #[test]
    fn rerunning_the_pass_is_idempotent() {
        let source = "glob x = 1;\n";
        let (mut ast, _) = parse(source, FileID::new(0));
        let root = ast.root().expect("parsed module has a root");

        let mut sink = DiagnosticSink::new();
        run_pass(&mut SubNodeTablePass::new(), &mut ast, root, &mut sink);
        let first = ast.get_node(root).and_then(|n| n.data.meta().sub_node_tab.clone());

        run_pass(&mut SubNodeTablePass::new(), &mut ast, root, &mut sink);
        let second = ast.get_node(root).and_then(|n| n.data.meta().sub_node_tab.clone());

        assert_eq!(first.map(|t| t.len()), second.map(|t| t.len()));
    }
}
