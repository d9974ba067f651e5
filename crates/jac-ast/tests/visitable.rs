//! Exercises double dispatch through `Visitable` and the arena's generic
//! `visit_as` entry point against a small hand-built tree.

use jac_ast::ast::AST;
use jac_ast::nodes::{ASTNode, AnyNode, NodeID, NodeKind};
use jac_ast::visitor::{Visitable, Visitor, VisitorResult};
use jac_source::types::Span;

struct NameCollector {
    names: Vec<String>,
}

impl Visitor<()> for NameCollector {
    fn visit(&mut self, node_id: NodeID) -> Option<()> {
        self.try_visit(node_id).ok()
    }

    fn visit_name_tok(&mut self, node_id: NodeID) -> VisitorResult<()> {
        self.names.push(format!("{node_id}"));
        Ok(())
    }
}

fn alloc_name(ast: &mut AST, text: &str) -> NodeID {
    let id = NodeID::new(ast.node_count() as u32, 1);
    let node = jac_ast::nodes::NameTok::new(text.to_string(), id, Span::synthetic());
    ast.alloc_node(NodeKind::Token, AnyNode::NameTok(node), Span::synthetic())
}

#[test]
fn visitable_dispatches_to_the_matching_visit_method() {
    let mut ast = AST::new();
    let id = alloc_name(&mut ast, "walker");

    let mut collector = NameCollector { names: Vec::new() };
    let node = ast.get_node(id).expect("node was just allocated");
    node.data.accept(&mut collector, id).expect("name_tok visit is implemented");

    assert_eq!(collector.names.len(), 1);
}

#[test]
fn unhandled_visit_method_reports_custom_error() {
    let mut ast = AST::new();
    let params = jac_ast::nodes::FuncParams::new(Vec::new(), NodeID::new(0, 1), Span::synthetic());
    let id = ast.alloc_node(NodeKind::Support, AnyNode::FuncParams(params), Span::synthetic());

    let mut collector = NameCollector { names: Vec::new() };
    let node = ast.get_node(id).expect("node was just allocated");
    let err = node.data.accept(&mut collector, id).expect_err("visit_func_params has no override");

    assert!(err.to_string().contains("visit_func_params"));
}

#[test]
fn elements_children_are_returned_in_document_order() {
    let mut ast = AST::new();
    let a = alloc_name(&mut ast, "a");
    let b = alloc_name(&mut ast, "b");
    let c = alloc_name(&mut ast, "c");

    let elements = jac_ast::nodes::Elements::new(vec![a, b, c], NodeID::new(3, 1), Span::synthetic());
    let elements_id = ast.alloc_node(NodeKind::Structural, AnyNode::Elements(elements), Span::synthetic());

    let node = ast.get_node(elements_id).unwrap();
    assert_eq!(node.data.children(), vec![a, b, c]);
}
