//! Integration tests for expression parsing: the precedence chain from the
//! ternary `if`/`else` form down through atoms and their trailers.

use jac_ast::nodes::{AnyNode, BinOp, LiteralValue, NodeID, UnaryOp};
use jac_parser::parser::parse;
use jac_source::types::FileID;

struct Expr {
    ast: jac_ast::ast::AST,
    value: NodeID,
}

impl Expr {
    fn parse(source: &str) -> Self {
        let wrapped = format!("can f() {{ __result__ = {source}; }}");
        let (ast, sink) = parse(&wrapped, FileID::new(1));
        assert!(!sink.has_errors(), "unexpected errors parsing {source:?}: {:?}", sink.errors());
        let root = ast.root().unwrap();
        let AnyNode::Module(module) = &ast.get_node(root).unwrap().data else { panic!() };
        let AnyNode::Elements(elements) = &ast.get_node(module.body).unwrap().data else { panic!() };
        let AnyNode::Ability(ability) = &ast.get_node(elements.items[0]).unwrap().data else { panic!() };
        let AnyNode::CodeBlock(block) = &ast.get_node(ability.body).unwrap().data else { panic!() };
        let AnyNode::ExprStmt(expr_stmt) = &ast.get_node(block.statements[0]).unwrap().data else { panic!() };
        let AnyNode::AssignmentList(list) = &ast.get_node(expr_stmt.value).unwrap().data else { panic!() };
        let AnyNode::Assignment(assignment) = &ast.get_node(list.assignments[0]).unwrap().data else { panic!() };
        let value = assignment.value.expect("expected a value expression");
        Expr { ast, value }
    }

    fn node(&self) -> AnyNode { self.at(self.value) }

    fn at(&self, id: NodeID) -> AnyNode { self.ast.get_node(id).unwrap().data.clone() }
}

#[test]
fn parses_a_ternary_expression() {
    let expr = Expr::parse("a if cond else b");
    let AnyNode::IfElseExpr(if_else) = expr.node() else { panic!("expected IfElseExpr") };
    assert!(matches!(expr.at(if_else.cond), AnyNode::NameTok(_)));
}

#[test]
fn ternary_is_right_associative() {
    // a if c1 else (b if c2 else c) -- nesting lives in the else branch.
    let expr = Expr::parse("a if c1 else b if c2 else c");
    let AnyNode::IfElseExpr(outer) = expr.node() else { panic!("expected IfElseExpr") };
    assert!(matches!(expr.at(outer.else_expr), AnyNode::IfElseExpr(_)));
}

#[test]
fn parses_a_spawn_expression() {
    let expr = Expr::parse("Visitor() spawn here");
    let AnyNode::SpawnExpr(spawn) = expr.node() else { panic!("expected SpawnExpr") };
    assert!(matches!(expr.at(spawn.target), AnyNode::KindRef(_)));
}

#[test]
fn parses_a_forward_connect() {
    let expr = Expr::parse("a ++> b");
    let AnyNode::ConnectOp(connect) = expr.node() else { panic!("expected ConnectOp") };
    assert_eq!(connect.dir, jac_ast::nodes::EdgeDir::Forward);
}

#[test]
fn parses_a_backward_connect() {
    let expr = Expr::parse("a <++ b");
    let AnyNode::ConnectOp(connect) = expr.node() else { panic!("expected ConnectOp") };
    assert_eq!(connect.dir, jac_ast::nodes::EdgeDir::Backward);
}

#[test]
fn parses_a_bidirectional_connect() {
    let expr = Expr::parse("a <++> b");
    let AnyNode::ConnectOp(connect) = expr.node() else { panic!("expected ConnectOp") };
    assert_eq!(connect.dir, jac_ast::nodes::EdgeDir::Any);
}

#[test]
fn connect_chains_left_associatively() {
    let expr = Expr::parse("a ++> b ++> c");
    let AnyNode::ConnectOp(outer) = expr.node() else { panic!("expected ConnectOp") };
    assert!(matches!(expr.at(outer.left), AnyNode::ConnectOp(_)));
}

#[test]
fn and_binds_tighter_than_or() {
    // a or (b and c)
    let expr = Expr::parse("a or b and c");
    let AnyNode::BinaryExpr(top) = expr.node() else { panic!("expected BinaryExpr") };
    assert_eq!(top.op, BinOp::Or);
    let AnyNode::BinaryExpr(right) = expr.at(top.rhs) else { panic!("expected nested BinaryExpr") };
    assert_eq!(right.op, BinOp::And);
}

#[test]
fn parses_a_not_expression() {
    let expr = Expr::parse("not ready");
    let AnyNode::UnaryExpr(unary) = expr.node() else { panic!("expected UnaryExpr") };
    assert_eq!(unary.op, UnaryOp::Not);
}

#[test]
fn comparison_chain_is_left_associative() {
    let expr = Expr::parse("a == b != c");
    let AnyNode::BinaryExpr(outer) = expr.node() else { panic!("expected BinaryExpr") };
    assert_eq!(outer.op, BinOp::NotEq);
    let AnyNode::BinaryExpr(inner) = expr.at(outer.lhs) else { panic!("expected nested BinaryExpr") };
    assert_eq!(inner.op, BinOp::Eq);
}

#[test]
fn parses_not_in_as_a_single_operator() {
    let expr = Expr::parse("a not in xs");
    let AnyNode::BinaryExpr(cmp) = expr.node() else { panic!("expected BinaryExpr") };
    assert_eq!(cmp.op, BinOp::NotIn);
}

#[test]
fn parses_is_not_as_a_single_operator() {
    let expr = Expr::parse("a is not b");
    let AnyNode::BinaryExpr(cmp) = expr.node() else { panic!("expected BinaryExpr") };
    assert_eq!(cmp.op, BinOp::IsNot);
}

#[test]
fn parses_an_elvis_expression() {
    let expr = Expr::parse("maybe ?? fallback");
    let AnyNode::BinaryExpr(elvis) = expr.node() else { panic!("expected BinaryExpr") };
    assert_eq!(elvis.op, BinOp::Elvis);
}

#[test]
fn parses_bitwise_operators_tightest_to_loosest() {
    // a | b ^ c & d -- & binds tightest, then ^, then |.
    let expr = Expr::parse("a | b ^ c & d");
    let AnyNode::BinaryExpr(top) = expr.node() else { panic!("expected BinaryExpr") };
    assert_eq!(top.op, BinOp::BitOr);
    let AnyNode::BinaryExpr(xor) = expr.at(top.rhs) else { panic!("expected BinaryExpr") };
    assert_eq!(xor.op, BinOp::BitXor);
    let AnyNode::BinaryExpr(and) = expr.at(xor.rhs) else { panic!("expected BinaryExpr") };
    assert_eq!(and.op, BinOp::BitAnd);
}

#[test]
fn parses_shift_operators() {
    let expr = Expr::parse("a << b >> c");
    let AnyNode::BinaryExpr(outer) = expr.node() else { panic!("expected BinaryExpr") };
    assert_eq!(outer.op, BinOp::Shr);
}

#[test]
fn multiplicative_binds_tighter_than_additive() {
    let expr = Expr::parse("a + b * c");
    let AnyNode::BinaryExpr(add) = expr.node() else { panic!("expected BinaryExpr") };
    assert_eq!(add.op, BinOp::Add);
    let AnyNode::BinaryExpr(mul) = expr.at(add.rhs) else { panic!("expected BinaryExpr") };
    assert_eq!(mul.op, BinOp::Mul);
}

#[test]
fn parses_floor_division_and_modulo() {
    let expr = Expr::parse("a // b % c");
    let AnyNode::BinaryExpr(outer) = expr.node() else { panic!("expected BinaryExpr") };
    assert_eq!(outer.op, BinOp::Mod);
    let AnyNode::BinaryExpr(inner) = expr.at(outer.lhs) else { panic!("expected BinaryExpr") };
    assert_eq!(inner.op, BinOp::FloorDiv);
}

#[test]
fn parses_unary_negation_and_bitwise_not() {
    let expr = Expr::parse("-~x");
    let AnyNode::UnaryExpr(neg) = expr.node() else { panic!("expected UnaryExpr") };
    assert_eq!(neg.op, UnaryOp::Neg);
    let AnyNode::UnaryExpr(not) = expr.at(neg.operand) else { panic!("expected nested UnaryExpr") };
    assert_eq!(not.op, UnaryOp::BitNot);
}

#[test]
fn power_is_right_associative() {
    // 2 ** (3 ** 2)
    let expr = Expr::parse("2 ** 3 ** 2");
    let AnyNode::BinaryExpr(outer) = expr.node() else { panic!("expected BinaryExpr") };
    assert_eq!(outer.op, BinOp::Pow);
    assert!(matches!(expr.at(outer.rhs), AnyNode::BinaryExpr(_)));
}

#[test]
fn parses_attribute_access_and_a_call_trailer() {
    let expr = Expr::parse("walker.greet(name, loud=true)");
    let AnyNode::AtomTrailerExpr(trailer) = expr.node() else { panic!("expected AtomTrailerExpr") };
    assert_eq!(trailer.trailers.len(), 2);
    assert!(matches!(expr.at(trailer.trailers[0]), AnyNode::NameTok(_)));
    let AnyNode::FuncCallExpr(call) = expr.at(trailer.trailers[1]) else { panic!("expected FuncCallExpr") };
    assert_eq!(call.args.len(), 1);
    assert_eq!(call.kwargs.len(), 1);
}

#[test]
fn parses_unpacking_in_a_call() {
    let expr = Expr::parse("build(*args, **kwargs)");
    let AnyNode::AtomTrailerExpr(trailer) = expr.node() else { panic!("expected AtomTrailerExpr") };
    let AnyNode::FuncCallExpr(call) = expr.at(trailer.trailers[0]) else { panic!("expected FuncCallExpr") };
    assert_eq!(call.args.len(), 2);
    let AnyNode::UnpackExpr(first) = expr.at(call.args[0]) else { panic!("expected UnpackExpr") };
    assert!(!first.is_dict);
    let AnyNode::UnpackExpr(second) = expr.at(call.args[1]) else { panic!("expected UnpackExpr") };
    assert!(second.is_dict);
}

#[test]
fn parses_a_plain_index() {
    let expr = Expr::parse("items[0]");
    let AnyNode::AtomTrailerExpr(trailer) = expr.node() else { panic!("expected AtomTrailerExpr") };
    let AnyNode::IndexSliceExpr(index) = expr.at(trailer.trailers[0]) else { panic!("expected IndexSliceExpr") };
    assert!(!index.is_slice);
    assert!(index.start.is_some());
}

#[test]
fn parses_a_full_slice() {
    let expr = Expr::parse("items[1:5:2]");
    let AnyNode::AtomTrailerExpr(trailer) = expr.node() else { panic!("expected AtomTrailerExpr") };
    let AnyNode::IndexSliceExpr(slice) = expr.at(trailer.trailers[0]) else { panic!("expected IndexSliceExpr") };
    assert!(slice.is_slice);
    assert!(slice.start.is_some());
    assert!(slice.stop.is_some());
    assert!(slice.step.is_some());
}

#[test]
fn parses_an_open_ended_slice() {
    let expr = Expr::parse("items[:5]");
    let AnyNode::AtomTrailerExpr(trailer) = expr.node() else { panic!("expected AtomTrailerExpr") };
    let AnyNode::IndexSliceExpr(slice) = expr.at(trailer.trailers[0]) else { panic!("expected IndexSliceExpr") };
    assert!(slice.is_slice);
    assert!(slice.start.is_none());
    assert!(slice.stop.is_some());
}

#[test]
fn parses_a_list_literal() {
    let expr = Expr::parse("[1, 2, 3]");
    let AnyNode::ListExpr(list) = expr.node() else { panic!("expected ListExpr") };
    assert!(!list.is_set);
    assert_eq!(list.items.len(), 3);
}

#[test]
fn parses_an_empty_list_literal() {
    let expr = Expr::parse("[]");
    let AnyNode::ListExpr(list) = expr.node() else { panic!("expected ListExpr") };
    assert!(list.items.is_empty());
}

#[test]
fn parses_a_set_literal() {
    let expr = Expr::parse("{1, 2}");
    let AnyNode::ListExpr(set) = expr.node() else { panic!("expected ListExpr") };
    assert!(set.is_set);
}

#[test]
fn parses_a_dict_literal() {
    let expr = Expr::parse("{\"a\": 1, \"b\": 2}");
    let AnyNode::DictExpr(dict) = expr.node() else { panic!("expected DictExpr") };
    assert_eq!(dict.entries.len(), 2);
}

#[test]
fn parses_an_empty_dict_literal() {
    let expr = Expr::parse("{}");
    let AnyNode::DictExpr(dict) = expr.node() else { panic!("expected DictExpr") };
    assert!(dict.entries.is_empty());
}

#[test]
fn parses_a_list_comprehension() {
    let expr = Expr::parse("[x * 2 for x in items if x > 0]");
    let AnyNode::ComprehensionExpr(comp) = expr.node() else { panic!("expected ComprehensionExpr") };
    assert_eq!(comp.kind, jac_ast::nodes::ComprehensionKind::List);
    assert!(comp.condition.is_some());
    assert!(comp.key.is_none());
}

#[test]
fn parses_a_dict_comprehension() {
    let expr = Expr::parse("{k: lookup[k] for k in keys}");
    let AnyNode::ComprehensionExpr(comp) = expr.node() else { panic!("expected ComprehensionExpr") };
    assert_eq!(comp.kind, jac_ast::nodes::ComprehensionKind::Dict);
    assert!(comp.key.is_some());
}

#[test]
fn parses_a_generator_expression() {
    let expr = Expr::parse("(x for x in items)");
    let AnyNode::ComprehensionExpr(comp) = expr.node() else { panic!("expected ComprehensionExpr") };
    assert_eq!(comp.kind, jac_ast::nodes::ComprehensionKind::Generator);
}

#[test]
fn parenthesized_expression_is_just_its_inner_value() {
    let expr = Expr::parse("(1 + 2)");
    assert!(matches!(expr.node(), AnyNode::BinaryExpr(_)));
}

#[test]
fn merges_adjacent_string_literals() {
    let expr = Expr::parse("\"a\" \"b\" \"c\"");
    let AnyNode::MultiStringExpr(multi) = expr.node() else { panic!("expected MultiStringExpr") };
    assert_eq!(multi.parts.len(), 3);
}

#[test]
fn a_single_string_literal_is_not_wrapped_in_multi_string() {
    let expr = Expr::parse("\"solo\"");
    let AnyNode::LiteralTok(lit) = expr.node() else { panic!("expected LiteralTok") };
    assert!(matches!(lit.value, LiteralValue::Str(_)));
}

#[test]
fn parses_an_edge_op_ref_with_no_filter() {
    let expr = Expr::parse("[<--]");
    let AnyNode::EdgeOpRef(edge_ref) = expr.node() else { panic!("expected EdgeOpRef") };
    assert_eq!(edge_ref.dir, jac_ast::nodes::EdgeDir::Backward);
    assert!(edge_ref.filter.is_none());
}

#[test]
fn a_plain_bracket_literal_is_not_confused_with_an_edge_op_ref() {
    let expr = Expr::parse("[a, b]");
    assert!(matches!(expr.node(), AnyNode::ListExpr(_)));
}

#[test]
fn parses_the_here_and_visitor_kind_references() {
    let here = Expr::parse("here");
    assert!(matches!(here.node(), AnyNode::KindRef(_)));
    let visitor = Expr::parse("visitor");
    assert!(matches!(visitor.node(), AnyNode::KindRef(_)));
}

#[test]
fn parses_integer_and_float_literals() {
    let int_expr = Expr::parse("42");
    let AnyNode::LiteralTok(lit) = int_expr.node() else { panic!("expected LiteralTok") };
    assert_eq!(lit.value, LiteralValue::Int(42));

    let float_expr = Expr::parse("3.5");
    let AnyNode::LiteralTok(lit) = float_expr.node() else { panic!("expected LiteralTok") };
    assert_eq!(lit.value, LiteralValue::Float(3.5));
}
