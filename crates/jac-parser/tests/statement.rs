//! Integration tests for statement parsing: control flow, the three `for`
//! variants, data-spatial verbs, and the local `has` / bare expression forms.

use jac_ast::nodes::AnyNode;
use jac_parser::parser::parse;
use jac_source::types::FileID;

struct Module {
    ast: jac_ast::ast::AST,
}

impl Module {
    fn parse(source: &str) -> Self {
        let wrapped = format!("can f() {{ {source} }}");
        let (ast, sink) = parse(&wrapped, FileID::new(1));
        assert!(!sink.has_errors(), "unexpected errors parsing {source:?}: {:?}", sink.errors());
        Module { ast }
    }

    fn body(&self) -> Vec<AnyNode> {
        let root = self.ast.root().unwrap();
        let AnyNode::Module(module) = &self.ast.get_node(root).unwrap().data else { panic!() };
        let AnyNode::Elements(elements) = &self.ast.get_node(module.body).unwrap().data else { panic!() };
        let AnyNode::Ability(ability) = &self.ast.get_node(elements.items[0]).unwrap().data else {
            panic!("expected Ability")
        };
        let AnyNode::CodeBlock(block) = &self.ast.get_node(ability.body).unwrap().data else { panic!() };
        block.statements.iter().map(|&id| self.ast.get_node(id).unwrap().data.clone()).collect()
    }

    fn node(&self, id: jac_ast::nodes::NodeID) -> AnyNode {
        self.ast.get_node(id).unwrap().data.clone()
    }
}

#[test]
fn parses_an_if_elif_else_chain() {
    let module = Module::parse("if x { y = 1; } elif z { y = 2; } else { y = 3; }");
    let stmts = module.body();
    let AnyNode::IfStmt(top) = &stmts[0] else { panic!("expected IfStmt") };
    assert!(top.else_branch.is_some());
}

#[test]
fn parses_a_while_loop() {
    let stmts = Module::parse("while x < 10 { x += 1; }").body();
    assert!(matches!(stmts[0], AnyNode::WhileStmt(_)));
}

#[test]
fn parses_an_in_style_for_loop_without_swallowing_the_in_keyword() {
    let stmts = Module::parse("for item in items { report item; }").body();
    assert!(matches!(stmts[0], AnyNode::InForStmt(_)));
}

#[test]
fn parses_a_dict_style_for_loop() {
    let stmts = Module::parse("for k, v in pairs { report k; }").body();
    assert!(matches!(stmts[0], AnyNode::DictForStmt(_)));
}

#[test]
fn parses_a_counted_for_loop() {
    let stmts = Module::parse("for i = 0 to i < 10 by i += 1 { report i; }").body();
    assert!(matches!(stmts[0], AnyNode::IterForStmt(_)));
}

#[test]
fn parses_a_try_except_finally() {
    let stmts = Module::parse("try { risky(); } except e as err { report err; } finally { cleanup(); }").body();
    let AnyNode::TryStmt(try_stmt) = &stmts[0] else { panic!("expected TryStmt") };
    assert_eq!(try_stmt.handlers.len(), 1);
    assert!(try_stmt.finally.is_some());
}

#[test]
fn parses_raise_with_a_cause() {
    let stmts = Module::parse("raise ValueError(\"bad\") from original;").body();
    let AnyNode::RaiseStmt(raise) = &stmts[0] else { panic!("expected RaiseStmt") };
    assert!(raise.cause.is_some());
}

#[test]
fn parses_assert_with_a_message() {
    let stmts = Module::parse("assert x > 0, \"must be positive\";").body();
    let AnyNode::AssertStmt(assert_stmt) = &stmts[0] else { panic!("expected AssertStmt") };
    assert!(assert_stmt.message.is_some());
}

#[test]
fn parses_return_with_no_value() {
    let stmts = Module::parse("return;").body();
    let AnyNode::ReturnStmt(ret) = &stmts[0] else { panic!("expected ReturnStmt") };
    assert!(ret.value.is_none());
}

#[test]
fn parses_yield_from() {
    let stmts = Module::parse("yield from gen();").body();
    let AnyNode::YieldStmt(yield_stmt) = &stmts[0] else { panic!("expected YieldStmt") };
    assert!(yield_stmt.is_from);
}

#[test]
fn parses_visit_with_an_else_clause_and_no_trailing_semicolon() {
    let stmts = Module::parse("visit [-->] else { disengage; }").body();
    let AnyNode::VisitStmt(visit) = &stmts[0] else { panic!("expected VisitStmt") };
    assert!(visit.else_body.is_some());
}

#[test]
fn parses_an_edge_op_ref_with_a_filter() {
    let module = Module::parse("ahead = [-->](weight > 0);");
    let stmts = module.body();
    let AnyNode::ExprStmt(expr_stmt) = &stmts[0] else { panic!("expected ExprStmt") };
    let AnyNode::AssignmentList(list) = module.node(expr_stmt.value) else { panic!() };
    let AnyNode::Assignment(assignment) = module.node(list.assignments[0]) else { panic!() };
    let AnyNode::EdgeOpRef(edge_ref) = module.node(assignment.value.unwrap()) else { panic!("expected EdgeOpRef") };
    assert_eq!(edge_ref.dir, jac_ast::nodes::EdgeDir::Forward);
    assert!(edge_ref.filter.is_some());
}

#[test]
fn parses_a_connect_expression() {
    let module = Module::parse("a ++> b;");
    let stmts = module.body();
    let AnyNode::ExprStmt(expr_stmt) = &stmts[0] else { panic!("expected ExprStmt") };
    let AnyNode::AssignmentList(list) = module.node(expr_stmt.value) else { panic!() };
    let AnyNode::Assignment(assignment) = module.node(list.assignments[0]) else { panic!() };
    assert!(assignment.value.is_none());
    let AnyNode::ConnectOp(connect) = module.node(assignment.target) else { panic!("expected ConnectOp") };
    assert_eq!(connect.dir, jac_ast::nodes::EdgeDir::Forward);
}

#[test]
fn parses_a_bare_revisit() {
    let stmts = Module::parse("revisit;").body();
    let AnyNode::RevisitStmt(revisit) = &stmts[0] else { panic!("expected RevisitStmt") };
    assert!(revisit.target.is_none());
}

#[test]
fn parses_report_and_ignore() {
    let stmts = Module::parse("report 1; ignore here;").body();
    assert!(matches!(stmts[0], AnyNode::ReportStmt(_)));
    assert!(matches!(stmts[1], AnyNode::IgnoreStmt(_)));
}

#[test]
fn parses_a_local_has_declaration_as_an_assignment() {
    let stmts = Module::parse("has count: int = 0;").body();
    assert!(matches!(stmts[0], AnyNode::ExprStmt(_)));
}

#[test]
fn parses_a_plain_assignment_statement() {
    let module = Module::parse("x = 1 + 2;");
    let stmts = module.body();
    let AnyNode::ExprStmt(expr_stmt) = &stmts[0] else { panic!("expected ExprStmt") };
    let AnyNode::AssignmentList(list) = module.node(expr_stmt.value) else { panic!("expected AssignmentList") };
    assert_eq!(list.assignments.len(), 1);
}

#[test]
fn parses_an_augmented_assignment_operator() {
    let module = Module::parse("total += delta;");
    let stmts = module.body();
    let AnyNode::ExprStmt(expr_stmt) = &stmts[0] else { panic!("expected ExprStmt") };
    let AnyNode::AssignmentList(list) = module.node(expr_stmt.value) else { panic!("expected AssignmentList") };
    let AnyNode::Assignment(assignment) = module.node(list.assignments[0]) else { panic!("expected Assignment") };
    assert_eq!(assignment.op, jac_ast::nodes::AssignOp::AddAssign);
}

#[test]
fn a_malformed_statement_is_rejected_but_does_not_panic() {
    let (ast, sink) = parse("can f() { if } }", FileID::new(1));
    assert!(sink.has_errors());
    let _ = ast;
}
