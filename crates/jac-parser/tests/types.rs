//! Integration tests for type annotations, parameter/has-var declarations,
//! function and event signatures, and assignment lists.

use jac_ast::nodes::{AnyNode, NodeID};
use jac_parser::parser::parse;
use jac_source::types::FileID;

struct Module {
    ast: jac_ast::ast::AST,
}

impl Module {
    fn parse(source: &str) -> Self {
        let (ast, sink) = parse(source, FileID::new(1));
        assert!(!sink.has_errors(), "unexpected errors parsing {source:?}: {:?}", sink.errors());
        Module { ast }
    }

    fn items(&self) -> Vec<AnyNode> {
        let root = self.ast.root().unwrap();
        let AnyNode::Module(module) = &self.ast.get_node(root).unwrap().data else { panic!() };
        let AnyNode::Elements(elements) = &self.ast.get_node(module.body).unwrap().data else { panic!() };
        elements.items.iter().map(|&id| self.ast.get_node(id).unwrap().data.clone()).collect()
    }

    fn node(&self, id: NodeID) -> AnyNode { self.ast.get_node(id).unwrap().data.clone() }
}

fn arch_members(module: &Module, item: &AnyNode) -> Vec<AnyNode> {
    let AnyNode::Architype(arch) = item else { panic!("expected Architype") };
    let AnyNode::ArchBlock(block) = module.node(arch.body) else { panic!("expected ArchBlock") };
    block.members.iter().map(|&id| module.node(id)).collect()
}

#[test]
fn parses_a_has_var_with_a_plain_type_and_no_default() {
    let module = Module::parse("object Point { has x: int; }");
    let members = arch_members(&module, &module.items()[0]);
    let AnyNode::ArchHas(has) = &members[0] else { panic!("expected ArchHas") };
    let AnyNode::HasVar(var) = module.node(has.vars[0]) else { panic!("expected HasVar") };
    assert!(var.type_spec.is_some());
    assert!(var.default.is_none());
}

#[test]
fn parses_a_has_var_with_a_default_value() {
    let module = Module::parse("object Point { has y: int = 0; }");
    let members = arch_members(&module, &module.items()[0]);
    let AnyNode::ArchHas(has) = &members[0] else { panic!("expected ArchHas") };
    let AnyNode::HasVar(var) = module.node(has.vars[0]) else { panic!("expected HasVar") };
    assert!(var.default.is_some());
}

#[test]
fn parses_a_has_declaration_with_multiple_comma_separated_vars() {
    let module = Module::parse("object Point { has x: int, y: int; }");
    let members = arch_members(&module, &module.items()[0]);
    let AnyNode::ArchHas(has) = &members[0] else { panic!("expected ArchHas") };
    assert_eq!(has.vars.len(), 2);
}

#[test]
fn parses_a_nullable_type() {
    let module = Module::parse("object Point { has nickname: str?; }");
    let members = arch_members(&module, &module.items()[0]);
    let AnyNode::ArchHas(has) = &members[0] else { panic!("expected ArchHas") };
    let AnyNode::HasVar(var) = module.node(has.vars[0]) else { panic!("expected HasVar") };
    let AnyNode::TypeSpec(type_spec) = module.node(var.type_spec.unwrap()) else { panic!("expected TypeSpec") };
    assert!(type_spec.nullable);
}

#[test]
fn parses_a_generic_type_with_one_parameter() {
    let module = Module::parse("object Point { has items: list(int); }");
    let members = arch_members(&module, &module.items()[0]);
    let AnyNode::ArchHas(has) = &members[0] else { panic!("expected ArchHas") };
    let AnyNode::HasVar(var) = module.node(has.vars[0]) else { panic!("expected HasVar") };
    let AnyNode::TypeSpec(type_spec) = module.node(var.type_spec.unwrap()) else { panic!("expected TypeSpec") };
    assert_eq!(type_spec.params.len(), 1);
}

#[test]
fn parses_a_data_spatial_kind_as_a_type_base() {
    let module = Module::parse("object Point { has owner: node; }");
    let members = arch_members(&module, &module.items()[0]);
    let AnyNode::ArchHas(has) = &members[0] else { panic!("expected ArchHas") };
    let AnyNode::HasVar(var) = module.node(has.vars[0]) else { panic!("expected HasVar") };
    let AnyNode::TypeSpec(type_spec) = module.node(var.type_spec.unwrap()) else { panic!("expected TypeSpec") };
    assert!(matches!(module.node(type_spec.base), AnyNode::KindRef(_)));
}

#[test]
fn parses_function_params_with_types_and_defaults() {
    let module = Module::parse("can add(a: int, b: int = 0) -> int { return a + b; }");
    let AnyNode::Ability(ability) = &module.items()[0] else { panic!("expected Ability") };
    let AnyNode::FuncSignature(sig) = module.node(ability.signature) else { panic!("expected FuncSignature") };
    assert!(sig.return_type.is_some());
    let AnyNode::FuncParams(params) = module.node(sig.params) else { panic!("expected FuncParams") };
    assert_eq!(params.params.len(), 2);
    let AnyNode::ParamVar(first) = module.node(params.params[0]) else { panic!("expected ParamVar") };
    assert!(first.type_spec.is_some());
    assert!(first.default.is_none());
    let AnyNode::ParamVar(second) = module.node(params.params[1]) else { panic!("expected ParamVar") };
    assert!(second.default.is_some());
}

#[test]
fn parses_star_and_star_star_collector_params() {
    let module = Module::parse("can f(*args, **kwargs) { return; }");
    let AnyNode::Ability(ability) = &module.items()[0] else { panic!("expected Ability") };
    let AnyNode::FuncSignature(sig) = module.node(ability.signature) else { panic!("expected FuncSignature") };
    let AnyNode::FuncParams(params) = module.node(sig.params) else { panic!("expected FuncParams") };
    let AnyNode::ParamVar(args) = module.node(params.params[0]) else { panic!("expected ParamVar") };
    assert!(args.is_star);
    assert!(!args.is_star_star);
    let AnyNode::ParamVar(kwargs) = module.node(params.params[1]) else { panic!("expected ParamVar") };
    assert!(kwargs.is_star_star);
    assert!(!kwargs.is_star);
}

#[test]
fn parses_a_signature_with_no_return_type() {
    let module = Module::parse("can notify() { return; }");
    let AnyNode::Ability(ability) = &module.items()[0] else { panic!("expected Ability") };
    let AnyNode::FuncSignature(sig) = module.node(ability.signature) else { panic!("expected FuncSignature") };
    assert!(sig.return_type.is_none());
}

#[test]
fn parses_an_entry_event_signature_with_no_type_filter() {
    let module = Module::parse("walker Visitor { can greet with entry { report here; } }");
    let members = {
        let AnyNode::Architype(arch) = &module.items()[0] else { panic!("expected Architype") };
        let AnyNode::ArchBlock(block) = module.node(arch.body) else { panic!("expected ArchBlock") };
        block.members.iter().map(|&id| module.node(id)).collect::<Vec<_>>()
    };
    let AnyNode::Ability(ability) = &members[0] else { panic!("expected Ability") };
    let AnyNode::EventSignature(sig) = module.node(ability.signature) else { panic!("expected EventSignature") };
    assert_eq!(sig.event, jac_ast::nodes::EventKind::Entry);
    assert!(sig.type_filter.is_none());
}

#[test]
fn parses_an_exit_event_signature_with_a_type_filter() {
    let module = Module::parse(":can:greet with exit: Room { disengage; }");
    let AnyNode::AbilitySpec(spec) = &module.items()[0] else { panic!("expected AbilitySpec") };
    let AnyNode::EventSignature(sig) = module.node(spec.event.unwrap()) else { panic!("expected EventSignature") };
    assert_eq!(sig.event, jac_ast::nodes::EventKind::Exit);
    assert!(sig.type_filter.is_some());
}

#[test]
fn forward_declares_an_event_driven_ability_with_no_body() {
    let module = Module::parse("walker Visitor { can greet with entry; }");
    let AnyNode::Architype(arch) = &module.items()[0] else { panic!("expected Architype") };
    let AnyNode::ArchBlock(block) = module.node(arch.body) else { panic!("expected ArchBlock") };
    let AnyNode::AbilityDecl(decl) = module.node(block.members[0]) else { panic!("expected AbilityDecl") };
    let AnyNode::EventSignature(sig) = module.node(decl.signature) else { panic!("expected EventSignature") };
    assert_eq!(sig.event, jac_ast::nodes::EventKind::Entry);
}

#[test]
fn parses_a_glob_assignment_list_with_mixed_defaults() {
    let module = Module::parse("glob x: int = 1, y = 2;");
    let AnyNode::GlobalVars(globals) = &module.items()[0] else { panic!("expected GlobalVars") };
    let AnyNode::AssignmentList(list) = module.node(globals.assignments) else { panic!("expected AssignmentList") };
    assert_eq!(list.assignments.len(), 2);
    let AnyNode::Assignment(first) = module.node(list.assignments[0]) else { panic!("expected Assignment") };
    assert_eq!(first.op, jac_ast::nodes::AssignOp::Assign);
    assert!(first.value.is_some());
    assert!(first.type_spec.is_some());
    let AnyNode::Assignment(second) = module.node(list.assignments[1]) else { panic!("expected Assignment") };
    assert!(second.type_spec.is_none());
}

#[test]
fn parses_a_private_glob_declaration() {
    let module = Module::parse("glob priv counter = 0;");
    let AnyNode::GlobalVars(globals) = &module.items()[0] else { panic!("expected GlobalVars") };
    assert_eq!(globals.access, jac_ast::nodes::AccessLevel::Private);
}
