//! Integration tests for top-level item parsing: architypes, abilities, the
//! decl/def split, imports, globals, and tests.

use jac_ast::nodes::{AnyNode, NodeKind};
use jac_parser::parser::parse;
use jac_source::types::FileID;

fn parse_ok(source: &str) -> jac_ast::ast::AST {
    let (ast, sink) = parse(source, FileID::new(1));
    assert!(!sink.has_errors(), "unexpected errors parsing {source:?}: {:?}", sink.errors());
    ast
}

fn top_level_items(ast: &jac_ast::ast::AST) -> Vec<AnyNode> {
    let root = ast.root().expect("module root set");
    let module = ast.get_node(root).expect("root exists");
    let AnyNode::Module(module) = &module.data else { panic!("root is not a Module") };
    let elements = ast.get_node(module.body).expect("elements node exists");
    let AnyNode::Elements(elements) = &elements.data else { panic!("elements is not an Elements") };
    elements.items.iter().map(|&id| ast.get_node(id).expect("item exists").data.clone()).collect()
}

#[test]
fn empty_module_parses_to_a_module_with_no_items() {
    let ast = parse_ok("");
    assert!(top_level_items(&ast).is_empty());
}

#[test]
fn parses_an_inline_object_definition() {
    let ast = parse_ok("object Point { has x: int = 0, y: int = 0; }");
    let items = top_level_items(&ast);
    assert_eq!(items.len(), 1);
    assert!(matches!(items[0], AnyNode::Architype(_)));
}

#[test]
fn parses_a_forward_architype_declaration_and_its_out_of_line_definition() {
    let ast = parse_ok("node Room; :node:Room { has label: str; }");
    let items = top_level_items(&ast);
    assert_eq!(items.len(), 2);
    assert!(matches!(items[0], AnyNode::ArchDecl(_)));
    assert!(matches!(items[1], AnyNode::ArchDef(_)));
}

#[test]
fn parses_an_ability_forward_decl_and_its_matching_def() {
    let ast = parse_ok("can greet() -> str; :can:greet() -> str { return \"hi\"; }");
    let items = top_level_items(&ast);
    assert_eq!(items.len(), 2);
    assert!(matches!(items[0], AnyNode::AbilityDecl(_)));
    assert!(matches!(items[1], AnyNode::AbilityDef(_)));
}

#[test]
fn parses_an_event_driven_ability_spec() {
    let ast = parse_ok("walker Visitor { can greet with entry; } :can:greet with entry { report here; }");
    let items = top_level_items(&ast);
    assert_eq!(items.len(), 2);
    assert!(matches!(items[1], AnyNode::AbilitySpec(_)));
}

#[test]
fn parses_a_jac_to_jac_import() {
    let ast = parse_ok("import from utils.math;");
    let items = top_level_items(&ast);
    assert!(matches!(items[0], AnyNode::Import(_)));
}

#[test]
fn parses_a_direct_python_import_with_items() {
    let ast = parse_ok("import:py from os, {path, getcwd as cwd};");
    let items = top_level_items(&ast);
    let AnyNode::Import(import) = &items[0] else { panic!("expected Import") };
    assert_eq!(import.lang, jac_ast::nodes::ImportLang::Target);
    assert!(import.items.is_some());
}

#[test]
fn parses_a_global_var_declaration_with_access_level() {
    let ast = parse_ok("glob priv counter = 0;");
    let items = top_level_items(&ast);
    let AnyNode::GlobalVars(globals) = &items[0] else { panic!("expected GlobalVars") };
    assert_eq!(globals.access, jac_ast::nodes::AccessLevel::Private);
}

#[test]
fn parses_a_named_test_block() {
    let ast = parse_ok("test basic_math { assert 1 + 1 == 2; }");
    let items = top_level_items(&ast);
    let AnyNode::Test(test) = &items[0] else { panic!("expected Test") };
    assert_eq!(test.name.as_deref(), Some("basic_math"));
}

#[test]
fn bare_statements_at_module_scope_become_module_code() {
    let ast = parse_ok("x = 1;");
    let items = top_level_items(&ast);
    assert!(matches!(items[0], AnyNode::ModuleCode(_)));
}

#[test]
fn a_malformed_item_is_recorded_and_recovery_continues_to_the_next_one() {
    let (ast, sink) = parse("object ; object Bar {}", FileID::new(1));
    assert!(sink.has_errors());
    let items = top_level_items(&ast);
    assert!(items.iter().any(|i| matches!(i, AnyNode::Architype(_))));
}

#[test]
fn architype_base_classes_are_parsed_into_a_base_classes_node() {
    let ast = parse_ok("object Dog(Animal, Named) {}");
    let items = top_level_items(&ast);
    let AnyNode::Architype(arch) = &items[0] else { panic!("expected Architype") };
    let bases = arch.bases.expect("base class list present");
    let node = ast.get_node(bases).expect("bases node exists");
    assert_eq!(node.kind, NodeKind::Support);
}
