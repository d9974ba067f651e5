//! Tests for symbol table functionality and the full analysis pipeline.

use jac_analyzer::context::AnalysisContext;
use jac_analyzer::registry::ModuleRegistry;
use jac_analyzer::symbol::{ScopeKind, Symbol, SymbolKind, SymbolTable};
use jac_ast::nodes::{AccessLevel, NodeID};
use jac_source::diagnostic::DiagnosticSink;
use jac_source::types::{Span, SourceManager};

fn span() -> Span { Span::synthetic() }

#[test]
fn new_table_has_a_seeded_module_scope() {
    let table = SymbolTable::new();
    assert_eq!(table.scope_count(), 1, "should have only the module scope");
    assert!(table.current_scope().is_some());
    assert!(table.lookup_symbol("print").is_some(), "builtins should be seeded");
}

#[test]
fn scope_creation_tracks_parent_and_kind() {
    let mut table = SymbolTable::new();
    let module_scope = table.current_scope().unwrap();

    let func_scope = table.create_scope(ScopeKind::Ability, Some(module_scope));
    assert_eq!(table.scope_count(), 2);

    let scope = table.get_scope(func_scope).unwrap();
    assert_eq!(scope.kind, ScopeKind::Ability);
    assert_eq!(scope.parent(), Some(module_scope));
}

#[test]
fn scope_hierarchy_nests_module_architype_ability_block() {
    let mut table = SymbolTable::new();
    let module_scope = table.current_scope().unwrap();

    let arch_scope = table.create_scope(ScopeKind::Architype, Some(module_scope));
    let ability_scope = table.create_scope(ScopeKind::Ability, Some(arch_scope));
    let block_scope = table.create_scope(ScopeKind::Block, Some(ability_scope));

    assert_eq!(table.get_scope(block_scope).unwrap().parent(), Some(ability_scope));
    assert_eq!(table.get_scope(ability_scope).unwrap().parent(), Some(arch_scope));
    assert_eq!(table.get_scope(arch_scope).unwrap().parent(), Some(module_scope));
}

#[test]
fn enter_and_exit_scope_move_the_current_scope() {
    let mut table = SymbolTable::new();
    let module_scope = table.current_scope().unwrap();

    let func_scope = table.create_scope(ScopeKind::Ability, Some(module_scope));
    table.enter_scope(func_scope);
    assert_eq!(table.current_scope(), Some(func_scope));

    assert!(table.exit_scope().is_some());
    assert_eq!(table.current_scope(), Some(module_scope));
}

#[test]
fn exiting_the_module_scope_returns_none() {
    let mut table = SymbolTable::new();
    assert_eq!(table.exit_scope(), None);
}

#[test]
fn symbol_definition_and_lookup() {
    let mut table = SymbolTable::new();
    let scope = table.current_scope().unwrap();
    let symbol = Symbol::new("x".to_string(), SymbolKind::Variable, AccessLevel::Public, NodeID::new(1, 0), span(), scope);

    assert!(table.define_symbol("x".to_string(), symbol).is_ok());

    let found = table.lookup_symbol("x").expect("just defined");
    assert_eq!(found.name, "x");
    assert_eq!(found.kind, SymbolKind::Variable);
    assert!(table.lookup_symbol("does_not_exist").is_none());
}

#[test]
fn redeclaring_a_name_in_the_same_scope_is_an_error() {
    let mut table = SymbolTable::new();
    let scope = table.current_scope().unwrap();

    let first = Symbol::new("x".to_string(), SymbolKind::Variable, AccessLevel::Public, NodeID::new(1, 0), span(), scope);
    let second = Symbol::new("x".to_string(), SymbolKind::Variable, AccessLevel::Public, NodeID::new(2, 0), span(), scope);

    assert!(table.define_symbol("x".to_string(), first).is_ok());
    assert!(table.define_symbol("x".to_string(), second).is_err());
}

#[test]
fn lookup_in_scope_chain_walks_outward_to_the_module_scope() {
    let mut table = SymbolTable::new();
    let module_scope = table.current_scope().unwrap();

    let global = Symbol::new(
        "global_var".to_string(),
        SymbolKind::Variable,
        AccessLevel::Public,
        NodeID::new(1, 0),
        span(),
        module_scope,
    );
    table.define_symbol("global_var".to_string(), global).unwrap();

    let func_scope = table.create_scope(ScopeKind::Ability, Some(module_scope));
    table.enter_scope(func_scope);

    let local = Symbol::new(
        "local_var".to_string(),
        SymbolKind::Variable,
        AccessLevel::Public,
        NodeID::new(2, 0),
        span(),
        func_scope,
    );
    table.define_symbol("local_var".to_string(), local).unwrap();

    assert!(table.lookup_in_scope_chain("local_var").is_some());
    assert!(table.lookup_in_scope_chain("global_var").is_some());

    let _ = table.exit_scope();

    assert!(table.lookup_in_scope_chain("local_var").is_none());
    assert!(table.lookup_in_scope_chain("global_var").is_some());
}

#[test]
fn node_scope_association_round_trips() {
    let mut table = SymbolTable::new();
    let module_scope = table.current_scope().unwrap();
    let node_id = NodeID::new(42, 0);

    table.associate_node_with_scope(node_id, module_scope);
    assert_eq!(table.get_node_scope(node_id), Some(module_scope));
}

#[test]
fn resolve_id_finds_the_symbol_by_its_assigned_id() {
    let mut table = SymbolTable::new();
    let scope = table.current_scope().unwrap();
    let symbol = Symbol::new("x".to_string(), SymbolKind::Variable, AccessLevel::Public, NodeID::new(1, 0), span(), scope);

    table.define_symbol("x".to_string(), symbol).unwrap();
    let id = table.lookup_symbol("x").unwrap().id;

    assert_eq!(table.resolve_id(id).unwrap().name, "x");
}

#[test]
fn analyze_module_builds_a_symbol_table_for_a_real_program() {
    let source = "object Foo {\n    has x: int = 0;\n\n    can greet() {\n        print(x);\n    }\n}\n";
    let mut source_manager = SourceManager::new();
    let file_id = source_manager.add_file("foo.jac".to_string(), source.to_string());

    let (mut ast, mut sink) = jac_parser::parser::parse(source, file_id);
    let root = ast.root().expect("parses to a module root");

    let registry = ModuleRegistry::new();
    let mut analysis_sink = DiagnosticSink::new();
    let analysis = AnalysisContext::analyze_module(
        &mut source_manager,
        &registry,
        &[],
        std::path::PathBuf::from("."),
        &mut ast,
        root,
        &mut analysis_sink,
    );

    sink.extend(analysis_sink);
    assert!(!sink.has_errors(), "unexpected errors: {:?}", sink.errors());
    assert!(analysis.symbol_table.lookup_symbol("Foo").is_some());
}
