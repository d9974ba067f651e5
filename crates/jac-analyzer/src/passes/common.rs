//! Small helpers shared between passes: pulling a plain identifier's text
//! out of whatever node shape currently wraps it.

use jac_ast::ast::AST;
use jac_ast::nodes::{AccessLevel, AnyNode, NodeID};

/// Resolves a `NodeID` that names something (an assignment target, an
/// architype/ability name, a parameter) down to the identifier text, if it
/// is in fact a bare name.
///
/// Targets more complex than a bare name (an attribute path, an index,
/// a tuple) don't introduce a new binding and return `None`.
#[must_use]
pub fn bare_name(ast: &AST, id: NodeID) -> Option<String> {
    match &ast.get_node(id)?.data {
        AnyNode::NameTok(tok) => Some(tok.text.clone()),
        AnyNode::AtomTrailerExpr(trailer) if trailer.trailers.is_empty() => bare_name(ast, trailer.atom),
        _ => None,
    }
}

/// Whether `module_root`'s top-level element list declares a publicly
/// visible name matching `name` — an architype, ability, or global
/// variable. Used by the symbol-table-build pass to validate `from`-style
/// import items against the module they name, without needing that
/// module's own symbol table to have been built yet.
#[must_use]
pub fn module_declares_public(ast: &AST, module_root: NodeID, name: &str) -> bool {
    let Some(AnyNode::Module(module)) = ast.get_node(module_root).map(|n| &n.data) else { return false };
    let Some(AnyNode::Elements(elements)) = ast.get_node(module.body).map(|n| &n.data) else { return false };

    elements.items.iter().any(|&item_id| {
        let Some(item) = ast.get_node(item_id) else { return false };
        match &item.data {
            AnyNode::Architype(arch) => {
                arch.access == AccessLevel::Public && bare_name(ast, arch.name).as_deref() == Some(name)
            }
            AnyNode::ArchDecl(decl) => {
                decl.access == AccessLevel::Public && bare_name(ast, decl.name).as_deref() == Some(name)
            }
            AnyNode::Ability(ability) => {
                ability.access == AccessLevel::Public && bare_name(ast, ability.name).as_deref() == Some(name)
            }
            AnyNode::AbilityDecl(decl) => {
                decl.access == AccessLevel::Public && bare_name(ast, decl.name).as_deref() == Some(name)
            }
            AnyNode::GlobalVars(globals) => {
                globals.access == AccessLevel::Public
                    && matches!(ast.get_node(globals.assignments).map(|n| &n.data), Some(AnyNode::AssignmentList(list))
                        if list.assignments.iter().any(|&assign_id| {
                            matches!(ast.get_node(assign_id).map(|n| &n.data), Some(AnyNode::Assignment(assignment))
                                if bare_name(ast, assignment.target).as_deref() == Some(name))
                        }))
            }
            _ => false,
        }
    })
}
