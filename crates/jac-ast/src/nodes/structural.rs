//! The tree skeleton: `Module`, `Elements`, `CodeBlock`, `ArchBlock`.

use std::fmt;

use jac_source::types::Span;

use super::{ASTNode, NodeID, NodeKind};
use crate::macros::{impl_node_core, impl_visitable};
use crate::meta::Meta;

/// The whole source file. The root of every AST this crate produces.
#[derive(Debug, Clone)]
pub struct Module {
    /// Module name, typically the filename without extension.
    pub name: String,
    /// Optional leading doc-string.
    pub doc: Option<NodeID>,
    /// The module's top-level element list.
    pub body: NodeID,
    /// Arena id.
    pub id: NodeID,
    /// Parent (always `None` for a module — a module is its own root).
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl Module {
    /// Creates a new module node.
    #[must_use]
    pub fn new(name: String, doc: Option<NodeID>, body: NodeID, id: NodeID, span: Span) -> Self {
        Self { name, doc, body, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(Module, NodeKind::Structural, |n: &Self| {
    let mut kids: Vec<NodeID> = n.doc.into_iter().collect();
    kids.push(n.body);
    kids
});
impl_visitable!(Module, visit_module);

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Module({})", self.name) }
}

/// A module's ordered top-level element list (globals, imports, architypes,
/// abilities, tests, module-level code).
#[derive(Debug, Clone)]
pub struct Elements {
    /// Top-level elements, in document order.
    pub items: Vec<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl Elements {
    /// Creates a new element list.
    #[must_use]
    pub fn new(items: Vec<NodeID>, id: NodeID, span: Span) -> Self {
        Self { items, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(Elements, NodeKind::Structural, |n: &Self| n.items.clone());
impl_visitable!(Elements, visit_elements);

impl fmt::Display for Elements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Elements({} items)", self.items.len())
    }
}

/// A block of statements that introduces a new lexical scope: an ability
/// body, or the body of an `if`/loop/`try` clause.
#[derive(Debug, Clone)]
pub struct CodeBlock {
    /// Statements, in document order.
    pub statements: Vec<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl CodeBlock {
    /// Creates a new code block.
    #[must_use]
    pub fn new(statements: Vec<NodeID>, id: NodeID, span: Span) -> Self {
        Self { statements, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(CodeBlock, NodeKind::Structural, |n: &Self| n.statements.clone());
impl_visitable!(CodeBlock, visit_code_block);

impl fmt::Display for CodeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CodeBlock({} stmts)", self.statements.len())
    }
}

/// An architype's member list: `has` declarations and abilities, in document
/// order.
#[derive(Debug, Clone)]
pub struct ArchBlock {
    /// Members, in document order.
    pub members: Vec<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl ArchBlock {
    /// Creates a new architype body.
    #[must_use]
    pub fn new(members: Vec<NodeID>, id: NodeID, span: Span) -> Self {
        Self { members, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(ArchBlock, NodeKind::Structural, |n: &Self| n.members.clone());
impl_visitable!(ArchBlock, visit_arch_block);

impl fmt::Display for ArchBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArchBlock({} members)", self.members.len())
    }
}
