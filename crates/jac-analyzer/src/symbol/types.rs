//! Symbol definitions and metadata.

use jac_ast::meta::SymbolId;
use jac_ast::nodes::{AccessLevel, NodeID};
use jac_source::types::Span;

use super::scope::ScopeID;

/// The kind of symbol, closed over the declaring constructs the Symbol
/// Table Build pass recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// A Python builtin function or type, seeded into the module scope.
    Builtin,
    /// A plain variable: a `glob`, a local first-assignment, a loop target.
    Variable,
    /// A function/method parameter or `has`-declared member.
    Parameter,
    /// An ability (`can`) declared inside an architype body.
    Ability,
    /// A module-level `can`, or a `test` block, with no enclosing architype.
    Function,
    /// An `object` architype.
    ArchitypeObject,
    /// A `node` architype.
    ArchitypeNode,
    /// An `edge` architype.
    ArchitypeEdge,
    /// A `walker` architype.
    ArchitypeWalker,
    /// A name bound by an `import` statement, aliased or not.
    ImportAlias,
}

impl SymbolKind {
    /// The [`SymbolKind`] an architype's `arch_kind` maps to.
    #[must_use]
    pub const fn for_arch_kind(kind: jac_ast::nodes::ArchKind) -> Self {
        match kind {
            jac_ast::nodes::ArchKind::Object => Self::ArchitypeObject,
            jac_ast::nodes::ArchKind::Node => Self::ArchitypeNode,
            jac_ast::nodes::ArchKind::Edge => Self::ArchitypeEdge,
            jac_ast::nodes::ArchKind::Walker => Self::ArchitypeWalker,
        }
    }
}

/// A declared name: a variable, ability, architype, parameter, or import
/// alias, tracked through the pass pipeline from declaration to every
/// reference.
#[derive(Debug, Clone)]
pub struct Symbol {
    /// This symbol's handle in [`jac_ast::meta::Meta::sym`] — assigned when
    /// the symbol is actually inserted into the table, not here; a
    /// freshly-constructed `Symbol` carries the placeholder `SymbolId::new(0)`
    /// until then.
    pub id: SymbolId,
    /// The symbol's name.
    pub name: String,
    /// The kind of symbol.
    pub kind: SymbolKind,
    /// The declared type, as written in source (`int`, `list(str)`, ...).
    /// Left as an opaque string; resolving it to a real type belongs to the
    /// optional type-checker pass downstream.
    pub type_annotation: Option<String>,
    /// The access level this symbol was declared with.
    pub access: AccessLevel,
    /// The AST node that introduced this symbol (the `Architype`, `Ability`,
    /// `ParamVar`, `HasVar`, `Assignment` target, or `ModuleItem`).
    pub declaration: NodeID,
    /// For a forward-declared architype/ability (`ArchDecl`/`AbilityDecl`),
    /// the out-of-line `ArchDef`/`AbilityDef` matched to it by the
    /// Decl/Def Match pass.
    pub definition: Option<NodeID>,
    /// The span of the declaring node.
    pub span: Span,
    /// The scope this symbol lives in.
    pub scope_id: ScopeID,
    /// Every node that refers back to this symbol, in document order.
    pub references: Vec<NodeID>,
}

impl Symbol {
    /// Creates a new symbol with the given properties and no references or
    /// matched definition yet.
    #[must_use]
    pub const fn new(
        name: String,
        kind: SymbolKind,
        access: AccessLevel,
        declaration: NodeID,
        span: Span,
        scope_id: ScopeID,
    ) -> Self {
        Self {
            id: SymbolId::new(0),
            name,
            kind,
            type_annotation: None,
            access,
            declaration,
            definition: None,
            span,
            scope_id,
            references: Vec::new(),
        }
    }

    /// Records a reference to this symbol from a name-use node.
    pub fn add_reference(&mut self, node_id: NodeID) { self.references.push(node_id); }

    /// Whether this declaration has been matched to an out-of-line
    /// definition (always true for symbols that carry their body inline).
    #[must_use]
    pub const fn is_defined(&self) -> bool { self.definition.is_some() }
}
