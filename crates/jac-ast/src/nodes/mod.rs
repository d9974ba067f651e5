//! AST node type definitions.
//!
//! One module per grouping from the data model: [`structural`] (the tree
//! skeleton), [`toplevel`] (module-level declarations), [`statements`],
//! [`expressions`], [`references`] (data-spatial kind keywords), [`tokens`]
//! (leaves), and [`support`] (the lowering table's structural helpers —
//! parameter lists, base-class lists, doc strings, and the like).

mod expressions;
mod references;
mod statements;
mod structural;
mod support;
mod toplevel;
mod tokens;

use std::fmt;

pub use expressions::*;
use jac_source::types::Span;
pub use references::*;
pub use statements::*;
pub use structural::*;
pub use support::*;
pub use toplevel::*;
pub use tokens::*;

use crate::macros::{
    for_each_node_variant, impl_astnode_for_anynode, impl_display_for_anynode,
    impl_meta_for_anynode, impl_visitable_for_anynode,
};

/// A type-safe identifier for nodes in the AST arena.
///
/// Pairs an arena index with a generation counter so that a `NodeID` taken
/// before a node was removed can never be mistaken for the unrelated node
/// that reuses its slot afterward.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeID {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeID {
    /// Creates a new `NodeID` with the given index and generation.
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self { Self { index, generation } }

    /// Returns the arena index.
    #[must_use]
    pub const fn index(&self) -> u32 { self.index }

    /// Returns the generation counter.
    #[must_use]
    pub const fn generation(&self) -> u32 { self.generation }
}

impl fmt::Display for NodeID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeID({}, {})", self.index, self.generation)
    }
}

/// High-level grouping of a node, mirroring the data model's variant
/// groupings. Coarser than the node's own enum discriminant; used for quick
/// filtering (e.g. "find all statements") without a full match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The tree skeleton: `Module`, `Elements`, `CodeBlock`, `ArchBlock`.
    Structural,
    /// Module-level declarations: architypes, abilities, imports, globals.
    TopLevel,
    /// Executable statements inside a code block.
    Statement,
    /// Value-producing expressions.
    Expression,
    /// Data-spatial kind-reference keywords (`node`, `edge`, `walker`, ...).
    Reference,
    /// Lexical leaves: names, keywords, literals.
    Token,
    /// Structural helpers the lowering table names explicitly (parameter
    /// lists, base-class lists, doc strings, type specs, ...).
    Support,
}

/// The discriminated union of every concrete node type the parser produces.
#[derive(Debug, Clone)]
pub enum AnyNode {
    /// The whole source file.
    Module(Module),
    /// A module's top-level element list.
    Elements(Elements),
    /// A block of statements introducing a new scope.
    CodeBlock(CodeBlock),
    /// An architype's member list.
    ArchBlock(ArchBlock),
    /// A top-level `glob` variable declaration list.
    GlobalVars(GlobalVars),
    /// A `test` block.
    Test(Test),
    /// A free-standing top-level statement (module-level code).
    ModuleCode(ModuleCode),
    /// An `import` declaration.
    Import(Import),
    /// An `object`/`node`/`edge`/`walker` declaration with an inline body.
    Architype(Architype),
    /// An ability (`can`) with an inline body.
    Ability(Ability),
    /// An ability specifier attached to a declaration (access level, event).
    AbilitySpec(AbilitySpec),
    /// A forward architype declaration with no body.
    ArchDecl(ArchDecl),
    /// An out-of-line architype body matched to a declaration.
    ArchDef(ArchDef),
    /// A forward ability declaration with no body.
    AbilityDecl(AbilityDecl),
    /// An out-of-line ability body matched to a declaration.
    AbilityDef(AbilityDef),
    /// A `has` member-variable declaration inside an architype.
    ArchHas(ArchHas),
    /// An `if`/`elif`/`else` chain.
    IfStmt(IfStmt),
    /// A `while` loop.
    WhileStmt(WhileStmt),
    /// A counted `for <init> to <cond> by <step>` loop.
    IterForStmt(IterForStmt),
    /// A `for x in xs` loop.
    InForStmt(InForStmt),
    /// A `for k, v in d` loop.
    DictForStmt(DictForStmt),
    /// A `try`/`except`/`finally` block.
    TryStmt(TryStmt),
    /// One `except` clause of a `try` block.
    ExceptHandler(ExceptHandler),
    /// A `raise` statement.
    RaiseStmt(RaiseStmt),
    /// An `assert` statement.
    AssertStmt(AssertStmt),
    /// A `return` statement.
    ReturnStmt(ReturnStmt),
    /// A `yield` statement.
    YieldStmt(YieldStmt),
    /// `break`, `continue`, or `skip`.
    CtrlStmt(CtrlStmt),
    /// A `del` statement.
    DeleteStmt(DeleteStmt),
    /// A data-spatial `visit` statement.
    VisitStmt(VisitStmt),
    /// A data-spatial `revisit` statement.
    RevisitStmt(RevisitStmt),
    /// A data-spatial `disengage` statement.
    DisengageStmt(DisengageStmt),
    /// A data-spatial `sync` statement.
    SyncStmt(SyncStmt),
    /// A data-spatial `report` statement.
    ReportStmt(ReportStmt),
    /// A data-spatial `ignore` statement.
    IgnoreStmt(IgnoreStmt),
    /// An expression or assignment evaluated as a statement.
    ExprStmt(ExprStmt),
    /// A binary operator expression.
    BinaryExpr(BinaryExpr),
    /// A unary operator expression.
    UnaryExpr(UnaryExpr),
    /// A conditional expression (`a if cond else b`).
    IfElseExpr(IfElseExpr),
    /// A `spawn` expression instantiating a walker on a node.
    SpawnExpr(SpawnExpr),
    /// A bracketed edge-operator reference (`[-->]`).
    EdgeOpRef(EdgeOpRef),
    /// An edge-creating connect expression (`a ++> b`).
    ConnectOp(ConnectOp),
    /// An unpacking expression (`*xs`, `**kw`).
    UnpackExpr(UnpackExpr),
    /// An implicitly-concatenated multi-string literal.
    MultiStringExpr(MultiStringExpr),
    /// A list literal.
    ListExpr(ListExpr),
    /// A dict literal.
    DictExpr(DictExpr),
    /// A comprehension (list/dict/set/generator).
    ComprehensionExpr(ComprehensionExpr),
    /// An atom followed by a chain of trailers (`.attr`, calls, indices).
    AtomTrailerExpr(AtomTrailerExpr),
    /// A function/ability call.
    FuncCallExpr(FuncCallExpr),
    /// An index or slice operation.
    IndexSliceExpr(IndexSliceExpr),
    /// A data-spatial kind-reference keyword.
    KindRef(KindRef),
    /// A plain identifier token.
    NameTok(NameTok),
    /// A reserved keyword token.
    KeywordTok(KeywordTok),
    /// A literal token (number, string, bool, null).
    LiteralTok(LiteralTok),
    /// A parenthesized base-class list on an architype.
    BaseClasses(BaseClasses),
    /// A dotted module path in an import.
    ModulePath(ModulePath),
    /// The `{a, b as c}` item list of a `from`-style import.
    ModuleItems(ModuleItems),
    /// One item of a `ModuleItems` list.
    ModuleItem(ModuleItem),
    /// A comma-separated name list (event signatures, `global`, `nonlocal`).
    NameList(NameList),
    /// A function/ability parameter list.
    FuncParams(FuncParams),
    /// One parameter of a `FuncParams` list.
    ParamVar(ParamVar),
    /// One `has`-declared member variable.
    HasVar(HasVar),
    /// A comma-separated assignment-target list.
    AssignmentList(AssignmentList),
    /// One `target = value` (or augmented) assignment.
    Assignment(Assignment),
    /// A doc-string literal attached to a module, architype, or ability.
    DocString(DocString),
    /// An event-driven ability's `with entry`/`with exit` signature.
    EventSignature(EventSignature),
    /// A type annotation.
    TypeSpec(TypeSpec),
    /// A plain ability's `(params) -> ret` signature.
    FuncSignature(FuncSignature),
}

/// The interface every node-arena entry implements: identity, location, and
/// tree-shape accessors.
pub trait ASTNode: fmt::Display {
    /// This node's arena identifier.
    fn id(&self) -> NodeID;

    /// This node's parent, if any. A lookup-only back-reference — the tree
    /// owns strictly downward.
    fn parent(&self) -> Option<NodeID>;

    /// Builder-style setter used by the arena when a child is attached.
    #[must_use]
    fn with_parent(self, parent: NodeID) -> Self;

    /// This node's high-level grouping.
    fn kind(&self) -> NodeKind;

    /// This node's source location.
    fn span(&self) -> Span;

    /// This node's immediate children, in document order. Leaves return an
    /// empty vector.
    fn children(&self) -> Vec<NodeID> { Vec::new() }
}

for_each_node_variant!(impl_astnode_for_anynode);
for_each_node_variant!(impl_visitable_for_anynode);
for_each_node_variant!(impl_display_for_anynode);
for_each_node_variant!(impl_meta_for_anynode);

/// A single arena slot: a node's data plus the location and tree-shape
/// bookkeeping the arena itself (rather than the node) is responsible for.
#[derive(Debug, Clone)]
pub struct Node {
    /// High-level grouping, cached from `data.kind()` for quick filtering.
    pub kind: NodeKind,
    /// The node's own data.
    pub data: AnyNode,
    /// Source location.
    pub span: Span,
    /// Parent, if any.
    pub parent: Option<NodeID>,
}
