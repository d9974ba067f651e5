//! Value-producing expressions, from plain binary arithmetic through the
//! data-spatial `spawn` form and comprehensions.

use std::fmt;

use jac_source::types::Span;

use super::{ASTNode, NodeID, NodeKind};
use crate::macros::{impl_node_core, impl_visitable};
use crate::meta::Meta;

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    In,
    NotIn,
    Is,
    IsNot,
    /// The Elvis operator (`??`): yields the left side unless it's `null`.
    Elvis,
}

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
    BitNot,
    Pos,
}

/// A binary operator expression.
#[derive(Debug, Clone)]
pub struct BinaryExpr {
    /// The operator.
    pub op: BinOp,
    /// Left operand.
    pub lhs: NodeID,
    /// Right operand.
    pub rhs: NodeID,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl BinaryExpr {
    /// Creates a new binary expression.
    #[must_use]
    pub fn new(op: BinOp, lhs: NodeID, rhs: NodeID, id: NodeID, span: Span) -> Self {
        Self { op, lhs, rhs, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(BinaryExpr, NodeKind::Expression, |n: &Self| vec![n.lhs, n.rhs]);
impl_visitable!(BinaryExpr, visit_binary_expr);

impl fmt::Display for BinaryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "BinaryExpr({:?})", self.op) }
}

/// A unary operator expression.
#[derive(Debug, Clone)]
pub struct UnaryExpr {
    /// The operator.
    pub op: UnaryOp,
    /// The operand.
    pub operand: NodeID,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl UnaryExpr {
    /// Creates a new unary expression.
    #[must_use]
    pub fn new(op: UnaryOp, operand: NodeID, id: NodeID, span: Span) -> Self {
        Self { op, operand, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(UnaryExpr, NodeKind::Expression, |n: &Self| vec![n.operand]);
impl_visitable!(UnaryExpr, visit_unary_expr);

impl fmt::Display for UnaryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "UnaryExpr({:?})", self.op) }
}

/// A conditional (ternary) expression: `then_expr if cond else else_expr`.
#[derive(Debug, Clone)]
pub struct IfElseExpr {
    /// The condition.
    pub cond: NodeID,
    /// The value when the condition holds.
    pub then_expr: NodeID,
    /// The value when it doesn't.
    pub else_expr: NodeID,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl IfElseExpr {
    /// Creates a new conditional expression.
    #[must_use]
    pub fn new(cond: NodeID, then_expr: NodeID, else_expr: NodeID, id: NodeID, span: Span) -> Self {
        Self { cond, then_expr, else_expr, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(IfElseExpr, NodeKind::Expression, |n: &Self| vec![n.cond, n.then_expr, n.else_expr]);
impl_visitable!(IfElseExpr, visit_if_else_expr);

impl fmt::Display for IfElseExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "IfElseExpr") }
}

/// A `spawn` expression: instantiates a walker and dispatches it onto a
/// starting node.
#[derive(Debug, Clone)]
pub struct SpawnExpr {
    /// The walker instantiation expression.
    pub walker: NodeID,
    /// The starting node/location expression.
    pub target: NodeID,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl SpawnExpr {
    /// Creates a new `spawn` expression.
    #[must_use]
    pub fn new(walker: NodeID, target: NodeID, id: NodeID, span: Span) -> Self {
        Self { walker, target, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(SpawnExpr, NodeKind::Expression, |n: &Self| vec![n.walker, n.target]);
impl_visitable!(SpawnExpr, visit_spawn_expr);

impl fmt::Display for SpawnExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "SpawnExpr") }
}

/// Which way an edge reference or connection runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDir {
    /// `-->` / `++>`: outgoing from the current node.
    Forward,
    /// `<--` / `<++`: incoming to the current node.
    Backward,
    /// `<-->` / `<++>`: either direction.
    Any,
}

impl fmt::Display for EdgeDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Forward => "-->",
            Self::Backward => "<--",
            Self::Any => "<-->",
        };
        write!(f, "{s}")
    }
}

/// A bracketed edge-operator reference (`[-->]`, `[<--]`, `[<-->]`), used as
/// a `visit`/`revisit`/`del` target meaning "the adjacent edges in this
/// direction", optionally narrowed by a parenthesized filter expression.
#[derive(Debug, Clone)]
pub struct EdgeOpRef {
    /// Which direction to traverse.
    pub dir: EdgeDir,
    /// An optional filter expression narrowing which edges match.
    pub filter: Option<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl EdgeOpRef {
    /// Creates a new edge-operator reference.
    #[must_use]
    pub fn new(dir: EdgeDir, filter: Option<NodeID>, id: NodeID, span: Span) -> Self {
        Self { dir, filter, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(EdgeOpRef, NodeKind::Expression, |n: &Self| n.filter.into_iter().collect());
impl_visitable!(EdgeOpRef, visit_edge_op_ref);

impl fmt::Display for EdgeOpRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "EdgeOpRef({})", self.dir) }
}

/// An edge-creating connect expression (`left ++> right`, `left <++ right`,
/// `left <++> right`), lowering to a runtime `connect` call.
#[derive(Debug, Clone)]
pub struct ConnectOp {
    /// The source-side operand.
    pub left: NodeID,
    /// The destination-side operand.
    pub right: NodeID,
    /// Which way the new edge points.
    pub dir: EdgeDir,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl ConnectOp {
    /// Creates a new connect expression.
    #[must_use]
    pub fn new(left: NodeID, right: NodeID, dir: EdgeDir, id: NodeID, span: Span) -> Self {
        Self { left, right, dir, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(ConnectOp, NodeKind::Expression, |n: &Self| vec![n.left, n.right]);
impl_visitable!(ConnectOp, visit_connect_op);

impl fmt::Display for ConnectOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "ConnectOp({})", self.dir) }
}

/// An unpacking expression: `*xs` in a call or list, `**kw` in a call or
/// dict.
#[derive(Debug, Clone)]
pub struct UnpackExpr {
    /// The unpacked value.
    pub value: NodeID,
    /// True for `**` (mapping unpack), false for `*` (sequence unpack).
    pub is_dict: bool,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl UnpackExpr {
    /// Creates a new unpacking expression.
    #[must_use]
    pub fn new(value: NodeID, is_dict: bool, id: NodeID, span: Span) -> Self {
        Self { value, is_dict, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(UnpackExpr, NodeKind::Expression, |n: &Self| vec![n.value]);
impl_visitable!(UnpackExpr, visit_unpack_expr);

impl fmt::Display for UnpackExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnpackExpr({})", if self.is_dict { "**" } else { "*" })
    }
}

/// An implicitly-concatenated run of adjacent string literals
/// (`"a" "b"` lowers to the single literal `"ab"`).
#[derive(Debug, Clone)]
pub struct MultiStringExpr {
    /// The adjacent string-literal parts, in document order.
    pub parts: Vec<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl MultiStringExpr {
    /// Creates a new multi-string expression.
    #[must_use]
    pub fn new(parts: Vec<NodeID>, id: NodeID, span: Span) -> Self {
        Self { parts, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(MultiStringExpr, NodeKind::Expression, |n: &Self| n.parts.clone());
impl_visitable!(MultiStringExpr, visit_multi_string_expr);

impl fmt::Display for MultiStringExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MultiStringExpr({} parts)", self.parts.len())
    }
}

/// A list or set literal (`[a, b]` or `{a, b}`).
#[derive(Debug, Clone)]
pub struct ListExpr {
    /// The element expressions.
    pub items: Vec<NodeID>,
    /// True for a set literal, false for a list.
    pub is_set: bool,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl ListExpr {
    /// Creates a new list/set literal.
    #[must_use]
    pub fn new(items: Vec<NodeID>, is_set: bool, id: NodeID, span: Span) -> Self {
        Self { items, is_set, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(ListExpr, NodeKind::Expression, |n: &Self| n.items.clone());
impl_visitable!(ListExpr, visit_list_expr);

impl fmt::Display for ListExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ListExpr({} items)", self.items.len())
    }
}

/// A dict literal, `{k1: v1, k2: v2}`.
#[derive(Debug, Clone)]
pub struct DictExpr {
    /// Key/value entry pairs, in document order.
    pub entries: Vec<(NodeID, NodeID)>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl DictExpr {
    /// Creates a new dict literal.
    #[must_use]
    pub fn new(entries: Vec<(NodeID, NodeID)>, id: NodeID, span: Span) -> Self {
        Self { entries, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(DictExpr, NodeKind::Expression, |n: &Self| {
    n.entries.iter().flat_map(|&(k, v)| [k, v]).collect()
});
impl_visitable!(DictExpr, visit_dict_expr);

impl fmt::Display for DictExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DictExpr({} entries)", self.entries.len())
    }
}

/// Which bracket form a comprehension was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComprehensionKind {
    List,
    Set,
    Dict,
    Generator,
}

/// A comprehension: `[expr for target in iterable if cond]` and its
/// set/dict/generator variants.
#[derive(Debug, Clone)]
pub struct ComprehensionExpr {
    /// Which bracket form this is.
    pub kind: ComprehensionKind,
    /// The produced element expression (the value, for a dict comprehension).
    pub element: NodeID,
    /// The produced key expression, present only for `Dict`.
    pub key: Option<NodeID>,
    /// The loop target.
    pub target: NodeID,
    /// The iterated expression.
    pub iterable: NodeID,
    /// An optional filter condition.
    pub condition: Option<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl ComprehensionExpr {
    /// Creates a new comprehension.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kind: ComprehensionKind,
        element: NodeID,
        key: Option<NodeID>,
        target: NodeID,
        iterable: NodeID,
        condition: Option<NodeID>,
        id: NodeID,
        span: Span,
    ) -> Self {
        Self { kind, element, key, target, iterable, condition, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(ComprehensionExpr, NodeKind::Expression, |n: &Self| {
    let mut kids: Vec<NodeID> = n.key.into_iter().collect();
    kids.push(n.element);
    kids.push(n.target);
    kids.push(n.iterable);
    kids.extend(n.condition);
    kids
});
impl_visitable!(ComprehensionExpr, visit_comprehension_expr);

impl fmt::Display for ComprehensionExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComprehensionExpr({:?})", self.kind)
    }
}

/// An atom followed by zero or more trailers (`.attr`, calls, indices),
/// chained left to right.
#[derive(Debug, Clone)]
pub struct AtomTrailerExpr {
    /// The base expression.
    pub atom: NodeID,
    /// Trailers applied in order: `NameTok` for `.attr`, `FuncCallExpr` for
    /// a call, `IndexSliceExpr` for an index/slice.
    pub trailers: Vec<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl AtomTrailerExpr {
    /// Creates a new atom-trailer chain.
    #[must_use]
    pub fn new(atom: NodeID, trailers: Vec<NodeID>, id: NodeID, span: Span) -> Self {
        Self { atom, trailers, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(AtomTrailerExpr, NodeKind::Expression, |n: &Self| {
    let mut kids = vec![n.atom];
    kids.extend(n.trailers.iter().copied());
    kids
});
impl_visitable!(AtomTrailerExpr, visit_atom_trailer_expr);

impl fmt::Display for AtomTrailerExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AtomTrailerExpr({} trailers)", self.trailers.len())
    }
}

/// A call trailer's argument list: `(args, name=kwargs)`. Always attached to
/// a preceding atom via `AtomTrailerExpr`.
#[derive(Debug, Clone)]
pub struct FuncCallExpr {
    /// Positional arguments.
    pub args: Vec<NodeID>,
    /// Keyword arguments, as `(name, value)` pairs.
    pub kwargs: Vec<(NodeID, NodeID)>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl FuncCallExpr {
    /// Creates a new call trailer.
    #[must_use]
    pub fn new(args: Vec<NodeID>, kwargs: Vec<(NodeID, NodeID)>, id: NodeID, span: Span) -> Self {
        Self { args, kwargs, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(FuncCallExpr, NodeKind::Expression, |n: &Self| {
    let mut kids = n.args.clone();
    kids.extend(n.kwargs.iter().flat_map(|&(k, v)| [k, v]));
    kids
});
impl_visitable!(FuncCallExpr, visit_func_call_expr);

impl fmt::Display for FuncCallExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FuncCallExpr({} args)", self.args.len())
    }
}

/// An index or slice trailer: `[i]` or `[start:stop:step]`.
#[derive(Debug, Clone)]
pub struct IndexSliceExpr {
    /// The slice start, or the sole index when `is_slice` is false.
    pub start: Option<NodeID>,
    /// The slice stop.
    pub stop: Option<NodeID>,
    /// The slice step.
    pub step: Option<NodeID>,
    /// False for a plain `[i]` index, true for a `[a:b:c]` slice.
    pub is_slice: bool,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl IndexSliceExpr {
    /// Creates a new index/slice trailer.
    #[must_use]
    pub fn new(
        start: Option<NodeID>,
        stop: Option<NodeID>,
        step: Option<NodeID>,
        is_slice: bool,
        id: NodeID,
        span: Span,
    ) -> Self {
        Self { start, stop, step, is_slice, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(IndexSliceExpr, NodeKind::Expression, |n: &Self| {
    let mut kids: Vec<NodeID> = n.start.into_iter().collect();
    kids.extend(n.stop);
    kids.extend(n.step);
    kids
});
impl_visitable!(IndexSliceExpr, visit_index_slice_expr);

impl fmt::Display for IndexSliceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IndexSliceExpr({})", if self.is_slice { "slice" } else { "index" })
    }
}
