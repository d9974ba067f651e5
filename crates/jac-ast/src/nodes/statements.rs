//! Executable statements: control flow, data-spatial verbs, and the plain
//! statement forms shared with ordinary imperative code.

use std::fmt;

use jac_source::types::Span;

use super::{ASTNode, NodeID, NodeKind};
use crate::macros::{impl_node_core, impl_visitable};
use crate::meta::Meta;

/// One `if`/`elif`/`else` chain.
#[derive(Debug, Clone)]
pub struct IfStmt {
    /// The condition.
    pub cond: NodeID,
    /// The taken branch.
    pub then_branch: NodeID,
    /// The `elif`/`else` continuation, if any. Either another `IfStmt` (for
    /// an `elif`) or a plain `CodeBlock` (for a trailing `else`).
    pub else_branch: Option<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl IfStmt {
    /// Creates a new `if` statement.
    #[must_use]
    pub fn new(
        cond: NodeID,
        then_branch: NodeID,
        else_branch: Option<NodeID>,
        id: NodeID,
        span: Span,
    ) -> Self {
        Self { cond, then_branch, else_branch, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(IfStmt, NodeKind::Statement, |n: &Self| {
    let mut kids = vec![n.cond, n.then_branch];
    kids.extend(n.else_branch);
    kids
});
impl_visitable!(IfStmt, visit_if_stmt);

impl fmt::Display for IfStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "IfStmt") }
}

/// A `while` loop.
#[derive(Debug, Clone)]
pub struct WhileStmt {
    /// The loop condition.
    pub cond: NodeID,
    /// The loop body.
    pub body: NodeID,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl WhileStmt {
    /// Creates a new `while` loop.
    #[must_use]
    pub fn new(cond: NodeID, body: NodeID, id: NodeID, span: Span) -> Self {
        Self { cond, body, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(WhileStmt, NodeKind::Statement, |n: &Self| vec![n.cond, n.body]);
impl_visitable!(WhileStmt, visit_while_stmt);

impl fmt::Display for WhileStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "WhileStmt") }
}

/// A counted `for <init> to <cond> by <step> { ... }` loop, the source
/// language's C-style for-loop form.
#[derive(Debug, Clone)]
pub struct IterForStmt {
    /// The initializing assignment.
    pub init: NodeID,
    /// The continuation condition.
    pub cond: NodeID,
    /// The per-iteration step assignment.
    pub step: NodeID,
    /// The loop body.
    pub body: NodeID,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl IterForStmt {
    /// Creates a new counted `for` loop.
    #[must_use]
    pub fn new(init: NodeID, cond: NodeID, step: NodeID, body: NodeID, id: NodeID, span: Span) -> Self {
        Self { init, cond, step, body, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(IterForStmt, NodeKind::Statement, |n: &Self| vec![n.init, n.cond, n.step, n.body]);
impl_visitable!(IterForStmt, visit_iter_for_stmt);

impl fmt::Display for IterForStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "IterForStmt") }
}

/// A `for x in xs { ... }` loop.
#[derive(Debug, Clone)]
pub struct InForStmt {
    /// The loop variable target.
    pub target: NodeID,
    /// The iterable expression.
    pub iterable: NodeID,
    /// The loop body.
    pub body: NodeID,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl InForStmt {
    /// Creates a new `for ... in ...` loop.
    #[must_use]
    pub fn new(target: NodeID, iterable: NodeID, body: NodeID, id: NodeID, span: Span) -> Self {
        Self { target, iterable, body, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(InForStmt, NodeKind::Statement, |n: &Self| vec![n.target, n.iterable, n.body]);
impl_visitable!(InForStmt, visit_in_for_stmt);

impl fmt::Display for InForStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "InForStmt") }
}

/// A `for k, v in d { ... }` loop over key/value pairs.
#[derive(Debug, Clone)]
pub struct DictForStmt {
    /// The key target.
    pub key_target: NodeID,
    /// The value target.
    pub value_target: NodeID,
    /// The dict-valued expression being iterated.
    pub iterable: NodeID,
    /// The loop body.
    pub body: NodeID,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl DictForStmt {
    /// Creates a new key/value `for` loop.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        key_target: NodeID,
        value_target: NodeID,
        iterable: NodeID,
        body: NodeID,
        id: NodeID,
        span: Span,
    ) -> Self {
        Self { key_target, value_target, iterable, body, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(DictForStmt, NodeKind::Statement, |n: &Self| vec![
    n.key_target,
    n.value_target,
    n.iterable,
    n.body
]);
impl_visitable!(DictForStmt, visit_dict_for_stmt);

impl fmt::Display for DictForStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "DictForStmt") }
}

/// A `try`/`except`/`finally` block.
#[derive(Debug, Clone)]
pub struct TryStmt {
    /// The guarded body.
    pub body: NodeID,
    /// Handlers, tried in order.
    pub handlers: Vec<NodeID>,
    /// An optional `finally` block.
    pub finally: Option<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl TryStmt {
    /// Creates a new `try` statement.
    #[must_use]
    pub fn new(
        body: NodeID,
        handlers: Vec<NodeID>,
        finally: Option<NodeID>,
        id: NodeID,
        span: Span,
    ) -> Self {
        Self { body, handlers, finally, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(TryStmt, NodeKind::Statement, |n: &Self| {
    let mut kids = vec![n.body];
    kids.extend(n.handlers.iter().copied());
    kids.extend(n.finally);
    kids
});
impl_visitable!(TryStmt, visit_try_stmt);

impl fmt::Display for TryStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TryStmt({} handlers)", self.handlers.len())
    }
}

/// One `except` clause of a `try` block.
#[derive(Debug, Clone)]
pub struct ExceptHandler {
    /// The caught exception type, if given (a bare `except` catches all).
    pub exc_type: Option<NodeID>,
    /// The binding name (`except E as e`), if given.
    pub binding: Option<NodeID>,
    /// The handler body.
    pub body: NodeID,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl ExceptHandler {
    /// Creates a new `except` clause.
    #[must_use]
    pub fn new(
        exc_type: Option<NodeID>,
        binding: Option<NodeID>,
        body: NodeID,
        id: NodeID,
        span: Span,
    ) -> Self {
        Self { exc_type, binding, body, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(ExceptHandler, NodeKind::Statement, |n: &Self| {
    let mut kids: Vec<NodeID> = n.exc_type.into_iter().collect();
    kids.extend(n.binding);
    kids.push(n.body);
    kids
});
impl_visitable!(ExceptHandler, visit_except_handler);

impl fmt::Display for ExceptHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "ExceptHandler") }
}

/// A `raise` statement, with or without an explicit cause.
#[derive(Debug, Clone)]
pub struct RaiseStmt {
    /// The raised exception expression, absent for a bare re-`raise`.
    pub exc: Option<NodeID>,
    /// An explicit `from` cause.
    pub cause: Option<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl RaiseStmt {
    /// Creates a new `raise` statement.
    #[must_use]
    pub fn new(exc: Option<NodeID>, cause: Option<NodeID>, id: NodeID, span: Span) -> Self {
        Self { exc, cause, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(RaiseStmt, NodeKind::Statement, |n: &Self| {
    let mut kids: Vec<NodeID> = n.exc.into_iter().collect();
    kids.extend(n.cause);
    kids
});
impl_visitable!(RaiseStmt, visit_raise_stmt);

impl fmt::Display for RaiseStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "RaiseStmt") }
}

/// An `assert` statement, with an optional failure message.
#[derive(Debug, Clone)]
pub struct AssertStmt {
    /// The asserted condition.
    pub cond: NodeID,
    /// An optional failure message.
    pub message: Option<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl AssertStmt {
    /// Creates a new `assert` statement.
    #[must_use]
    pub fn new(cond: NodeID, message: Option<NodeID>, id: NodeID, span: Span) -> Self {
        Self { cond, message, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(AssertStmt, NodeKind::Statement, |n: &Self| {
    let mut kids = vec![n.cond];
    kids.extend(n.message);
    kids
});
impl_visitable!(AssertStmt, visit_assert_stmt);

impl fmt::Display for AssertStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "AssertStmt") }
}

/// A `return` statement, with an optional value.
#[derive(Debug, Clone)]
pub struct ReturnStmt {
    /// The returned value, absent for a bare `return`.
    pub value: Option<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl ReturnStmt {
    /// Creates a new `return` statement.
    #[must_use]
    pub fn new(value: Option<NodeID>, id: NodeID, span: Span) -> Self {
        Self { value, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(ReturnStmt, NodeKind::Statement, |n: &Self| n.value.into_iter().collect());
impl_visitable!(ReturnStmt, visit_return_stmt);

impl fmt::Display for ReturnStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "ReturnStmt") }
}

/// A `yield` statement, with an optional value.
#[derive(Debug, Clone)]
pub struct YieldStmt {
    /// The yielded value, absent for a bare `yield`.
    pub value: Option<NodeID>,
    /// Whether this is a `yield from` delegation.
    pub is_from: bool,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl YieldStmt {
    /// Creates a new `yield` statement.
    #[must_use]
    pub fn new(value: Option<NodeID>, is_from: bool, id: NodeID, span: Span) -> Self {
        Self { value, is_from, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(YieldStmt, NodeKind::Statement, |n: &Self| n.value.into_iter().collect());
impl_visitable!(YieldStmt, visit_yield_stmt);

impl fmt::Display for YieldStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "YieldStmt") }
}

/// Which loop-control verb a `CtrlStmt` spells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtrlKind {
    /// `break`.
    Break,
    /// `continue`.
    Continue,
    /// `skip`, the data-spatial "stop processing this node, keep walking"
    /// verb with no direct target-language equivalent — lowered to
    /// `return` inside a walker ability.
    Skip,
}

/// A `break`/`continue`/`skip` control-flow statement.
#[derive(Debug, Clone)]
pub struct CtrlStmt {
    /// Which verb this is.
    pub kind: CtrlKind,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl CtrlStmt {
    /// Creates a new control-flow statement.
    #[must_use]
    pub fn new(kind: CtrlKind, id: NodeID, span: Span) -> Self {
        Self { kind, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(CtrlStmt, NodeKind::Statement, |_: &Self| Vec::new());
impl_visitable!(CtrlStmt, visit_ctrl_stmt);

impl fmt::Display for CtrlStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "CtrlStmt({:?})", self.kind) }
}

/// A `del` statement.
#[derive(Debug, Clone)]
pub struct DeleteStmt {
    /// The deleted targets.
    pub targets: Vec<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl DeleteStmt {
    /// Creates a new `del` statement.
    #[must_use]
    pub fn new(targets: Vec<NodeID>, id: NodeID, span: Span) -> Self {
        Self { targets, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(DeleteStmt, NodeKind::Statement, |n: &Self| n.targets.clone());
impl_visitable!(DeleteStmt, visit_delete_stmt);

impl fmt::Display for DeleteStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "DeleteStmt") }
}

/// A data-spatial `visit` statement: dispatches the current walker to
/// traverse to the given node/edge reference.
#[derive(Debug, Clone)]
pub struct VisitStmt {
    /// The target expression (a node, edge, or reference collection).
    pub target: NodeID,
    /// An optional `else { ... }` fallback run when nothing matched.
    pub else_body: Option<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl VisitStmt {
    /// Creates a new `visit` statement.
    #[must_use]
    pub fn new(target: NodeID, else_body: Option<NodeID>, id: NodeID, span: Span) -> Self {
        Self { target, else_body, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(VisitStmt, NodeKind::Statement, |n: &Self| {
    let mut kids = vec![n.target];
    kids.extend(n.else_body);
    kids
});
impl_visitable!(VisitStmt, visit_visit_stmt);

impl fmt::Display for VisitStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "VisitStmt") }
}

/// A data-spatial `revisit` statement: re-queues the current node for a
/// later visit by the same walker.
#[derive(Debug, Clone)]
pub struct RevisitStmt {
    /// An optional explicit target; bare `revisit` re-queues the current node.
    pub target: Option<NodeID>,
    /// An optional `else { ... }` fallback.
    pub else_body: Option<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl RevisitStmt {
    /// Creates a new `revisit` statement.
    #[must_use]
    pub fn new(target: Option<NodeID>, else_body: Option<NodeID>, id: NodeID, span: Span) -> Self {
        Self { target, else_body, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(RevisitStmt, NodeKind::Statement, |n: &Self| {
    let mut kids: Vec<NodeID> = n.target.into_iter().collect();
    kids.extend(n.else_body);
    kids
});
impl_visitable!(RevisitStmt, visit_revisit_stmt);

impl fmt::Display for RevisitStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "RevisitStmt") }
}

/// A data-spatial `disengage` statement: halts the current walker entirely.
#[derive(Debug, Clone)]
pub struct DisengageStmt {
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl DisengageStmt {
    /// Creates a new `disengage` statement.
    #[must_use]
    pub fn new(id: NodeID, span: Span) -> Self { Self { id, parent: None, span, meta: Meta::default() } }
}

impl_node_core!(DisengageStmt, NodeKind::Statement, |_: &Self| Vec::new());
impl_visitable!(DisengageStmt, visit_disengage_stmt);

impl fmt::Display for DisengageStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "DisengageStmt") }
}

/// A data-spatial `sync` statement: a synchronization barrier on shared graph
/// state between concurrent walkers.
#[derive(Debug, Clone)]
pub struct SyncStmt {
    /// The synchronized expression.
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

impl SyncStmt {
    /// Creates a new `sync` statement.
    #[must_use]
    pub fn new(target: NodeID, id: NodeID, span: Span) -> Self {
        Self { target, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(SyncStmt, NodeKind::Statement, |n: &Self| vec![n.target]);
impl_visitable!(SyncStmt, visit_sync_stmt);

impl fmt::Display for SyncStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "SyncStmt") }
}

/// A data-spatial `report` statement: appends a value to the walker's report
/// collection, the channel used to surface results back to the caller.
#[derive(Debug, Clone)]
pub struct ReportStmt {
    /// The reported value.
    pub value: NodeID,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl ReportStmt {
    /// Creates a new `report` statement.
    #[must_use]
    pub fn new(value: NodeID, id: NodeID, span: Span) -> Self {
        Self { value, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(ReportStmt, NodeKind::Statement, |n: &Self| vec![n.value]);
impl_visitable!(ReportStmt, visit_report_stmt);

impl fmt::Display for ReportStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "ReportStmt") }
}

/// A statement that is just an assignment list or bare expression evaluated
/// for effect (`x = 1;`, `foo();`, a local `has` declaration lowered to its
/// initializing assignments).
#[derive(Debug, Clone)]
pub struct ExprStmt {
    /// The wrapped assignment list.
    pub value: NodeID,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl ExprStmt {
    /// Creates a new expression statement.
    #[must_use]
    pub fn new(value: NodeID, id: NodeID, span: Span) -> Self {
        Self { value, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(ExprStmt, NodeKind::Statement, |n: &Self| vec![n.value]);
impl_visitable!(ExprStmt, visit_expr_stmt);

impl fmt::Display for ExprStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "ExprStmt") }
}

/// A data-spatial `ignore` statement: removes a node/edge reference from the
/// walker's pending-visit queue without visiting it.
#[derive(Debug, Clone)]
pub struct IgnoreStmt {
    /// The ignored target expression.
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

impl IgnoreStmt {
    /// Creates a new `ignore` statement.
    #[must_use]
    pub fn new(target: NodeID, id: NodeID, span: Span) -> Self {
        Self { target, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(IgnoreStmt, NodeKind::Statement, |n: &Self| vec![n.target]);
impl_visitable!(IgnoreStmt, visit_ignore_stmt);

impl fmt::Display for IgnoreStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "IgnoreStmt") }
}
