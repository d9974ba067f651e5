//! Structural helpers the lowering table names explicitly: parameter and
//! base-class lists, import item lists, assignment targets, doc strings,
//! and signatures.

use std::fmt;

use jac_source::types::Span;

use super::{ASTNode, NodeID, NodeKind};
use crate::macros::{impl_node_core, impl_visitable};
use crate::meta::Meta;

/// An architype's parenthesized base-class list.
#[derive(Debug, Clone)]
pub struct BaseClasses {
    /// The base-class references, in declared order.
    pub bases: Vec<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl BaseClasses {
    /// Creates a new base-class list.
    #[must_use]
    pub fn new(bases: Vec<NodeID>, id: NodeID, span: Span) -> Self {
        Self { bases, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(BaseClasses, NodeKind::Support, |n: &Self| n.bases.clone());
impl_visitable!(BaseClasses, visit_base_classes);

impl fmt::Display for BaseClasses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BaseClasses({} bases)", self.bases.len())
    }
}

/// A dotted module path in an import statement (`a.b.c`).
#[derive(Debug, Clone)]
pub struct ModulePath {
    /// The path segments, outermost first.
    pub segments: Vec<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl ModulePath {
    /// Creates a new module path.
    #[must_use]
    pub fn new(segments: Vec<NodeID>, id: NodeID, span: Span) -> Self {
        Self { segments, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(ModulePath, NodeKind::Support, |n: &Self| n.segments.clone());
impl_visitable!(ModulePath, visit_module_path);

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModulePath({} segments)", self.segments.len())
    }
}

/// The `{a, b as c}` item list of a `from`-style import.
#[derive(Debug, Clone)]
pub struct ModuleItems {
    /// The imported items.
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

impl ModuleItems {
    /// Creates a new module-item list.
    #[must_use]
    pub fn new(items: Vec<NodeID>, id: NodeID, span: Span) -> Self {
        Self { items, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(ModuleItems, NodeKind::Support, |n: &Self| n.items.clone());
impl_visitable!(ModuleItems, visit_module_items);

impl fmt::Display for ModuleItems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleItems({} items)", self.items.len())
    }
}

/// One item of a `ModuleItems` list: a name, plus an optional alias.
#[derive(Debug, Clone)]
pub struct ModuleItem {
    /// The imported name.
    pub name: NodeID,
    /// An `as`-alias, if given.
    pub alias: Option<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl ModuleItem {
    /// Creates a new module item.
    #[must_use]
    pub fn new(name: NodeID, alias: Option<NodeID>, id: NodeID, span: Span) -> Self {
        Self { name, alias, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(ModuleItem, NodeKind::Support, |n: &Self| {
    let mut kids = vec![n.name];
    kids.extend(n.alias);
    kids
});
impl_visitable!(ModuleItem, visit_module_item);

impl fmt::Display for ModuleItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "ModuleItem") }
}

/// A comma-separated name list, used by `global`/`nonlocal` declarations and
/// event signatures' parameter-name shorthand.
#[derive(Debug, Clone)]
pub struct NameList {
    /// The listed names.
    pub names: Vec<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl NameList {
    /// Creates a new name list.
    #[must_use]
    pub fn new(names: Vec<NodeID>, id: NodeID, span: Span) -> Self {
        Self { names, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(NameList, NodeKind::Support, |n: &Self| n.names.clone());
impl_visitable!(NameList, visit_name_list);

impl fmt::Display for NameList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NameList({} names)", self.names.len())
    }
}

/// A function/ability parameter list.
#[derive(Debug, Clone)]
pub struct FuncParams {
    /// The parameters, in declared order.
    pub params: Vec<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl FuncParams {
    /// Creates a new parameter list.
    #[must_use]
    pub fn new(params: Vec<NodeID>, id: NodeID, span: Span) -> Self {
        Self { params, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(FuncParams, NodeKind::Support, |n: &Self| n.params.clone());
impl_visitable!(FuncParams, visit_func_params);

impl fmt::Display for FuncParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FuncParams({} params)", self.params.len())
    }
}

/// One parameter of a `FuncParams` list.
#[derive(Debug, Clone)]
pub struct ParamVar {
    /// The parameter name.
    pub name: NodeID,
    /// An optional declared type.
    pub type_spec: Option<NodeID>,
    /// An optional default value.
    pub default: Option<NodeID>,
    /// True for a `*args`-style collector.
    pub is_star: bool,
    /// True for a `**kwargs`-style collector.
    pub is_star_star: bool,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl ParamVar {
    /// Creates a new parameter.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: NodeID,
        type_spec: Option<NodeID>,
        default: Option<NodeID>,
        is_star: bool,
        is_star_star: bool,
        id: NodeID,
        span: Span,
    ) -> Self {
        Self {
            name,
            type_spec,
            default,
            is_star,
            is_star_star,
            id,
            parent: None,
            span,
            meta: Meta::default(),
        }
    }
}

impl_node_core!(ParamVar, NodeKind::Support, |n: &Self| {
    let mut kids = vec![n.name];
    kids.extend(n.type_spec);
    kids.extend(n.default);
    kids
});
impl_visitable!(ParamVar, visit_param_var);

impl fmt::Display for ParamVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "ParamVar") }
}

/// One `has`-declared member variable.
#[derive(Debug, Clone)]
pub struct HasVar {
    /// The variable name.
    pub name: NodeID,
    /// An optional declared type.
    pub type_spec: Option<NodeID>,
    /// An optional default value, lowered into the architype's synthesized
    /// initializer.
    pub default: Option<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl HasVar {
    /// Creates a new `has`-declared member variable.
    #[must_use]
    pub fn new(
        name: NodeID,
        type_spec: Option<NodeID>,
        default: Option<NodeID>,
        id: NodeID,
        span: Span,
    ) -> Self {
        Self { name, type_spec, default, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(HasVar, NodeKind::Support, |n: &Self| {
    let mut kids = vec![n.name];
    kids.extend(n.type_spec);
    kids.extend(n.default);
    kids
});
impl_visitable!(HasVar, visit_has_var);

impl fmt::Display for HasVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "HasVar") }
}

/// A comma-separated assignment-target list (chained/tuple assignment).
#[derive(Debug, Clone)]
pub struct AssignmentList {
    /// The individual assignments.
    pub assignments: Vec<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl AssignmentList {
    /// Creates a new assignment list.
    #[must_use]
    pub fn new(assignments: Vec<NodeID>, id: NodeID, span: Span) -> Self {
        Self { assignments, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(AssignmentList, NodeKind::Support, |n: &Self| n.assignments.clone());
impl_visitable!(AssignmentList, visit_assignment_list);

impl fmt::Display for AssignmentList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssignmentList({} targets)", self.assignments.len())
    }
}

/// An augmented-assignment operator, or plain `=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    /// Plain `=`.
    Assign,
    /// `+=`.
    AddAssign,
    /// `-=`.
    SubAssign,
    /// `*=`.
    MulAssign,
    /// `/=`.
    DivAssign,
}

/// One `target = value` (or augmented) assignment, or a bare declared
/// target with no initializer (`has`-style, value absent).
#[derive(Debug, Clone)]
pub struct Assignment {
    /// The assignment target.
    pub target: NodeID,
    /// An optional `: T` annotation, as written on a `glob` or local declaration.
    pub type_spec: Option<NodeID>,
    /// The assigned value, absent for a bare declaration.
    pub value: Option<NodeID>,
    /// Which assignment operator was written.
    pub op: AssignOp,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl Assignment {
    /// Creates a new assignment.
    #[must_use]
    pub fn new(
        target: NodeID,
        type_spec: Option<NodeID>,
        value: Option<NodeID>,
        op: AssignOp,
        id: NodeID,
        span: Span,
    ) -> Self {
        Self { target, type_spec, value, op, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(Assignment, NodeKind::Support, |n: &Self| {
    let mut kids = vec![n.target];
    kids.extend(n.type_spec);
    kids.extend(n.value);
    kids
});
impl_visitable!(Assignment, visit_assignment);

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Assignment({:?})", self.op) }
}

/// A doc-string literal attached to a module, architype, or ability.
#[derive(Debug, Clone)]
pub struct DocString {
    /// The doc-string's text, already unescaped.
    pub text: String,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl DocString {
    /// Creates a new doc-string.
    #[must_use]
    pub fn new(text: String, id: NodeID, span: Span) -> Self {
        Self { text, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(DocString, NodeKind::Support, |_: &Self| Vec::new());
impl_visitable!(DocString, visit_doc_string);

impl fmt::Display for DocString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "DocString") }
}

/// Which graph-traversal moment an event-driven ability fires on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// `with entry`: fires when the walker arrives at the node/edge.
    Entry,
    /// `with exit`: fires when the walker leaves the node/edge.
    Exit,
}

/// An event-driven ability's `with entry`/`with exit` trigger signature,
/// optionally filtered to a specific architype type.
#[derive(Debug, Clone)]
pub struct EventSignature {
    /// Which moment this fires on.
    pub event: EventKind,
    /// An optional architype-type filter (fires only for matching visitors).
    pub type_filter: Option<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl EventSignature {
    /// Creates a new event signature.
    #[must_use]
    pub fn new(event: EventKind, type_filter: Option<NodeID>, id: NodeID, span: Span) -> Self {
        Self { event, type_filter, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(EventSignature, NodeKind::Support, |n: &Self| n.type_filter.into_iter().collect());
impl_visitable!(EventSignature, visit_event_signature);

impl fmt::Display for EventSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventSignature({:?})", self.event)
    }
}

/// A type annotation, with optional generic parameters (`list[int]`,
/// `dict[str, int]`).
#[derive(Debug, Clone)]
pub struct TypeSpec {
    /// The base type reference.
    pub base: NodeID,
    /// Generic type parameters, if any.
    pub params: Vec<NodeID>,
    /// True if the type is nullable (`?Type`).
    pub nullable: bool,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl TypeSpec {
    /// Creates a new type annotation.
    #[must_use]
    pub fn new(base: NodeID, params: Vec<NodeID>, nullable: bool, id: NodeID, span: Span) -> Self {
        Self { base, params, nullable, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(TypeSpec, NodeKind::Support, |n: &Self| {
    let mut kids = vec![n.base];
    kids.extend(n.params.iter().copied());
    kids
});
impl_visitable!(TypeSpec, visit_type_spec);

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "TypeSpec") }
}

/// A plain ability's `(params) -> ret` signature.
#[derive(Debug, Clone)]
pub struct FuncSignature {
    /// The parameter list.
    pub params: NodeID,
    /// The declared return type, absent when unannotated.
    pub return_type: Option<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl FuncSignature {
    /// Creates a new function signature.
    #[must_use]
    pub fn new(params: NodeID, return_type: Option<NodeID>, id: NodeID, span: Span) -> Self {
        Self { params, return_type, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(FuncSignature, NodeKind::Support, |n: &Self| {
    let mut kids = vec![n.params];
    kids.extend(n.return_type);
    kids
});
impl_visitable!(FuncSignature, visit_func_signature);

impl fmt::Display for FuncSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "FuncSignature") }
}
