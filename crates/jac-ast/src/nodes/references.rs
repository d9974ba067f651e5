//! Data-spatial kind-reference keywords: the fixed vocabulary of built-in
//! names the data-spatial model reserves (`here`, `visitor`, `root`, and the
//! architype-kind keywords themselves used as type references).

use std::fmt;

use jac_source::types::Span;

use super::{ASTNode, NodeID, NodeKind};
use crate::macros::{impl_node_core, impl_visitable};
use crate::meta::Meta;

/// One of the reserved data-spatial reference keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// `global`: the module-level scope, from inside an ability.
    Global,
    /// `here`: the node or edge currently being visited.
    Here,
    /// `visitor`: the walker instance currently visiting `here`.
    Visitor,
    /// `node`: the node architype kind, used as a type reference.
    Node,
    /// `edge`: the edge architype kind, used as a type reference.
    Edge,
    /// `walker`: the walker architype kind, used as a type reference.
    Walker,
    /// `func`: the function/ability kind, used as a type reference.
    Func,
    /// `object`: the plain-object architype kind, used as a type reference.
    Object,
    /// `ability`: an ability signature kind, used as a type reference.
    Ability,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Global => "global",
            Self::Here => "here",
            Self::Visitor => "visitor",
            Self::Node => "node",
            Self::Edge => "edge",
            Self::Walker => "walker",
            Self::Func => "func",
            Self::Object => "object",
            Self::Ability => "ability",
        };
        write!(f, "{s}")
    }
}

/// A reference to one of the reserved data-spatial keywords.
#[derive(Debug, Clone)]
pub struct KindRef {
    /// Which keyword this is.
    pub kind: ReferenceKind,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl KindRef {
    /// Creates a new kind-reference node.
    #[must_use]
    pub fn new(kind: ReferenceKind, id: NodeID, span: Span) -> Self {
        Self { kind, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(KindRef, NodeKind::Reference, |_: &Self| Vec::new());
impl_visitable!(KindRef, visit_kind_ref);

impl fmt::Display for KindRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "KindRef({})", self.kind) }
}
