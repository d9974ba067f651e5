//! Lexical leaves: plain identifiers, reserved keywords used as values, and
//! literal constants.

use std::fmt;

use jac_source::types::Span;

use super::{ASTNode, NodeID, NodeKind};
use crate::macros::{impl_node_core, impl_visitable};
use crate::meta::Meta;

/// A plain identifier token.
#[derive(Debug, Clone)]
pub struct NameTok {
    /// The identifier text.
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

impl NameTok {
    /// Creates a new identifier token.
    #[must_use]
    pub fn new(text: String, id: NodeID, span: Span) -> Self {
        Self { text, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(NameTok, NodeKind::Token, |_: &Self| Vec::new());
impl_visitable!(NameTok, visit_name_tok);

impl fmt::Display for NameTok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "NameTok({})", self.text) }
}

/// A reserved keyword appearing where a value is expected, e.g. `self` or
/// `super` inside an ability body.
#[derive(Debug, Clone)]
pub struct KeywordTok {
    /// The keyword's literal spelling.
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

impl KeywordTok {
    /// Creates a new keyword token.
    #[must_use]
    pub fn new(text: String, id: NodeID, span: Span) -> Self {
        Self { text, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(KeywordTok, NodeKind::Token, |_: &Self| Vec::new());
impl_visitable!(KeywordTok, visit_keyword_tok);

impl fmt::Display for KeywordTok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "KeywordTok({})", self.text) }
}

/// A literal constant's parsed value.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// An integer literal.
    Int(i64),
    /// A floating-point literal.
    Float(f64),
    /// A string literal, already unescaped.
    Str(String),
    /// A boolean literal.
    Bool(bool),
    /// The null literal.
    Null,
}

/// A literal constant token.
#[derive(Debug, Clone)]
pub struct LiteralTok {
    /// The parsed value.
    pub value: LiteralValue,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl LiteralTok {
    /// Creates a new literal token.
    #[must_use]
    pub fn new(value: LiteralValue, id: NodeID, span: Span) -> Self {
        Self { value, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(LiteralTok, NodeKind::Token, |_: &Self| Vec::new());
impl_visitable!(LiteralTok, visit_literal_tok);

impl fmt::Display for LiteralTok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "LiteralTok({:?})", self.value) }
}
