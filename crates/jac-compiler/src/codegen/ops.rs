//! Operator-to-Python-text tables.
//!
//! None of `jac-ast`'s operator enums implement [`std::fmt::Display`] — they're
//! plain tag types the parser attaches to a node, with no opinion on how a
//! downstream consumer should render them. The code generator is the first
//! consumer that needs text, so the mapping lives here rather than upstream.

use jac_ast::nodes::{AssignOp, BinOp, ComprehensionKind, CtrlKind, EventKind, UnaryOp};

/// The Python spelling of a binary operator.
#[must_use]
pub const fn bin_op_text(op: BinOp) -> &'static str {
    match op {
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::Mul => "*",
        BinOp::Div => "/",
        BinOp::FloorDiv => "//",
        BinOp::Mod => "%",
        BinOp::Pow => "**",
        BinOp::Eq => "==",
        BinOp::NotEq => "!=",
        BinOp::Lt => "<",
        BinOp::LtEq => "<=",
        BinOp::Gt => ">",
        BinOp::GtEq => ">=",
        BinOp::And => "and",
        BinOp::Or => "or",
        BinOp::BitAnd => "&",
        BinOp::BitOr => "|",
        BinOp::BitXor => "^",
        BinOp::Shl => "<<",
        BinOp::Shr => ">>",
        BinOp::In => "in",
        BinOp::NotIn => "not in",
        BinOp::Is => "is",
        BinOp::IsNot => "is not",
        // The elvis operator has no Python spelling; `py_ast_gen` lowers it
        // to a runtime hook call rather than reaching this table.
        BinOp::Elvis => "??",
    }
}

/// The Python spelling of a unary operator.
#[must_use]
pub const fn unary_op_text(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Neg => "-",
        UnaryOp::Pos => "+",
        UnaryOp::Not => "not ",
        UnaryOp::BitNot => "~",
    }
}

/// The Python spelling of an (augmented) assignment operator.
#[must_use]
pub const fn assign_op_text(op: AssignOp) -> &'static str {
    match op {
        AssignOp::Assign => "=",
        AssignOp::AddAssign => "+=",
        AssignOp::SubAssign => "-=",
        AssignOp::MulAssign => "*=",
        AssignOp::DivAssign => "/=",
    }
}

/// The keyword introducing a comprehension's enclosing brackets.
#[must_use]
pub const fn comprehension_brackets(kind: ComprehensionKind) -> (&'static str, &'static str) {
    match kind {
        ComprehensionKind::List | ComprehensionKind::Generator => ("[", "]"),
        ComprehensionKind::Set => ("{", "}"),
        ComprehensionKind::Dict => ("{", "}"),
    }
}

/// The Python spelling of a loop-control keyword. `skip` has no Python
/// equivalent and is never passed here — `py_ast_gen` reports it as a
/// feature warning before it would reach this table.
#[must_use]
pub const fn ctrl_kind_text(kind: CtrlKind) -> &'static str {
    match kind {
        CtrlKind::Break => "break",
        CtrlKind::Continue => "continue",
        CtrlKind::Skip => "pass",
    }
}

/// The ability name an event-driven signature dispatches on.
#[must_use]
pub const fn event_kind_text(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Entry => "entry",
        EventKind::Exit => "exit",
    }
}
