//! Type annotations, parameter/has-var declarations, function and event
//! signatures, and assignment lists — the small grammar fragments shared by
//! several top-level and statement forms.

use jac_ast::nodes::{
    AssignOp,
    Assignment,
    AssignmentList,
    EventKind,
    EventSignature,
    FuncParams,
    FuncSignature,
    HasVar,
    KindRef,
    NodeID,
    NodeKind,
    ParamVar,
    ReferenceKind,
    TypeSpec,
};

use super::{ParseResult, Parser};
use crate::lexer::TokenKind;

impl<'src> Parser<'src> {
    /// A type's base: a plain name, or one of the architype-kind keywords
    /// (`node`, `edge`, `walker`, `object`) used as a type reference.
    fn parse_type_base(&mut self) -> ParseResult<NodeID> {
        let kind = match self.peek_kind() {
            TokenKind::Node => ReferenceKind::Node,
            TokenKind::Edge => ReferenceKind::Edge,
            TokenKind::Walker => ReferenceKind::Walker,
            TokenKind::Object => ReferenceKind::Object,
            _ => return self.parse_name(),
        };
        let start = self.current().span().start;
        let _ = self.advance();
        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::Reference, span, |id| jac_ast::nodes::AnyNode::KindRef(KindRef::new(kind, id, span))))
    }

    /// `T`, `T(U)` (generic), or any of the above suffixed with `?` for
    /// nullable.
    pub(super) fn parse_type_spec(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let base = self.parse_type_base()?;
        let mut params = Vec::new();
        if self.eat(TokenKind::LParen).is_some() {
            params.push(self.parse_type_spec()?);
            while self.eat(TokenKind::Comma).is_some() {
                params.push(self.parse_type_spec()?);
            }
            let _ = self.expect(TokenKind::RParen)?;
        }
        let nullable = self.eat(TokenKind::Question).is_some();
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Support, span, |id| {
            jac_ast::nodes::AnyNode::TypeSpec(TypeSpec::new(base, params.clone(), nullable, id, span))
        });
        self.link_children(id, &[base]);
        self.link_children(id, &params);
        Ok(id)
    }

    pub(super) fn parse_has_var(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let name = self.parse_name()?;
        let type_spec = if self.eat(TokenKind::Colon).is_some() { Some(self.parse_type_spec()?) } else { None };
        let default = if self.eat(TokenKind::Assign).is_some() { Some(self.parse_expression()?) } else { None };
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Support, span, |id| {
            jac_ast::nodes::AnyNode::HasVar(HasVar::new(name, type_spec, default, id, span))
        });
        self.link_children(id, &[name]);
        if let Some(t) = type_spec {
            self.link_children(id, &[t]);
        }
        if let Some(d) = default {
            self.link_children(id, &[d]);
        }
        Ok(id)
    }

    fn parse_param_var(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let is_star_star = self.eat(TokenKind::StarStar).is_some();
        let is_star = !is_star_star && self.eat(TokenKind::Star).is_some();
        let name = self.parse_name()?;
        let type_spec = if self.eat(TokenKind::Colon).is_some() { Some(self.parse_type_spec()?) } else { None };
        let default = if self.eat(TokenKind::Assign).is_some() { Some(self.parse_expression()?) } else { None };
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Support, span, |id| {
            jac_ast::nodes::AnyNode::ParamVar(ParamVar::new(
                name, type_spec, default, is_star, is_star_star, id, span,
            ))
        });
        self.link_children(id, &[name]);
        if let Some(t) = type_spec {
            self.link_children(id, &[t]);
        }
        if let Some(d) = default {
            self.link_children(id, &[d]);
        }
        Ok(id)
    }

    fn parse_func_params(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        while !self.at(TokenKind::RParen) {
            params.push(self.parse_param_var()?);
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        let _ = self.expect(TokenKind::RParen)?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Support, span, |id| {
            jac_ast::nodes::AnyNode::FuncParams(FuncParams::new(params.clone(), id, span))
        });
        self.link_children(id, &params);
        Ok(id)
    }

    /// `(params) -> T` or `(params)`.
    pub(super) fn parse_func_signature(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let params = self.parse_func_params()?;
        let return_type = if self.eat(TokenKind::Arrow).is_some() { Some(self.parse_type_spec()?) } else { None };
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Support, span, |id| {
            jac_ast::nodes::AnyNode::FuncSignature(FuncSignature::new(params, return_type, id, span))
        });
        self.link_children(id, &[params]);
        if let Some(r) = return_type {
            self.link_children(id, &[r]);
        }
        Ok(id)
    }

    /// `with entry` / `with exit`, optionally filtered by a type (`with entry: Foo`).
    pub(super) fn parse_event_signature(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::With)?;
        let event = if self.eat(TokenKind::Exit).is_some() {
            EventKind::Exit
        } else {
            let _ = self.expect(TokenKind::Entry)?;
            EventKind::Entry
        };
        let type_filter = if self.eat(TokenKind::Colon).is_some() { Some(self.parse_type_spec()?) } else { None };
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Support, span, |id| {
            jac_ast::nodes::AnyNode::EventSignature(EventSignature::new(event, type_filter, id, span))
        });
        if let Some(t) = type_filter {
            self.link_children(id, &[t]);
        }
        Ok(id)
    }

    fn assign_op(&mut self) -> Option<AssignOp> {
        let op = match self.peek_kind() {
            TokenKind::Assign => AssignOp::Assign,
            TokenKind::PlusAssign => AssignOp::AddAssign,
            TokenKind::MinusAssign => AssignOp::SubAssign,
            TokenKind::StarAssign => AssignOp::MulAssign,
            TokenKind::SlashAssign => AssignOp::DivAssign,
            _ => return None,
        };
        let _ = self.advance();
        Some(op)
    }

    /// Parses a (generally) assignment target. This goes through the full
    /// expression grammar rather than the restricted `parse_atom_trailer`
    /// lvalue form, since a bare expression statement with no following
    /// assignment operator (a `spawn` dispatch, a `++>` connect, a call for
    /// its side effect) is parsed the same way and only distinguished by
    /// whether an `=`-family operator follows. A `glob` or local declaration
    /// may also carry a `: T` annotation directly after the target, ahead of
    /// any assignment operator.
    fn parse_assignment(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let target = self.parse_expression()?;
        let type_spec = if self.eat(TokenKind::Colon).is_some() { Some(self.parse_type_spec()?) } else { None };
        let (op, value) = if let Some(op) = self.assign_op() { (op, Some(self.parse_expression()?)) } else { (AssignOp::Assign, None) };
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Support, span, |id| {
            jac_ast::nodes::AnyNode::Assignment(Assignment::new(target, type_spec, value, op, id, span))
        });
        self.link_children(id, &[target]);
        if let Some(t) = type_spec {
            self.link_children(id, &[t]);
        }
        if let Some(v) = value {
            self.link_children(id, &[v]);
        }
        Ok(id)
    }

    pub(super) fn parse_assignment_list(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let mut assignments = vec![self.parse_assignment()?];
        while self.eat(TokenKind::Comma).is_some() {
            assignments.push(self.parse_assignment()?);
        }
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Support, span, |id| {
            jac_ast::nodes::AnyNode::AssignmentList(AssignmentList::new(assignments.clone(), id, span))
        });
        self.link_children(id, &assignments);
        Ok(id)
    }
}
