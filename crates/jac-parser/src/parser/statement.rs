//! Executable statements: control flow, data-spatial verbs, and plain
//! expression statements.

use jac_ast::nodes::{
    AssertStmt,
    CodeBlock,
    CtrlKind,
    CtrlStmt,
    DeleteStmt,
    DictForStmt,
    DisengageStmt,
    ExceptHandler,
    IgnoreStmt,
    InForStmt,
    IterForStmt,
    NodeID,
    NodeKind,
    RaiseStmt,
    ReportStmt,
    ReturnStmt,
    RevisitStmt,
    SyncStmt,
    TryStmt,
    VisitStmt,
    WhileStmt,
    YieldStmt,
};

use super::{ParseError, ParseResult, Parser};
use crate::lexer::TokenKind;

/// Tokens that can start a statement, used to resynchronize inside a code
/// block after a statement fails to parse.
const STMT_BOUNDARIES: &[TokenKind] = &[
    TokenKind::If,
    TokenKind::While,
    TokenKind::For,
    TokenKind::Try,
    TokenKind::Raise,
    TokenKind::Assert,
    TokenKind::Return,
    TokenKind::Yield,
    TokenKind::Break,
    TokenKind::Continue,
    TokenKind::Skip,
    TokenKind::Del,
    TokenKind::Visit,
    TokenKind::Revisit,
    TokenKind::Disengage,
    TokenKind::Sync,
    TokenKind::Report,
    TokenKind::Ignore,
    TokenKind::RBrace,
    TokenKind::EndOfFile,
];

impl<'src> Parser<'src> {
    pub(super) fn parse_code_block(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::LBrace)?;
        let mut statements = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at(TokenKind::EndOfFile) {
            match self.parse_statement() {
                Ok(stmt) => statements.push(stmt),
                Err(err) => {
                    // A malformed statement inside a block can't be sent to a
                    // diagnostic sink here (the sink only flows through
                    // `parse_module`), so it is propagated; the enclosing
                    // top-level item recovers at its own boundary instead.
                    self.recover_to(STMT_BOUNDARIES);
                    if self.at(TokenKind::RBrace) || self.at(TokenKind::EndOfFile) {
                        return Err(err);
                    }
                }
            }
        }
        let _ = self.expect(TokenKind::RBrace)?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Structural, span, |id| {
            jac_ast::nodes::AnyNode::CodeBlock(CodeBlock::new(statements.clone(), id, span))
        });
        self.link_children(id, &statements);
        Ok(id)
    }

    pub(super) fn parse_statement(&mut self) -> ParseResult<NodeID> {
        match self.peek_kind() {
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::For => self.parse_for_stmt(),
            TokenKind::Try => self.parse_try_stmt(),
            TokenKind::Raise => self.parse_raise_stmt(),
            TokenKind::Assert => self.parse_assert_stmt(),
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::Yield => self.parse_yield_stmt(),
            TokenKind::Break => self.parse_ctrl_stmt(CtrlKind::Break),
            TokenKind::Continue => self.parse_ctrl_stmt(CtrlKind::Continue),
            TokenKind::Skip => self.parse_ctrl_stmt(CtrlKind::Skip),
            TokenKind::Del => self.parse_delete_stmt(),
            TokenKind::Visit => self.parse_visit_stmt(),
            TokenKind::Revisit => self.parse_revisit_stmt(),
            TokenKind::Disengage => self.parse_disengage_stmt(),
            TokenKind::Sync => self.parse_sync_stmt(),
            TokenKind::Report => self.parse_report_stmt(),
            TokenKind::Ignore => self.parse_ignore_stmt(),
            TokenKind::Has => self.parse_local_has_stmt(),
            _ => self.parse_expr_stmt(),
        }
    }

    fn parse_if_stmt(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::If)?;
        let cond = self.parse_expression()?;
        let then_branch = self.parse_code_block()?;
        let else_branch = if self.at(TokenKind::Elif) || self.at(TokenKind::Else) {
            Some(self.parse_else_continuation()?)
        } else {
            None
        };
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Statement, span, |id| {
            jac_ast::nodes::AnyNode::IfStmt(jac_ast::nodes::IfStmt::new(cond, then_branch, else_branch, id, span))
        });
        self.link_children(id, &[cond, then_branch]);
        if let Some(e) = else_branch {
            self.link_children(id, &[e]);
        }
        Ok(id)
    }

    /// Parses the `elif`/`else` tail of an already-consumed `if`, used when
    /// an `elif` chain continues past the immediately following clause.
    fn parse_else_continuation(&mut self) -> ParseResult<NodeID> {
        if self.at(TokenKind::Elif) {
            let start = self.current().span().start;
            let _ = self.advance();
            let cond = self.parse_expression()?;
            let then_branch = self.parse_code_block()?;
            let else_branch = if self.at(TokenKind::Elif) || self.at(TokenKind::Else) {
                Some(self.parse_else_continuation()?)
            } else {
                None
            };
            let span = self.span_from(start);
            let id = self.alloc(NodeKind::Statement, span, |id| {
                jac_ast::nodes::AnyNode::IfStmt(jac_ast::nodes::IfStmt::new(
                    cond, then_branch, else_branch, id, span,
                ))
            });
            self.link_children(id, &[cond, then_branch]);
            if let Some(e) = else_branch {
                self.link_children(id, &[e]);
            }
            Ok(id)
        } else {
            let _ = self.expect(TokenKind::Else)?;
            self.parse_code_block()
        }
    }

    fn parse_while_stmt(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::While)?;
        let cond = self.parse_expression()?;
        let body = self.parse_code_block()?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Statement, span, |id| {
            jac_ast::nodes::AnyNode::WhileStmt(WhileStmt::new(cond, body, id, span))
        });
        self.link_children(id, &[cond, body]);
        Ok(id)
    }

    /// Dispatches `for` to the counted (`for i=0 to i<10 by i+=1`), in-style
    /// (`for x in xs`), or dict-style (`for k, v in d`) variant, all of which
    /// share the `for` keyword.
    fn parse_for_stmt(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::For)?;

        let first_target_start = self.current().span().start;
        let first = self.parse_atom_trailer()?;

        if self.eat(TokenKind::Comma).is_some() {
            let value_target = self.parse_atom_trailer()?;
            let _ = self.expect(TokenKind::In)?;
            let iterable = self.parse_expression()?;
            let body = self.parse_code_block()?;
            let span = self.span_from(start);
            let id = self.alloc(NodeKind::Statement, span, |id| {
                jac_ast::nodes::AnyNode::DictForStmt(DictForStmt::new(
                    first, value_target, iterable, body, id, span,
                ))
            });
            self.link_children(id, &[first, value_target, iterable, body]);
            return Ok(id);
        }

        if self.eat(TokenKind::In).is_some() {
            let iterable = self.parse_expression()?;
            let body = self.parse_code_block()?;
            let span = self.span_from(start);
            let id = self.alloc(NodeKind::Statement, span, |id| {
                jac_ast::nodes::AnyNode::InForStmt(InForStmt::new(first, iterable, body, id, span))
            });
            self.link_children(id, &[first, iterable, body]);
            return Ok(id);
        }

        // Counted form: `for <init-assignment> to <cond> by <step> { ... }`.
        // `first` was parsed as a bare expression but the counted form needs
        // an assignment, so re-parse from the target start as one.
        self.pos = self.index_at_offset(first_target_start);
        let init = self.parse_assignment_list()?;
        let _ = self.expect(TokenKind::To)?;
        let cond = self.parse_expression()?;
        let _ = self.expect(TokenKind::By)?;
        let step = self.parse_assignment_list()?;
        let body = self.parse_code_block()?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Statement, span, |id| {
            jac_ast::nodes::AnyNode::IterForStmt(IterForStmt::new(init, cond, step, body, id, span))
        });
        self.link_children(id, &[init, cond, step, body]);
        Ok(id)
    }

    fn parse_try_stmt(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::Try)?;
        let body = self.parse_code_block()?;
        let mut handlers = Vec::new();
        while self.at(TokenKind::Except) {
            handlers.push(self.parse_except_handler()?);
        }
        let finally = if self.eat(TokenKind::Finally).is_some() { Some(self.parse_code_block()?) } else { None };
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Statement, span, |id| {
            jac_ast::nodes::AnyNode::TryStmt(TryStmt::new(body, handlers.clone(), finally, id, span))
        });
        self.link_children(id, &[body]);
        self.link_children(id, &handlers);
        if let Some(f) = finally {
            self.link_children(id, &[f]);
        }
        Ok(id)
    }

    fn parse_except_handler(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::Except)?;
        let exc_type = if self.at(TokenKind::Name) { Some(self.parse_type_spec()?) } else { None };
        let binding = if self.eat(TokenKind::As).is_some() { Some(self.parse_name()?) } else { None };
        let body = self.parse_code_block()?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Statement, span, |id| {
            jac_ast::nodes::AnyNode::ExceptHandler(ExceptHandler::new(exc_type, binding, body, id, span))
        });
        if let Some(e) = exc_type {
            self.link_children(id, &[e]);
        }
        if let Some(b) = binding {
            self.link_children(id, &[b]);
        }
        self.link_children(id, &[body]);
        Ok(id)
    }

    fn parse_raise_stmt(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::Raise)?;
        let exc = if self.at(TokenKind::Semi) { None } else { Some(self.parse_expression()?) };
        let cause = if self.eat(TokenKind::From).is_some() { Some(self.parse_expression()?) } else { None };
        let _ = self.expect(TokenKind::Semi)?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Statement, span, |id| {
            jac_ast::nodes::AnyNode::RaiseStmt(RaiseStmt::new(exc, cause, id, span))
        });
        if let Some(e) = exc {
            self.link_children(id, &[e]);
        }
        if let Some(c) = cause {
            self.link_children(id, &[c]);
        }
        Ok(id)
    }

    fn parse_assert_stmt(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::Assert)?;
        let cond = self.parse_expression()?;
        let message = if self.eat(TokenKind::Comma).is_some() { Some(self.parse_expression()?) } else { None };
        let _ = self.expect(TokenKind::Semi)?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Statement, span, |id| {
            jac_ast::nodes::AnyNode::AssertStmt(AssertStmt::new(cond, message, id, span))
        });
        self.link_children(id, &[cond]);
        if let Some(m) = message {
            self.link_children(id, &[m]);
        }
        Ok(id)
    }

    fn parse_return_stmt(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::Return)?;
        let value = if self.at(TokenKind::Semi) { None } else { Some(self.parse_expression()?) };
        let _ = self.expect(TokenKind::Semi)?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Statement, span, |id| {
            jac_ast::nodes::AnyNode::ReturnStmt(ReturnStmt::new(value, id, span))
        });
        if let Some(v) = value {
            self.link_children(id, &[v]);
        }
        Ok(id)
    }

    fn parse_yield_stmt(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::Yield)?;
        let is_from = self.eat(TokenKind::From).is_some();
        let value = if self.at(TokenKind::Semi) { None } else { Some(self.parse_expression()?) };
        let _ = self.expect(TokenKind::Semi)?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Statement, span, |id| {
            jac_ast::nodes::AnyNode::YieldStmt(YieldStmt::new(value, is_from, id, span))
        });
        if let Some(v) = value {
            self.link_children(id, &[v]);
        }
        Ok(id)
    }

    fn parse_ctrl_stmt(&mut self, kind: CtrlKind) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.advance();
        let _ = self.expect(TokenKind::Semi)?;
        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::Statement, span, |id| {
            jac_ast::nodes::AnyNode::CtrlStmt(CtrlStmt::new(kind, id, span))
        }))
    }

    fn parse_delete_stmt(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::Del)?;
        let mut targets = vec![self.parse_expression()?];
        while self.eat(TokenKind::Comma).is_some() {
            targets.push(self.parse_expression()?);
        }
        let _ = self.expect(TokenKind::Semi)?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Statement, span, |id| {
            jac_ast::nodes::AnyNode::DeleteStmt(DeleteStmt::new(targets.clone(), id, span))
        });
        self.link_children(id, &targets);
        Ok(id)
    }

    fn parse_visit_stmt(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::Visit)?;
        let target = self.parse_expression()?;
        let else_body = if self.eat(TokenKind::Else).is_some() { Some(self.parse_code_block()?) } else { None };
        if else_body.is_none() {
            let _ = self.expect(TokenKind::Semi)?;
        }
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Statement, span, |id| {
            jac_ast::nodes::AnyNode::VisitStmt(VisitStmt::new(target, else_body, id, span))
        });
        self.link_children(id, &[target]);
        if let Some(e) = else_body {
            self.link_children(id, &[e]);
        }
        Ok(id)
    }

    fn parse_revisit_stmt(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::Revisit)?;
        let target = if self.at(TokenKind::Semi) || self.at(TokenKind::Else) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        let else_body = if self.eat(TokenKind::Else).is_some() { Some(self.parse_code_block()?) } else { None };
        if else_body.is_none() {
            let _ = self.expect(TokenKind::Semi)?;
        }
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Statement, span, |id| {
            jac_ast::nodes::AnyNode::RevisitStmt(RevisitStmt::new(target, else_body, id, span))
        });
        if let Some(t) = target {
            self.link_children(id, &[t]);
        }
        if let Some(e) = else_body {
            self.link_children(id, &[e]);
        }
        Ok(id)
    }

    fn parse_disengage_stmt(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::Disengage)?;
        let _ = self.expect(TokenKind::Semi)?;
        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::Statement, span, |id| {
            jac_ast::nodes::AnyNode::DisengageStmt(DisengageStmt::new(id, span))
        }))
    }

    fn parse_sync_stmt(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::Sync)?;
        let target = self.parse_expression()?;
        let _ = self.expect(TokenKind::Semi)?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Statement, span, |id| {
            jac_ast::nodes::AnyNode::SyncStmt(SyncStmt::new(target, id, span))
        });
        self.link_children(id, &[target]);
        Ok(id)
    }

    fn parse_report_stmt(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::Report)?;
        let value = self.parse_expression()?;
        let _ = self.expect(TokenKind::Semi)?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Statement, span, |id| {
            jac_ast::nodes::AnyNode::ReportStmt(ReportStmt::new(value, id, span))
        });
        self.link_children(id, &[value]);
        Ok(id)
    }

    fn parse_ignore_stmt(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::Ignore)?;
        let target = self.parse_expression()?;
        let _ = self.expect(TokenKind::Semi)?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Statement, span, |id| {
            jac_ast::nodes::AnyNode::IgnoreStmt(IgnoreStmt::new(target, id, span))
        });
        self.link_children(id, &[target]);
        Ok(id)
    }

    /// A `has` declaration inside an ability body (a local variable
    /// declaration), distinct from the member-level `ArchHas` top-level
    /// form. The declared type, if any, carries no runtime weight in the
    /// target language, so the annotation is kept only for diagnostics and
    /// does not change how the declaration lowers.
    fn parse_local_has_stmt(&mut self) -> ParseResult<NodeID> {
        use jac_ast::nodes::{AssignOp, Assignment, AssignmentList};

        let start = self.current().span().start;
        let _ = self.expect(TokenKind::Has)?;

        let mut assignments = Vec::new();
        loop {
            let var_start = self.current().span().start;
            let name = self.parse_name()?;
            let type_spec = if self.eat(TokenKind::Colon).is_some() { Some(self.parse_type_spec()?) } else { None };
            let value = if self.eat(TokenKind::Assign).is_some() { Some(self.parse_expression()?) } else { None };
            let var_span = self.span_from(var_start);
            let assign = self.alloc(NodeKind::Support, var_span, |id| {
                jac_ast::nodes::AnyNode::Assignment(Assignment::new(name, type_spec, value, AssignOp::Assign, id, var_span))
            });
            self.link_children(assign, &[name]);
            if let Some(t) = type_spec {
                self.link_children(assign, &[t]);
            }
            if let Some(v) = value {
                self.link_children(assign, &[v]);
            }
            assignments.push(assign);
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        let _ = self.expect(TokenKind::Semi)?;

        let list_span = self.span_from(start);
        let list = self.alloc(NodeKind::Support, list_span, |id| {
            jac_ast::nodes::AnyNode::AssignmentList(AssignmentList::new(assignments.clone(), id, list_span))
        });
        self.link_children(list, &assignments);

        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Statement, span, |id| {
            jac_ast::nodes::AnyNode::ExprStmt(jac_ast::nodes::ExprStmt::new(list, id, span))
        });
        self.link_children(id, &[list]);
        Ok(id)
    }

    fn parse_expr_stmt(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let assignments = self.parse_assignment_list()?;
        let _ = self.expect(TokenKind::Semi)?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Statement, span, |id| {
            jac_ast::nodes::AnyNode::ExprStmt(jac_ast::nodes::ExprStmt::new(assignments, id, span))
        });
        self.link_children(id, &[assignments]);
        Ok(id)
    }

    /// Finds the token index whose span starts at `offset`, used by the
    /// counted-`for` backtrack: `parse_atom_trailer` already consumed the loop
    /// variable as a bare target before the `to`/`in`/`,` lookahead
    /// disambiguated the loop form, so counted `for` re-parses it as an
    /// assignment from the same starting token.
    fn index_at_offset(&self, offset: usize) -> usize {
        self.tokens.iter().position(|t| t.span().start == offset).unwrap_or(self.pos)
    }
}
