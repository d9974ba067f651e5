//! The expression grammar: a precedence chain from the ternary `if`/`else`
//! form down through the data-spatial `spawn` operator, boolean/comparison
//! operators, arithmetic, and finally atoms and their trailers (attribute
//! access, calls, indexing/slicing).
//!
//! Each precedence level is its own method, calling the next-tighter level
//! for its operands; `parse_binary_chain` factors out the common
//! left-associative "parse one, then fold in `op operand` pairs" shape shared
//! by most of them.

use jac_ast::nodes::{
    AtomTrailerExpr,
    BinOp,
    BinaryExpr,
    ComprehensionExpr,
    ComprehensionKind,
    ConnectOp,
    DictExpr,
    EdgeDir,
    EdgeOpRef,
    FuncCallExpr,
    IfElseExpr,
    IndexSliceExpr,
    KindRef,
    KeywordTok,
    ListExpr,
    LiteralTok,
    LiteralValue,
    MultiStringExpr,
    NodeID,
    NodeKind,
    ReferenceKind,
    SpawnExpr,
    UnaryExpr,
    UnaryOp,
    UnpackExpr,
};

use super::{ParseError, ParseResult, Parser};
use crate::lexer::TokenKind;

impl<'src> Parser<'src> {
    pub(super) fn parse_expression(&mut self) -> ParseResult<NodeID> { self.parse_ternary() }

    /// `then_expr if cond else else_expr`, right-associative so a chain of
    /// ternaries reads as the nested conditional it is.
    fn parse_ternary(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let then_expr = self.parse_spawn()?;
        if self.eat(TokenKind::If).is_none() {
            return Ok(then_expr);
        }
        let cond = self.parse_spawn()?;
        let _ = self.expect(TokenKind::Else)?;
        let else_expr = self.parse_ternary()?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Expression, span, |id| {
            jac_ast::nodes::AnyNode::IfElseExpr(IfElseExpr::new(cond, then_expr, else_expr, id, span))
        });
        self.link_children(id, &[cond, then_expr, else_expr]);
        Ok(id)
    }

    /// `walker_expr spawn target_expr`.
    fn parse_spawn(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let left = self.parse_connect()?;
        if self.eat(TokenKind::Spawn).is_none() {
            return Ok(left);
        }
        let target = self.parse_connect()?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Expression, span, |id| {
            jac_ast::nodes::AnyNode::SpawnExpr(SpawnExpr::new(left, target, id, span))
        });
        self.link_children(id, &[left, target]);
        Ok(id)
    }

    /// `left ++> right`, `left <++ right`, `left <++> right`: creates an edge
    /// between two nodes, left-associative so a chain builds a path.
    fn parse_connect(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let mut left = self.parse_or_expr()?;
        loop {
            let dir = if self.eat(TokenKind::EdgePlusForward).is_some() {
                EdgeDir::Forward
            } else if self.eat(TokenKind::EdgePlusBackward).is_some() {
                EdgeDir::Backward
            } else if self.eat(TokenKind::EdgePlusBoth).is_some() {
                EdgeDir::Any
            } else {
                break;
            };
            let right = self.parse_or_expr()?;
            let span = self.span_from(start);
            let parent = self.alloc(NodeKind::Expression, span, |id| {
                jac_ast::nodes::AnyNode::ConnectOp(ConnectOp::new(left, right, dir, id, span))
            });
            self.link_children(parent, &[left, right]);
            left = parent;
        }
        Ok(left)
    }

    fn parse_or_expr(&mut self) -> ParseResult<NodeID> {
        self.parse_binary_chain(Self::parse_and_expr, &[(TokenKind::Or, BinOp::Or)])
    }

    fn parse_and_expr(&mut self) -> ParseResult<NodeID> {
        self.parse_binary_chain(Self::parse_not_expr, &[(TokenKind::And, BinOp::And)])
    }

    fn parse_not_expr(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        if self.eat(TokenKind::Not).is_none() {
            return self.parse_comparison();
        }
        let operand = self.parse_not_expr()?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Expression, span, |id| {
            jac_ast::nodes::AnyNode::UnaryExpr(UnaryExpr::new(UnaryOp::Not, operand, id, span))
        });
        self.link_children(id, &[operand]);
        Ok(id)
    }

    /// `==`, `!=`, `<`, `<=`, `>`, `>=`, `in`, `not in`, `is`, `is not`, each
    /// needing its own arm since `not in`/`is not` span two tokens.
    fn parse_comparison(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let mut left = self.parse_elvis_expr()?;
        loop {
            let op = if self.eat(TokenKind::EqEq).is_some() {
                BinOp::Eq
            } else if self.eat(TokenKind::NotEq).is_some() {
                BinOp::NotEq
            } else if self.eat(TokenKind::LtEq).is_some() {
                BinOp::LtEq
            } else if self.eat(TokenKind::GtEq).is_some() {
                BinOp::GtEq
            } else if self.eat(TokenKind::Lt).is_some() {
                BinOp::Lt
            } else if self.eat(TokenKind::Gt).is_some() {
                BinOp::Gt
            } else if self.at(TokenKind::Not) && self.peek2_kind() == TokenKind::In {
                let _ = self.advance();
                let _ = self.advance();
                BinOp::NotIn
            } else if self.at(TokenKind::Is) && self.peek2_kind() == TokenKind::Not {
                let _ = self.advance();
                let _ = self.advance();
                BinOp::IsNot
            } else if self.eat(TokenKind::In).is_some() {
                BinOp::In
            } else if self.eat(TokenKind::Is).is_some() {
                BinOp::Is
            } else {
                break;
            };
            let right = self.parse_elvis_expr()?;
            let span = self.span_from(start);
            let parent = self.alloc(NodeKind::Expression, span, |id| {
                jac_ast::nodes::AnyNode::BinaryExpr(BinaryExpr::new(op, left, right, id, span))
            });
            self.link_children(parent, &[left, right]);
            left = parent;
        }
        Ok(left)
    }

    fn parse_elvis_expr(&mut self) -> ParseResult<NodeID> {
        self.parse_binary_chain(Self::parse_bitor_expr, &[(TokenKind::Elvis, BinOp::Elvis)])
    }

    fn parse_bitor_expr(&mut self) -> ParseResult<NodeID> {
        self.parse_binary_chain(Self::parse_bitxor_expr, &[(TokenKind::Pipe, BinOp::BitOr)])
    }

    fn parse_bitxor_expr(&mut self) -> ParseResult<NodeID> {
        self.parse_binary_chain(Self::parse_bitand_expr, &[(TokenKind::Caret, BinOp::BitXor)])
    }

    fn parse_bitand_expr(&mut self) -> ParseResult<NodeID> {
        self.parse_binary_chain(Self::parse_shift_expr, &[(TokenKind::Amp, BinOp::BitAnd)])
    }

    fn parse_shift_expr(&mut self) -> ParseResult<NodeID> {
        self.parse_binary_chain(
            Self::parse_additive_expr,
            &[(TokenKind::Shl, BinOp::Shl), (TokenKind::Shr, BinOp::Shr)],
        )
    }

    fn parse_additive_expr(&mut self) -> ParseResult<NodeID> {
        self.parse_binary_chain(
            Self::parse_multiplicative_expr,
            &[(TokenKind::Plus, BinOp::Add), (TokenKind::Minus, BinOp::Sub)],
        )
    }

    fn parse_multiplicative_expr(&mut self) -> ParseResult<NodeID> {
        self.parse_binary_chain(
            Self::parse_unary_expr,
            &[
                (TokenKind::Star, BinOp::Mul),
                (TokenKind::Slash, BinOp::Div),
                (TokenKind::SlashSlash, BinOp::FloorDiv),
                (TokenKind::Percent, BinOp::Mod),
            ],
        )
    }

    fn parse_unary_expr(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let op = match self.peek_kind() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Pos,
            TokenKind::Tilde => UnaryOp::BitNot,
            _ => return self.parse_power_expr(),
        };
        let _ = self.advance();
        let operand = self.parse_unary_expr()?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Expression, span, |id| {
            jac_ast::nodes::AnyNode::UnaryExpr(UnaryExpr::new(op, operand, id, span))
        });
        self.link_children(id, &[operand]);
        Ok(id)
    }

    /// Right-associative so `2 ** 3 ** 2` groups as `2 ** (3 ** 2)`.
    fn parse_power_expr(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let left = self.parse_atom_trailer()?;
        if self.eat(TokenKind::StarStar).is_none() {
            return Ok(left);
        }
        let right = self.parse_unary_expr()?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Expression, span, |id| {
            jac_ast::nodes::AnyNode::BinaryExpr(BinaryExpr::new(BinOp::Pow, left, right, id, span))
        });
        self.link_children(id, &[left, right]);
        Ok(id)
    }

    /// Parses one operand at `next`'s level, then folds in `op operand` pairs
    /// left-associatively while the current token matches one of `ops`.
    fn parse_binary_chain(
        &mut self,
        next: fn(&mut Self) -> ParseResult<NodeID>,
        ops: &[(TokenKind, BinOp)],
    ) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let mut left = next(self)?;
        loop {
            let Some(&(_, op)) = ops.iter().find(|&&(tok, _)| self.at(tok)) else { break };
            let _ = self.advance();
            let right = next(self)?;
            let span = self.span_from(start);
            let parent = self.alloc(NodeKind::Expression, span, |id| {
                jac_ast::nodes::AnyNode::BinaryExpr(BinaryExpr::new(op, left, right, id, span))
            });
            self.link_children(parent, &[left, right]);
            left = parent;
        }
        Ok(left)
    }

    /// An atom followed by zero or more `.attr`/call/index trailers. Also
    /// used as the restricted "target" grammar for `for`-loop and
    /// comprehension targets, which are lvalue-shaped rather than arbitrary
    /// expressions (so they never swallow a following `in` as a comparison).
    pub(super) fn parse_atom_trailer(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let atom = self.parse_atom()?;
        let mut trailers = Vec::new();
        loop {
            if self.eat(TokenKind::Dot).is_some() {
                trailers.push(self.parse_name()?);
            } else if self.at(TokenKind::LParen) {
                trailers.push(self.parse_call_trailer()?);
            } else if self.at(TokenKind::LBracket) {
                trailers.push(self.parse_index_trailer()?);
            } else {
                break;
            }
        }
        if trailers.is_empty() {
            return Ok(atom);
        }
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Expression, span, |id| {
            jac_ast::nodes::AnyNode::AtomTrailerExpr(AtomTrailerExpr::new(atom, trailers.clone(), id, span))
        });
        self.link_children(id, &[atom]);
        self.link_children(id, &trailers);
        Ok(id)
    }

    fn parse_call_trailer(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::LParen)?;
        let mut args = Vec::new();
        let mut kwargs = Vec::new();
        while !self.at(TokenKind::RParen) {
            if self.at(TokenKind::Star) || self.at(TokenKind::StarStar) {
                args.push(self.parse_unpack_expr()?);
            } else if self.at(TokenKind::Name) && self.peek2_kind() == TokenKind::Assign {
                let name = self.parse_name()?;
                let _ = self.expect(TokenKind::Assign)?;
                let value = self.parse_expression()?;
                kwargs.push((name, value));
            } else {
                args.push(self.parse_expression()?);
            }
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        let _ = self.expect(TokenKind::RParen)?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Expression, span, |id| {
            jac_ast::nodes::AnyNode::FuncCallExpr(FuncCallExpr::new(args.clone(), kwargs.clone(), id, span))
        });
        self.link_children(id, &args);
        for &(k, v) in &kwargs {
            self.link_children(id, &[k, v]);
        }
        Ok(id)
    }

    fn parse_index_trailer(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::LBracket)?;
        let start_expr = if self.at(TokenKind::Colon) { None } else { Some(self.parse_expression()?) };
        let mut is_slice = false;
        let mut stop = None;
        let mut step = None;
        if self.eat(TokenKind::Colon).is_some() {
            is_slice = true;
            if !self.at(TokenKind::Colon) && !self.at(TokenKind::RBracket) {
                stop = Some(self.parse_expression()?);
            }
            if self.eat(TokenKind::Colon).is_some() && !self.at(TokenKind::RBracket) {
                step = Some(self.parse_expression()?);
            }
        }
        let _ = self.expect(TokenKind::RBracket)?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Expression, span, |id| {
            jac_ast::nodes::AnyNode::IndexSliceExpr(IndexSliceExpr::new(start_expr, stop, step, is_slice, id, span))
        });
        if let Some(s) = start_expr {
            self.link_children(id, &[s]);
        }
        if let Some(s) = stop {
            self.link_children(id, &[s]);
        }
        if let Some(s) = step {
            self.link_children(id, &[s]);
        }
        Ok(id)
    }

    fn parse_atom(&mut self) -> ParseResult<NodeID> {
        match self.peek_kind() {
            TokenKind::LParen => self.parse_paren_expr(),
            TokenKind::LBracket
                if matches!(
                    self.peek2_kind(),
                    TokenKind::EdgeForward | TokenKind::EdgeBackward | TokenKind::EdgeBoth
                ) =>
            {
                self.parse_edge_op_ref()
            }
            TokenKind::LBracket => self.parse_list_expr(),
            TokenKind::LBrace => self.parse_brace_expr(),
            TokenKind::IntLiteral | TokenKind::FloatLiteral | TokenKind::True | TokenKind::False | TokenKind::Null => {
                self.parse_literal_tok()
            }
            TokenKind::StringLiteral | TokenKind::MultilineStringLiteral => self.parse_string_literal_chain(),
            TokenKind::Here => self.parse_kind_ref(ReferenceKind::Here),
            TokenKind::Visitor => self.parse_kind_ref(ReferenceKind::Visitor),
            TokenKind::Global => self.parse_kind_ref(ReferenceKind::Global),
            TokenKind::Node => self.parse_kind_ref(ReferenceKind::Node),
            TokenKind::Edge => self.parse_kind_ref(ReferenceKind::Edge),
            TokenKind::Walker => self.parse_kind_ref(ReferenceKind::Walker),
            TokenKind::Object => self.parse_kind_ref(ReferenceKind::Object),
            TokenKind::Root => self.parse_keyword_tok(),
            TokenKind::Star | TokenKind::StarStar => self.parse_unpack_expr(),
            TokenKind::Name => self.parse_name(),
            _ => Err(self.unexpected(TokenKind::Name)),
        }
    }

    /// `[-->]`, `[<--]`, `[<-->]`, optionally narrowed by a `(filter_expr)`
    /// trailer.
    fn parse_edge_op_ref(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::LBracket)?;
        let dir = if self.eat(TokenKind::EdgeForward).is_some() {
            EdgeDir::Forward
        } else if self.eat(TokenKind::EdgeBackward).is_some() {
            EdgeDir::Backward
        } else {
            let _ = self.expect(TokenKind::EdgeBoth)?;
            EdgeDir::Any
        };
        let _ = self.expect(TokenKind::RBracket)?;
        let filter = if self.eat(TokenKind::LParen).is_some() {
            let expr = self.parse_expression()?;
            let _ = self.expect(TokenKind::RParen)?;
            Some(expr)
        } else {
            None
        };
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Expression, span, |id| {
            jac_ast::nodes::AnyNode::EdgeOpRef(EdgeOpRef::new(dir, filter, id, span))
        });
        if let Some(f) = filter {
            self.link_children(id, &[f]);
        }
        Ok(id)
    }

    fn parse_kind_ref(&mut self, kind: ReferenceKind) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.advance();
        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::Reference, span, |id| jac_ast::nodes::AnyNode::KindRef(KindRef::new(kind, id, span))))
    }

    fn parse_keyword_tok(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let tok = self.advance();
        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::Token, span, |id| {
            jac_ast::nodes::AnyNode::KeywordTok(KeywordTok::new(tok.lexeme().to_string(), id, span))
        }))
    }

    fn parse_literal_tok(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let tok = self.advance();
        let value = match tok.kind() {
            TokenKind::IntLiteral => LiteralValue::Int(tok.lexeme().parse().unwrap_or(0)),
            TokenKind::FloatLiteral => LiteralValue::Float(tok.lexeme().parse().unwrap_or(0.0)),
            TokenKind::True => LiteralValue::Bool(true),
            TokenKind::False => LiteralValue::Bool(false),
            TokenKind::Null => LiteralValue::Null,
            TokenKind::StringLiteral | TokenKind::MultilineStringLiteral => {
                LiteralValue::Str(tok.lexeme_unquote().to_string())
            }
            other => return Err(ParseError::new(format!("expected a literal, found {other}"), self.span_here())),
        };
        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::Token, span, |id| {
            jac_ast::nodes::AnyNode::LiteralTok(LiteralTok::new(value, id, span))
        }))
    }

    /// Merges adjacent string-literal tokens (`"a" "b"`) into one
    /// `MultiStringExpr`, Jac's implicit-concatenation form.
    fn parse_string_literal_chain(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let mut parts = vec![self.parse_literal_tok()?];
        while self.at(TokenKind::StringLiteral) || self.at(TokenKind::MultilineStringLiteral) {
            parts.push(self.parse_literal_tok()?);
        }
        if parts.len() == 1 {
            return Ok(parts[0]);
        }
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Expression, span, |id| {
            jac_ast::nodes::AnyNode::MultiStringExpr(MultiStringExpr::new(parts.clone(), id, span))
        });
        self.link_children(id, &parts);
        Ok(id)
    }

    fn parse_paren_expr(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::LParen)?;
        let first = self.parse_expression()?;
        if self.at(TokenKind::For) {
            return self.parse_comprehension_tail(start, ComprehensionKind::Generator, first, None, TokenKind::RParen);
        }
        let _ = self.expect(TokenKind::RParen)?;
        Ok(first)
    }

    fn parse_list_expr(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::LBracket)?;
        if self.eat(TokenKind::RBracket).is_some() {
            let span = self.span_from(start);
            return Ok(self.alloc(NodeKind::Expression, span, |id| {
                jac_ast::nodes::AnyNode::ListExpr(ListExpr::new(Vec::new(), false, id, span))
            }));
        }
        let first = self.parse_list_item()?;
        if self.at(TokenKind::For) {
            return self.parse_comprehension_tail(start, ComprehensionKind::List, first, None, TokenKind::RBracket);
        }
        let mut items = vec![first];
        while self.eat(TokenKind::Comma).is_some() {
            if self.at(TokenKind::RBracket) {
                break;
            }
            items.push(self.parse_list_item()?);
        }
        let _ = self.expect(TokenKind::RBracket)?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Expression, span, |id| {
            jac_ast::nodes::AnyNode::ListExpr(ListExpr::new(items.clone(), false, id, span))
        });
        self.link_children(id, &items);
        Ok(id)
    }

    fn parse_list_item(&mut self) -> ParseResult<NodeID> {
        if self.at(TokenKind::Star) || self.at(TokenKind::StarStar) {
            return self.parse_unpack_expr();
        }
        self.parse_expression()
    }

    fn parse_unpack_expr(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let is_dict = self.eat(TokenKind::StarStar).is_some();
        if !is_dict {
            let _ = self.expect(TokenKind::Star)?;
        }
        let value = self.parse_or_expr()?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Expression, span, |id| {
            jac_ast::nodes::AnyNode::UnpackExpr(UnpackExpr::new(value, is_dict, id, span))
        });
        self.link_children(id, &[value]);
        Ok(id)
    }

    /// Dict literal/comprehension (`{k: v}`) or set literal/comprehension
    /// (`{a, b}`); which one only becomes clear after the first entry.
    fn parse_brace_expr(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::LBrace)?;
        if self.eat(TokenKind::RBrace).is_some() {
            let span = self.span_from(start);
            return Ok(self.alloc(NodeKind::Expression, span, |id| {
                jac_ast::nodes::AnyNode::DictExpr(DictExpr::new(Vec::new(), id, span))
            }));
        }
        let is_unpack = self.at(TokenKind::Star) || self.at(TokenKind::StarStar);
        let first = if is_unpack { self.parse_unpack_expr()? } else { self.parse_expression()? };
        if !is_unpack && self.eat(TokenKind::Colon).is_some() {
            return self.parse_dict_rest(start, first);
        }
        if self.at(TokenKind::For) {
            return self.parse_comprehension_tail(start, ComprehensionKind::Set, first, None, TokenKind::RBrace);
        }
        let mut items = vec![first];
        while self.eat(TokenKind::Comma).is_some() {
            if self.at(TokenKind::RBrace) {
                break;
            }
            items.push(self.parse_list_item()?);
        }
        let _ = self.expect(TokenKind::RBrace)?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Expression, span, |id| {
            jac_ast::nodes::AnyNode::ListExpr(ListExpr::new(items.clone(), true, id, span))
        });
        self.link_children(id, &items);
        Ok(id)
    }

    fn parse_dict_rest(&mut self, start: usize, first_key: NodeID) -> ParseResult<NodeID> {
        let first_val = self.parse_expression()?;
        if self.at(TokenKind::For) {
            return self.parse_comprehension_tail(start, ComprehensionKind::Dict, first_val, Some(first_key), TokenKind::RBrace);
        }
        let mut entries = vec![(first_key, first_val)];
        while self.eat(TokenKind::Comma).is_some() {
            if self.at(TokenKind::RBrace) {
                break;
            }
            let k = self.parse_expression()?;
            let _ = self.expect(TokenKind::Colon)?;
            let v = self.parse_expression()?;
            entries.push((k, v));
        }
        let _ = self.expect(TokenKind::RBrace)?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Expression, span, |id| {
            jac_ast::nodes::AnyNode::DictExpr(DictExpr::new(entries.clone(), id, span))
        });
        for &(k, v) in &entries {
            self.link_children(id, &[k, v]);
        }
        Ok(id)
    }

    /// Shared tail for list/set/dict/generator comprehensions: `for target in
    /// iterable (if cond)?`, then the bracket that opened the literal.
    #[allow(clippy::too_many_arguments)]
    fn parse_comprehension_tail(
        &mut self,
        start: usize,
        kind: ComprehensionKind,
        element: NodeID,
        key: Option<NodeID>,
        closing: TokenKind,
    ) -> ParseResult<NodeID> {
        let _ = self.expect(TokenKind::For)?;
        let target = self.parse_atom_trailer()?;
        let _ = self.expect(TokenKind::In)?;
        let iterable = self.parse_or_expr()?;
        let condition = if self.eat(TokenKind::If).is_some() { Some(self.parse_or_expr()?) } else { None };
        let _ = self.expect(closing)?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Expression, span, |id| {
            jac_ast::nodes::AnyNode::ComprehensionExpr(ComprehensionExpr::new(
                kind, element, key, target, iterable, condition, id, span,
            ))
        });
        self.link_children(id, &[element, target, iterable]);
        if let Some(k) = key {
            self.link_children(id, &[k]);
        }
        if let Some(c) = condition {
            self.link_children(id, &[c]);
        }
        Ok(id)
    }
}
