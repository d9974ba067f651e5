//! Recursive-descent parser for the Jac language.
//!
//! The parser walks a flat token stream (already produced by [`crate::lexer`])
//! and allocates nodes directly into a [`jac_ast::ast::AST`] arena as it
//! goes, rather than building an intermediate tree and lowering it
//! afterward. A parse failure inside one top-level item or statement is
//! recorded as a diagnostic and the parser recovers by skipping to the next
//! safe boundary, so one malformed declaration doesn't abort the whole file.

mod expression;
mod module;
mod statement;
mod types;

use jac_ast::ast::AST;
use jac_ast::nodes::{AnyNode, NodeID};
use jac_source::diagnostic::DiagnosticSink;
use jac_source::types::{FileID, Position, Span};

use crate::lexer::{Lexer, Token, TokenKind};

const PASS_NAME: &str = "parser";

/// An error raised while parsing a single construct. Callers at a recovery
/// boundary (top-level item, statement) convert this into a diagnostic
/// rather than letting it unwind out of the whole parse.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    message: String,
    span: Span,
}

impl ParseError {
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self { Self { message: message.into(), span } }

    #[must_use]
    pub fn into_diagnostic(self) -> jac_source::diagnostic::Diagnostic {
        jac_source::diagnostic::Diagnostic::error(self.message, self.span, PASS_NAME)
    }
}

/// The result type every parsing function returns.
pub type ParseResult<T> = Result<T, ParseError>;

/// Converts a whole source file into an [`AST`], collecting diagnostics for
/// every malformed construct it could recover past.
#[must_use]
pub fn parse(source: &str, file_id: FileID) -> (AST, DiagnosticSink) {
    let mut sink = DiagnosticSink::new();
    let tokens = Lexer::new(source, file_id).tokenize(&mut sink);
    let mut parser = Parser::new(source, tokens, file_id);
    let root = parser.parse_module(&mut sink);
    parser.ast.set_root(root);
    (parser.ast, sink)
}

/// Owns the token cursor and the AST arena being built.
pub struct Parser<'src> {
    source: &'src str,
    line_starts: Vec<usize>,
    tokens: Vec<Token<'src>>,
    pos: usize,
    file_id: FileID,
    ast: AST,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str, tokens: Vec<Token<'src>>, file_id: FileID) -> Self {
        let mut line_starts = vec![0];
        for (i, c) in source.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self { source, line_starts, tokens, pos: 0, file_id, ast: AST::new() }
    }

    fn current(&self) -> &Token<'src> {
        self.tokens.get(self.pos).unwrap_or_else(|| self.tokens.last().expect("EndOfFile sentinel always present"))
    }

    fn peek_kind(&self) -> TokenKind { self.current().kind() }

    fn peek2_kind(&self) -> TokenKind {
        self.tokens.get(self.pos + 1).map_or(TokenKind::EndOfFile, Token::kind)
    }

    fn at(&self, kind: TokenKind) -> bool { self.peek_kind() == kind }

    fn at_any(&self, kinds: &[TokenKind]) -> bool { kinds.contains(&self.peek_kind()) }

    fn advance(&mut self) -> Token<'src> {
        let tok = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, kind: TokenKind) -> Option<Token<'src>> {
        if self.at(kind) { Some(self.advance()) } else { None }
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token<'src>> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind))
        }
    }

    fn unexpected(&self, expected: TokenKind) -> ParseError {
        ParseError::new(format!("expected {expected}, found {}", self.peek_kind()), self.span_here())
    }

    fn offset_to_position(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        match self.line_starts.binary_search(&offset) {
            Ok(line) => Position::new(line + 1, 1, offset),
            Err(line) => {
                let line = line - 1;
                let column = offset - self.line_starts[line] + 1;
                Position::new(line + 1, column, offset)
            }
        }
    }

    fn span_from(&self, start_offset: usize) -> Span {
        let end_offset = self.tokens[self.pos.saturating_sub(1).min(self.tokens.len() - 1)].span().end;
        Span::new(self.file_id, self.offset_to_position(start_offset), self.offset_to_position(end_offset))
    }

    fn span_here(&self) -> Span {
        let range = self.current().span();
        Span::new(self.file_id, self.offset_to_position(range.start), self.offset_to_position(range.end))
    }

    /// Skips tokens until one of `boundaries` (or end of file) is the
    /// current token, used to resynchronize after a recorded parse error.
    fn recover_to(&mut self, boundaries: &[TokenKind]) {
        while !self.at(TokenKind::EndOfFile) && !self.at_any(boundaries) {
            let _ = self.advance();
        }
    }

    fn next_id(&self) -> NodeID { NodeID::new(self.ast.node_count() as u32, 1) }

    /// Allocates a node: `build` receives the `NodeID` the node will be
    /// stored under (needed since every node struct carries its own id) and
    /// returns the constructed [`AnyNode`]. The arena never reuses a slot
    /// mid-parse, so the id handed to `build` always matches the id the
    /// allocation returns.
    fn alloc(
        &mut self,
        kind: jac_ast::nodes::NodeKind,
        span: Span,
        build: impl FnOnce(NodeID) -> AnyNode,
    ) -> NodeID {
        let id = self.next_id();
        let node = build(id);
        let allocated = self.ast.alloc_node(kind, node, span);
        debug_assert_eq!(id, allocated, "arena allocated a different slot than predicted");
        allocated
    }

    fn link_children(&mut self, parent: NodeID, children: &[NodeID]) {
        for &child in children {
            let _ = self.ast.set_parent(child, parent);
        }
    }
}

#[cfg(test)]
mod tests {
    use jac_ast::nodes::{ASTNode, AnyNode, NodeKind};

    use super::*;

    fn parse_ok(source: &str) -> AST {
        let (ast, sink) = parse(source, FileID::new(1));
        assert!(!sink.has_errors(), "unexpected errors: {:?}", sink.errors());
        ast
    }

    #[test]
    fn parses_a_minimal_object_declaration() {
        let ast = parse_ok("object Foo {}");
        let root = ast.root().expect("module root set");
        let module = ast.get_node(root).expect("root exists");
        assert_eq!(module.kind, NodeKind::Structural);
        assert!(matches!(module.data, AnyNode::Module(_)));
    }

    #[test]
    fn recovers_after_a_malformed_top_level_item() {
        let (ast, sink) = parse("object ; object Bar {}", FileID::new(1));
        assert!(sink.has_errors());
        let root = ast.root().unwrap();
        let module = ast.get_node(root).unwrap();
        assert!(!module.data.children().is_empty());
    }
}
