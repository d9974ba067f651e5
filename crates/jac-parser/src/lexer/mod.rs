//! Lexer for the Jac programming language.
//!
//! Converts source text into a stream of [`Token`]s using `logos` for the
//! per-token classification. Unlike an indentation-sensitive grammar, Jac's
//! blocks are brace-delimited and statements are semicolon-terminated, so
//! this driver's only job beyond invoking `logos` is tracking line/column
//! positions, merging adjacent string literals, and turning lex failures
//! into diagnostics rather than panics.

mod token;

pub use token::*;

use jac_source::diagnostic::DiagnosticSink;
use jac_source::types::{FileID, Position, Span};

const PASS_NAME: &str = "lexer";

/// Converts source text into a flat token stream, reporting lex errors to a
/// [`DiagnosticSink`] rather than aborting.
#[derive(Debug)]
pub struct Lexer<'src> {
    source: &'src str,
    file_id: FileID,
    inner: logos::Lexer<'src, TokenKind>,
    line: usize,
    column: usize,
    prev_string: Option<Token<'src>>,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer over `source`, tagging every span with `file_id`.
    #[must_use]
    pub fn new(source: &'src str, file_id: FileID) -> Self {
        Self {
            source,
            file_id,
            inner: logos::Lexer::new(source),
            line: 1,
            column: 1,
            prev_string: None,
        }
    }

    fn position(&self, offset: usize) -> Position { Position::new(self.line, self.column, offset) }

    fn advance_position(&mut self, lexeme: &str) {
        for c in lexeme.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Lexes the entire source into a token vector, appending one
    /// `TokenKind::EndOfFile` sentinel, and reports any invalid bytes to
    /// `sink`. Comments and whitespace are already stripped by `logos`;
    /// blank `Newline` tokens are dropped here since Jac's grammar doesn't
    /// use them.
    pub fn tokenize(mut self, sink: &mut DiagnosticSink) -> Vec<Token<'src>> {
        let mut tokens = Vec::new();

        while let Some(result) = self.inner.next() {
            let range = self.inner.span();
            let start = self.position(range.start);
            let lexeme = &self.source[range.start..range.end];
            self.advance_position(lexeme);
            let end = self.position(range.end);
            let span = Span::new(self.file_id, start, end);

            match result {
                Ok(kind) if kind.is_trivia() => continue,
                Ok(kind) => {
                    let token = Token::new(kind, lexeme, range);
                    self.push_merging_adjacent_strings(token, &mut tokens);
                }
                Err(()) => {
                    sink.error(format!("unrecognized token {lexeme:?}"), span, PASS_NAME);
                }
            }
        }

        let eof_offset = self.source.len();
        let eof_pos = self.position(eof_offset);
        tokens.push(Token::with_empty_lexeme(TokenKind::EndOfFile, eof_offset..eof_offset));
        let _ = eof_pos;
        tokens
    }

    /// Jac allows adjacent string literals to concatenate (`"a" "b"` reads
    /// as one literal), mirrored in [`crate::parser::expressions`]'s
    /// `MultiStringExpr`; here we only need to avoid losing track of a
    /// pending literal across calls, the actual joining happens in the
    /// parser which already groups runs of string tokens.
    fn push_merging_adjacent_strings(&mut self, token: Token<'src>, tokens: &mut Vec<Token<'src>>) {
        if matches!(token.kind(), TokenKind::StringLiteral | TokenKind::MultilineStringLiteral) {
            self.prev_string = Some(token.clone());
        } else {
            self.prev_string = None;
        }
        tokens.push(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &str) -> Vec<TokenKind> {
        let mut sink = DiagnosticSink::new();
        Lexer::new(src, FileID::new(1)).tokenize(&mut sink).into_iter().map(|t| t.kind()).collect()
    }

    #[test]
    fn lexes_a_minimal_object_declaration() {
        let kinds = lex("object Foo {}");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Object,
                TokenKind::Name,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn lexes_a_has_declaration_with_default() {
        let kinds = lex("has x: int = 5;");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Has,
                TokenKind::Name,
                TokenKind::Colon,
                TokenKind::Name,
                TokenKind::Assign,
                TokenKind::IntLiteral,
                TokenKind::Semi,
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn reports_an_unrecognized_byte_as_a_diagnostic_not_a_panic() {
        let mut sink = DiagnosticSink::new();
        let tokens = Lexer::new("x = `", FileID::new(1)).tokenize(&mut sink);
        assert!(sink.has_errors());
        assert_eq!(tokens.last().unwrap().kind(), TokenKind::EndOfFile);
    }
}
