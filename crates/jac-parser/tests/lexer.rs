//! Integration tests for the lexer's public API: token categories and the
//! unrecognized-byte recovery path. Single-token smoke tests live as unit
//! tests next to the lexer itself; these exercise whole constructs.

use jac_parser::lexer::{Lexer, TokenKind};
use jac_source::diagnostic::DiagnosticSink;
use jac_source::types::FileID;

fn lex(source: &str) -> Vec<TokenKind> {
    let mut sink = DiagnosticSink::new();
    Lexer::new(source, FileID::new(1)).tokenize(&mut sink).into_iter().map(|t| t.kind()).collect()
}

#[test]
fn lexes_architype_and_declaration_keywords() {
    let kinds = lex("walker Visitor { can greet with entry { report \"hi\"; } }");
    assert_eq!(kinds[0], TokenKind::Walker);
    assert!(kinds.contains(&TokenKind::Can));
    assert!(kinds.contains(&TokenKind::With));
    assert!(kinds.contains(&TokenKind::Entry));
    assert!(kinds.contains(&TokenKind::Report));
}

#[test]
fn lexes_data_spatial_edge_operators_longest_match_first() {
    let kinds = lex("a <--> b; a ++> b; a <++ b;");
    assert!(kinds.contains(&TokenKind::EdgeBoth));
    assert!(kinds.contains(&TokenKind::EdgePlusForward));
    assert!(kinds.contains(&TokenKind::EdgePlusBackward));
}

#[test]
fn lexes_decl_def_split_colon_tag_syntax() {
    let kinds = lex(":can:greet() -> str { return \"x\"; }");
    assert_eq!(kinds[0], TokenKind::Colon);
    assert_eq!(kinds[1], TokenKind::Can);
    assert_eq!(kinds[2], TokenKind::Colon);
}

#[test]
fn strips_line_comments_without_emitting_tokens() {
    let kinds = lex("x = 1; # a trailing comment\ny = 2;");
    assert!(!kinds.iter().any(|k| *k == TokenKind::Error));
}

#[test]
fn reports_an_unrecognized_byte_without_aborting_the_rest_of_the_file() {
    let mut sink = DiagnosticSink::new();
    let tokens = Lexer::new("has x = `; has y = 2;", FileID::new(1)).tokenize(&mut sink);
    assert!(sink.has_errors());
    assert!(tokens.iter().any(|t| t.kind() == TokenKind::Has));
    assert_eq!(tokens.last().unwrap().kind(), TokenKind::EndOfFile);
}

#[test]
fn distinguishes_float_from_int_literals() {
    let kinds = lex("has a = 5; has b = 5.5;");
    assert_eq!(kinds.iter().filter(|k| **k == TokenKind::IntLiteral).count(), 1);
    assert_eq!(kinds.iter().filter(|k| **k == TokenKind::FloatLiteral).count(), 1);
}
