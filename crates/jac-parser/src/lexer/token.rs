//! Token kinds for the Jac language, and the token value the lexer hands the
//! parser.
//!
//! Jac is brace-delimited and semicolon-terminated (`object Foo {}`,
//! `has x: int = 5;`), unlike the indentation-sensitive languages this
//! lexer's ancestor was built for, so there is no indent/dedent synthesis
//! here: braces and semicolons already carry the structure the parser needs.

use std::ops::Range;

use logos::Logos;

/// Extends an already-matched opening `"""` to cover the rest of a
/// triple-quoted string literal, stopping at the first unescaped closing
/// `"""` (or the end of input, if none is found). Equivalent to the
/// non-greedy regex `"""([^\\]|\\.)*?"""`, which `logos` cannot express
/// directly.
fn lex_multiline_string_literal(lex: &mut logos::Lexer<'_, TokenKind>) {
    let remainder = lex.remainder();
    let mut chars = remainder.char_indices();
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            chars.next();
            continue;
        }
        if remainder[i..].starts_with("\"\"\"") {
            lex.bump(i + 3);
            return;
        }
    }
    lex.bump(remainder.len());
}

/// The lexical category of a single token.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r]+")]
#[logos(skip r"#[^\n]*")]
pub enum TokenKind {
    // Architype keywords
    #[token("object")]
    Object,
    #[token("node")]
    Node,
    #[token("edge")]
    Edge,
    #[token("walker")]
    Walker,

    // Declaration keywords
    #[token("glob")]
    Glob,
    #[token("test")]
    Test,
    #[token("import")]
    Import,
    #[token("can")]
    Can,
    #[token("has")]
    Has,
    #[token("with")]
    With,
    #[token("entry")]
    Entry,
    #[token("exit")]
    Exit,
    #[token("from")]
    From,
    #[token("as")]
    As,

    // Access modifiers
    #[token("pub")]
    Pub,
    #[token("priv")]
    Priv,
    #[token("protect")]
    Protect,

    // Control flow keywords
    #[token("if")]
    If,
    #[token("elif")]
    Elif,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("for")]
    For,
    #[token("to")]
    To,
    #[token("by")]
    By,
    #[token("in")]
    In,
    #[token("try")]
    Try,
    #[token("except")]
    Except,
    #[token("finally")]
    Finally,
    #[token("raise")]
    Raise,
    #[token("assert")]
    Assert,
    #[token("return")]
    Return,
    #[token("yield")]
    Yield,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("skip")]
    Skip,
    #[token("del")]
    Del,

    // Data-spatial statement keywords
    #[token("visit")]
    Visit,
    #[token("revisit")]
    Revisit,
    #[token("disengage")]
    Disengage,
    #[token("sync")]
    Sync,
    #[token("report")]
    Report,
    #[token("ignore")]
    Ignore,
    #[token("spawn")]
    Spawn,

    // Reference keywords
    #[token("global")]
    Global,
    #[token("here")]
    Here,
    #[token("visitor")]
    Visitor,
    #[token("root")]
    Root,

    // Literal keywords
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    // Logical/membership operator keywords
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("not")]
    Not,
    #[token("is")]
    Is,

    // Identifiers and literals
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", priority = 0)]
    Name,
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    FloatLiteral,
    #[regex(r"[0-9]+")]
    IntLiteral,
    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    StringLiteral,
    #[token(r#"""""#, lex_multiline_string_literal)]
    MultilineStringLiteral,

    // Arrows and punctuation
    #[token("->")]
    Arrow,
    #[token("??")]
    Elvis,
    #[token(":=")]
    Walrus,
    #[token("...")]
    Ellipsis,
    #[token("::")]
    DoubleColon,
    #[token(":")]
    Colon,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    // Assignment operators
    #[token("=")]
    Assign,
    #[token("+=")]
    PlusAssign,
    #[token("-=")]
    MinusAssign,
    #[token("*=")]
    StarAssign,
    #[token("/=")]
    SlashAssign,

    // Arithmetic/comparison/bitwise operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("**")]
    StarStar,
    #[token("*")]
    Star,
    #[token("//")]
    SlashSlash,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("~")]
    Tilde,
    #[token("?")]
    Question,
    #[token("@")]
    At,

    // Data-spatial edge/connect operators, longest-match first
    #[token("<-->")]
    EdgeBoth,
    #[token("<++>")]
    EdgePlusBoth,
    #[token("-->")]
    EdgeForward,
    #[token("<--")]
    EdgeBackward,
    #[token("++>")]
    EdgePlusForward,
    #[token("<++")]
    EdgePlusBackward,

    #[regex(r"\n")]
    Newline,

    /// Synthesized once the logos cursor is exhausted.
    EndOfFile,
    /// A byte sequence no rule above could classify.
    Error,
}

impl TokenKind {
    /// Returns true for tokens the parser should skip entirely rather than
    /// ever seeing in its lookahead (bare newlines carry no syntactic weight
    /// in a semicolon-terminated grammar).
    #[must_use]
    pub const fn is_trivia(self) -> bool { matches!(self, Self::Newline) }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Object => "object",
            Self::Node => "node",
            Self::Edge => "edge",
            Self::Walker => "walker",
            Self::Glob => "glob",
            Self::Test => "test",
            Self::Import => "import",
            Self::Can => "can",
            Self::Has => "has",
            Self::With => "with",
            Self::Entry => "entry",
            Self::Exit => "exit",
            Self::From => "from",
            Self::As => "as",
            Self::Pub => "pub",
            Self::Priv => "priv",
            Self::Protect => "protect",
            Self::If => "if",
            Self::Elif => "elif",
            Self::Else => "else",
            Self::While => "while",
            Self::For => "for",
            Self::To => "to",
            Self::By => "by",
            Self::In => "in",
            Self::Try => "try",
            Self::Except => "except",
            Self::Finally => "finally",
            Self::Raise => "raise",
            Self::Assert => "assert",
            Self::Return => "return",
            Self::Yield => "yield",
            Self::Break => "break",
            Self::Continue => "continue",
            Self::Skip => "skip",
            Self::Del => "del",
            Self::Visit => "visit",
            Self::Revisit => "revisit",
            Self::Disengage => "disengage",
            Self::Sync => "sync",
            Self::Report => "report",
            Self::Ignore => "ignore",
            Self::Spawn => "spawn",
            Self::Global => "global",
            Self::Here => "here",
            Self::Visitor => "visitor",
            Self::Root => "root",
            Self::True => "true",
            Self::False => "false",
            Self::Null => "null",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::Is => "is",
            Self::Name => "name",
            Self::FloatLiteral => "float literal",
            Self::IntLiteral => "int literal",
            Self::StringLiteral | Self::MultilineStringLiteral => "string literal",
            Self::Arrow => "->",
            Self::Elvis => "??",
            Self::Walrus => ":=",
            Self::Ellipsis => "...",
            Self::DoubleColon => "::",
            Self::Colon => ":",
            Self::Semi => ";",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Assign => "=",
            Self::PlusAssign => "+=",
            Self::MinusAssign => "-=",
            Self::StarAssign => "*=",
            Self::SlashAssign => "/=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::StarStar => "**",
            Self::Star => "*",
            Self::SlashSlash => "//",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::EqEq => "==",
            Self::NotEq => "!=",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Amp => "&",
            Self::Pipe => "|",
            Self::Caret => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Tilde => "~",
            Self::Question => "?",
            Self::At => "@",
            Self::EdgeBoth => "<-->",
            Self::EdgePlusBoth => "<++>",
            Self::EdgeForward => "-->",
            Self::EdgeBackward => "<--",
            Self::EdgePlusForward => "++>",
            Self::EdgePlusBackward => "<++",
            Self::Newline => "newline",
            Self::EndOfFile => "end of file",
            Self::Error => "invalid token",
        };
        write!(f, "{s}")
    }
}

/// A single lexed token: its kind, the exact source slice it came from, and
/// the byte range it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    kind: TokenKind,
    lexeme: &'src str,
    span: Range<usize>,
}

impl<'src> Token<'src> {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, lexeme: &'src str, span: Range<usize>) -> Self {
        Self { kind, lexeme, span }
    }

    /// Creates a synthetic token carrying no source text, for positions such
    /// as end-of-file where there is no underlying slice.
    #[must_use]
    pub const fn with_empty_lexeme(kind: TokenKind, span: Range<usize>) -> Self {
        Self { kind, lexeme: "", span }
    }

    /// The token's kind.
    #[must_use]
    pub const fn kind(&self) -> TokenKind { self.kind }

    /// The exact source slice this token was lexed from.
    #[must_use]
    pub const fn lexeme(&self) -> &'src str { self.lexeme }

    /// The byte range this token occupies in the source.
    #[must_use]
    pub fn span(&self) -> Range<usize> { self.span.clone() }

    /// Returns true if this token is of the given kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool { self.kind == kind }

    /// Strips the surrounding quotes (and triple-quotes) from a string
    /// literal's lexeme. No-op for any other token kind.
    #[must_use]
    pub fn lexeme_unquote(&self) -> &'src str {
        match self.kind {
            TokenKind::StringLiteral => &self.lexeme[1..self.lexeme.len() - 1],
            TokenKind::MultilineStringLiteral => &self.lexeme[3..self.lexeme.len() - 3],
            _ => self.lexeme,
        }
    }
}

impl std::fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({:?})", self.kind, self.lexeme)
    }
}
