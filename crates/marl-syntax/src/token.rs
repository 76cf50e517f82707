//! Token definitions and source-position types for the Marl language.
//!
//! This module defines all the token types that can be produced by the Marl
//! lexer, together with the position/span bookkeeping attached to each one.
//! Tokens represent the smallest classified units of a Marl document:
//! literals, keywords, operators, comments, and the end-of-input marker.
//!
//! # Token Categories
//!
//! - **Literals**: numbers, strings (`42`, `3.25`, `"hello"`)
//! - **Identifiers**: names (`width`, `title_bar`)
//! - **Keywords**: reserved words (`if`, `fn`, `true`)
//! - **Operators/punctuation**: structural and operator characters
//!   (`[`, `{`, `:`, `,`, `+=`, `=>`)
//! - **Comments**: `// ...` and `/* ... */`
//! - **Special**: end-of-input marker
//!
//! Tokens do not carry their text; they carry a byte offset and length into
//! the source buffer, so the text can be recovered with [`Token::text`]:
//!
//! ```rust
//! use marl_syntax::token::{Position, Span, Token, TokenKind};
//!
//! let src = "width";
//! let from = Position { line: 1, column: 1, offset: 0 };
//! let to = Position { line: 1, column: 6, offset: 5 };
//! let token = Token {
//!     kind: TokenKind::Identifier,
//!     offset: 0,
//!     length: 5,
//!     span: Span { from, to },
//! };
//! assert_eq!(token.text(src), "width");
//! ```

use std::fmt;

/// A location in the source text.
///
/// `line` and `column` are 1-based and advance per character; consuming a
/// newline increments `line` and resets `column` to 1. `offset` is the byte
/// offset into the source buffer, suitable for slicing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Line number in the source (1-based)
    pub line: usize,

    /// Column number in the source (1-based)
    pub column: usize,

    /// Byte offset into the source buffer
    pub offset: usize,
}

impl Position {
    /// The position of the first character of any buffer.
    pub fn start() -> Self {
        Self { line: 1, column: 1, offset: 0 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open range over the source text, `from` inclusive, `to` exclusive.
///
/// Every token and every parsed value carries one. Container values produce
/// spans that fully contain the spans of their children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub from: Position,
    pub to: Position,
}

impl Span {
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// The span covering everything from the start of `self` to the end of
    /// `other`. Used to build container spans out of delimiter tokens.
    pub fn join(self, other: Span) -> Span {
        Span { from: self.from, to: other.to }
    }
}

/// Token types that can be produced by the Marl lexer.
///
/// This is a closed enumeration: every character sequence a document may
/// legally contain maps to exactly one of these kinds. Keywords are matched
/// case-sensitively against the identifier rule, and two-character operators
/// win over their one-character prefixes (maximal munch).
///
/// Most of the operator and keyword kinds exist for the expression grammar
/// that the reader does not implement; the literal-value grammar consumes
/// only brackets, braces, colons, commas, literals and identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// End-of-input marker, zero length
    Eof,

    /// A `// ...` comment, running to the end of the line
    LineComment,

    /// A `/* ... */` comment
    BlockComment,

    /// An identifier (`width`, `title_bar`, `_pad`)
    Identifier,

    /// An integer literal (`42`, `0`)
    IntegerLiteral,

    /// A float literal (`3.25`); always digits, a dot, and digits
    FloatLiteral,

    /// A string literal including its quotes (`"hello\n"`)
    StringLiteral,

    // === Keywords ===
    If,
    Else,
    For,
    Loop,
    While,
    Break,
    Continue,
    Fn,
    Return,
    True,
    False,
    And,
    Or,
    Xor,

    // === Punctuation ===
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Dot,
    Comma,
    Colon,
    Semicolon,

    // === Operators ===
    Plus,
    PlusPlus,
    PlusEqual,
    Minus,
    Arrow,
    MinusMinus,
    MinusEqual,
    Star,
    StarEqual,
    Slash,
    SlashEqual,
    Percent,
    PercentEqual,
    Caret,
    CaretEqual,
    Equal,
    FatArrow,
    EqualEqual,
    Bang,
    BangEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl TokenKind {
    /// Human-readable description used in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Eof => "end of input",
            TokenKind::LineComment => "line comment",
            TokenKind::BlockComment => "block comment",
            TokenKind::Identifier => "identifier",
            TokenKind::IntegerLiteral => "integer literal",
            TokenKind::FloatLiteral => "float literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::For => "'for'",
            TokenKind::Loop => "'loop'",
            TokenKind::While => "'while'",
            TokenKind::Break => "'break'",
            TokenKind::Continue => "'continue'",
            TokenKind::Fn => "'fn'",
            TokenKind::Return => "'return'",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::And => "'and'",
            TokenKind::Or => "'or'",
            TokenKind::Xor => "'xor'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Dot => "'.'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Semicolon => "';'",
            TokenKind::Plus => "'+'",
            TokenKind::PlusPlus => "'++'",
            TokenKind::PlusEqual => "'+='",
            TokenKind::Minus => "'-'",
            TokenKind::Arrow => "'->'",
            TokenKind::MinusMinus => "'--'",
            TokenKind::MinusEqual => "'-='",
            TokenKind::Star => "'*'",
            TokenKind::StarEqual => "'*='",
            TokenKind::Slash => "'/'",
            TokenKind::SlashEqual => "'/='",
            TokenKind::Percent => "'%'",
            TokenKind::PercentEqual => "'%='",
            TokenKind::Caret => "'^'",
            TokenKind::CaretEqual => "'^='",
            TokenKind::Equal => "'='",
            TokenKind::FatArrow => "'=>'",
            TokenKind::EqualEqual => "'=='",
            TokenKind::Bang => "'!'",
            TokenKind::BangEqual => "'!='",
            TokenKind::Less => "'<'",
            TokenKind::LessEqual => "'<='",
            TokenKind::Greater => "'>'",
            TokenKind::GreaterEqual => "'>='",
        }
    }

    /// True for the comment kinds, which the reader filters out.
    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }
}

/// A classified token with its location in the source buffer.
///
/// Tokens are immutable once produced. The text of a token is not stored;
/// it is sliced back out of the source with [`Token::text`] using the byte
/// `offset` and `length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// The syntactic category of this token
    pub kind: TokenKind,

    /// Byte offset of the first character in the source buffer
    pub offset: usize,

    /// Length in bytes
    pub length: usize,

    /// Line/column range covered by this token
    pub span: Span,
}

impl Token {
    /// Slice this token's text out of the source it was scanned from.
    pub fn text<'s>(&self, src: &'s str) -> &'s str {
        &src[self.offset..self.offset + self.length]
    }
}
