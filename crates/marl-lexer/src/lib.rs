//! Marl lexer: converts document text into tokens.
//!
//! The scanner is a pure function of the buffer and its cursor: scanning the
//! same text from the same starting state always yields the same token
//! sequence. Whitespace is skipped silently; comments are emitted as tokens
//! and left for the consumer to filter.

use marl_syntax::error::{error_at, Error, Result};
use marl_syntax::token::{Position, Span, Token, TokenKind};

/// Streaming character scanner that produces located tokens one at a time.
pub struct Lexer {
    src: Vec<char>,
    pos: usize,
    offset: usize,
    line: usize,
    col: usize,
    last_token: Option<Token>,
}

impl Lexer {
    /// Create a new lexer over the given document text.
    pub fn new(input: &str) -> Self {
        Self {
            src: input.chars().collect(),
            pos: 0,
            offset: 0,
            line: 1,
            col: 1,
            last_token: None,
        }
    }

    fn position(&self) -> Position {
        Position { line: self.line, column: self.col, offset: self.offset }
    }

    fn peek(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }
    fn advance(&mut self) -> Option<char> {
        let ch = self.src.get(self.pos).copied();
        if let Some(c) = ch {
            self.pos += 1;
            self.offset += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        ch
    }

    fn token_from(&self, kind: TokenKind, start: Position) -> Token {
        Token {
            kind,
            offset: start.offset,
            length: self.offset - start.offset,
            span: Span::new(start, self.position()),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Produce the next token, advancing the cursor past it.
    ///
    /// At end of input this returns a zero-length `Eof` token, repeatedly if
    /// called again.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();
        let start = self.position();
        let token = match self.peek() {
            None => self.token_from(TokenKind::Eof, start),
            Some(c) if c.is_ascii_digit() => self.read_number(start)?,
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                self.read_ident_or_keyword(start)
            }
            Some('"') => self.read_string(start)?,
            Some(c) => self.read_punct(c, start)?,
        };
        self.last_token = Some(token);
        Ok(token)
    }

    /// The most recently produced token, without advancing.
    ///
    /// Fails if no token has been produced yet: the cursor must be primed
    /// with one `next_token` call first.
    pub fn current(&self) -> Result<Token> {
        self.last_token
            .ok_or_else(|| Error::new("no token has been produced yet"))
    }

    /// Scan the entire input into a vector of tokens ending with `Eof`.
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        Ok(tokens)
    }

    fn read_number(&mut self, start: Position) -> Result<Token> {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }
        if self.peek() == Some('.') {
            self.advance();
            match self.peek() {
                Some(c) if c.is_ascii_digit() => {
                    while let Some(c) = self.peek() {
                        if c.is_ascii_digit() {
                            self.advance();
                        } else {
                            break;
                        }
                    }
                    Ok(self.token_from(TokenKind::FloatLiteral, start))
                }
                _ => error_at(
                    Span::new(start, self.position()),
                    "expected digits after '.'",
                ),
            }
        } else {
            Ok(self.token_from(TokenKind::IntegerLiteral, start))
        }
    }

    fn read_ident_or_keyword(&mut self, start: Position) -> Token {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        let kind = match text.as_str() {
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "for" => TokenKind::For,
            "loop" => TokenKind::Loop,
            "while" => TokenKind::While,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "fn" => TokenKind::Fn,
            "return" => TokenKind::Return,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "xor" => TokenKind::Xor,
            _ => TokenKind::Identifier,
        };
        self.token_from(kind, start)
    }

    fn read_string(&mut self, start: Position) -> Result<Token> {
        self.advance();
        loop {
            match self.peek() {
                None | Some('\n') => {
                    return error_at(
                        Span::new(start, self.position()),
                        "unterminated string",
                    );
                }
                Some('"') => {
                    self.advance();
                    return Ok(self.token_from(TokenKind::StringLiteral, start));
                }
                Some('\\') => {
                    self.advance();
                    if self.peek().is_none() {
                        return error_at(
                            Span::new(start, self.position()),
                            "unterminated string",
                        );
                    }
                    self.advance();
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    fn read_line_comment(&mut self, start: Position) -> Token {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
        self.token_from(TokenKind::LineComment, start)
    }

    fn read_block_comment(&mut self, start: Position) -> Result<Token> {
        loop {
            match self.advance() {
                None => {
                    return error_at(
                        Span::new(start, self.position()),
                        "unterminated comment",
                    );
                }
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return Ok(self.token_from(TokenKind::BlockComment, start));
                }
                Some(_) => {}
            }
        }
    }

    // Operators and punctuation, longest match first. `c` has been peeked
    // but not consumed.
    fn read_punct(&mut self, c: char, start: Position) -> Result<Token> {
        self.advance();
        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '.' => TokenKind::Dot,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '+' => match self.peek() {
                Some('+') => {
                    self.advance();
                    TokenKind::PlusPlus
                }
                Some('=') => {
                    self.advance();
                    TokenKind::PlusEqual
                }
                _ => TokenKind::Plus,
            },
            '-' => match self.peek() {
                Some('>') => {
                    self.advance();
                    TokenKind::Arrow
                }
                Some('-') => {
                    self.advance();
                    TokenKind::MinusMinus
                }
                Some('=') => {
                    self.advance();
                    TokenKind::MinusEqual
                }
                _ => TokenKind::Minus,
            },
            '*' => match self.peek() {
                Some('=') => {
                    self.advance();
                    TokenKind::StarEqual
                }
                _ => TokenKind::Star,
            },
            '/' => match self.peek() {
                Some('/') => return Ok(self.read_line_comment(start)),
                Some('*') => {
                    self.advance();
                    return self.read_block_comment(start);
                }
                Some('=') => {
                    self.advance();
                    TokenKind::SlashEqual
                }
                _ => TokenKind::Slash,
            },
            '%' => match self.peek() {
                Some('=') => {
                    self.advance();
                    TokenKind::PercentEqual
                }
                _ => TokenKind::Percent,
            },
            '^' => match self.peek() {
                Some('=') => {
                    self.advance();
                    TokenKind::CaretEqual
                }
                _ => TokenKind::Caret,
            },
            '=' => match self.peek() {
                Some('=') => {
                    self.advance();
                    TokenKind::EqualEqual
                }
                Some('>') => {
                    self.advance();
                    TokenKind::FatArrow
                }
                _ => TokenKind::Equal,
            },
            '!' => match self.peek() {
                Some('=') => {
                    self.advance();
                    TokenKind::BangEqual
                }
                _ => TokenKind::Bang,
            },
            '<' => match self.peek() {
                Some('=') => {
                    self.advance();
                    TokenKind::LessEqual
                }
                _ => TokenKind::Less,
            },
            '>' => match self.peek() {
                Some('=') => {
                    self.advance();
                    TokenKind::GreaterEqual
                }
                _ => TokenKind::Greater,
            },
            other => {
                return error_at(
                    Span::new(start, self.position()),
                    format!("unexpected character '{}'", other),
                );
            }
        };
        Ok(self.token_from(kind, start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize().expect("lexing should succeed")
    }

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).iter().map(|t| t.kind).collect()
    }

    fn lex_error(input: &str) -> Error {
        Lexer::new(input)
            .tokenize()
            .expect_err("lexing should fail")
    }

    #[test]
    fn integer_spans_exactly_the_digits() {
        let src = "  1234  ";
        let tokens = tokenize(src);
        assert_eq!(tokens[0].kind, TokenKind::IntegerLiteral);
        assert_eq!(tokens[0].text(src), "1234");
        assert_eq!(tokens[0].span.from.column, 3);
        assert_eq!(tokens[0].span.to.column, 7);
        assert_eq!(tokens[1].kind, TokenKind::Eof);
        assert_eq!(tokens[1].length, 0);
    }

    #[test]
    fn float_spans_the_whole_sequence() {
        let src = "12.5";
        let tokens = tokenize(src);
        assert_eq!(tokens[0].kind, TokenKind::FloatLiteral);
        assert_eq!(tokens[0].text(src), "12.5");
    }

    #[test]
    fn dot_without_digits_is_an_error() {
        let err = lex_error("12.");
        assert_eq!(err.msg, "expected digits after '.'");
        assert_eq!(err.span.unwrap().to.column, 4);

        let err = lex_error("12.x");
        assert_eq!(err.msg, "expected digits after '.'");
    }

    #[test]
    fn keywords_match_exactly() {
        let expected = [
            ("if", TokenKind::If),
            ("else", TokenKind::Else),
            ("for", TokenKind::For),
            ("loop", TokenKind::Loop),
            ("while", TokenKind::While),
            ("break", TokenKind::Break),
            ("continue", TokenKind::Continue),
            ("fn", TokenKind::Fn),
            ("return", TokenKind::Return),
            ("true", TokenKind::True),
            ("false", TokenKind::False),
            ("and", TokenKind::And),
            ("or", TokenKind::Or),
            ("xor", TokenKind::Xor),
        ];
        for (text, kind) in expected {
            assert_eq!(kinds(text), vec![kind, TokenKind::Eof], "keyword {}", text);
        }
    }

    #[test]
    fn keyword_lookup_is_case_sensitive() {
        assert_eq!(kinds("IF"), vec![TokenKind::Identifier, TokenKind::Eof]);
        assert_eq!(kinds("True"), vec![TokenKind::Identifier, TokenKind::Eof]);
        assert_eq!(kinds("fN"), vec![TokenKind::Identifier, TokenKind::Eof]);
    }

    #[test]
    fn identifiers_allow_underscores_and_digits() {
        let src = "_pad title_2";
        let tokens = tokenize(src);
        assert_eq!(tokens[0].text(src), "_pad");
        assert_eq!(tokens[1].text(src), "title_2");
        assert!(tokens[..2].iter().all(|t| t.kind == TokenKind::Identifier));
    }

    #[test]
    fn string_text_includes_quotes_and_raw_escapes() {
        let src = r#""a\"b\n""#;
        let tokens = tokenize(src);
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].text(src), r#""a\"b\n""#);
    }

    #[test]
    fn unterminated_string_at_eof() {
        let err = lex_error("\"abc");
        assert_eq!(err.msg, "unterminated string");
        assert_eq!(err.span.unwrap().from.column, 1);
    }

    #[test]
    fn unterminated_string_at_newline() {
        let err = lex_error("\"abc\ndef\"");
        assert_eq!(err.msg, "unterminated string");
    }

    #[test]
    fn string_ending_in_backslash_is_unterminated() {
        let err = lex_error("\"abc\\");
        assert_eq!(err.msg, "unterminated string");
    }

    #[test]
    fn comments_are_emitted_as_tokens() {
        let src = "1 // rest of line\n2";
        assert_eq!(
            kinds(src),
            vec![
                TokenKind::IntegerLiteral,
                TokenKind::LineComment,
                TokenKind::IntegerLiteral,
                TokenKind::Eof,
            ]
        );
        let tokens = tokenize(src);
        assert_eq!(tokens[1].text(src), "// rest of line");

        let src = "1 /* in\nbetween */ 2";
        assert_eq!(
            kinds(src),
            vec![
                TokenKind::IntegerLiteral,
                TokenKind::BlockComment,
                TokenKind::IntegerLiteral,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unterminated_block_comment_stops_at_eof() {
        let err = lex_error("/* unterminated");
        assert_eq!(err.msg, "unterminated comment");
        assert_eq!(err.span.unwrap().from.column, 1);
    }

    #[test]
    fn maximal_munch_operator_table() {
        let cases = [
            ("+", TokenKind::Plus),
            ("++", TokenKind::PlusPlus),
            ("+=", TokenKind::PlusEqual),
            ("-", TokenKind::Minus),
            ("->", TokenKind::Arrow),
            ("--", TokenKind::MinusMinus),
            ("-=", TokenKind::MinusEqual),
            ("*", TokenKind::Star),
            ("*=", TokenKind::StarEqual),
            ("/", TokenKind::Slash),
            ("/=", TokenKind::SlashEqual),
            ("%", TokenKind::Percent),
            ("%=", TokenKind::PercentEqual),
            ("^", TokenKind::Caret),
            ("^=", TokenKind::CaretEqual),
            ("=", TokenKind::Equal),
            ("==", TokenKind::EqualEqual),
            ("=>", TokenKind::FatArrow),
            ("!", TokenKind::Bang),
            ("!=", TokenKind::BangEqual),
            ("<", TokenKind::Less),
            ("<=", TokenKind::LessEqual),
            (">", TokenKind::Greater),
            (">=", TokenKind::GreaterEqual),
            ("(", TokenKind::LParen),
            (")", TokenKind::RParen),
            ("{", TokenKind::LBrace),
            ("}", TokenKind::RBrace),
            ("[", TokenKind::LBracket),
            ("]", TokenKind::RBracket),
            (".", TokenKind::Dot),
            (",", TokenKind::Comma),
            (":", TokenKind::Colon),
            (";", TokenKind::Semicolon),
        ];
        for (text, kind) in cases {
            assert_eq!(kinds(text), vec![kind, TokenKind::Eof], "operator {}", text);
        }
    }

    #[test]
    fn adjacent_operators_split_longest_first() {
        assert_eq!(
            kinds("+++"),
            vec![TokenKind::PlusPlus, TokenKind::Plus, TokenKind::Eof]
        );
        assert_eq!(
            kinds("==>"),
            vec![TokenKind::EqualEqual, TokenKind::Greater, TokenKind::Eof]
        );
    }

    #[test]
    fn unexpected_character_is_an_error() {
        let err = lex_error("&");
        assert_eq!(err.msg, "unexpected character '&'");
        let span = err.span.unwrap();
        assert_eq!(span.from.column, 1);
        assert_eq!(span.to.column, 2);
    }

    #[test]
    fn newlines_reset_column() {
        let src = "a\nbb";
        let tokens = tokenize(src);
        assert_eq!(tokens[0].span.from.line, 1);
        assert_eq!(tokens[1].span.from.line, 2);
        assert_eq!(tokens[1].span.from.column, 1);
        assert_eq!(tokens[1].span.to.column, 3);
        assert_eq!(tokens[1].offset, 2);
    }

    #[test]
    fn token_offsets_are_non_decreasing() {
        let src = "{size: [800, 600], title: \"main\" /* c */}";
        let tokens = tokenize(src);
        for pair in tokens.windows(2) {
            assert!(pair[1].offset >= pair[0].offset);
            assert!(pair[1].span.from.offset >= pair[0].span.to.offset);
        }
    }

    #[test]
    fn rescanning_reproduces_the_same_tokens() {
        let src = "{a: 1, b: [true, \"x\"]} // tail";
        assert_eq!(tokenize(src), tokenize(src));
    }

    #[test]
    fn current_requires_a_produced_token() {
        let mut lexer = Lexer::new("1");
        assert!(lexer.current().is_err());
        let first = lexer.next_token().unwrap();
        assert_eq!(lexer.current().unwrap(), first);
        assert_eq!(lexer.current().unwrap(), first);
    }

    #[test]
    fn eof_is_repeatable() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn multibyte_text_keeps_byte_offsets_straight() {
        let src = "\"héllo\" x";
        let tokens = tokenize(src);
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].text(src), "\"héllo\"");
        assert_eq!(tokens[1].text(src), "x");
    }
}
