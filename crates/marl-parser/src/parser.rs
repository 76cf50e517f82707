//! Recursive-descent reader producing literal-value trees.
//!
//! Grammar rules try alternatives in order and fall through on a
//! non-matching lookahead token; an error inside a matched alternative is
//! fatal. A successful parse consumes exactly the tokens of its construct
//! and leaves the cursor at the first unconsumed token; after a failure the
//! cursor position is unspecified and parsing must not continue.

use marl_lexer::Lexer;
use marl_syntax::error::{error, error_at, Error, Result};
use marl_syntax::token::TokenKind;
use marl_syntax::value::{Field, Value, ValueKind};

use crate::cursor::TokenCursor;

/// Which grammar the reader applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Literal values only: scalars, arrays and structs.
    Values,
    /// The full expression grammar (operators, calls, indexing). The token
    /// kinds exist but no parsing rules do; requesting this mode fails.
    Expressions,
}

/// Reader over a document text. Owns its lexer and pulls tokens on demand.
pub struct Parser<'s> {
    text: &'s str,
    cursor: TokenCursor,
}

impl<'s> Parser<'s> {
    pub fn new(text: &'s str) -> Self {
        Self {
            text,
            cursor: TokenCursor::new(Lexer::new(text)),
        }
    }

    /// Parse a single value from the input.
    pub fn parse_value(&mut self, mode: ParseMode) -> Result<Value> {
        if mode == ParseMode::Expressions {
            return error("not implemented");
        }
        self.cursor.prime()?;
        self.parse_node()
    }

    /// Require that nothing but end-of-input remains.
    pub fn finish(&mut self) -> Result<()> {
        self.cursor.prime()?;
        let token = self.cursor.peek()?;
        if token.kind != TokenKind::Eof {
            return error_at(
                token.span,
                format!(
                    "unexpected {} after value, expected end of input",
                    token.kind.describe()
                ),
            );
        }
        Ok(())
    }

    // Alternative chain: array, struct, atom. Each rule inspects the
    // lookahead and hands over to the next when its opener is absent.
    fn parse_node(&mut self) -> Result<Value> {
        self.parse_array()
    }

    fn parse_array(&mut self) -> Result<Value> {
        let open = self.cursor.peek()?;
        if open.kind != TokenKind::LBracket {
            return self.parse_struct();
        }
        self.cursor.advance()?;
        let mut values = Vec::new();
        loop {
            let token = self.cursor.peek()?;
            match token.kind {
                TokenKind::RBracket => {
                    let close = self.cursor.advance()?;
                    return Ok(Value::new(
                        ValueKind::Array(values),
                        open.span.join(close.span),
                    ));
                }
                TokenKind::Eof => {
                    return error_at(open.span.join(token.span), "unterminated array");
                }
                _ => {}
            }
            values.push(self.parse_node()?);
            let sep = self.cursor.peek()?;
            match sep.kind {
                TokenKind::Comma => {
                    self.cursor.advance()?;
                }
                TokenKind::RBracket => {}
                _ => return error_at(open.span.join(sep.span), "unterminated array"),
            }
        }
    }

    fn parse_struct(&mut self) -> Result<Value> {
        let open = self.cursor.peek()?;
        if open.kind != TokenKind::LBrace {
            return self.parse_atom();
        }
        self.cursor.advance()?;
        let mut fields: Vec<Field> = Vec::new();
        loop {
            let token = self.cursor.peek()?;
            match token.kind {
                TokenKind::RBrace => {
                    let close = self.cursor.advance()?;
                    return Ok(Value::new(
                        ValueKind::Struct(fields),
                        open.span.join(close.span),
                    ));
                }
                TokenKind::Eof => {
                    return error_at(
                        open.span.join(token.span),
                        "unterminated struct, expected '}'",
                    );
                }
                TokenKind::Identifier => {}
                _ => {
                    return error_at(
                        token.span,
                        format!(
                            "unexpected {}, expected identifier or '}}'",
                            token.kind.describe()
                        ),
                    );
                }
            }
            let name_token = self.cursor.advance()?;
            let colon = self.cursor.peek()?;
            if colon.kind != TokenKind::Colon {
                return error_at(
                    colon.span,
                    format!("unexpected {}, expected ':'", colon.kind.describe()),
                );
            }
            self.cursor.advance()?;
            let value = self.parse_node()?;
            let name = name_token.text(self.text).to_string();
            if fields.iter().any(|f| f.name == name) {
                return error_at(name_token.span, "multiple definitions of struct field");
            }
            fields.push(Field {
                name,
                name_span: name_token.span,
                value,
            });
            let sep = self.cursor.peek()?;
            match sep.kind {
                TokenKind::Comma => {
                    self.cursor.advance()?;
                }
                TokenKind::RBrace => {}
                _ => {
                    return error_at(
                        open.span.join(sep.span),
                        "unterminated struct, expected ',' or '}'",
                    );
                }
            }
        }
    }

    fn parse_atom(&mut self) -> Result<Value> {
        let token = self.cursor.peek()?;
        let kind = match token.kind {
            TokenKind::Identifier => {
                ValueKind::Ident(token.text(self.text).to_string())
            }
            TokenKind::IntegerLiteral => {
                let value = token.text(self.text).parse::<i64>().map_err(|_| {
                    Error::with_span("integer literal out of range", token.span)
                })?;
                ValueKind::Int(value)
            }
            TokenKind::FloatLiteral => {
                let value = token.text(self.text).parse::<f64>().map_err(|_| {
                    Error::with_span("malformed float literal", token.span)
                })?;
                ValueKind::Float(value)
            }
            TokenKind::True => ValueKind::Bool(true),
            TokenKind::False => ValueKind::Bool(false),
            TokenKind::StringLiteral => {
                let decoded = decode_string_literal(token.text(self.text))
                    .map_err(|e| Error::with_span(e.msg, token.span))?;
                ValueKind::String(decoded)
            }
            _ => {
                return error_at(token.span, "unexpected token, expected value");
            }
        };
        self.cursor.advance()?;
        Ok(Value::new(kind, token.span))
    }
}

/// Decode a raw string literal, quotes included, into its value.
///
/// A backslash escapes the following character: `\n`, `\r`, `\t` and `\v`
/// decode to their control characters; any other escaped character decodes
/// to itself.
pub fn decode_string_literal(literal: &str) -> Result<String> {
    let mut chars = literal.chars();
    if chars.next().is_none() || chars.next_back().is_none() {
        return error("malformed string");
    }
    let inner = chars.as_str();
    let mut out = String::with_capacity(inner.len());
    let mut escaped = false;
    for c in inner.chars() {
        if escaped {
            out.push(match c {
                'n' => '\n',
                'r' => '\r',
                't' => '\t',
                'v' => '\x0B',
                other => other,
            });
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else {
            out.push(c);
        }
    }
    Ok(out)
}
