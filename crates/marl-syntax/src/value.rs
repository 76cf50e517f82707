//! Literal-value tree produced by the Marl reader.

use std::fmt;

use crate::token::Span;

/// A parsed value together with the source range it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    pub kind: ValueKind,
    pub span: Span,
}

/// The variants a Marl document value can take.
///
/// Containers own their children by value; the tree has no sharing and no
/// cycles.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    Ident(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
    Array(Vec<Value>),
    Struct(Vec<Field>),
}

/// A single `name: value` entry of a struct.
///
/// `name_span` points at the field name alone, so duplicate-field
/// diagnostics can mark the offending key.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub name_span: Span,
    pub value: Value,
}

impl Value {
    pub fn new(kind: ValueKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Look up a struct field by name. Returns `None` for non-struct values.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match &self.kind {
            ValueKind::Struct(fields) => {
                fields.iter().find(|f| f.name == name).map(|f| &f.value)
            }
            _ => None,
        }
    }
}

/// Escape a decoded string back into literal form, without the quotes.
///
/// Inverse of the reader's escape decoding for the escapes it produces:
/// newline, carriage return, tab, vertical tab, backslash and double quote.
pub fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0B' => out.push_str("\\v"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    out
}

fn write_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    // keep a trailing ".0" so the text re-reads as a float, not an int
    if v.is_finite() && v.fract() == 0.0 {
        write!(f, "{:.1}", v)
    } else {
        write!(f, "{}", v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValueKind::Ident(name) => write!(f, "{}", name),
            ValueKind::Int(v) => write!(f, "{}", v),
            ValueKind::Float(v) => write_float(f, *v),
            ValueKind::Bool(v) => write!(f, "{}", v),
            ValueKind::String(v) => write!(f, "\"{}\"", escape_string(v)),
            ValueKind::Array(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
            ValueKind::Struct(fields) => {
                write!(f, "{{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.value)?;
                }
                write!(f, "}}")
            }
        }
    }
}
