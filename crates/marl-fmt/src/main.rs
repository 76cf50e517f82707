use std::env;
use std::fs;
use std::path::PathBuf;

use marl_parser::{ParseMode, Parser};
use marl_syntax::value::{Value, ValueKind};

// containers whose compact form stays below this go on one line
const INLINE_WIDTH: usize = 60;

fn main() {
    let mut args = env::args().skip(1).collect::<Vec<_>>();
    if args.is_empty() || args.iter().any(|a| a == "-h" || a == "--help") {
        eprintln!("Usage: marl-fmt [--check|--write] <file.marl>");
        std::process::exit(2);
    }
    let mut check = false;
    let mut write = false;
    let mut file = None;
    while let Some(a) = args.first().cloned() {
        if a == "--check" {
            check = true;
            args.remove(0);
        } else if a == "--write" {
            write = true;
            args.remove(0);
        } else {
            file = Some(PathBuf::from(a));
            break;
        }
    }
    let file = file.expect("file required");
    let src = fs::read_to_string(&file).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {}", file.display(), e);
        std::process::exit(1)
    });

    let mut parser = Parser::new(&src);
    let value = parser
        .parse_value(ParseMode::Values)
        .and_then(|v| {
            parser.finish()?;
            Ok(v)
        })
        .unwrap_or_else(|e| {
            eprintln!("Parse error: {}", e);
            std::process::exit(1)
        });

    let formatted = format_document(&value);

    if check {
        if normalize_newlines(&formatted) != normalize_newlines(&src) {
            eprintln!("{}: not formatted", file.display());
            std::process::exit(1);
        } else {
            println!("{}: ok", file.display());
        }
    } else if write {
        fs::write(&file, formatted).unwrap_or_else(|e| {
            eprintln!("Failed to write {}: {}", file.display(), e);
            std::process::exit(1)
        });
    } else {
        print!("{}", formatted);
    }
}

fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n")
}

fn format_document(value: &Value) -> String {
    let mut out = format_value(value, 0);
    out.push('\n');
    out
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value.kind, ValueKind::Array(_) | ValueKind::Struct(_))
}

fn fits_inline(value: &Value) -> bool {
    let compact = value.to_string();
    compact.len() <= INLINE_WIDTH
        && match &value.kind {
            ValueKind::Array(items) => items.iter().all(is_scalar),
            ValueKind::Struct(fields) => fields.iter().all(|f| is_scalar(&f.value)),
            _ => true,
        }
}

fn format_value(value: &Value, indent: usize) -> String {
    let pad = " ".repeat(indent);
    let inner_pad = " ".repeat(indent + 4);
    match &value.kind {
        ValueKind::Array(items) => {
            if items.is_empty() || fits_inline(value) {
                return value.to_string();
            }
            let mut out = String::from("[\n");
            for item in items {
                out.push_str(&inner_pad);
                out.push_str(&format_value(item, indent + 4));
                out.push_str(",\n");
            }
            out.push_str(&pad);
            out.push(']');
            out
        }
        ValueKind::Struct(fields) => {
            if fields.is_empty() || fits_inline(value) {
                return value.to_string();
            }
            let mut out = String::from("{\n");
            for field in fields {
                out.push_str(&inner_pad);
                out.push_str(&field.name);
                out.push_str(": ");
                out.push_str(&format_value(&field.value, indent + 4));
                out.push_str(",\n");
            }
            out.push_str(&pad);
            out.push('}');
            out
        }
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_str(input: &str) -> String {
        let mut parser = Parser::new(input);
        let value = parser.parse_value(ParseMode::Values).expect("should parse");
        parser.finish().expect("should consume the input");
        format_document(&value)
    }

    #[test]
    fn scalars_and_short_containers_stay_inline() {
        assert_eq!(format_str("42"), "42\n");
        assert_eq!(format_str("[ 1 ,2, 3 ]"), "[1, 2, 3]\n");
        assert_eq!(format_str("{ r:255, g:0, b:0 }"), "{r: 255, g: 0, b: 0}\n");
        assert_eq!(format_str("[]"), "[]\n");
        assert_eq!(format_str("{}"), "{}\n");
    }

    #[test]
    fn nested_containers_break_onto_lines() {
        let formatted = format_str("{size: [800, 600], look: {theme: \"dark\"}}");
        assert_eq!(
            formatted,
            "{\n    size: [800, 600],\n    look: {theme: \"dark\"},\n}\n"
        );
    }

    #[test]
    fn formatting_is_stable() {
        let once = format_str("{a: [1, [2, 3]], b: {c: \"x\\ny\"}, d: [[], {}]}");
        let twice = format_str(&once);
        assert_eq!(once, twice);
    }
}
