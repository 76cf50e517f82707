mod render;
mod repl;

use std::fs;

use owo_colors::OwoColorize;

use marl_lexer::Lexer;
use marl_parser::{ParseMode, Parser};
use render::render_error;

fn print_usage() {
    eprintln!("Usage: marl [--tokens] <file.marl>");
    eprintln!("       marl            (starts the REPL)");
    eprintln!();
    eprintln!("  -t, --tokens   dump the token stream instead of the parsed value");
    eprintln!("  -h, --help     show this help");
}

fn parse_path(args: &[String]) -> Option<&str> {
    let mut i = 1usize;
    while i < args.len() {
        match args[i].as_str() {
            s if s.starts_with('-') => {
                i += 1;
            }
            _ => {
                return Some(args[i].as_str());
            }
        }
    }
    None
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }
    let dump_tokens = args.iter().any(|a| a == "--tokens" || a == "-t");

    let path_str = match parse_path(&args) {
        Some(p) => p,
        None => {
            repl::start_repl();
            return;
        }
    };

    let src = match fs::read_to_string(path_str) {
        Ok(s) => s,
        Err(e) => {
            eprintln!(
                "{}: {}",
                "error".red().bold(),
                format!("Failed to read {}: {}", path_str, e).red()
            );
            std::process::exit(1);
        }
    };

    if dump_tokens {
        let mut lexer = Lexer::new(&src);
        let tokens = match lexer.tokenize() {
            Ok(t) => t,
            Err(e) => {
                render_error("Scan error", &src, &e);
                std::process::exit(1);
            }
        };
        for token in &tokens {
            println!(
                "{:>4}:{:<4} {:?} {}",
                token.span.from.line,
                token.span.from.column,
                token.kind,
                token.text(&src)
            );
        }
        return;
    }

    let mut parser = Parser::new(&src);
    let value = match parser.parse_value(ParseMode::Values) {
        Ok(v) => v,
        Err(e) => {
            render_error("Parse error", &src, &e);
            std::process::exit(1);
        }
    };
    if let Err(e) = parser.finish() {
        render_error("Parse error", &src, &e);
        std::process::exit(1);
    }

    println!("{}", value);
}
