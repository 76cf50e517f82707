use std::io::{self, Write};

use owo_colors::OwoColorize;

use marl_lexer::Lexer;
use marl_parser::{ParseMode, Parser};
use marl_syntax::token::TokenKind;

use crate::render::render_error;

pub fn start_repl() {
    println!(
        "{}",
        "Marl REPL. Type :help for help, :quit to exit.".bold().green()
    );

    let mut show_tokens = false;
    let mut buffer = String::new();
    loop {
        let prompt = if buffer.is_empty() {
            "marl> ".cyan().to_string()
        } else {
            "....> ".cyan().to_string()
        };
        print!("{}", prompt);
        let _ = io::stdout().flush();

        let mut line = String::new();
        let n = match io::stdin().read_line(&mut line) {
            Ok(n) => n,
            Err(_) => {
                println!("<input error>");
                break;
            }
        };
        if n == 0 {
            // EOF
            println!("\nGoodbye.");
            break;
        }
        let trimmed = line.trim_end();

        if buffer.is_empty() && trimmed.starts_with(':') {
            match trimmed {
                ":quit" | ":q" | ":exit" => {
                    println!("Goodbye.");
                    break;
                }
                ":help" | ":h" => {
                    println!(
                        "{}\n  {}  {}\n  {}  {}\n  {}  {}",
                        "Commands:".bold(),
                        ":help".yellow(),
                        "Show this help",
                        ":tokens".yellow(),
                        "Toggle token dumping",
                        ":quit".yellow(),
                        "Exit the REPL"
                    );
                    println!("Type a value to parse it. Input is held until brackets balance.");
                    continue;
                }
                ":tokens" => {
                    show_tokens = !show_tokens;
                    let state = if show_tokens { "on" } else { "off" };
                    println!("{}", format!("Token dumping {}.", state).yellow());
                    continue;
                }
                _ => {
                    println!("{}", "Unknown command. Type :help.".red());
                    continue;
                }
            }
        }

        buffer.push_str(&line);

        if buffer.trim().is_empty() {
            buffer.clear();
            continue;
        }
        if !is_complete(&buffer) {
            continue;
        }

        if show_tokens {
            match Lexer::new(&buffer).tokenize() {
                Ok(tokens) => {
                    for token in &tokens {
                        println!(
                            "  {:>2}:{:<3} {:?} {}",
                            token.span.from.line,
                            token.span.from.column,
                            token.kind,
                            token.text(&buffer)
                        );
                    }
                }
                Err(e) => render_error("Scan error", &buffer, &e),
            }
        }

        let mut parser = Parser::new(&buffer);
        let parsed = parser
            .parse_value(ParseMode::Values)
            .and_then(|v| {
                parser.finish()?;
                Ok(v)
            });
        match parsed {
            Ok(value) => println!("{}", value.to_string().bright_blue()),
            Err(e) => render_error("Parse error", &buffer, &e),
        }

        buffer.clear();
    }
}

// Input is complete once every '[' and '{' is matched. Documents that do
// not tokenize are complete too: parsing will report the error.
fn is_complete(input: &str) -> bool {
    let tokens = match Lexer::new(input).tokenize() {
        Ok(t) => t,
        Err(_) => return true,
    };
    let mut depth = 0i32;
    for token in tokens.iter() {
        match token.kind {
            TokenKind::LBracket | TokenKind::LBrace => depth += 1,
            TokenKind::RBracket | TokenKind::RBrace => depth -= 1,
            _ => {}
        }
    }
    depth <= 0
}
