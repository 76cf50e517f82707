use owo_colors::OwoColorize;

use marl_syntax::error::Error;

pub fn render_error(kind: &str, source: &str, err: &Error) {
    eprintln!("{}: {}", kind.red().bold(), err.msg.red());
    if let Some(span) = err.span {
        let (line, col) = (span.from.line, span.from.column);
        eprintln!("  --> line {}, column {}", line, col);
        if let Some(src_line) = source.lines().nth(line - 1) {
            let line_num_str = format!("{:3} | ", line);
            eprintln!("     |");
            eprintln!("{}{}", line_num_str.bright_black(), src_line);

            let mut marker = String::new();
            marker.push_str(&" ".repeat(line_num_str.len()));
            if col > 1 {
                marker.push_str(&" ".repeat(col - 1));
            }
            marker.push('^');
            eprintln!("{}{}", marker.red(), " error here".red());
            eprintln!("     |");
        }
    }

    provide_error_suggestions(&err.msg);
}

fn provide_error_suggestions(err_msg: &str) {
    if err_msg.contains("unterminated string") {
        eprintln!("{}", "Help: Strings cannot span lines; every '\"' needs a matching closing '\"' before the line ends.".yellow());
    } else if err_msg.contains("unterminated comment") {
        eprintln!("{}", "Help: Close the comment with '*/'.".yellow());
    } else if err_msg.contains("unterminated array") {
        eprintln!("{}", "Help: Separate array values with ',' and close the array with ']'.".yellow());
    } else if err_msg.contains("unterminated struct") {
        eprintln!("{}", "Help: Separate struct fields with ',' and close the struct with '}'.".yellow());
    } else if err_msg.contains("multiple definitions of struct field") {
        eprintln!("{}", "Help: Struct field names must be unique; remove or rename the duplicate.".yellow());
    } else if err_msg.contains("expected digits after '.'") {
        eprintln!("{}", "Help: Float literals need digits on both sides of the dot, like 0.5.".yellow());
    } else if err_msg.contains("expected ':'") {
        eprintln!("{}", "Help: Struct fields are written name: value.".yellow());
    } else if err_msg.contains("expected value") {
        eprintln!("{}", "Help: A value is a number, string, true/false, an identifier, [..] or {..}.".yellow());
    }
}
