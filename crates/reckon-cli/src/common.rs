use std::io::{self, BufRead, Write};

use owo_colors::OwoColorize;
use reckon_eval::{Interpreter, MapVariableResolver};
use reckon_syntax::error::{Error, ErrorKind};
use reckon_syntax::Value;

/// Builds the interpreter used by the CLI and the REPL.
///
/// `?name` variables are asked for on stdin unless `RECKON_PROMPT=0`.
pub fn make_interpreter() -> Interpreter {
    let prompting = std::env::var("RECKON_PROMPT").map_or(true, |v| v != "0");
    let resolver = if prompting {
        MapVariableResolver::new().with_prompt(ask_for)
    } else {
        MapVariableResolver::new()
    };
    Interpreter::with_resolver(resolver)
}

fn ask_for(name: &str) -> Option<Value> {
    eprint!("{} ", format!("{}?", name).cyan());
    let _ = io::stderr().flush();
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => {
            let text = line.trim();
            if text.is_empty() { None } else { Some(parse_value(text)) }
        }
    }
}

/// A decimal when `text` reads as one, otherwise the text itself.
pub fn parse_value(text: &str) -> Value {
    match text.parse() {
        Ok(d) => Value::Number(d),
        Err(_) => Value::Str(text.to_string()),
    }
}

pub fn render_error(source: &str, err: &Error) {
    let kind = match err.kind {
        ErrorKind::Syntax(_) | ErrorKind::InvalidNumber(_) if err.line.is_some() => "Parse error",
        _ => "Evaluation error",
    };
    eprintln!("{}: {}", kind.red().bold(), err.kind.to_string().red());
    if let (Some(line), Some(col)) = (err.line, err.col) {
        if let Some(src_line) = source.lines().nth(line.saturating_sub(1)) {
            eprintln!("  {}", src_line.bright_black());
            let mut marker = " ".repeat(col.saturating_sub(1));
            marker.push('^');
            eprintln!("  {}", marker.red());
        } else {
            eprintln!("  at {}:{}", line, col);
        }
    }
    provide_error_suggestions(&err.kind);
}

pub fn provide_error_suggestions(kind: &ErrorKind) {
    match kind {
        ErrorKind::UndefinedVariable(name) => {
            eprintln!("{}", "Help: Assign the variable first, or ask for it with a prompt variable.".yellow());
            eprintln!("    {}", format!("Example: {} = 10   or   ?{} + 1", name, name).bright_black());
        }
        ErrorKind::UndefinedFunction(name) => {
            eprintln!("{}", "Help: Check the function name; lookups ignore case.".yellow());
            if name.eq_ignore_ascii_case("pow") {
                eprintln!("    {}", "Did you mean: power() or the ^ operator?".cyan());
            } else if name.eq_ignore_ascii_case("print") {
                eprintln!("    {}", "Expressions print their own value.".cyan());
            }
        }
        ErrorKind::Arity { expected, .. } => {
            eprintln!("{}", "Help: Function called with the wrong number of arguments.".yellow());
            eprintln!("    {}", format!("It accepts {} arguments", expected).bright_black());
        }
        ErrorKind::ParameterType { expected, .. } => {
            eprintln!("{}", format!("Help: This argument must be a {}.", expected).yellow());
        }
        ErrorKind::DivisionByZero => {
            eprintln!("{}", "Help: You cannot divide by zero.".yellow());
        }
        ErrorKind::Syntax(msg) if msg.contains("Unterminated string") => {
            eprintln!("{}", "Help: String is missing its closing quote.".yellow());
        }
        ErrorKind::Syntax(msg) if msg.contains("'='") => {
            eprintln!("{}", "Help: Use '==' for comparison, '=' for assignment.".yellow());
        }
        _ => {}
    }
}
