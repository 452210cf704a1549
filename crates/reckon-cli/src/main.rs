mod common;
mod repl;

use std::fs;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use reckon_eval::Interpreter;

use common::{make_interpreter, parse_value, render_error};

const USAGE: &str = "\
Usage: reckon [options] [file]
       reckon [options] -e <expression>

With no file or expression, starts the REPL.

Options:
  -e <expression>     Evaluate one expression
  --det               Print the deterministic form instead of the value
  --var name=value    Set a variable before evaluating (repeatable)
  -h, --help          Show this help

Environment:
  RECKON_PROMPT=0     Never ask for ?name variables on stdin";

#[derive(Default)]
struct Options {
    det: bool,
    inline: Option<String>,
    file: Option<PathBuf>,
    vars: Vec<(String, String)>,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut opts = Options::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--det" => opts.det = true,
            "-e" => {
                i += 1;
                opts.inline = Some(args.get(i).cloned().ok_or("-e needs an expression")?);
            }
            "--var" => {
                i += 1;
                let spec = args.get(i).ok_or("--var needs name=value")?;
                let (name, value) = spec
                    .split_once('=')
                    .ok_or_else(|| format!("Invalid --var '{}', expected name=value", spec))?;
                opts.vars.push((name.trim().to_string(), value.trim().to_string()));
            }
            s if s.starts_with('-') => return Err(format!("Unknown option '{}'", s)),
            path => opts.file = Some(PathBuf::from(path)),
        }
        i += 1;
    }
    Ok(opts)
}

fn fail(msg: &str) -> ! {
    eprintln!("{}: {}", "error".red().bold(), msg.red());
    std::process::exit(1)
}

/// Evaluates (or reduces, with `det`) one expression and prints the result.
fn run_line(interp: &mut Interpreter, line: &str, det: bool) -> bool {
    let result = interp.parse_expression(line).and_then(|expr| {
        if det {
            expr.deterministic_expression(interp)?.format()
        } else {
            expr.evaluate(interp).map(|v| v.to_string())
        }
    });
    match result {
        Ok(out) => {
            println!("{}", out);
            true
        }
        Err(e) => {
            render_error(line, &e);
            false
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{}", USAGE);
        return;
    }
    let opts = parse_args(&args).unwrap_or_else(|msg| {
        eprintln!("{}", USAGE);
        fail(&msg)
    });

    let mut interp = make_interpreter();
    for (name, value) in &opts.vars {
        if let Err(e) = interp.set_variable(name, parse_value(value)) {
            render_error("", &e);
            std::process::exit(1);
        }
    }

    if let Some(expr) = &opts.inline {
        if !run_line(&mut interp, expr, opts.det) {
            std::process::exit(1);
        }
        return;
    }

    let Some(path) = &opts.file else {
        repl::start_repl(interp);
        return;
    };
    if !path.exists() {
        fail(&format!("File not found: {}", path.display()));
    }
    let src = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(&format!("Failed to read {}: {}", path.display(), e)));

    // One expression per line; blank lines and `#` comments are skipped.
    for line in src.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if !run_line(&mut interp, line, opts.det) {
            std::process::exit(1);
        }
    }
}
