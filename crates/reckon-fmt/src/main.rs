use std::env;
use std::fs;
use std::path::PathBuf;

use reckon_fmt::format_node;
use reckon_parser::parse_str;

fn main() {
    let mut args = env::args().skip(1).collect::<Vec<_>>();
    if args.is_empty() || args.iter().any(|a| a == "-h" || a == "--help") {
        eprintln!("Usage: reckon-fmt [--check|--write] <file>");
        eprintln!("       reckon-fmt -e <expression>");
        std::process::exit(2);
    }
    let mut check = false;
    let mut write = false;
    let mut file = None;
    let mut inline = None;
    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--check" => check = true,
            "--write" => write = true,
            "-e" => {
                inline = args.first().cloned();
                break;
            }
            _ => {
                file = Some(PathBuf::from(a));
                break;
            }
        }
    }

    if let Some(expr) = inline {
        match format_source(&expr) {
            Ok(out) => print!("{}", out),
            Err(msg) => {
                eprintln!("{}", msg);
                std::process::exit(1);
            }
        }
        return;
    }

    let Some(file) = file else {
        eprintln!("reckon-fmt: no input file");
        std::process::exit(2);
    };
    let src = fs::read_to_string(&file).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {}", file.display(), e);
        std::process::exit(1)
    });
    let formatted = format_source(&src).unwrap_or_else(|msg| {
        eprintln!("{}: {}", file.display(), msg);
        std::process::exit(1)
    });

    if check {
        if normalize_newlines(&formatted) != normalize_newlines(&src) {
            eprintln!("{}: not formatted", file.display());
            std::process::exit(1);
        } else {
            println!("{}: ok", file.display());
        }
    } else if write {
        if let Err(e) = fs::write(&file, formatted) {
            eprintln!("Failed to write {}: {}", file.display(), e);
            std::process::exit(1);
        }
    } else {
        print!("{}", formatted);
    }
}

fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n")
}

/// Formats one expression per non-blank line; blank lines are kept.
fn format_source(src: &str) -> Result<String, String> {
    let mut out = String::new();
    for (i, line) in src.lines().enumerate() {
        if !line.trim().is_empty() {
            let node = parse_str(line).map_err(|e| format!("line {}: Parse error: {}", i + 1, e))?;
            let text = format_node(&node).map_err(|e| format!("line {}: {}", i + 1, e))?;
            out.push_str(&text);
        }
        out.push('\n');
    }
    Ok(out)
}
