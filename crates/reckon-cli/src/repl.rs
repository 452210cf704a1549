use std::io::{self, Write};

use owo_colors::OwoColorize;
use reckon_eval::{EvalStats, Interpreter};

use crate::common::{make_interpreter, render_error};

pub fn start_repl(mut interpreter: Interpreter) {
    println!("{}", "Reckon REPL. Type :help for help, :quit to exit.".bold().green());

    let mut det = false;
    loop {
        let prompt = if det { "det> " } else { "reckon> " };
        print!("{}", prompt.cyan());
        let _ = io::stdout().flush();

        let mut line = String::new();
        let n = match io::stdin().read_line(&mut line) {
            Ok(n) => n,
            Err(_) => { println!("<input error>"); break; }
        };
        if n == 0 { // EOF
            println!("\nGoodbye.");
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() { continue; }

        if trimmed.starts_with(':') {
            match trimmed {
                ":quit" | ":q" | ":exit" => { println!("Goodbye."); break; }
                ":help" | ":h" => { print_help(); continue; }
                ":vars" => { print_vars(&mut interpreter); continue; }
                ":funcs" => { print_funcs(&interpreter); continue; }
                ":stats" => { print_stats(interpreter.stats()); continue; }
                ":det" => {
                    det = !det;
                    let msg = if det { "Showing deterministic forms." } else { "Showing values." };
                    println!("{}", msg.yellow());
                    continue;
                }
                ":reset" => { interpreter = make_interpreter(); println!("{}", "State reset.".yellow()); continue; }
                _ => { println!("{}", "Unknown command. Type :help.".red()); continue; }
            }
        }

        let result = interpreter.parse_expression(trimmed).and_then(|expr| {
            if det {
                expr.deterministic_expression(&mut interpreter)?.format()
            } else {
                expr.evaluate(&mut interpreter).map(|v| v.to_string())
            }
        });
        match result {
            Ok(out) => println!("{}", out.bright_blue()),
            Err(e) => render_error(trimmed, &e),
        }
    }
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  {}  {}\n  {}  {}", ":help".yellow(), "Show this help", ":quit".yellow(), "Exit the REPL");
    println!("  {}  {}\n  {}  {}", ":vars".yellow(), "List variables", ":funcs".yellow(), "List function names");
    println!("  {}  {}\n  {}  {}", ":stats".yellow(), "Show evaluation counters", ":det".yellow(), "Toggle deterministic-form output");
    println!("  {}  {}", ":reset".yellow(), "Clear variables and counters");
    println!("Type an expression to evaluate it, e.g. x = 2 ^ 10 or max(1, ?roll).");
}

fn print_vars(interp: &mut Interpreter) {
    let names = interp.variable_names();
    if names.is_empty() { println!("{}", "<no vars>".dimmed()); return; }
    for name in names {
        if let Ok(v) = interp.get_variable(&name) { println!("{} = {}", name.yellow(), v.to_string().bright_blue()); }
    }
}

fn print_funcs(interp: &Interpreter) {
    let names = interp.function_names();
    if names.is_empty() { println!("{}", "<no functions>".dimmed()); return; }
    println!("{}", names.join(", ").yellow());
}

fn print_stats(stats: EvalStats) {
    let EvalStats { function_calls, variable_reads, reductions, frozen_nodes } = stats;
    println!("{}: {}", "function calls".yellow(), function_calls);
    println!("{}: {}", "variable reads".yellow(), variable_reads);
    println!("{}: {}", "reductions".yellow(), reductions);
    println!("{}: {}", "frozen nodes".yellow(), frozen_nodes);
}
