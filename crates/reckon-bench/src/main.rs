use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{ArgAction, Parser};
use serde::Serialize;

use reckon_eval::{EvalStats, Interpreter};
use reckon_syntax::error::Error;

#[derive(Parser, Debug)]
#[command(name = "reckon-bench", about = "Run Reckon expression benchmarks")]
struct Cli {
    /// Specific test(s) to run (by file stem, e.g. arithmetic). If omitted, runs all discovered files.
    #[arg(short = 't', long = "test", action = ArgAction::Append)]
    tests: Vec<String>,

    /// Iterations per test (measured)
    #[arg(short = 'n', long = "iterations", default_value_t = 10)]
    iterations: u32,

    /// Warmup iterations (not measured)
    #[arg(short = 'w', long = "warmup", default_value_t = 2)]
    warmup: u32,

    /// Output JSON file path; default: benchmark/results/<timestamp>.json
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Directory of expression files; default: benchmark/expressions
    #[arg(short = 'd', long = "dir")]
    dir: Option<PathBuf>,

    /// List discovered tests and exit
    #[arg(long = "list", default_value_t = false)]
    list: bool,
}

#[derive(Debug, Serialize)]
struct BenchResult {
    name: String,
    expressions: usize,
    iterations: u32,
    avg_total_ms: f64,
    min_total_ms: f64,
    max_total_ms: f64,
    avg_parse_ms: f64,
    avg_eval_ms: f64,
    avg_reduce_ms: f64,
    avg_format_ms: f64,
    counters: Counters,
}

/// Evaluation counters from the last measured iteration.
#[derive(Debug, Serialize)]
struct Counters {
    function_calls: usize,
    variable_reads: usize,
    reductions: usize,
    frozen_nodes: usize,
}

impl From<EvalStats> for Counters {
    fn from(s: EvalStats) -> Self {
        Counters {
            function_calls: s.function_calls,
            variable_reads: s.variable_reads,
            reductions: s.reductions,
            frozen_nodes: s.frozen_nodes,
        }
    }
}

#[derive(Debug, Serialize)]
struct OutputDoc {
    timestamp: String,
    reckon_version: String,
    benchmarks: Vec<BenchResult>,
}

#[derive(Debug, Clone)]
struct ExpressionFile {
    name: String,
    path: PathBuf,
}

#[derive(Default)]
struct Timings {
    totals: Vec<f64>,
    parses: Vec<f64>,
    evals: Vec<f64>,
    reduces: Vec<f64>,
    formats: Vec<f64>,
    last_stats: EvalStats,
}

fn workspace_root() -> PathBuf {
    // crates/reckon-bench -> crates -> root
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or(manifest)
}

fn fail(msg: String) -> ! {
    eprintln!("{}", msg);
    std::process::exit(1)
}

fn discover(dir: &Path) -> Vec<ExpressionFile> {
    let mut out = Vec::new();
    if let Ok(entries) = fs::read_dir(dir) {
        for e in entries.flatten() {
            let p = e.path();
            if p.extension().and_then(|s| s.to_str()) == Some("rk") {
                let name = p.file_stem().and_then(|s| s.to_str()).unwrap_or("").to_string();
                out.push(ExpressionFile { name, path: p });
            }
        }
    }
    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}

/// Non-blank, non-comment lines.
fn read_expressions(path: &Path) -> Vec<String> {
    let src = fs::read_to_string(path).unwrap_or_else(|e| fail(format!("Failed to read {}: {}", path.display(), e)));
    src.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Runs every line through parse, evaluate, reduce and format on a fresh interpreter.
fn run_once(lines: &[String], timings: Option<&mut Timings>) -> Result<(), Error> {
    let mut interp = Interpreter::new();
    let (mut parse, mut eval, mut reduce, mut format) = (Duration::ZERO, Duration::ZERO, Duration::ZERO, Duration::ZERO);
    let t0 = Instant::now();

    for line in lines {
        let mut t = Instant::now();
        let expr = interp.parse_expression(line)?;
        parse += t.elapsed();

        t = Instant::now();
        expr.evaluate(&mut interp)?;
        eval += t.elapsed();

        t = Instant::now();
        let det = expr.deterministic_expression(&mut interp)?;
        reduce += t.elapsed();

        t = Instant::now();
        det.format()?;
        format += t.elapsed();
    }

    if let Some(timings) = timings {
        timings.totals.push(dur_ms(t0.elapsed()));
        timings.parses.push(dur_ms(parse));
        timings.evals.push(dur_ms(eval));
        timings.reduces.push(dur_ms(reduce));
        timings.formats.push(dur_ms(format));
        timings.last_stats = interp.stats();
    }
    Ok(())
}

fn measure(name: &str, lines: &[String], iterations: u32, warmup: u32) -> Timings {
    let mut timings = Timings::default();
    for i in 0..warmup + iterations {
        let sink = if i < warmup { None } else { Some(&mut timings) };
        if let Err(e) = run_once(lines, sink) {
            fail(format!("{}: {}", name, e));
        }
    }
    timings
}

fn dur_ms(d: Duration) -> f64 { d.as_secs_f64() * 1000.0 }

fn stats(vals: &[f64]) -> (f64, f64, f64) {
    let min = vals.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = vals.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let avg = if vals.is_empty() { 0.0 } else { vals.iter().sum::<f64>() / (vals.len() as f64) };
    (avg, min, max)
}

fn ensure_dir(p: &Path) {
    if let Err(e) = fs::create_dir_all(p) {
        fail(format!("Failed to create {}: {}", p.display(), e));
    }
}

fn main() {
    let cli = Cli::parse();
    let root = workspace_root();
    let dir = cli.dir.clone().unwrap_or_else(|| root.join("benchmark/expressions"));

    let mut files = discover(&dir);

    if cli.list {
        println!("Discovered tests:");
        for f in &files { println!("- {} ({})", f.name, f.path.display()); }
        return;
    }

    if !cli.tests.is_empty() {
        let wanted: std::collections::HashSet<_> = cli.tests.iter().map(|s| s.to_lowercase()).collect();
        files.retain(|f| wanted.contains(&f.name.to_lowercase()));
        if files.is_empty() {
            eprintln!("No matching tests. Use --list to see available.");
            std::process::exit(2);
        }
    }

    if files.is_empty() {
        eprintln!("No .rk expression files found in {}.", dir.display());
        std::process::exit(2);
    }

    let mut results = Vec::new();

    for case in &files {
        let lines = read_expressions(&case.path);
        let t = measure(&case.name, &lines, cli.iterations, cli.warmup);
        let (avg_t, min_t, max_t) = stats(&t.totals);
        let (avg_p, _, _) = stats(&t.parses);
        let (avg_e, _, _) = stats(&t.evals);
        let (avg_r, _, _) = stats(&t.reduces);
        let (avg_f, _, _) = stats(&t.formats);

        println!(
            "{:>12}: total avg={:.3}ms min={:.3}ms max={:.3}ms | parse={:.3}ms eval={:.3}ms reduce={:.3}ms format={:.3}ms | calls={}",
            case.name, avg_t, min_t, max_t, avg_p, avg_e, avg_r, avg_f, t.last_stats.function_calls
        );

        results.push(BenchResult {
            name: case.name.clone(),
            expressions: lines.len(),
            iterations: cli.iterations,
            avg_total_ms: avg_t,
            min_total_ms: min_t,
            max_total_ms: max_t,
            avg_parse_ms: avg_p,
            avg_eval_ms: avg_e,
            avg_reduce_ms: avg_r,
            avg_format_ms: avg_f,
            counters: t.last_stats.into(),
        });
    }

    let out_path = if let Some(p) = cli.output.clone() {
        p
    } else {
        let results_dir = root.join("benchmark/results");
        ensure_dir(&results_dir);
        // Windows-safe filename timestamp
        let ts_file = chrono::Utc::now().format("%Y-%m-%d_%H-%M-%SZ").to_string();
        results_dir.join(format!("{}.json", ts_file))
    };

    let doc = OutputDoc {
        timestamp: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        reckon_version: env!("CARGO_PKG_VERSION").to_string(),
        benchmarks: results,
    };

    let json = serde_json::to_string_pretty(&doc).unwrap_or_else(|e| fail(format!("Failed to serialize results: {}", e)));
    if let Some(parent) = out_path.parent() { ensure_dir(parent); }
    if let Err(e) = fs::write(&out_path, json) {
        fail(format!("Failed to write {}: {}", out_path.display(), e));
    }

    println!("\nSaved results to {}", out_path.display());
}
