use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::{ArgAction, Parser};
use serde::Serialize;

use marl_lexer::Lexer;
use marl_parser::{ParseMode, Parser as MarlParser};

#[derive(Parser, Debug)]
#[command(name = "marl-bench", about = "Run Marl scanner/reader benchmarks")]
struct Cli {
    /// Specific document(s) to run (by name, e.g. window). If omitted, runs all discovered documents.
    #[arg(short = 't', long = "test", action = ArgAction::Append)]
    tests: Vec<String>,

    /// Iterations per document (measured)
    #[arg(short = 'n', long = "iterations", default_value_t = 50)]
    iterations: u32,

    /// Warmup iterations (not measured)
    #[arg(short = 'w', long = "warmup", default_value_t = 5)]
    warmup: u32,

    /// Output JSON file path; default: benchmark/results/<timestamp>.json
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// List discovered documents and exit
    #[arg(long = "list", default_value_t = false)]
    list: bool,
}

#[derive(Debug, Serialize)]
struct BenchResult {
    name: String,
    bytes: usize,
    tokens: usize,
    iterations: u32,
    avg_lex_ms: f64,
    min_lex_ms: f64,
    max_lex_ms: f64,
    avg_parse_ms: f64,
    min_parse_ms: f64,
    max_parse_ms: f64,
}

#[derive(Debug, Serialize)]
struct OutputDoc {
    timestamp: String,
    marl_version: String,
    benchmarks: Vec<BenchResult>,
}

#[derive(Debug, Clone)]
struct DocumentCase {
    name: String,
    source: String,
}

fn workspace_root() -> PathBuf {
    // crates/marl-bench -> crates -> root
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

fn discover_documents() -> Vec<DocumentCase> {
    let mut out = Vec::new();
    let demos = workspace_root().join("demos");
    if let Ok(entries) = fs::read_dir(&demos) {
        let mut paths: Vec<PathBuf> = entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.extension().map(|e| e == "marl").unwrap_or(false))
            .collect();
        paths.sort();
        for path in paths {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| String::from("unnamed"));
            if let Ok(source) = fs::read_to_string(&path) {
                out.push(DocumentCase { name, source });
            }
        }
    }
    out.push(DocumentCase {
        name: String::from("synthetic-records"),
        source: synthetic_document(512),
    });
    out
}

// A large generated document so timings do not depend on the small demos.
fn synthetic_document(records: usize) -> String {
    let mut out = String::from("[\n");
    for i in 0..records {
        out.push_str(&format!(
            "    {{id: {}, label: \"record {}\", weight: {}.{}, flags: [true, false], kind: widget}},\n",
            i,
            i,
            i % 97,
            i % 10,
        ));
    }
    out.push(']');
    out
}

fn run_case(case: &DocumentCase, iterations: u32, warmup: u32) -> BenchResult {
    let token_count = Lexer::new(&case.source)
        .tokenize()
        .expect("benchmark document should scan")
        .len();

    for _ in 0..warmup {
        let _ = Lexer::new(&case.source).tokenize().unwrap();
        let _ = MarlParser::new(&case.source)
            .parse_value(ParseMode::Values)
            .expect("benchmark document should parse");
    }

    let mut lex_ms = Vec::with_capacity(iterations as usize);
    let mut parse_ms = Vec::with_capacity(iterations as usize);
    for _ in 0..iterations {
        let start = Instant::now();
        let tokens = Lexer::new(&case.source).tokenize().unwrap();
        lex_ms.push(start.elapsed().as_secs_f64() * 1000.0);
        drop(tokens);

        let start = Instant::now();
        let value = MarlParser::new(&case.source)
            .parse_value(ParseMode::Values)
            .expect("benchmark document should parse");
        parse_ms.push(start.elapsed().as_secs_f64() * 1000.0);
        drop(value);
    }

    let stats = |samples: &[f64]| {
        let sum: f64 = samples.iter().sum();
        let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = samples.iter().cloned().fold(0.0f64, f64::max);
        (sum / samples.len() as f64, min, max)
    };
    let (avg_lex_ms, min_lex_ms, max_lex_ms) = stats(&lex_ms);
    let (avg_parse_ms, min_parse_ms, max_parse_ms) = stats(&parse_ms);

    BenchResult {
        name: case.name.clone(),
        bytes: case.source.len(),
        tokens: token_count,
        iterations,
        avg_lex_ms,
        min_lex_ms,
        max_lex_ms,
        avg_parse_ms,
        min_parse_ms,
        max_parse_ms,
    }
}

fn main() {
    let cli = Cli::parse();

    let mut cases = discover_documents();
    if !cli.tests.is_empty() {
        cases.retain(|c| cli.tests.iter().any(|t| c.name.contains(t.as_str())));
    }

    if cli.list {
        for case in &cases {
            println!("{} ({} bytes)", case.name, case.source.len());
        }
        return;
    }
    if cases.is_empty() {
        eprintln!("no benchmark documents matched");
        std::process::exit(1);
    }

    let mut results = Vec::new();
    for case in &cases {
        let result = run_case(case, cli.iterations, cli.warmup);
        println!(
            "{:<20} {:>8} bytes {:>7} tokens  lex {:.3} ms  parse {:.3} ms",
            result.name, result.bytes, result.tokens, result.avg_lex_ms, result.avg_parse_ms
        );
        results.push(result);
    }

    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();
    let doc = OutputDoc {
        timestamp: timestamp.clone(),
        marl_version: env!("CARGO_PKG_VERSION").to_string(),
        benchmarks: results,
    };

    let output = cli.output.unwrap_or_else(|| {
        workspace_root()
            .join("benchmark/results")
            .join(format!("{}.json", timestamp))
    });
    if let Some(parent) = output.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Failed to create {}: {}", parent.display(), e);
            std::process::exit(1);
        }
    }
    let json = serde_json::to_string_pretty(&doc).expect("results should serialize");
    if let Err(e) = fs::write(&output, json) {
        eprintln!("Failed to write {}: {}", output.display(), e);
        std::process::exit(1);
    }
    println!("results written to {}", output.display());
}
