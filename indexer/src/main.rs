use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use engine::{IndexContext, SearchHit, SearchOptions, TokenizerConfig};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt};

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build the in-memory index from a corpus file and query it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct IndexArgs {
    /// Corpus file: one `title\x03content\x03url` record per line
    #[arg(long)]
    input: PathBuf,
    /// Stem tokens with the English Snowball stemmer
    #[arg(long, default_value_t = false)]
    stem: bool,
    /// Stop-word file (one per line) replacing the built-in list
    #[arg(long)]
    stopwords: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index and print its statistics
    Stats {
        #[command(flatten)]
        index: IndexArgs,
    },
    /// Build the index and run a single query
    Query {
        #[command(flatten)]
        index: IndexArgs,
        /// Query text
        #[arg(long)]
        q: String,
        /// Maximum number of hits to print
        #[arg(long)]
        k: Option<usize>,
        /// Count repeated query terms once
        #[arg(long, default_value_t = false)]
        dedup: bool,
    },
    /// Build the index and answer queries read from stdin, one per line
    Repl {
        #[command(flatten)]
        index: IndexArgs,
    },
}

#[derive(Serialize)]
struct QueryOutput<'a> {
    query: &'a str,
    took_s: f64,
    total_hits: usize,
    results: &'a [SearchHit],
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Stats { index } => {
            let ctx = open(&index)?;
            println!("{}", serde_json::to_string_pretty(&ctx.stats())?);
            Ok(())
        }
        Commands::Query { index, q, k, dedup } => {
            let ctx = open(&index)?;
            let options = SearchOptions { dedup_terms: dedup, limit: k };
            print_query(&ctx, &q, &options, &mut io::stdout().lock())
        }
        Commands::Repl { index } => {
            let ctx = open(&index)?;
            repl(&ctx)
        }
    }
}

fn open(args: &IndexArgs) -> Result<IndexContext> {
    let config = TokenizerConfig { stem: args.stem, stopwords_path: args.stopwords.clone() };
    let start = Instant::now();
    let ctx = IndexContext::open(&args.input, &config)
        .with_context(|| format!("failed to build index from {}", args.input.display()))?;
    let stats = ctx.stats();
    tracing::info!(
        num_docs = stats.num_docs,
        num_terms = stats.num_terms,
        skipped = stats.skipped_records,
        took_s = start.elapsed().as_secs_f64(),
        "index build complete"
    );
    Ok(ctx)
}

/// Total hit count before `options.limit`, and the hits after it.
fn run_query(ctx: &IndexContext, query: &str, options: &SearchOptions) -> (usize, Vec<SearchHit>) {
    let unlimited = SearchOptions { limit: None, ..options.clone() };
    let mut results = ctx.search_with(query, &unlimited);
    let total_hits = results.len();
    if let Some(k) = options.limit {
        results.truncate(k);
    }
    (total_hits, results)
}

fn print_query<W: Write>(ctx: &IndexContext, query: &str, options: &SearchOptions, out: &mut W) -> Result<()> {
    let start = Instant::now();
    let (total_hits, results) = run_query(ctx, query, options);
    let output = QueryOutput { query, took_s: start.elapsed().as_secs_f64(), total_hits, results: &results };
    serde_json::to_writer_pretty(&mut *out, &output)?;
    out.write_all(b"\n")?;
    Ok(())
}

fn repl(ctx: &IndexContext) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let options = SearchOptions::default();
    loop {
        write!(stdout, "query> ")?;
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if query.is_empty() { continue; }
        print_query(ctx, query, &options, &mut stdout)?;
    }
    Ok(())
}
