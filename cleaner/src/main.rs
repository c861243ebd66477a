use anyhow::{Context, Result};
use clap::Parser;
use cleaner::clean_dir;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "cleaner")]
#[command(about = "Strip a directory of HTML pages into a corpus file for the indexer")]
struct Cli {
    /// Directory searched recursively for .html files
    #[arg(long, default_value = "data/input")]
    input: PathBuf,
    /// Corpus file to write
    #[arg(long, default_value = "data/raw_html/raw.txt")]
    output: PathBuf,
    /// URL prefix joined with each page's path relative to the input directory
    #[arg(long, default_value = "https://www.boost.org/doc/libs/1_86_0/doc/html/")]
    base_url: String,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Cli::parse();
    let base = Url::parse(&args.base_url).with_context(|| format!("invalid base url {}", args.base_url))?;
    if let Some(dir) = args.output.parent() {
        fs::create_dir_all(dir)?;
    }

    let file = File::create(&args.output).with_context(|| format!("creating {}", args.output.display()))?;
    let mut out = BufWriter::new(file);
    let summary = clean_dir(&args.input, &base, &mut out)?;
    out.flush()?;

    tracing::info!(
        written = summary.written,
        skipped = summary.skipped,
        output = %args.output.display(),
        "corpus written"
    );
    Ok(())
}
