use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use embed_files::{
    Config,
    content::{DEFAULT_COMPRESSION_LEVEL, DEFAULT_GZIP_THRESHOLD},
    mime::DEFAULT_FALLBACK_MIME_TYPE,
};
use tracing_subscriber::EnvFilter;

/// Generate a C/C++ header embedding the files matched by glob patterns.
#[derive(Debug, Parser)]
#[command(name = "embed-files", version)]
struct Cli {
    /// Space-separated glob patterns, relative to the current directory.
    patterns: String,

    /// Write the header here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Gzip files larger than this many bytes.
    #[arg(long, default_value_t = DEFAULT_GZIP_THRESHOLD)]
    gzip_threshold: usize,

    /// Gzip compression level.
    #[arg(long, default_value_t = DEFAULT_COMPRESSION_LEVEL, value_parser = clap::value_parser!(u32).range(0..=9))]
    level: u32,

    /// Content type for unrecognised extensions.
    #[arg(long, default_value = DEFAULT_FALLBACK_MIME_TYPE)]
    fallback_mime_type: String,

    /// Log every embedded file to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let invocation = std::env::args().collect::<Vec<_>>().join(" ");
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::new(cli.patterns)
        .gzip_threshold(cli.gzip_threshold)
        .level(cli.level)
        .fallback_mime_type(cli.fallback_mime_type)
        .provenance(invocation);

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    config
        .generate(&mut out)
        .context("generating embedded files")?;
    Ok(())
}
