use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use time::format_description::well_known::Rfc3339;
use tracing_subscriber::{fmt, EnvFilter};
use voiddocs_core::CorpusSource;
use voiddocs_crawler::{DocsCrawler, SourceArgs};

#[derive(Parser, Debug)]
#[command(name = "voiddocs-crawl")]
#[command(about = "Crawl the Void handbook and man pages into JSONL passages without touching the index")]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,
    /// Output JSONL file path
    #[arg(long, default_value = "./sample_data/passages.jsonl")]
    output: String,
}

#[derive(Serialize)]
struct OutPassage<'a> {
    title: &'a str,
    content: &'a str,
    source: &'a str,
    tokens: usize,
    timestamp: &'a str,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let args = Cli::parse();
    if let Some(dir) = std::path::Path::new(&args.output).parent() {
        fs::create_dir_all(dir).ok();
    }

    let crawler = DocsCrawler::new(args.source.into_config());
    let corpus = crawler.build();

    let ts = time::OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default();
    let mut out = BufWriter::new(File::create(&args.output)?);
    for (p, tokens) in corpus.passages().iter().zip(corpus.tokens()) {
        let rec = OutPassage { title: &p.title, content: &p.content, source: &p.source, tokens: tokens.len(), timestamp: &ts };
        serde_json::to_writer(&mut out, &rec)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    tracing::info!(passages = corpus.len(), output = %args.output, "done");
    Ok(())
}
