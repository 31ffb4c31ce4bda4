use anyhow::Result;
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::io::Write;
use tracing_subscriber::{fmt, EnvFilter};
use voiddocs_core::engine::{SearchEngine, DEFAULT_TOP_N};
use voiddocs_core::persist::{read_index, IndexStore, INDEX_VERSION};
use voiddocs_crawler::{DocsCrawler, SourceArgs};

#[derive(Parser)]
#[command(name = "voiddocs")]
#[command(about = "Search and maintain the Void Linux handbook index", long_about = None)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank handbook passages for a free-text query (builds the index on first use)
    Search {
        /// Query text
        #[arg(required = true)]
        query: Vec<String>,
        /// Number of passages to return
        #[arg(short, long, default_value_t = DEFAULT_TOP_N)]
        n: usize,
    },
    /// Crawl every source again and overwrite the cached index
    Rebuild,
    /// Show what the cached index contains
    Inspect,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();
    let config = cli.source.into_config();
    let store = IndexStore::new(&config.cache_dir);

    match cli.command {
        Commands::Search { query, n } => {
            let mut engine = SearchEngine::new(DocsCrawler::new(config), store);
            println!("{}", engine.search(&query.join(" "), n).join("\n\n"));
        }
        Commands::Rebuild => {
            let mut engine = SearchEngine::new(DocsCrawler::new(config), store);
            let count = engine.rebuild();
            println!("Index rebuilt with {count} chunks.");
        }
        Commands::Inspect => inspect(&store, &mut std::io::stdout().lock())?,
    }
    Ok(())
}

/// Describe the cached index. An unreadable index is reported, not returned as an error.
fn inspect<W: Write>(store: &IndexStore, out: &mut W) -> Result<()> {
    writeln!(out, "index: {}", store.paths().index_file().display())?;
    let file = match read_index(store.paths()) {
        Ok(Some(file)) => file,
        Ok(None) => {
            writeln!(out, "no index built yet")?;
            return Ok(());
        }
        Err(e) => {
            writeln!(out, "unreadable index: {e:#}")?;
            return Ok(());
        }
    };
    writeln!(out, "version: {} (current {})", file.version, INDEX_VERSION)?;
    writeln!(out, "created: {}", file.created_at)?;
    let man = file.passages.iter().filter(|p| p.is_man_page()).count();
    writeln!(out, "passages: {} ({} handbook, {} man)", file.passages.len(), file.passages.len() - man, man)?;

    let mut per_source: BTreeMap<&str, usize> = BTreeMap::new();
    for p in &file.passages {
        *per_source.entry(p.source.as_str()).or_insert(0) += 1;
    }
    for (source, count) in per_source {
        writeln!(out, "  {count:>4}  {source}")?;
    }
    Ok(())
}
