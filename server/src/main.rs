use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};
use voiddocs_core::persist::IndexStore;
use voiddocs_core::SearchEngine;
use voiddocs_crawler::{DocsCrawler, SourceArgs};
use voiddocs_server::{build_app, shared, DynSource};

#[derive(Parser)]
struct Args {
    #[command(flatten)]
    source: SourceArgs,
    /// Host to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Load (or build) the index before accepting requests
    #[arg(long, default_value_t = false)]
    warm: bool,
}

// Not #[tokio::main]: warm-up may crawl with the blocking HTTP client, which
// cannot run on an async worker thread.
fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let args = Args::parse();
    let config = args.source.into_config();

    let store = IndexStore::new(&config.cache_dir);
    let source: DynSource = Box::new(DocsCrawler::new(config));
    let engine = shared(SearchEngine::new(source, store));
    if args.warm {
        let loaded = engine.lock().warm();
        tracing::info!(loaded, passages = engine.lock().len(), "index warmed");
    }

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(async {
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "server listening");
        axum::serve(listener, build_app(engine.clone())).await?;
        anyhow::Ok(())
    })
}
