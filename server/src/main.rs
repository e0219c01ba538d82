use anyhow::Result;
use axum::Router;
use clap::Parser;
use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};
use docs_server::build_app;
use tokio::net::TcpListener;

#[derive(Parser)]
struct Args {
    /// Directory of scraped documentation pages (JSON/JSONL)
    #[arg(long, default_value = "./data/docs_tavily")]
    corpus: String,
    /// Host to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    tracing::info!(corpus = %args.corpus, "loading documentation corpus");
    // The index is fully built here; nothing is served until it is.
    let app: Router = build_app(args.corpus.clone())?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
