use anyhow::Result;
use clap::Parser;
use copa_news::{MemoryCache, NewsApiClient, NewsService};
use copa_store::{JsonRegistrationStore, JsonUserStore, SessionAuth};
use copa_web::{create_app, AppState};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Copa PassaBola tournament backend
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Address to bind the HTTP server on
    #[arg(long, default_value = "0.0.0.0:5001")]
    bind: SocketAddr,

    /// Directory holding the JSON data files
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// API key for the news upstream
    #[arg(long, env = "NEWSAPI_KEY", default_value = "dev-key-local")]
    newsapi_key: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let news = NewsService::new(
        Arc::new(NewsApiClient::new(args.newsapi_key)),
        Arc::new(MemoryCache::default()),
    );

    let state = AppState {
        news,
        users: Arc::new(JsonUserStore::new(&args.data_dir)),
        registrations: Arc::new(JsonRegistrationStore::new(&args.data_dir)),
        auth: Arc::new(SessionAuth::default()),
    };

    let app = create_app(state).await;

    info!(bind = %args.bind, data_dir = %args.data_dir.display(), "server starting");
    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
