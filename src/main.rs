use bacon_edge::cache::ParagraphCache;
use bacon_edge::gateway::{app, AppState};
use bacon_edge::upstream::{BaconIpsumClient, DEFAULT_BASE_URL};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

const CACHE_TTL: Duration = Duration::from_secs(60 * 60); // 1 hour

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let addr: SocketAddr = env_or("BACON_EDGE_ADDR", "127.0.0.1:8080").parse()?;
    let base_url = env_or("BACON_EDGE_UPSTREAM", DEFAULT_BASE_URL);
    let cache_capacity: u64 = env_or("BACON_EDGE_CACHE_CAPACITY", "1024").parse()?;
    let auth_token = std::env::var("BACON_EDGE_TOKEN").ok();

    let cache = ParagraphCache::new(cache_capacity, CACHE_TTL);
    let client = BaconIpsumClient::new(base_url);

    let state = Arc::new(AppState {
        cache,
        source: client,
        auth_token,
    });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("bacon-edge listening on {}", addr);
    axum::serve(listener, app(state)).await?;

    Ok(())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
