use shop_hex::config::Config;
use shop_hex::inbound::http::{HttpServer, HttpServerConfig};
use shop_repo::{build_repo, Repo};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for DATABASE_URL / SERVER_PORT when present.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string()))
        .init();

    let config = Config::from_env()?;
    let repo: Repo = build_repo(config.database_url.as_deref(), config.db_pool_max).await?;

    let server_cfg = HttpServerConfig {
        port: config.server_port.clone(),
        session_ttl_secs: config.session_ttl_secs,
    };

    let http = HttpServer::new(repo, server_cfg).await?;
    http.run().await
}
