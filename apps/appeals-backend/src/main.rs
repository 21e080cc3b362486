use std::net::SocketAddr;

use anyhow::Result;
use appeals_backend::config::{Config, DEFAULT_BIND_ADDR};
use appeals_backend::{AppState, build_router};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "appeals-backend", about = "In-memory appeals backend")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = DEFAULT_BIND_ADDR)]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = Config {
        bind_addr: args.bind,
        ..Config::default()
    };

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "appeals backend listening");
    let state = AppState::new(config);
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
