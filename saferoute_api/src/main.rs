mod chat;
mod config;
mod directions;
mod error;
mod events;
mod extract;
mod incidents;
mod places;
mod route_analysis;
mod routes;
mod state;
mod weather;

#[cfg(test)]
mod test_utils;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::Method;
use axum::serve;
use clap::Parser;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{Level, info};

use crate::config::Config;
use crate::routes::api_routes;
use crate::state::AppState;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Address the HTTP server listens on
    #[arg(long, env = "SAFEROUTE_BIND_ADDRESS", default_value = "127.0.0.1:5000")]
    bind: SocketAddr,

    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .init();

    let config = Config::from_env().context("Invalid configuration")?;
    let state = Arc::new(AppState::new(config));

    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);

    let app = api_routes(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer),
    );

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("Could not bind {}", cli.bind))?;

    info!("Listening on http://{}", cli.bind);

    serve(listener, app).await?;

    Ok(())
}
