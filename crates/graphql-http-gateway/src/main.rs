//! graphql-http-gateway binary: reads configuration, builds the schema once
//! and serves it until Ctrl-C.

use clap::Parser;
use graphql_http_gateway::config::Config;
use graphql_http_gateway::use_cases::ports::Server;
use graphql_http_gateway::use_cases::Pipeline;
use graphql_http_gateway::{build_schema, AsyncGraphQL, Axum};
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    setup_tracing(&config.log);
    config.validate()?;
    info!(?config, "starting graphql-http-gateway");

    let executor = AsyncGraphQL::new(build_schema());
    let pipeline = Pipeline::new(executor).with_timeout(config.request_timeout());

    Axum::new(config.addr())
        .run(
            pipeline,
            Some(|addr: SocketAddr| info!(%addr, "ready")),
            shutdown_signal(),
        )
        .await?;

    info!("shutdown");
    Ok(())
}

fn setup_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(?e, "failed to install Ctrl-C handler");
    }
}
