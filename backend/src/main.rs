use std::{net::SocketAddr, sync::Arc};

use backend::{AppState, config::Config, create_router, providers::LiveProviders};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Trip-planning API with weather hazard alerts along the route"
)]
struct Args {
    /// Socket address to serve the API on
    #[arg(long, default_value = "0.0.0.0:8080")]
    addr: SocketAddr,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = Config::from_env();
    if !config.keys_present() {
        tracing::warn!(
            "MAPBOX_ACCESS_TOKEN and/or NL_PARSER_API_KEY are not set; trip queries will fail"
        );
    }

    let providers = LiveProviders::new(config).expect("build http client");
    let state = AppState {
        providers: Arc::new(providers),
    };
    let app = create_router(state);

    tracing::info!("starting backend on http://{}", args.addr);
    axum::serve(tokio::net::TcpListener::bind(args.addr).await.unwrap(), app)
        .await
        .unwrap();
}
