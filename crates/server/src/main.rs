mod api;
mod dto;
mod state;

use crate::state::AppState;
use axum::routing::get;
use quai::source::Source;
use std::{sync::Arc, time::Instant};
use tracing::{error, info, warn};

const DEFAULT_PORT: u32 = 3000;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    info!("Starting server...");
    let args: Vec<_> = std::env::args().collect();
    if args.len() < 3 {
        error!("Usage: quai-server <validations.csv> <stations.csv>");
        std::process::exit(1);
    }
    let state = Arc::new(AppState::new(
        Source::parse(&args[1]),
        Source::parse(&args[2]),
    ));

    info!("Loading data...");
    let now = Instant::now();
    match state::load_dataset(&state).await {
        Ok(dataset) => info!(
            "Loading data took {:?}, {} joined rows",
            now.elapsed(),
            dataset.joined.len()
        ),
        Err((_, message)) => warn!("Starting without data: {message}"),
    }

    let app = axum::Router::new()
        .route("/dataset", get(api::dataset))
        .route("/day-types", get(api::day_types))
        .route("/stations", get(api::stations))
        .route("/summary", get(api::summary))
        .route("/records", get(api::records))
        .route("/profile", get(api::profile))
        .route("/distribution", get(api::distribution))
        .route("/heatmap", get(api::heatmap))
        .route("/map", get(api::map))
        .with_state(state);

    let port = port();
    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind port {port}: {err}");
            std::process::exit(1);
        }
    };
    info!("Listening to port {port}");
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server stopped: {err}");
    }
}

/// `QUAI_PORT` or [`DEFAULT_PORT`].
fn port() -> u32 {
    match std::env::var("QUAI_PORT") {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid QUAI_PORT {value}");
            DEFAULT_PORT
        }),
        Err(_) => DEFAULT_PORT,
    }
}
