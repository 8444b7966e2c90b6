use std::{error::Error, net::SocketAddr, sync::Arc};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use expense_tracker::{AppState, Config, GeminiClient, build_router, graceful_shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_logging();

    let config = Config::parse();

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));

    let conn = Connection::open(&config.db_path).inspect_err(|error| {
        tracing::error!("Could not open database at {}: {error}", config.db_path)
    })?;
    let text_generator = GeminiClient::new(
        &config.gemini_api_key,
        &config.gemini_model,
        config.summary_timeout(),
    )?;
    let state = AppState::new(conn, Arc::new(text_generator))?;

    let router = build_router(state, &config.allowed_origins).inspect_err(|error| {
        tracing::error!("Could not configure CORS: {error}");
    })?;
    let router = add_tracing_layer(router);

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are logged where they are converted into responses.
        .on_failure(());

    router.layer(tracing_layer)
}
