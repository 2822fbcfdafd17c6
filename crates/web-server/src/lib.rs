use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use configuration::settings::Config;
use data_loader::SeriesLoader;
use recommender::{MetricsIndex, QueryService};
use std::collections::HashSet;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod access;
pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub service: Arc<QueryService>,
    /// Used to rebuild the index on reload.
    pub loader: SeriesLoader,
    pub trusted_clients: HashSet<IpAddr>,
}

impl AppState {
    pub fn new(
        service: Arc<QueryService>,
        loader: SeriesLoader,
        trusted_clients: impl IntoIterator<Item = IpAddr>,
    ) -> Self {
        Self {
            service,
            loader,
            trusted_clients: trusted_clients.into_iter().map(access::canonical).collect(),
        }
    }
}

/// Builds the application router. Everything except the health check is limited to
/// trusted clients.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let gated = Router::new()
        .route("/cryptos", get(handlers::list_symbols))
        .route("/cryptos/", get(handlers::list_symbols))
        .route("/cryptos/descending-normalized", get(handlers::get_descending_normalized))
        .route(
            "/cryptos/highest-normalized/:millis",
            get(handlers::get_highest_normalized_for_date),
        )
        .route(
            "/cryptos/:crypto/oldest-newest-min-max",
            get(handlers::get_oldest_newest_min_max),
        )
        .route("/cryptos/:crypto/metrics/:metric", get(handlers::get_metric))
        .route("/api/reload", post(handlers::reload_index))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            access::require_trusted_client,
        ));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(gated)
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// Loads every price source, builds the index and serves it until Ctrl-C.
///
/// Tracing must already be initialised by the caller.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let loader = SeriesLoader::from_settings(&config.data)?;
    let index = MetricsIndex::load(&loader).await?;
    let service = Arc::new(QueryService::new(index));

    serve(service, loader, &config).await
}

/// Serves an already-built index.
pub async fn serve(
    service: Arc<QueryService>,
    loader: SeriesLoader,
    config: &Config,
) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(
        service,
        loader,
        config.server.trusted_clients.iter().copied(),
    ));
    let app = build_router(state);

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        trusted_clients = ?config.server.trusted_clients,
        "Web server started and listening."
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        std::future::pending::<()>().await;
    }
}
