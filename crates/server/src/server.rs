use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    Router,
};
use imagefit_core::{CoreConfig, ServerConfig};
use imagefit_imaging::{ImageEngine, RasterEngine};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::{
    middleware::request_id_middleware,
    routes::{create_router, AppState},
    ServerError, ServerResult,
};

/// Main server struct that manages the HTTP server and the image engine
pub struct Server {
    router: Router,
    addr: SocketAddr,
}

impl Server {
    /// Create a new server instance with the provided configuration
    pub fn new(config: CoreConfig) -> ServerResult<Self> {
        info!("Initializing imagefit server...");

        let engine = Arc::new(RasterEngine::new()) as Arc<dyn ImageEngine>;
        let state = AppState { engine };

        let router = create_app_router(state, &config.server);

        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| ServerError::Internal(format!("Invalid server address: {}", e)))?;

        Ok(Self { router, addr })
    }

    /// Start the server and listen for incoming connections
    pub async fn serve(self) -> ServerResult<()> {
        info!("Starting server on {}", self.addr);

        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(|e| ServerError::Internal(format!("Failed to bind to address: {}", e)))?;

        info!("Server listening on http://{}", self.addr);
        info!("Resize form available at http://{}/", self.addr);
        info!("Health check available at http://{}/api/health", self.addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

        info!("Server shutdown complete");
        Ok(())
    }
}

/// Create the main application router with full middleware stack
fn create_app_router(state: AppState, config: &ServerConfig) -> Router {
    let cors_layer = if config.cors_origins.contains(&"*".to_string()) {
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .max_age(Duration::from_secs(3600))
    } else {
        CorsLayer::new()
            .allow_origin(
                config
                    .cors_origins
                    .iter()
                    .filter_map(|origin| origin.parse::<HeaderValue>().ok())
                    .collect::<Vec<_>>(),
            )
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .allow_credentials(true)
            .max_age(Duration::from_secs(3600))
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // PNG responses are already compressed; the default predicate skips
    // image content types, so this only benefits the form and JSON bodies
    let compression_layer = CompressionLayer::new().br(true).gzip(true);

    let timeout_layer = TimeoutLayer::new(Duration::from_secs(config.request_timeout));

    let middleware_stack = ServiceBuilder::new()
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors_layer)
        .layer(compression_layer)
        .layer(timeout_layer)
        .layer(DefaultBodyLimit::max(config.max_request_size));

    create_router(state).layer(middleware_stack)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
