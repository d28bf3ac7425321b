//! # HTTP Server
//!
//! Combines the route groups behind the middleware chain.
//!
//! Layers, outermost first: error rendering, security headers, panic
//! boundary, CORS, request logging, authentication, guard, rate limiting.

use std::net::SocketAddr;
use std::panic;
use std::sync::Arc;

use axum::middleware::{from_fn, from_fn_with_state};
use axum::Router;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::errors::{AppError, AppResult};

use super::admin_routes::admin_routes;
use super::blog_routes::blog_routes;
use super::boundary::{panic_response, render_errors};
use super::config::ServerConfig;
use super::contact_routes::contact_routes;
use super::middleware::{authenticate, guard, rate_limit, request_logger, security_headers};
use super::observability_routes::health_routes;
use super::state::AppState;

/// HTTP server for the site backend
pub struct HttpServer {
    state: Arc<AppState>,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    /// Create a new HTTP server with custom configuration
    pub fn with_config(config: ServerConfig) -> Self {
        Self::with_state(Arc::new(AppState::new(config)))
    }

    /// Create a server around existing state
    pub fn with_state(state: Arc<AppState>) -> Self {
        let router = build_router(state.clone());
        Self { state, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.state.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server
    pub async fn start(self) -> AppResult<()> {
        let raw = self.state.config.socket_addr();
        let addr: SocketAddr = raw.parse().map_err(|_| {
            AppError::validation("Invalid socket address").with_field("address", raw.as_str())
        })?;

        install_panic_hook();

        let listener = TcpListener::bind(addr).await?;
        self.state.logger.info(
            "Server listening",
            Some(json!({
                "address": addr.to_string(),
                "environment": self.state.config.environment.to_string(),
                "health": format!("http://{}/health", addr),
            })),
        );

        axum::serve(
            listener,
            self.router
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await?;

        Ok(())
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the combined router with all endpoints
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .merge(health_routes())
        .merge(blog_routes())
        .merge(contact_routes())
        .merge(admin_routes())
        .fallback(not_found)
        .layer(from_fn_with_state(state.clone(), rate_limit))
        .layer(from_fn(guard))
        .layer(from_fn_with_state(state.clone(), authenticate))
        .layer(from_fn_with_state(state.clone(), request_logger))
        .layer(cors)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(from_fn_with_state(state.clone(), security_headers))
        .layer(from_fn_with_state(state.clone(), render_errors))
        .with_state(state)
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn not_found(uri: axum::http::Uri) -> AppError {
    AppError::not_found("Route not found").with_field("path", uri.path())
}

/// Errors raised through `result::unwrap` are reported by the boundary;
/// keep the default hook for every other panic.
fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if info.payload().is::<AppError>() {
            return;
        }
        default_hook(info);
    }));
}
