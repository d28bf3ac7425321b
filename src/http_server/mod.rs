//! # HTTP Server Module
//!
//! Axum server for the site backend: public blog and contact endpoints,
//! the admin area, and the boundary where `AppError`s become responses.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/blog`, `/blog/:slug` - Published posts
//! - `/contact` - Contact form submissions
//! - `/admin`, `/admin/login` - Admin dashboard
//! - `/api/admin/blog` - Post management

pub mod admin_routes;
pub mod blog_routes;
pub mod boundary;
pub mod config;
pub mod contact_routes;
pub mod extract;
pub mod middleware;
pub mod observability_routes;
pub mod rate_limit;
pub mod server;
pub mod state;

pub use boundary::{error_body, ErrorReport};
pub use config::{Environment, RateLimitConfig, ServerConfig};
pub use server::{build_router, HttpServer};
pub use state::{AdminCredentials, AppState, CurrentUser};
