//! Shared server state

use std::sync::Arc;

use serde::Serialize;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::blog::{seed_posts, BlogRepository, InMemoryBlogStore};
use crate::observability::Logger;

use super::config::ServerConfig;
use super::rate_limit::RateLimiter;

/// Signed-in user, attached to the request by the auth middleware
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    pub name: String,
    pub role: String,
}

impl CurrentUser {
    pub fn admin() -> Self {
        Self {
            name: "Admin".to_string(),
            role: "Administrator".to_string(),
        }
    }
}

/// Admin session check.
///
/// Only the SHA-256 of the configured token is kept; presented tokens are
/// hashed and compared in constant time.
#[derive(Debug, Clone, Default)]
pub struct AdminCredentials {
    token_hash: Option<[u8; 32]>,
}

impl AdminCredentials {
    pub fn new(token: Option<&str>) -> Self {
        Self {
            token_hash: token.map(hash_token),
        }
    }

    /// Resolve a presented session token to a user
    pub fn authenticate(&self, presented: &str) -> Option<CurrentUser> {
        let expected = self.token_hash.as_ref()?;
        let presented = hash_token(presented);
        if bool::from(expected.as_slice().ct_eq(presented.as_slice())) {
            Some(CurrentUser::admin())
        } else {
            None
        }
    }
}

fn hash_token(token: &str) -> [u8; 32] {
    Sha256::digest(token.as_bytes()).into()
}

/// State shared by every handler and middleware
pub struct AppState {
    pub config: ServerConfig,
    pub logger: Arc<Logger>,
    pub blog: Arc<dyn BlogRepository>,
    pub limiter: RateLimiter,
    pub admin: AdminCredentials,
}

impl AppState {
    /// State with the seeded in-memory blog store
    pub fn new(config: ServerConfig) -> Self {
        Self::with_store(config, Arc::new(InMemoryBlogStore::with_posts(seed_posts())))
    }

    /// State backed by the given blog store
    pub fn with_store(config: ServerConfig, blog: Arc<dyn BlogRepository>) -> Self {
        let logger = Arc::new(Logger::new(config.logger_config()));
        let limiter = RateLimiter::new(config.rate_limit);
        let admin = AdminCredentials::new(config.admin_token.as_deref());
        Self {
            config,
            logger,
            blog,
            limiter,
            admin,
        }
    }

    /// Whether error bodies may carry internal detail
    pub fn expose_error_details(&self) -> bool {
        !self.config.is_production()
    }
}
