//! Request limits.
//!
//! # Responsibilities
//! - Enforce maximum request body size
//!
//! # Design Decisions
//! - Limits checked before handlers run (early rejection)
//! - Return 413 Payload Too Large

use tower_http::limit::RequestBodyLimitLayer;

use crate::config::schema::SecurityConfig;

/// Body limit layer for the configured maximum size.
pub fn body_limit_layer(config: &SecurityConfig) -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(config.max_body_size)
}
