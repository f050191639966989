//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Dry-run the route table so authoring defects fail at load time
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::RouterConfig;
use crate::routing::TableError;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// An address field does not parse as `host:port`.
    InvalidAddress { field: &'static str, value: String },
    /// A numeric field must be greater than zero.
    Zero(&'static str),
    /// Unknown log output format.
    InvalidLogFormat(String),
    /// A route sets both or neither of `view` and `redirect`.
    RouteTarget { path: String },
    /// The route table is not valid.
    Routes(TableError),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidAddress { field, value } => {
                write!(f, "{} is not a valid socket address: {:?}", field, value)
            }
            ValidationError::Zero(field) => write!(f, "{} must be greater than zero", field),
            ValidationError::InvalidLogFormat(format) => {
                write!(f, "unknown log format {:?} (expected pretty, compact or json)", format)
            }
            ValidationError::RouteTarget { path } => {
                write!(f, "route {:?} must set exactly one of `view` and `redirect`", path)
            }
            ValidationError::Routes(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a parsed configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::Zero("security.max_body_size"));
    }

    if !matches!(config.observability.log_format.as_str(), "pretty" | "compact" | "json") {
        errors.push(ValidationError::InvalidLogFormat(
            config.observability.log_format.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    let mut targets_ok = true;
    for route in &config.navigation.routes {
        if route.to_descriptor().is_none() {
            targets_ok = false;
            errors.push(ValidationError::RouteTarget {
                path: route.path.clone(),
            });
        }
    }

    // Only dry-run a table whose entries all converted, otherwise the
    // skipped entries would surface as misleading follow-on errors.
    if targets_ok {
        if let Err(e) = config.navigation.build_router() {
            errors.push(ValidationError::Routes(e));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
