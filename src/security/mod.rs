//! Security subsystem.
//!
//! # Components
//! - headers.rs: security response headers
//! - limits.rs: request body limits
//!
//! # Design Decisions
//! - Headers are only added when the handler did not set them
//! - Limits are enforced before handlers run

pub mod headers;
pub mod limits;
