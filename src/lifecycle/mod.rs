//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Build route table → Start metrics → Bind listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Broadcast → Server drains connections → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then route table, then listeners
//! - The route table is built exactly once, before any traffic

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
