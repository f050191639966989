//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, route table dry run)
//!     → RouterConfig (validated, immutable)
//!     → navigation section compiled into the Router once at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload because the
//!   route table must not change for the lifetime of the process
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::RouterConfig;
pub use schema::ListenerConfig;
pub use schema::NavigationConfig;
pub use schema::ObservabilityConfig;
pub use schema::RouteConfig;
pub use schema::ViewConfig;
