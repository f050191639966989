//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation target (path, optional query/fragment)
//!     → router.rs (strip query, follow redirects)
//!     → table.rs (ordered lookup, first match wins)
//!     → matcher.rs (evaluate path pattern, capture params)
//!     → view.rs (resolve view id to a renderable view)
//!     → Return: Resolved navigation or NotFound
//!
//! Table Construction (at startup):
//!     RouteDescriptor[]
//!     → Parse and compile path patterns
//!     → Check unique paths, unique names, redirect targets
//!     → Check every view is registered
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex (segment matching only)
//! - Deterministic: same input always matches same route
//! - First match wins (table order)

pub mod descriptor;
pub mod error;
pub mod matcher;
pub mod router;
pub mod table;
pub mod view;

pub use descriptor::{RouteDescriptor, RouteMeta, RouteTarget};
pub use error::{NavigateError, TableError};
pub use matcher::Params;
pub use router::{Navigation, ResolvedRoute, Router};
pub use table::{build, RouteTable};
pub use view::{ComponentView, View, ViewId, ViewRegistry};
