//! Routing error types.

use thiserror::Error;

use crate::routing::view::ViewId;

/// Authoring defects detected while building a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Path pattern is malformed.
    #[error("invalid route path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// Two routes share the same (normalized) path.
    #[error("duplicate route path {path:?} (conflicts with {existing:?})")]
    DuplicatePath { path: String, existing: String },

    /// Two routes share the same name.
    #[error("duplicate route name {0:?}")]
    DuplicateName(String),

    /// A redirect points at a path no route matches.
    #[error("route {from:?} redirects to {to:?}, which matches no route")]
    UnknownRedirectTarget { from: String, to: String },

    /// Following redirects from a route never reaches a view.
    #[error("redirect cycle starting at {0:?}")]
    RedirectCycle(String),

    /// A route references a view the registry cannot resolve.
    #[error("route {path:?} references unregistered view {view}")]
    UnregisteredView { path: String, view: ViewId },
}

/// Errors from programmatic (by-name) navigation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigateError {
    #[error("no route named {0:?}")]
    UnknownRoute(String),

    #[error("route {route:?} requires parameter {param:?}")]
    MissingParam { route: String, param: String },

    #[error("parameter {param:?} must be a single non-empty path segment")]
    InvalidParam { param: String },
}
