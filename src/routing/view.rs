//! View identifiers and the view registry.
//!
//! Views are opaque to the routing engine. A route only names a [`ViewId`];
//! the registry maps that identifier to something renderable.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Identifier of a dashboard page view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewId {
    Dashboard,
    Reports,
    ConfigCenter,
    MessageMonitor,
    MessageManager,
    TemplateMessageManager,
    TemplateManager,
    AIModelManager,
    ProjectDetail,
}

impl ViewId {
    pub const ALL: [ViewId; 9] = [
        ViewId::Dashboard,
        ViewId::Reports,
        ViewId::ConfigCenter,
        ViewId::MessageMonitor,
        ViewId::MessageManager,
        ViewId::TemplateMessageManager,
        ViewId::TemplateManager,
        ViewId::AIModelManager,
        ViewId::ProjectDetail,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewId::Dashboard => "Dashboard",
            ViewId::Reports => "Reports",
            ViewId::ConfigCenter => "ConfigCenter",
            ViewId::MessageMonitor => "MessageMonitor",
            ViewId::MessageManager => "MessageManager",
            ViewId::TemplateMessageManager => "TemplateMessageManager",
            ViewId::TemplateManager => "TemplateManager",
            ViewId::AIModelManager => "AIModelManager",
            ViewId::ProjectDetail => "ProjectDetail",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown view: {0}")]
pub struct UnknownView(pub String);

impl FromStr for ViewId {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownView(s.to_string()))
    }
}

/// A renderable unit the router can hand a resolved navigation to.
pub trait View: Send + Sync + fmt::Debug {
    /// The identifier routes use to reference this view.
    fn id(&self) -> ViewId;

    /// Client asset implementing the view (e.g. `views/Reports.vue`).
    fn component(&self) -> &str;
}

/// A view backed by a single client component asset.
#[derive(Debug, Clone)]
pub struct ComponentView {
    id: ViewId,
    component: String,
}

impl ComponentView {
    pub fn new(id: ViewId, component: impl Into<String>) -> Self {
        Self {
            id,
            component: component.into(),
        }
    }

    /// Conventional component location: `views/<Id>.vue`.
    pub fn conventional(id: ViewId) -> Self {
        Self::new(id, format!("views/{}.vue", id))
    }
}

impl View for ComponentView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn component(&self) -> &str {
        &self.component
    }
}

/// Registry resolving view identifiers to views.
#[derive(Debug, Clone, Default)]
pub struct ViewRegistry {
    views: HashMap<ViewId, Arc<dyn View>>,
}

impl ViewRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every dashboard view bound to its conventional component.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for id in ViewId::ALL {
            registry.register(Arc::new(ComponentView::conventional(id)));
        }
        registry
    }

    /// Register a view, replacing any previous view with the same id.
    pub fn register(&mut self, view: Arc<dyn View>) -> Option<Arc<dyn View>> {
        self.views.insert(view.id(), view)
    }

    pub fn resolve(&self, id: ViewId) -> Option<Arc<dyn View>> {
        self.views.get(&id).cloned()
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.views.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_id_round_trips_through_str() {
        for id in ViewId::ALL {
            assert_eq!(id.as_str().parse::<ViewId>().unwrap(), id);
        }
        assert!("NotAView".parse::<ViewId>().is_err());
    }

    #[test]
    fn test_default_registry_covers_all_views() {
        let registry = ViewRegistry::with_defaults();
        assert_eq!(registry.len(), ViewId::ALL.len());

        let view = registry.resolve(ViewId::AIModelManager).unwrap();
        assert_eq!(view.component(), "views/AIModelManager.vue");
    }

    #[test]
    fn test_register_replaces_existing_view() {
        let mut registry = ViewRegistry::with_defaults();
        let previous = registry.register(Arc::new(ComponentView::new(
            ViewId::Reports,
            "views/reports/Index.vue",
        )));

        assert!(previous.is_some());
        assert_eq!(
            registry.resolve(ViewId::Reports).unwrap().component(),
            "views/reports/Index.vue"
        );
    }
}
