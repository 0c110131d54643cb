//! Controller resolution.
//!
//! Maps the controller identifiers used in route configuration to live
//! controller instances. The registry is built by the application and passed
//! to the [`Dispatcher`](crate::Dispatcher) explicitly; nothing is looked up
//! through global state.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::controller::Controller;

/// Shared handle to a registered controller.
pub type SharedController = Arc<dyn Controller>;

/// Controllers by identifier.
#[derive(Clone, Default)]
pub struct ControllerRegistry {
    controllers: HashMap<String, SharedController>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self { controllers: HashMap::new() }
    }

    /// Register `controller` under `id`. Returns `self` for chaining.
    ///
    /// ```rust
    /// use vireo::{ActionController, ControllerRegistry, RouteParams};
    ///
    /// let registry = ControllerRegistry::new()
    ///     .register("TestController", ActionController::new("TestController")
    ///         .action("actionIndex", |_: &RouteParams| "test"));
    /// assert!(registry.resolve("TestController").is_some());
    /// assert!(registry.resolve("OtherController").is_none());
    /// ```
    pub fn register(self, id: impl Into<String>, controller: impl Controller) -> Self {
        self.register_shared(id, Arc::new(controller))
    }

    /// Register an already shared controller, e.g. one instance under
    /// several identifiers.
    pub fn register_shared(mut self, id: impl Into<String>, controller: SharedController) -> Self {
        self.controllers.insert(id.into(), controller);
        self
    }

    pub fn resolve(&self, id: &str) -> Option<&SharedController> {
        self.controllers.get(id)
    }

    pub fn len(&self) -> usize { self.controllers.len() }
    pub fn is_empty(&self) -> bool { self.controllers.is_empty() }
}

impl fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.controllers.keys().collect();
        ids.sort();
        f.debug_struct("ControllerRegistry").field("controllers", &ids).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ActionController;
    use crate::params::RouteParams;

    #[test]
    fn one_instance_under_two_ids() {
        let shared: SharedController =
            Arc::new(ActionController::new("Home").action("actionIndex", |_: &RouteParams| "home"));
        let registry = ControllerRegistry::new()
            .register_shared("HomeController", Arc::clone(&shared))
            .register_shared("App\\HomeController", shared);

        assert_eq!(registry.len(), 2);
        let a = registry.resolve("HomeController").unwrap();
        let b = registry.resolve("App\\HomeController").unwrap();
        assert!(Arc::ptr_eq(a, b));
    }
}
