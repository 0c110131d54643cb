//! The controller contract and closure-based controllers.
//!
//! # How actions are stored
//!
//! A controller holds actions of *different* closure types under one map, so
//! each one is erased behind `dyn ErasedAction`:
//!
//! ```text
//! fn show(params: &RouteParams) -> Result<String, ActionError> { … }  ← user writes this
//!        ↓ ActionController::new("Posts").action("actionShow", show)
//! show.into_boxed_action()                     ← Action blanket impl
//!        ↓
//! Arc::new(FnAction(show))                     ← stored as BoxedAction
//!        ↓
//! action.call(params) at dispatch time         ← one virtual call
//!        ↓
//! show(params)?.into_action_result()           ← ActionResult
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::ActionError;
use crate::params::RouteParams;
use crate::response::{IntoResponse, Redirect, Response};

// ── ActionResult ──────────────────────────────────────────────────────────────

/// What a controller action produced.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ActionResult {
    /// A payload for the response layer.
    Rendered(Response),
    /// Send the client elsewhere instead of rendering.
    Redirect(Redirect),
}

/// Conversion into an [`ActionResult`].
///
/// Anything that is [`IntoResponse`] renders; a [`Redirect`] redirects.
/// `Result<T, E>` propagates the error as an [`ActionError`].
pub trait IntoActionResult {
    fn into_action_result(self) -> Result<ActionResult, ActionError>;
}

impl<T: IntoResponse> IntoActionResult for T {
    fn into_action_result(self) -> Result<ActionResult, ActionError> {
        Ok(ActionResult::Rendered(self.into_response()))
    }
}

impl IntoActionResult for Redirect {
    fn into_action_result(self) -> Result<ActionResult, ActionError> {
        Ok(ActionResult::Redirect(self))
    }
}

impl IntoActionResult for ActionResult {
    fn into_action_result(self) -> Result<ActionResult, ActionError> {
        Ok(self)
    }
}

impl<T, E> IntoActionResult for Result<T, E>
where
    T: IntoActionResult,
    E: Into<ActionError>,
{
    fn into_action_result(self) -> Result<ActionResult, ActionError> {
        match self {
            Ok(value) => value.into_action_result(),
            Err(e) => Err(e.into()),
        }
    }
}

// ── Controller ────────────────────────────────────────────────────────────────

/// The capability every dispatch target implements.
///
/// Controllers are shared across concurrent dispatches and must not rely on
/// per-request mutable state; everything request-specific arrives through
/// [`RouteParams`].
///
/// ```rust
/// use vireo::{ActionError, ActionResult, Controller, IntoActionResult, RouteParams};
///
/// struct Greeter;
///
/// impl Controller for Greeter {
///     fn has_action(&self, action: &str) -> bool {
///         action == "actionHello"
///     }
///
///     fn invoke(&self, action: &str, params: &RouteParams) -> Result<ActionResult, ActionError> {
///         match action {
///             "actionHello" => format!("hello {}", params.str_param("name")?).into_action_result(),
///             _ => Err(ActionError::UnknownAction { controller: "Greeter".into(), action: action.into() }),
///         }
///     }
/// }
/// ```
pub trait Controller: Send + Sync + 'static {
    /// Whether `action` can be invoked. Checked once per route at startup.
    fn has_action(&self, action: &str) -> bool;

    /// Run `action` with the parameters bound by the matched route.
    fn invoke(&self, action: &str, params: &RouteParams) -> Result<ActionResult, ActionError>;
}

// ── Action ────────────────────────────────────────────────────────────────────

#[doc(hidden)]
pub trait ErasedAction {
    fn call(&self, params: &RouteParams) -> Result<ActionResult, ActionError>;
}

#[doc(hidden)]
pub type BoxedAction = Arc<dyn ErasedAction + Send + Sync + 'static>;

/// Implemented for every function usable as a controller action:
///
/// ```text
/// fn name(params: &RouteParams) -> impl IntoActionResult
/// ```
///
/// Sealed; only the blanket impl below satisfies it.
pub trait Action: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_action(self) -> BoxedAction;
}

mod private {
    pub trait Sealed {}
}

impl<F, R> private::Sealed for F
where
    F: Fn(&RouteParams) -> R + Send + Sync + 'static,
    R: IntoActionResult,
{
}

impl<F, R> Action for F
where
    F: Fn(&RouteParams) -> R + Send + Sync + 'static,
    R: IntoActionResult,
{
    fn into_boxed_action(self) -> BoxedAction {
        Arc::new(FnAction(self))
    }
}

struct FnAction<F>(F);

impl<F, R> ErasedAction for FnAction<F>
where
    F: Fn(&RouteParams) -> R + Send + Sync,
    R: IntoActionResult,
{
    fn call(&self, params: &RouteParams) -> Result<ActionResult, ActionError> {
        (self.0)(params).into_action_result()
    }
}

// ── ActionController ──────────────────────────────────────────────────────────

/// A controller assembled from named action functions.
///
/// ```rust
/// use vireo::{ActionController, ActionError, Controller, Redirect, RouteParams};
///
/// fn show(params: &RouteParams) -> Result<String, ActionError> {
///     Ok(format!("post {}", params.int_param("id")?))
/// }
///
/// let posts = ActionController::new("PostsController")
///     .action("actionShow", show)
///     .action("actionOld", |_: &RouteParams| Redirect::with_status("/posts", 301));
///
/// assert!(posts.has_action("actionShow"));
/// assert!(!posts.has_action("actionDelete"));
/// ```
pub struct ActionController {
    name: String,
    actions: HashMap<String, BoxedAction>,
}

impl ActionController {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), actions: HashMap::new() }
    }

    /// Register `action` under `name`. Returns `self` for chaining.
    pub fn action(mut self, name: &str, action: impl Action) -> Self {
        self.actions.insert(name.to_owned(), action.into_boxed_action());
        self
    }

    pub fn name(&self) -> &str { &self.name }
}

impl Controller for ActionController {
    fn has_action(&self, action: &str) -> bool {
        self.actions.contains_key(action)
    }

    fn invoke(&self, action: &str, params: &RouteParams) -> Result<ActionResult, ActionError> {
        match self.actions.get(action) {
            Some(a) => a.call(params),
            None => Err(ActionError::UnknownAction {
                controller: self.name.clone(),
                action: action.to_owned(),
            }),
        }
    }
}

impl fmt::Debug for ActionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut actions: Vec<_> = self.actions.keys().collect();
        actions.sort();
        f.debug_struct("ActionController")
            .field("name", &self.name)
            .field("actions", &actions)
            .finish()
    }
}
