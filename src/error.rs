//! Error taxonomy.
//!
//! Three classes of failure, kept apart on purpose:
//!
//! - [`RouteError`]: configuration bugs found while building the route
//!   table. Fatal: the application refuses to start.
//! - [`ExtractionError`]: a path segment rejected by a typed extractor. Never
//!   surfaces on its own; the dispatcher skips the route entry and moves on.
//! - [`ActionError`]: raised inside a controller action. Parameter lookups
//!   that miss are programmer errors and are reported loudly.
//!
//! A request that matches no route is **not** an error. It is
//! [`Outcome::NotFound`](crate::Outcome::NotFound). A redirect is not an error
//! either: it is [`ActionResult::Redirect`](crate::ActionResult::Redirect).

use std::path::PathBuf;

/// A route definition or route table that cannot be served.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidRoutePattern { pattern: String, reason: String },

    #[error("unknown parameter type `{type_name}` in route `{pattern}`")]
    UnknownParameterType { pattern: String, type_name: String },

    #[error("parameter `{name}` declared twice in route `{pattern}`")]
    DuplicateParameterName { pattern: String, name: String },

    #[error("route `{pattern}` targets unregistered controller `{controller}`")]
    UnknownController { pattern: String, controller: String },

    #[error("route `{pattern}` targets unknown action `{controller}::{action}`")]
    UnknownAction { pattern: String, controller: String, action: String },
}

impl RouteError {
    pub(crate) fn invalid(pattern: &str, reason: impl Into<String>) -> Self {
        Self::InvalidRoutePattern { pattern: pattern.to_owned(), reason: reason.into() }
    }
}

/// Why a typed extractor rejected a raw path segment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    #[error("empty path segment")]
    EmptySegment,

    #[error("segment `{segment}` is not a valid {kind}")]
    Invalid { kind: &'static str, segment: String },
}

/// Failure inside a controller action.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// The action asked for a parameter its route never declared.
    #[error("route parameter `{0}` not found")]
    ParameterNotFound(String),

    /// The parameter exists but holds a different type than requested.
    #[error("route parameter `{name}` is not a {expected}")]
    ParameterType { name: String, expected: &'static str },

    #[error("controller `{controller}` has no action `{action}`")]
    UnknownAction { controller: String, action: String },

    /// Anything else the action itself reports.
    #[error(transparent)]
    Failed(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Route configuration that cannot be read or understood.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("route `{pattern}`: {reason}")]
    Route { pattern: String, reason: String },
}

/// The error type returned while assembling an [`App`](crate::App).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Route(#[from] RouteError),
}
