//! Route configuration.
//!
//! Routes are read from a TOML document whose `[routes]` table maps each
//! route definition to the controller action serving it. Key order matters,
//! because the table matches first-wins, and is kept exactly as written.
//!
//! ```toml
//! [environment]
//! name = "production"
//! base_url = "https://example.com"
//!
//! [routes]
//! "/testroute"               = { controller = "TestController",   action = "actionIndex" }
//! "/params/{string:myParam}" = { controller = "ParamsController", action = "actionIndex" }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::environment::Environment;
use crate::error::ConfigError;

/// The controller action a route definition resolves to.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RouteTarget {
    pub controller: String,
    pub action: String,
}

/// One configured route, in configuration order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RouteConfig {
    pub pattern: String,
    pub controller: String,
    pub action: String,
}

#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    environment: Environment,
    #[serde(default)]
    routes: toml::Table,
}

/// Parsed application configuration.
#[derive(Clone, Debug, Default)]
pub struct RoutesConfig {
    environment: Environment,
    routes: Vec<RouteConfig>,
}

impl RoutesConfig {
    /// An empty configuration for the given environment. Routes are added
    /// with [`route`](Self::route).
    pub fn new(environment: Environment) -> Self {
        Self { environment, routes: Vec::new() }
    }

    /// Append a route. Returns `self` for chaining.
    pub fn route(mut self, pattern: &str, controller: &str, action: &str) -> Self {
        self.routes.push(RouteConfig {
            pattern: pattern.to_owned(),
            controller: controller.to_owned(),
            action: action.to_owned(),
        });
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;

        let mut routes = Vec::with_capacity(raw.routes.len());
        for (pattern, value) in raw.routes {
            let target: RouteTarget = value.try_into().map_err(|e: toml::de::Error| ConfigError::Route {
                pattern: pattern.clone(),
                reason: e.message().to_owned(),
            })?;
            routes.push(RouteConfig { pattern, controller: target.controller, action: target.action });
        }

        Ok(Self { environment: raw.environment, routes })
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_owned(), source })?;
        Self::from_toml_str(&content)
    }

    pub fn environment(&self) -> &Environment { &self.environment }
    pub fn routes(&self) -> &[RouteConfig] { &self.routes }
}
