//! Deployment environment descriptor.

use serde::Deserialize;

const PRODUCTION: &str = "production";
const DEVELOPMENT: &str = "development";

/// Where the application runs and how it is reached from outside.
///
/// `name` drives error reporting: anything other than `"production"` shows
/// error details in responses. `base_url` anchors relative redirects.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Environment {
    name: String,
    base_url: String,
}

impl Environment {
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self { name: name.into(), base_url: base_url.into() }
    }

    pub fn development(base_url: impl Into<String>) -> Self {
        Self::new(DEVELOPMENT, base_url)
    }

    pub fn production(base_url: impl Into<String>) -> Self {
        Self::new(PRODUCTION, base_url)
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn base_url(&self) -> &str { &self.base_url }

    pub fn is_production(&self) -> bool {
        self.name == PRODUCTION
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::development("http://localhost")
    }
}
