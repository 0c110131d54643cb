//! The ordered route table.
//!
//! Entries are kept in configuration order and matched in that order: the
//! first entry that matches wins. Put specific routes before general ones
//! that share a prefix.

use std::slice;

use tracing::debug;

use crate::config::RoutesConfig;
use crate::error::RouteError;
use crate::extract::ExtractorRegistry;
use crate::pattern::RoutePattern;

/// A compiled pattern and the controller action it resolves to.
#[derive(Clone, Debug)]
pub struct RouteEntry {
    pattern: RoutePattern,
    controller: String,
    action: String,
}

impl RouteEntry {
    pub fn new(pattern: RoutePattern, controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self { pattern, controller: controller.into(), action: action.into() }
    }

    pub fn pattern(&self) -> &RoutePattern { &self.pattern }
    pub fn controller(&self) -> &str { &self.controller }
    pub fn action(&self) -> &str { &self.action }
}

/// Route entries in insertion order.
///
/// Built once during startup and read-only afterwards. Concurrent dispatches
/// share it without locking.
#[derive(Clone, Debug, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Compile every configured route, preserving configuration order.
    pub fn from_config(config: &RoutesConfig, extractors: &ExtractorRegistry) -> Result<Self, RouteError> {
        let mut table = Self::new();
        for route in config.routes() {
            let pattern = RoutePattern::compile(&route.pattern, extractors)?;
            debug!(pattern = %pattern, controller = %route.controller, action = %route.action, "route compiled");
            table.insert(RouteEntry::new(pattern, &route.controller, &route.action));
        }
        Ok(table)
    }

    /// Append `entry`. Identical patterns are not merged; the later one is
    /// reachable only for inputs no earlier entry accepts.
    pub fn insert(&mut self, entry: RouteEntry) {
        self.entries.push(entry);
    }

    /// Entries in insertion order. Can be called any number of times.
    pub fn entries(&self) -> slice::Iter<'_, RouteEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a RouteEntry;
    type IntoIter = slice::Iter<'a, RouteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(definition: &str, controller: &str) -> RouteEntry {
        let pattern = RoutePattern::compile(definition, &ExtractorRegistry::new()).unwrap();
        RouteEntry::new(pattern, controller, "actionIndex")
    }

    #[test]
    fn keeps_insertion_order_and_duplicates() {
        let mut table = RouteTable::new();
        table.insert(entry("/b", "B"));
        table.insert(entry("/a", "A"));
        table.insert(entry("/b", "B2"));

        let controllers: Vec<_> = table.entries().map(RouteEntry::controller).collect();
        assert_eq!(controllers, ["B", "A", "B2"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn entries_are_restartable() {
        let mut table = RouteTable::new();
        table.insert(entry("/a", "A"));
        table.insert(entry("/b", "B"));

        let first: Vec<_> = table.entries().map(|e| e.pattern().source().to_owned()).collect();
        let second: Vec<_> = (&table).into_iter().map(|e| e.pattern().source().to_owned()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn from_config_preserves_order() {
        let config = RoutesConfig::from_toml_str(
            r#"
            [routes]
            "/z" = { controller = "Z", action = "actionIndex" }
            "/a" = { controller = "A", action = "actionIndex" }
            "/m/{int:id}" = { controller = "M", action = "actionShow" }
            "#,
        )
        .unwrap();
        let table = RouteTable::from_config(&config, &ExtractorRegistry::new()).unwrap();
        let sources: Vec<_> = table.entries().map(|e| e.pattern().source()).collect();
        assert_eq!(sources, ["/z", "/a", "/m/{int:id}"]);
    }

    #[test]
    fn from_config_surfaces_compile_errors() {
        let config = RoutesConfig::from_toml_str(
            r#"
            [routes]
            "/x/{float:f}" = { controller = "X", action = "actionIndex" }
            "#,
        )
        .unwrap();
        let err = RouteTable::from_config(&config, &ExtractorRegistry::new()).unwrap_err();
        assert!(matches!(err, RouteError::UnknownParameterType { .. }));
    }
}
