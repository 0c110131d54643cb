//! Parameters bound by a successful route match.

use std::collections::HashMap;

use crate::error::ActionError;
use crate::extract::ParamValue;

/// Typed values extracted from the request path, keyed by placeholder name.
///
/// Created fresh for every dispatch and handed to the controller action.
/// Asking for a name the matched route never declared is a programmer error
/// and fails with [`ActionError::ParameterNotFound`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RouteParams {
    values: HashMap<String, ParamValue>,
}

impl RouteParams {
    pub fn new() -> Self {
        Self { values: HashMap::new() }
    }

    pub(crate) fn with_capacity(n: usize) -> Self {
        Self { values: HashMap::with_capacity(n) }
    }

    pub(crate) fn insert(&mut self, name: &str, value: ParamValue) {
        self.values.insert(name.to_owned(), value);
    }

    /// Returns a bound parameter.
    ///
    /// For a route `/users/{int:id}`, `params.param("id")` on `/users/42`
    /// returns `Ok(&ParamValue::Int(42))`.
    pub fn param(&self, name: &str) -> Result<&ParamValue, ActionError> {
        self.values
            .get(name)
            .ok_or_else(|| ActionError::ParameterNotFound(name.to_owned()))
    }

    /// A `string` or `slug` parameter.
    pub fn str_param(&self, name: &str) -> Result<&str, ActionError> {
        self.param(name)?
            .as_str()
            .ok_or_else(|| ActionError::ParameterType { name: name.to_owned(), expected: "string" })
    }

    /// An `int` parameter.
    pub fn int_param(&self, name: &str) -> Result<i64, ActionError> {
        self.param(name)?
            .as_int()
            .ok_or_else(|| ActionError::ParameterType { name: name.to_owned(), expected: "integer" })
    }

    pub fn contains(&self, name: &str) -> bool { self.values.contains_key(name) }
    pub fn len(&self) -> usize { self.values.len() }
    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> RouteParams {
        let mut p = RouteParams::new();
        p.insert("slug", ParamValue::Str("hello".into()));
        p.insert("id", ParamValue::Int(42));
        p
    }

    #[test]
    fn typed_lookups() {
        let p = params();
        assert_eq!(p.str_param("slug").unwrap(), "hello");
        assert_eq!(p.int_param("id").unwrap(), 42);
        assert_eq!(p.param("id").unwrap(), &ParamValue::Int(42));
        assert_eq!(p.len(), 2);
        assert!(p.contains("slug"));
        assert!(!p.contains("Slug"));
        assert!(!RouteParams::new().contains("slug"));
    }

    #[test]
    fn missing_parameter_is_loud() {
        let err = params().param("nope").unwrap_err();
        assert!(matches!(err, ActionError::ParameterNotFound(ref n) if n == "nope"));
    }

    #[test]
    fn wrong_type_is_reported() {
        let err = params().int_param("slug").unwrap_err();
        assert!(matches!(err, ActionError::ParameterType { expected: "integer", .. }));
        let err = params().str_param("id").unwrap_err();
        assert!(matches!(err, ActionError::ParameterType { expected: "string", .. }));
    }
}
