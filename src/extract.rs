//! Typed path-parameter extractors.
//!
//! A placeholder such as `{int:id}` names an extractor (`int`) and a
//! parameter (`id`). The extractor validates the raw segment and coerces it
//! into a [`ParamValue`]. Names are resolved against an [`ExtractorRegistry`]
//! when a route is compiled, so an unknown type fails at startup rather than
//! on the first request that happens to hit it.
//!
//! ```rust
//! use vireo::{ExtractorRegistry, ParamValue};
//!
//! let extractors = ExtractorRegistry::new();
//! let int = extractors.get("int").unwrap();
//! assert_eq!(int.extract("42"), Ok(ParamValue::Int(42)));
//! assert!(int.extract("4a").is_err());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::ExtractionError;

/// A typed value bound to a route parameter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
}

impl ParamValue {
    /// The string form, for `string` and `slug` parameters.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Str(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
        }
    }
}

/// Validates one raw path segment and coerces it into a [`ParamValue`].
///
/// Segments arrive already URL-decoded. Implementations must be pure: the
/// same segment always yields the same result, and nothing is mutated, so a
/// single extractor can serve any number of concurrent dispatches.
pub trait Extractor: Send + Sync + 'static {
    fn extract(&self, raw: &str) -> Result<ParamValue, ExtractionError>;
}

impl<F> Extractor for F
where
    F: Fn(&str) -> Result<ParamValue, ExtractionError> + Send + Sync + 'static,
{
    fn extract(&self, raw: &str) -> Result<ParamValue, ExtractionError> {
        self(raw)
    }
}

/// `{string:name}`: any non-empty segment, unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct StringExtractor;

impl Extractor for StringExtractor {
    fn extract(&self, raw: &str) -> Result<ParamValue, ExtractionError> {
        if raw.is_empty() {
            return Err(ExtractionError::EmptySegment);
        }
        Ok(ParamValue::Str(raw.to_owned()))
    }
}

/// `{int:name}`: ASCII digits only, parsed as `i64`. No sign, no overflow.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntExtractor;

impl Extractor for IntExtractor {
    fn extract(&self, raw: &str) -> Result<ParamValue, ExtractionError> {
        if raw.is_empty() {
            return Err(ExtractionError::EmptySegment);
        }
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("integer", raw));
        }
        raw.parse().map(ParamValue::Int).map_err(|_| invalid("integer", raw))
    }
}

/// `{slug:name}`: ASCII letters, digits, hyphens and underscores.
#[derive(Clone, Copy, Debug, Default)]
pub struct SlugExtractor;

impl Extractor for SlugExtractor {
    fn extract(&self, raw: &str) -> Result<ParamValue, ExtractionError> {
        if raw.is_empty() {
            return Err(ExtractionError::EmptySegment);
        }
        let ok = raw.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if !ok {
            return Err(invalid("slug", raw));
        }
        Ok(ParamValue::Str(raw.to_owned()))
    }
}

fn invalid(kind: &'static str, raw: &str) -> ExtractionError {
    ExtractionError::Invalid { kind, segment: raw.to_owned() }
}

/// Shared handle to a registered extractor.
pub type SharedExtractor = Arc<dyn Extractor>;

/// Extractors by the type name used in route definitions.
///
/// Built once at startup alongside the route table. Registering a name that
/// already exists replaces the previous extractor.
#[derive(Clone)]
pub struct ExtractorRegistry {
    extractors: HashMap<String, SharedExtractor>,
}

impl ExtractorRegistry {
    /// A registry pre-loaded with `string`, `int` and `slug`.
    pub fn new() -> Self {
        Self::empty()
            .register("string", StringExtractor)
            .register("int", IntExtractor)
            .register("slug", SlugExtractor)
    }

    pub fn empty() -> Self {
        Self { extractors: HashMap::new() }
    }

    /// Register `extractor` under `name`. Returns `self` for chaining.
    ///
    /// ```rust
    /// use vireo::{ExtractionError, ExtractorRegistry, ParamValue};
    ///
    /// let extractors = ExtractorRegistry::new().register("hex", |raw: &str| {
    ///     i64::from_str_radix(raw, 16)
    ///         .map(ParamValue::Int)
    ///         .map_err(|_| ExtractionError::Invalid { kind: "hex", segment: raw.to_owned() })
    /// });
    /// assert!(extractors.contains("hex"));
    /// ```
    pub fn register(mut self, name: impl Into<String>, extractor: impl Extractor) -> Self {
        self.extractors.insert(name.into(), Arc::new(extractor));
        self
    }

    pub fn get(&self, name: &str) -> Option<&SharedExtractor> {
        self.extractors.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.extractors.contains_key(name)
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self { Self::new() }
}

impl fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.extractors.keys().collect();
        names.sort();
        f.debug_struct("ExtractorRegistry").field("types", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_accepts_anything_non_empty() {
        assert_eq!(StringExtractor.extract("hello"), Ok(ParamValue::Str("hello".into())));
        assert_eq!(StringExtractor.extract("a b/c"), Ok(ParamValue::Str("a b/c".into())));
        assert_eq!(StringExtractor.extract(""), Err(ExtractionError::EmptySegment));
    }

    #[test]
    fn int_rejects_signs_and_overflow() {
        assert_eq!(IntExtractor.extract("007"), Ok(ParamValue::Int(7)));
        assert!(IntExtractor.extract("-1").is_err());
        assert!(IntExtractor.extract("+1").is_err());
        assert!(IntExtractor.extract("99999999999999999999").is_err());
        assert_eq!(IntExtractor.extract(""), Err(ExtractionError::EmptySegment));
    }

    #[test]
    fn slug_charset() {
        assert_eq!(
            SlugExtractor.extract("hello-world_2"),
            Ok(ParamValue::Str("hello-world_2".into()))
        );
        assert_eq!(
            SlugExtractor.extract("hello world"),
            Err(ExtractionError::Invalid { kind: "slug", segment: "hello world".into() })
        );
    }

    #[test]
    fn registry_defaults_and_overrides() {
        let registry = ExtractorRegistry::new();
        assert!(registry.contains("string"));
        assert!(registry.contains("int"));
        assert!(registry.contains("slug"));
        assert!(!registry.contains("uuid"));
        assert!(!ExtractorRegistry::empty().contains("string"));

        let registry = registry.register("string", |_: &str| -> Result<ParamValue, ExtractionError> {
            Ok(ParamValue::Int(0))
        });
        let string = registry.get("string").unwrap();
        assert_eq!(string.extract("x"), Ok(ParamValue::Int(0)));
    }

    #[test]
    fn value_accessors() {
        let s = ParamValue::Str("abc".into());
        assert_eq!(s.as_str(), Some("abc"));
        assert_eq!(s.as_int(), None);
        assert_eq!(ParamValue::Int(5).as_int(), Some(5));
        assert_eq!(ParamValue::Int(5).to_string(), "5");
    }
}
