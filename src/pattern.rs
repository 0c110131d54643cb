//! Route pattern compiler.
//!
//! A route definition is a `/`-separated list of segments. Each segment is
//! either literal text, compared byte for byte, or a typed placeholder of the
//! form `{type:name}`:
//!
//! ```text
//! /params/{string:myParam}
//!  ^^^^^^ ^^^^^^^^^^^^^^^^
//!  literal  placeholder: extractor `string`, parameter `myParam`
//! ```
//!
//! Compilation resolves every placeholder type against the
//! [`ExtractorRegistry`] up front. The resulting [`RoutePattern`] is
//! immutable and holds the extractors it needs, so matching never looks
//! anything up by name.
//!
//! Only this grammar is understood. Regex constraints, optional segments and
//! catch-alls are not part of it; an extractor is the extension point for
//! anything a segment needs to validate.

use std::collections::HashSet;
use std::fmt;

use crate::error::RouteError;
use crate::extract::{ExtractorRegistry, SharedExtractor};

/// One compiled segment matcher.
#[derive(Clone)]
pub enum Segment {
    /// Matches exactly this text.
    Literal(String),
    /// Binds the segment to `name` after `extractor` accepts it.
    Typed {
        name: String,
        type_name: String,
        extractor: SharedExtractor,
    },
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Self::Typed { name, type_name, .. } => f
                .debug_struct("Typed")
                .field("name", name)
                .field("type_name", type_name)
                .finish_non_exhaustive(),
        }
    }
}

/// A compiled route definition.
///
/// The segment count always equals the number of `/`-separated parts after
/// the leading slash, and no two placeholders share a name.
#[derive(Clone, Debug)]
pub struct RoutePattern {
    source: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Compile `definition`, resolving placeholder types in `extractors`.
    ///
    /// ```rust
    /// use vireo::{ExtractorRegistry, RoutePattern, RouteError};
    ///
    /// let extractors = ExtractorRegistry::new();
    /// let pattern = RoutePattern::compile("/params/{string:myParam}", &extractors).unwrap();
    /// assert_eq!(pattern.len(), 2);
    /// assert_eq!(pattern.param_names().collect::<Vec<_>>(), ["myParam"]);
    ///
    /// let err = RoutePattern::compile("/x/{string:a}/{string:a}", &extractors).unwrap_err();
    /// assert!(matches!(err, RouteError::DuplicateParameterName { .. }));
    /// ```
    pub fn compile(definition: &str, extractors: &ExtractorRegistry) -> Result<Self, RouteError> {
        if definition.is_empty() {
            return Err(RouteError::invalid(definition, "route definition is empty"));
        }
        let Some(rest) = definition.strip_prefix('/') else {
            return Err(RouteError::invalid(definition, "route definition must start with `/`"));
        };

        let mut seen = HashSet::new();
        let mut segments = Vec::new();

        for raw in rest.split('/') {
            let segment = match parse_placeholder(raw) {
                None => Segment::Literal(raw.to_owned()),
                Some(Err(reason)) => return Err(RouteError::invalid(definition, reason)),
                Some(Ok((type_name, name))) => {
                    let Some(extractor) = extractors.get(type_name) else {
                        return Err(RouteError::UnknownParameterType {
                            pattern: definition.to_owned(),
                            type_name: type_name.to_owned(),
                        });
                    };
                    if !seen.insert(name) {
                        return Err(RouteError::DuplicateParameterName {
                            pattern: definition.to_owned(),
                            name: name.to_owned(),
                        });
                    }
                    Segment::Typed {
                        name: name.to_owned(),
                        type_name: type_name.to_owned(),
                        extractor: extractor.clone(),
                    }
                }
            };
            segments.push(segment);
        }

        Ok(Self { source: definition.to_owned(), segments })
    }

    /// The definition this pattern was compiled from.
    pub fn source(&self) -> &str { &self.source }
    pub fn segments(&self) -> &[Segment] { &self.segments }
    pub fn len(&self) -> usize { self.segments.len() }

    /// Always false: even `/` compiles to one (empty) literal segment.
    pub fn is_empty(&self) -> bool { self.segments.is_empty() }

    /// Placeholder names in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Typed { name, .. } => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Splits a request path the same way definitions are split.
///
/// Paths that do not start with `/` have no segments and match nothing.
pub(crate) fn split_path(path: &str) -> Option<std::str::Split<'_, char>> {
    path.strip_prefix('/').map(|rest| rest.split('/'))
}

/// `None` for literal segments, `Some(Ok((type, name)))` for well-formed
/// placeholders, `Some(Err(reason))` for anything brace-wrapped but malformed.
fn parse_placeholder(segment: &str) -> Option<Result<(&str, &str), String>> {
    let inner = segment.strip_prefix('{')?.strip_suffix('}')?;

    let Some((type_name, name)) = inner.split_once(':') else {
        return Some(Err(format!("placeholder `{segment}` must be `{{type:name}}`")));
    };
    if type_name.is_empty() {
        return Some(Err(format!("placeholder `{segment}` has no type")));
    }
    if !is_identifier(name) {
        return Some(Err(format!("placeholder `{segment}` has an invalid name")));
    }
    Some(Ok((type_name, name)))
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
