//! Request dispatch: path in, controller action out.
//!
//! Matching walks the route table in configuration order. For each entry:
//!
//! 1. Skip unless the segment count equals the path's. No per-segment work
//!    happens for entries of the wrong length.
//! 2. Compare segments pairwise. Literals need exact equality; placeholders
//!    run their extractor. Any failure rejects the whole entry and drops
//!    whatever was bound so far.
//! 3. The first entry that survives wins.
//!
//! Paths arrive percent-encoded, as they appear in the request line. Each
//! segment is decoded on its own after splitting, so an encoded `/` (`%2F`)
//! stays inside its segment. A segment that does not decode to UTF-8
//! matches nothing.
//!
//! No match is a normal outcome ([`DispatchOutcome::NotFound`]), not an
//! error. Matching touches no shared mutable state, so one dispatcher serves
//! any number of concurrent requests.

use std::borrow::Cow;

use tracing::{debug, trace};

use crate::controller::ActionResult;
use crate::error::{ActionError, RouteError};
use crate::params::RouteParams;
use crate::pattern::{RoutePattern, Segment, split_path};
use crate::registry::ControllerRegistry;
use crate::response::{Redirect, Response};
use crate::table::{RouteEntry, RouteTable};

/// A route entry that accepted a path, with the parameters it bound.
#[derive(Clone, Debug)]
pub struct MatchResult<'a> {
    entry: &'a RouteEntry,
    params: RouteParams,
}

impl<'a> MatchResult<'a> {
    pub fn entry(&self) -> &'a RouteEntry { self.entry }
    pub fn params(&self) -> &RouteParams { &self.params }
    pub fn into_params(self) -> RouteParams { self.params }
}

/// Result of matching a path against the route table.
#[derive(Clone, Debug)]
pub enum DispatchOutcome<'a> {
    Matched(MatchResult<'a>),
    NotFound,
}

/// Result of a full dispatch, after the controller action ran.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    Rendered(Response),
    Redirect(Redirect),
    NotFound,
}

impl From<ActionResult> for Outcome {
    fn from(result: ActionResult) -> Self {
        match result {
            ActionResult::Rendered(r) => Self::Rendered(r),
            ActionResult::Redirect(r) => Self::Redirect(r),
        }
    }
}

/// Resolves request paths to controller actions.
///
/// ```rust
/// use vireo::{
///     ActionController, ControllerRegistry, Dispatcher, ExtractorRegistry, Outcome,
///     Response, RouteEntry, RouteParams, RoutePattern, RouteTable,
/// };
///
/// let extractors = ExtractorRegistry::new();
/// let mut table = RouteTable::new();
/// table.insert(RouteEntry::new(
///     RoutePattern::compile("/params/{string:myParam}", &extractors).unwrap(),
///     "ParamsController",
///     "actionIndex",
/// ));
///
/// let controllers = ControllerRegistry::new().register(
///     "ParamsController",
///     ActionController::new("ParamsController")
///         .action("actionIndex", |p: &RouteParams| p.str_param("myParam").map(str::to_owned)),
/// );
///
/// let dispatcher = Dispatcher::new(table, controllers).unwrap();
/// assert_eq!(dispatcher.dispatch("/params/hello").unwrap(), Outcome::Rendered(Response::text("hello")));
/// assert_eq!(dispatcher.dispatch("/params/").unwrap(), Outcome::NotFound);
/// ```
#[derive(Debug)]
pub struct Dispatcher {
    table: RouteTable,
    controllers: ControllerRegistry,
}

impl Dispatcher {
    /// Pair a route table with the controllers it targets.
    ///
    /// Every route must name a registered controller that exposes the
    /// route's action. A mismatch is a configuration bug and fails here,
    /// before any request is served.
    pub fn new(table: RouteTable, controllers: ControllerRegistry) -> Result<Self, RouteError> {
        for entry in table.entries() {
            let Some(controller) = controllers.resolve(entry.controller()) else {
                return Err(RouteError::UnknownController {
                    pattern: entry.pattern().source().to_owned(),
                    controller: entry.controller().to_owned(),
                });
            };
            if !controller.has_action(entry.action()) {
                return Err(RouteError::UnknownAction {
                    pattern: entry.pattern().source().to_owned(),
                    controller: entry.controller().to_owned(),
                    action: entry.action().to_owned(),
                });
            }
        }
        Ok(Self { table, controllers })
    }

    pub fn table(&self) -> &RouteTable { &self.table }

    /// Find the first route entry that accepts the percent-encoded `path`.
    pub fn resolve(&self, path: &str) -> DispatchOutcome<'_> {
        let Some(segments) = split_path(path) else {
            return DispatchOutcome::NotFound;
        };
        let segments = match segments.map(urlencoding::decode).collect::<Result<Vec<_>, _>>() {
            Ok(segments) => segments,
            Err(e) => {
                debug!(path, error = %e, "path segment is not valid UTF-8");
                return DispatchOutcome::NotFound;
            }
        };

        for entry in self.table.entries() {
            if entry.pattern().len() != segments.len() {
                continue;
            }
            if let Some(params) = match_segments(entry.pattern(), &segments) {
                return DispatchOutcome::Matched(MatchResult { entry, params });
            }
        }
        DispatchOutcome::NotFound
    }

    /// Resolve `path` and run the matched controller action.
    ///
    /// The action's result is passed through unchanged. Errors raised by the
    /// action are returned to the caller; deciding how loudly to report them
    /// is the job of the layer above.
    pub fn dispatch(&self, path: &str) -> Result<Outcome, ActionError> {
        let matched = match self.resolve(path) {
            DispatchOutcome::Matched(m) => m,
            DispatchOutcome::NotFound => {
                debug!(path, "no route matched");
                return Ok(Outcome::NotFound);
            }
        };

        let entry = matched.entry();
        debug!(
            path,
            pattern = %entry.pattern(),
            controller = entry.controller(),
            action = entry.action(),
            "route matched"
        );

        // Checked in `new`; a miss here means the registry and table diverged.
        let Some(controller) = self.controllers.resolve(entry.controller()) else {
            return Err(ActionError::UnknownAction {
                controller: entry.controller().to_owned(),
                action: entry.action().to_owned(),
            });
        };

        controller.invoke(entry.action(), matched.params()).map(Outcome::from)
    }
}

/// Bind every segment or reject the entry outright.
fn match_segments(pattern: &RoutePattern, segments: &[Cow<'_, str>]) -> Option<RouteParams> {
    let mut params = RouteParams::with_capacity(segments.len());

    for (matcher, raw) in pattern.segments().iter().zip(segments) {
        let raw: &str = raw;
        match matcher {
            Segment::Literal(text) => {
                if text != raw {
                    return None;
                }
            }
            Segment::Typed { name, type_name, extractor } => match extractor.extract(raw) {
                Ok(value) => params.insert(name, value),
                Err(e) => {
                    trace!(pattern = %pattern, param = %name, kind = %type_name, error = %e, "segment rejected");
                    return None;
                }
            },
        }
    }
    Some(params)
}
