//! # vireo
//!
//! Route matching and MVC controller dispatch for web applications.
//! A request path goes in. A controller action runs with typed parameters.
//! A response comes out.
//!
//! ## The contract
//!
//! vireo resolves paths to controller actions and renders what the action
//! returns. It does not own the socket. Whatever accepts connections (hyper,
//! axum, a test harness) hands vireo a request target and gets a
//! [`Response`] back.
//!
//! - **Routes** are configuration: `"/params/{string:myParam}"` maps to a
//!   controller identifier and an action name. Order matters; the first
//!   matching route wins.
//! - **Placeholders** are typed: `{string:x}`, `{int:x}`, `{slug:x}`, or any
//!   type you register on the [`ExtractorRegistry`].
//! - **Configuration bugs fail at startup.** Unknown types, duplicate
//!   parameter names, and routes pointing at missing controllers or actions
//!   stop [`App::new`], not the first unlucky request.
//! - **Not found is not an error.** It is [`Outcome::NotFound`].
//! - **Redirects are values.** An action returns [`Redirect`] instead of
//!   rendering.
//!
//! ## Quick start
//!
//! ```rust
//! use vireo::{ActionController, ActionError, App, ControllerRegistry, ExtractorRegistry, RouteParams, RoutesConfig};
//!
//! let config = RoutesConfig::from_toml_str(r#"
//!     [environment]
//!     name = "production"
//!     base_url = "https://example.com"
//!
//!     [routes]
//!     "/testroute"               = { controller = "TestController",   action = "actionIndex" }
//!     "/params/{string:myParam}" = { controller = "ParamsController", action = "actionIndex" }
//! "#).unwrap();
//!
//! fn params_index(params: &RouteParams) -> Result<String, ActionError> {
//!     Ok(format!("myParam = {}", params.str_param("myParam")?))
//! }
//!
//! let controllers = ControllerRegistry::new()
//!     .register("TestController", ActionController::new("TestController")
//!         .action("actionIndex", |_: &RouteParams| "test"))
//!     .register("ParamsController", ActionController::new("ParamsController")
//!         .action("actionIndex", params_index));
//!
//! let app = App::new(&config, controllers, &ExtractorRegistry::new()).unwrap();
//!
//! let res = app.handle("/params/hello");
//! assert_eq!(res.body().as_ref(), b"myParam = hello");
//! ```

mod app;
mod config;
mod controller;
mod dispatcher;
mod environment;
mod error;
mod extract;
mod params;
mod pattern;
mod registry;
mod response;
mod table;

pub use app::App;
pub use config::{RouteConfig, RouteTarget, RoutesConfig};
pub use controller::{Action, ActionController, ActionResult, Controller, IntoActionResult};
pub use dispatcher::{DispatchOutcome, Dispatcher, MatchResult, Outcome};
pub use environment::Environment;
pub use error::{ActionError, ConfigError, Error, ExtractionError, RouteError};
pub use extract::{
    Extractor, ExtractorRegistry, IntExtractor, ParamValue, SharedExtractor, SlugExtractor,
    StringExtractor,
};
pub use params::RouteParams;
pub use pattern::{RoutePattern, Segment};
pub use registry::{ControllerRegistry, SharedController};
pub use response::{ContentType, IntoResponse, Redirect, Response, ResponseBuilder};
pub use table::{RouteEntry, RouteTable};
