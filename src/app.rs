//! The application kernel.
//!
//! Ties the pieces together: configuration in, [`Response`] out. This is the
//! layer that decides how loudly a failure is reported, which depends on the
//! [`Environment`]:
//!
//! | Outcome | Development | Production |
//! |---|---|---|
//! | route matched, action rendered | action's response | action's response |
//! | action redirected | `location` resolved against `base_url` | same |
//! | no route matched | `404 Not Found` | `404 Not Found` |
//! | action failed | `500` with the error message | `500`, details only in the log |
//!
//! ```rust
//! use http::StatusCode;
//! use vireo::{ActionController, App, ControllerRegistry, ExtractorRegistry, RouteParams, RoutesConfig};
//!
//! let config = RoutesConfig::from_toml_str(r#"
//!     [routes]
//!     "/testroute" = { controller = "TestController", action = "actionIndex" }
//! "#).unwrap();
//!
//! let controllers = ControllerRegistry::new().register(
//!     "TestController",
//!     ActionController::new("TestController").action("actionIndex", |_: &RouteParams| "test"),
//! );
//!
//! let app = App::new(&config, controllers, &ExtractorRegistry::new()).unwrap();
//! assert_eq!(app.handle("/testroute").body().as_ref(), b"test");
//! assert_eq!(app.handle("/missing").status_code(), StatusCode::NOT_FOUND);
//! ```

use http::{StatusCode, Uri};
use tracing::{debug, error, info, warn};

use crate::config::RoutesConfig;
use crate::dispatcher::{Dispatcher, Outcome};
use crate::environment::Environment;
use crate::error::{ActionError, Error};
use crate::extract::ExtractorRegistry;
use crate::registry::ControllerRegistry;
use crate::response::Response;
use crate::table::RouteTable;

/// A built application, ready to handle requests.
///
/// Immutable once constructed. Share it behind an `Arc` and call
/// [`handle`](App::handle) from as many threads or tasks as you like.
#[derive(Debug)]
pub struct App {
    dispatcher: Dispatcher,
    environment: Environment,
}

impl App {
    /// Compile the configured routes and bind them to `controllers`.
    ///
    /// Fails on any route that could never be served: bad syntax, unknown
    /// parameter types, duplicate names, or missing controllers and actions.
    pub fn new(
        config: &RoutesConfig,
        controllers: ControllerRegistry,
        extractors: &ExtractorRegistry,
    ) -> Result<Self, Error> {
        let table = RouteTable::from_config(config, extractors)?;
        let routes = table.len();
        let dispatcher = Dispatcher::new(table, controllers)?;
        let environment = config.environment().clone();

        info!(routes, environment = environment.name(), "application ready");
        Ok(Self { dispatcher, environment })
    }

    /// Assemble from already-built parts.
    pub fn from_parts(dispatcher: Dispatcher, environment: Environment) -> Self {
        Self { dispatcher, environment }
    }

    pub fn dispatcher(&self) -> &Dispatcher { &self.dispatcher }
    pub fn environment(&self) -> &Environment { &self.environment }

    /// Handle one request target (path plus optional query) and render the
    /// response. Never fails: every outcome maps to a response.
    pub fn handle(&self, target: &str) -> Response {
        let uri: Uri = match target.parse() {
            Ok(uri) => uri,
            Err(e) => {
                debug!(request_target = target, error = %e, "unparseable request target");
                return Response::builder().status(StatusCode::BAD_REQUEST).text("Bad Request");
            }
        };

        match self.dispatcher.dispatch(uri.path()) {
            Ok(Outcome::Rendered(response)) => response,
            Ok(Outcome::Redirect(redirect)) => {
                if StatusCode::from_u16(redirect.status()).is_err() {
                    warn!(status = redirect.status(), "redirect status out of range, sending 302");
                }
                redirect.into_response(&self.environment)
            }
            Ok(Outcome::NotFound) => not_found(),
            Err(e) => self.action_failed(uri.path(), &e),
        }
    }

    fn action_failed(&self, path: &str, err: &ActionError) -> Response {
        error!(path, error = %err, environment = self.environment.name(), "controller action failed");

        let builder = Response::builder().status(StatusCode::INTERNAL_SERVER_ERROR);
        if self.environment.is_production() {
            builder.text("Internal Server Error")
        } else {
            builder.text(format!("Internal Server Error\n\n{path}: {err}"))
        }
    }
}

fn not_found() -> Response {
    Response::builder().status(StatusCode::NOT_FOUND).text("Not Found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ActionController;
    use crate::params::RouteParams;
    use crate::response::Redirect;

    fn app(environment: Environment) -> App {
        let config = RoutesConfig::new(environment)
            .route("/testroute", "TestController", "actionIndex")
            .route("/params/{string:myParam}", "ParamsController", "actionIndex")
            .route("/broken/{int:id}", "ParamsController", "actionBroken")
            .route("/old", "TestController", "actionMoved")
            .route("/away", "TestController", "actionAway");

        let controllers = ControllerRegistry::new()
            .register(
                "TestController",
                ActionController::new("TestController")
                    .action("actionIndex", |_: &RouteParams| "index")
                    .action("actionMoved", |_: &RouteParams| Redirect::with_status("/testroute", 301))
                    .action("actionAway", |_: &RouteParams| Redirect::to("https://elsewhere.org/x")),
            )
            .register(
                "ParamsController",
                ActionController::new("ParamsController")
                    .action("actionIndex", |p: &RouteParams| {
                        p.str_param("myParam").map(|v| format!("param: {v}"))
                    })
                    .action("actionBroken", |p: &RouteParams| p.int_param("myParam").map(|n| n.to_string())),
            );

        App::new(&config, controllers, &ExtractorRegistry::new()).unwrap()
    }

    #[test]
    fn renders_matched_routes() {
        let app = app(Environment::development("http://localhost:8080"));
        let res = app.handle("/params/hello?utm=x");
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body().as_ref(), b"param: hello");
    }

    #[test]
    fn path_segments_are_percent_decoded() {
        let app = app(Environment::production("https://example.com"));

        let res = app.handle("/params/hello%20world");
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body().as_ref(), b"param: hello world");

        assert_eq!(app.handle("/params/h%C3%A9llo").body().as_ref(), "param: héllo".as_bytes());

        // An encoded slash belongs to its segment and does not add one.
        let res = app.handle("/params/a%2Fb");
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body().as_ref(), b"param: a/b");

        assert_eq!(app.handle("/param%73/x").body().as_ref(), b"param: x");
    }

    #[test]
    fn undecodable_segments_are_404() {
        let app = app(Environment::production("https://example.com"));
        assert_eq!(app.handle("/params/%FF").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(app.handle("/params/hello world").status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unknown_paths_are_404() {
        let app = app(Environment::production("https://example.com"));
        assert_eq!(app.handle("/nope").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(app.handle("/params/").status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unparseable_targets_are_400() {
        let app = app(Environment::production("https://example.com"));
        assert_eq!(app.handle("").status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn redirects_resolve_against_base_url() {
        let app = app(Environment::production("https://example.com/app/"));
        let res = app.handle("/old");
        assert_eq!(res.status_code(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(res.header("location"), Some("https://example.com/app/testroute"));

        let res = app.handle("/away");
        assert_eq!(res.status_code(), StatusCode::FOUND);
        assert_eq!(res.header("location"), Some("https://elsewhere.org/x"));
    }

    #[test]
    fn development_shows_parameter_errors() {
        let app = app(Environment::development("http://localhost:8080"));
        let res = app.handle("/broken/7");
        assert_eq!(res.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = std::str::from_utf8(res.body()).unwrap();
        assert!(body.contains("route parameter `myParam` not found"), "{body}");
    }

    #[test]
    fn production_masks_parameter_errors() {
        let app = app(Environment::production("https://example.com"));
        let res = app.handle("/broken/7");
        assert_eq!(res.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.body().as_ref(), b"Internal Server Error");
    }

    #[test]
    fn assembled_from_parts() {
        let extractors = ExtractorRegistry::new();
        let config = RoutesConfig::new(Environment::default())
            .route("/posts/{int:id}", "PostController", "actionShow");
        let controllers = ControllerRegistry::new().register(
            "PostController",
            ActionController::new("PostController")
                .action("actionShow", |p: &RouteParams| p.int_param("id").map(|id| format!("post {id}"))),
        );
        let table = RouteTable::from_config(&config, &extractors).unwrap();
        let dispatcher = Dispatcher::new(table, controllers).unwrap();

        let app = App::from_parts(dispatcher, Environment::production("https://example.com"));
        assert!(app.environment().is_production());
        assert_eq!(app.dispatcher().table().len(), 1);
        assert_eq!(app.handle("/posts/42").body().as_ref(), b"post 42");
        assert_eq!(app.handle("/posts/abc").status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn startup_fails_on_bad_routes() {
        let config = RoutesConfig::new(Environment::default()).route("/x/{string:a}/{string:a}", "X", "y");
        let err = App::new(&config, ControllerRegistry::new(), &ExtractorRegistry::new()).unwrap_err();
        assert!(matches!(err, Error::Route(crate::RouteError::DuplicateParameterName { .. })));

        let config = RoutesConfig::new(Environment::default()).route("/x", "X", "y");
        let err = App::new(&config, ControllerRegistry::new(), &ExtractorRegistry::new()).unwrap_err();
        assert!(matches!(err, Error::Route(crate::RouteError::UnknownController { .. })));
    }
}
