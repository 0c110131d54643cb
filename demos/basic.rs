//! Minimal vireo example: a route file, two controllers, a few requests.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example basic

use vireo::{
    ActionController, ActionError, App, ControllerRegistry, ExtractorRegistry, Redirect,
    RouteParams, RoutesConfig,
};

const ROUTES: &str = r#"
[environment]
name = "development"
base_url = "http://localhost:3000"

[routes]
"/testroute"               = { controller = "TestController",   action = "actionIndex" }
"/legacy"                  = { controller = "TestController",   action = "actionLegacy" }
"/posts/{int:id}"          = { controller = "PostsController",  action = "actionShow" }
"/posts/{slug:title}"      = { controller = "PostsController",  action = "actionBySlug" }
"/params/{string:myParam}" = { controller = "ParamsController", action = "actionIndex" }
"#;

fn main() {
    tracing_subscriber::fmt::init();

    let config = RoutesConfig::from_toml_str(ROUTES).expect("invalid route file");

    let controllers = ControllerRegistry::new()
        .register(
            "TestController",
            ActionController::new("TestController")
                .action("actionIndex", |_: &RouteParams| "test route")
                .action("actionLegacy", |_: &RouteParams| Redirect::with_status("/testroute", 301)),
        )
        .register(
            "PostsController",
            ActionController::new("PostsController")
                .action("actionShow", show_post)
                .action("actionBySlug", post_by_slug),
        )
        .register(
            "ParamsController",
            ActionController::new("ParamsController").action("actionIndex", params_index),
        );

    let app = App::new(&config, controllers, &ExtractorRegistry::new()).expect("invalid routes");

    for target in ["/testroute", "/legacy", "/posts/7", "/posts/hello-world", "/params/hi?x=1", "/params/hello%20world", "/params/", "/nope"] {
        let res = app.handle(target);
        println!(
            "{target:<22} -> {} {}",
            res.status_code(),
            res.header("location").unwrap_or_else(|| std::str::from_utf8(res.body()).unwrap_or("<binary>")),
        );
    }
}

// GET /posts/{int:id}
fn show_post(params: &RouteParams) -> Result<String, ActionError> {
    let id = params.int_param("id")?;
    Ok(format!(r#"{{"id":{id}}}"#))
}

// GET /posts/{slug:title}
fn post_by_slug(params: &RouteParams) -> Result<String, ActionError> {
    Ok(format!("post titled {}", params.str_param("title")?))
}

// GET /params/{string:myParam}
fn params_index(params: &RouteParams) -> Result<String, ActionError> {
    Ok(format!("myParam = {}", params.str_param("myParam")?))
}
