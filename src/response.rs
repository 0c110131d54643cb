//! Response values, the [`IntoResponse`] conversion trait, and [`Redirect`].
//!
//! The core never writes to a socket. A controller action produces a
//! [`Response`] (or a [`Redirect`]) and whatever sits in front of the
//! application decides how to put it on the wire.

use bytes::Bytes;
use http::StatusCode;

use crate::environment::Environment;

// ── ContentType ───────────────────────────────────────────────────────────────

/// Common content-type values for use with [`ResponseBuilder::bytes`].
pub enum ContentType {
    Html,         // text/html; charset=utf-8
    Json,         // application/json
    OctetStream,  // application/octet-stream
    Text,         // text/plain; charset=utf-8
    Xml,          // application/xml
}

impl ContentType {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Html        => "text/html; charset=utf-8",
            Self::Json        => "application/json",
            Self::OctetStream => "application/octet-stream",
            Self::Text        => "text/plain; charset=utf-8",
            Self::Xml         => "application/xml",
        }
    }
}

// ── Response ─────────────────────────────────────────────────────────────────

/// A rendered response.
///
/// ```rust
/// use http::StatusCode;
/// use vireo::Response;
///
/// let ok = Response::text("hello");
/// assert_eq!(ok.status_code(), StatusCode::OK);
/// assert_eq!(ok.header("content-type"), Some("text/plain; charset=utf-8"));
///
/// let created = Response::builder()
///     .status(StatusCode::CREATED)
///     .header("location", "/users/42")
///     .json(br#"{"id":42}"#.to_vec());
/// assert_eq!(created.header("location"), Some("/users/42"));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Response {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Bytes,
}

impl Response {
    /// `200 OK`: `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::builder().text(body)
    }

    /// `200 OK`: `text/html; charset=utf-8`.
    pub fn html(body: impl Into<String>) -> Self {
        let body: String = body.into();
        Self::builder().bytes(ContentType::Html, body)
    }

    /// `200 OK`: `application/json`.
    pub fn json(body: impl Into<Bytes>) -> Self {
        Self::builder().json(body)
    }

    /// Response with no body.
    pub fn status(code: StatusCode) -> Self {
        Self { status: code, headers: Vec::new(), body: Bytes::new() }
    }

    /// Builder for responses that need a custom status or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: Vec::new(), status: StatusCode::OK }
    }

    pub fn status_code(&self) -> StatusCode { self.status }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &Bytes { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `200 OK`.
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: StatusCode,
}

impl ResponseBuilder {
    pub fn status(mut self, code: StatusCode) -> Self {
        self.status = code;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn json(self, body: impl Into<Bytes>) -> Response {
        self.finish(ContentType::Json.as_str(), body.into())
    }

    pub fn text(self, body: impl Into<String>) -> Response {
        self.finish(ContentType::Text.as_str(), Bytes::from(body.into()))
    }

    /// Terminate with a typed body.
    pub fn bytes(self, content_type: ContentType, body: impl Into<Bytes>) -> Response {
        self.finish(content_type.as_str(), body.into())
    }

    /// Terminate with no body (e.g. `204 No Content`, redirects).
    pub fn no_body(self) -> Response {
        Response { body: Bytes::new(), headers: self.headers, status: self.status }
    }

    fn finish(self, content_type: &str, body: Bytes) -> Response {
        let mut headers = vec![("content-type".to_owned(), content_type.to_owned())];
        headers.extend(self.headers);
        Response { body, headers, status: self.status }
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into a [`Response`].
///
/// Implement on your own types to return them directly from actions.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response { Response::text(self) }
}

impl IntoResponse for String {
    fn into_response(self) -> Response { Response::text(self) }
}

/// Return a bare status from an action: `StatusCode::NO_CONTENT`.
impl IntoResponse for StatusCode {
    fn into_response(self) -> Response { Response::status(self) }
}

// ── Redirect ─────────────────────────────────────────────────────────────────

/// A request to send the client elsewhere.
///
/// Returned from a controller action as
/// [`ActionResult::Redirect`](crate::ActionResult::Redirect). The status is
/// `302 Found` unless another one is given.
///
/// ```rust
/// use vireo::{Environment, Redirect};
///
/// let r = Redirect::to("login");
/// assert_eq!(r.status(), 302);
///
/// let env = Environment::production("https://example.com/app");
/// assert_eq!(r.resolve_location(&env), "https://example.com/app/login");
///
/// let moved = Redirect::with_status("https://elsewhere.org/", 301);
/// assert_eq!(moved.status(), 301);
/// assert_eq!(moved.resolve_location(&env), "https://elsewhere.org/");
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Redirect {
    location: String,
    status: u16,
}

impl Redirect {
    pub const DEFAULT_STATUS: u16 = 302;

    /// Redirect to `location` with `302 Found`.
    pub fn to(location: impl Into<String>) -> Self {
        Self { location: location.into(), status: Self::DEFAULT_STATUS }
    }

    /// Redirect with an explicit status. A status of `0` means unspecified
    /// and falls back to `302`.
    pub fn with_status(location: impl Into<String>, status: u16) -> Self {
        let status = if status == 0 { Self::DEFAULT_STATUS } else { status };
        Self { location: location.into(), status }
    }

    /// The location as given, possibly relative.
    pub fn location(&self) -> &str { &self.location }
    pub fn status(&self) -> u16 { self.status }

    /// Absolute location: targets containing `://` are used as-is, anything
    /// else is joined onto the environment's base URL.
    pub fn resolve_location(&self, env: &Environment) -> String {
        if self.location.contains("://") {
            return self.location.clone();
        }
        let base = env.base_url().trim_end_matches('/');
        let path = self.location.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Render as a body-less response carrying the resolved `location`.
    ///
    /// Statuses outside the range HTTP can express fall back to `302`.
    pub fn into_response(self, env: &Environment) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::FOUND);
        Response::builder()
            .status(status)
            .header("location", &self.resolve_location(env))
            .no_body()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_defaults_to_found() {
        assert_eq!(Redirect::to("/x").status(), 302);
        assert_eq!(Redirect::with_status("/x", 0).status(), 302);
        assert_eq!(Redirect::with_status("/x", 301).status(), 301);
        assert_eq!(Redirect::with_status("/x", 1234).status(), 1234);
    }

    #[test]
    fn relative_locations_join_base_url_once() {
        let env = Environment::production("https://example.com/");
        assert_eq!(Redirect::to("/users").resolve_location(&env), "https://example.com/users");
        assert_eq!(Redirect::to("users").resolve_location(&env), "https://example.com/users");
        assert_eq!(Redirect::to("").resolve_location(&env), "https://example.com/");
        assert_eq!(
            Redirect::to("ftp://files.example.com/a").resolve_location(&env),
            "ftp://files.example.com/a"
        );
    }

    #[test]
    fn redirect_response_carries_location() {
        let env = Environment::development("http://localhost:8080");
        let res = Redirect::with_status("/home", 301).into_response(&env);
        assert_eq!(res.status_code(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(res.header("Location"), Some("http://localhost:8080/home"));
        assert!(res.body().is_empty());

        let res = Redirect::with_status("/home", 1234).into_response(&env);
        assert_eq!(res.status_code(), StatusCode::FOUND);
    }

    #[test]
    fn builder_puts_content_type_first() {
        let res = Response::builder()
            .status(StatusCode::ACCEPTED)
            .header("x-request-id", "abc")
            .bytes(ContentType::Xml, "<ok/>");
        assert_eq!(res.status_code(), StatusCode::ACCEPTED);
        assert_eq!(res.headers()[0], ("content-type".to_owned(), "application/xml".to_owned()));
        assert_eq!(res.header("X-Request-Id"), Some("abc"));
        assert_eq!(res.body().as_ref(), b"<ok/>");

        let res = Response::builder().bytes(ContentType::OctetStream, vec![0u8, 0xff]);
        assert_eq!(res.header("content-type"), Some("application/octet-stream"));
        assert_eq!(res.body().as_ref(), [0u8, 0xff]);
    }

    #[test]
    fn conversions() {
        assert_eq!("hi".into_response(), Response::text("hi"));
        assert_eq!(String::from("hi").into_response().body().as_ref(), b"hi");
        assert_eq!(StatusCode::NO_CONTENT.into_response().status_code(), StatusCode::NO_CONTENT);
        assert_eq!(Response::html("<p/>").header("content-type"), Some("text/html; charset=utf-8"));
    }
}
