//! Application context and dispatch pipeline.

use cookie::Cookie;
use http::header::{self, HeaderValue};
use http::StatusCode;

use crate::cache::Cache;
use crate::config::Config;
use crate::cookies::{self, CookieKey};
use crate::filter::FilterRegistry;
use crate::flash::{self, FlashChange};
use crate::request::Request;
use crate::response::Response;
use crate::route::{Handler, Router};
use crate::signal::Flow;

/// The application context: route table, filter registry, configuration
/// and cache, constructed once at startup and shared read-only with every
/// dispatch.
///
/// # Example
///
/// ```
/// use http::Method;
/// use wicket::{App, Request, Response};
///
/// let mut app = App::new();
/// app.router_mut()
///     .get("/hello/:name", |_req: &mut Request, args: &[String]| {
///         Ok(Response::text(format!("hello: {}", args[0])))
///     })
///     .unwrap();
///
/// let mut req = Request::new(Method::GET, "/hello/sunli");
/// let resp = app.dispatch(&mut req);
/// assert_eq!(resp.body(), "hello: sunli");
/// ```
#[derive(Default)]
pub struct App {
    config: Config,
    router: Router,
    filters: FilterRegistry,
    cache: Cache,
    cookie_key: Option<CookieKey>,
    not_found: Option<Handler>,
}

impl App {
    /// Create an application with empty configuration.
    pub fn new() -> Self {
        Default::default()
    }

    /// Create an application over an existing configuration store.
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Returns the configuration store.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the configuration store mutably.
    #[inline]
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Returns the route table.
    #[inline]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Returns the route table mutably, for registration.
    #[inline]
    pub fn router_mut(&mut self) -> &mut Router {
        &mut self.router
    }

    /// Returns the filter registry mutably, for registration.
    #[inline]
    pub fn filters_mut(&mut self) -> &mut FilterRegistry {
        &mut self.filters
    }

    /// Returns the process-wide cache.
    #[inline]
    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Sets the key used to seal flash and application cookies. Without a
    /// key, flash messages are silently disabled.
    pub fn set_cookie_key(&mut self, key: CookieKey) {
        self.cookie_key = Some(key);
    }

    /// Installs a custom NotFound handler, replacing the default `404`
    /// response. The handler is invoked with no captured values.
    pub fn set_not_found<H>(&mut self, handler: H)
    where
        H: Fn(&mut Request, &[String]) -> Flow<Response> + Send + Sync + 'static,
    {
        self.not_found = Some(Box::new(handler));
    }

    /// Routes one request through matching, filtering and the handler,
    /// producing the terminal response.
    ///
    /// Matching walks the method's table in registration order and the
    /// first matching pattern wins; a raised signal at any point becomes
    /// the response with nothing else running after it; an unmatched path
    /// produces the NotFound outcome.
    pub fn dispatch(&self, req: &mut Request) -> Response {
        self.load_flash(req);

        let normalized = strip_base(req.path(), self.config.get("routing.base"));
        req.set_path(normalized);
        tracing::debug!(method = %req.method(), path = %req.path(), "dispatch");

        let mut resp = match self.run(req) {
            Ok(resp) => resp,
            Err(signal) => {
                tracing::debug!(status = %signal.status(), "signal raised");
                signal.into_response()
            }
        };

        self.apply_flash(req, &mut resp);
        resp
    }

    fn run(&self, req: &mut Request) -> Flow<Response> {
        let method = req.method().clone();
        let path = req.path().to_string();

        match self.router.find(&method, &path) {
            Some((entry, values)) => {
                tracing::debug!(template = %entry.pattern.template(), "route matched");
                self.filters.run(req, entry.pattern.symbols(), &values)?;
                (entry.handler)(req, &values)
            }
            None => {
                tracing::debug!("no route matched");
                match &self.not_found {
                    Some(handler) => handler(req, &[]),
                    None => Ok(Response::builder()
                        .status(StatusCode::NOT_FOUND)
                        .content_type("text/plain")
                        .body("not found")),
                }
            }
        }
    }

    fn load_flash(&self, req: &mut Request) {
        let key = match &self.cookie_key {
            Some(key) => key,
            None => return,
        };
        let raw = match req.cookie(flash::COOKIE_NAME) {
            Some(raw) => raw.to_string(),
            None => return,
        };
        let entries = cookies::decrypt(key, flash::COOKIE_NAME, &raw)
            .and_then(|plain| serde_json::from_str(&plain).ok())
            .unwrap_or_default();
        req.flash_mut().load(entries);
    }

    fn apply_flash(&self, req: &Request, resp: &mut Response) {
        let key = match &self.cookie_key {
            Some(key) => key,
            None => return,
        };
        let raw = match req.flash().change() {
            FlashChange::Set(payload) => {
                let sealed = cookies::encrypt(key, flash::COOKIE_NAME, &payload);
                Cookie::build(flash::COOKIE_NAME, sealed)
                    .path("/")
                    .http_only(true)
                    .finish()
                    .to_string()
            }
            FlashChange::Clear => cookies::removal(flash::COOKIE_NAME),
            FlashChange::None => return,
        };
        if let Ok(value) = HeaderValue::from_str(&raw) {
            resp.headers_mut().append(header::SET_COOKIE, value);
        }
    }
}

/// Strips the configured base prefix from a path.
///
/// The prefix is a literal, not a pattern; it only strips at a segment
/// boundary, and a path without the prefix passes through unchanged. An
/// empty result collapses to `/`.
fn strip_base(path: &str, base: Option<&str>) -> String {
    let path = if path.is_empty() { "/" } else { path };

    let base = match base {
        Some(base) if !base.trim_matches('/').is_empty() => base.trim_matches('/'),
        _ => return path.to_string(),
    };

    let prefix = format!("/{}", base);
    match path.strip_prefix(&prefix) {
        Some("") => "/".to_string(),
        Some(rest) if rest.starts_with('/') => rest.to_string(),
        _ => path.to_string(),
    }
}
