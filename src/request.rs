use std::collections::BTreeMap;

use cookie::{Cookie, CookieJar};
use http::header::{self, HeaderMap};
use http::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::flash::Flash;

/// Represents an incoming HTTP request, reduced to what the dispatch
/// pipeline consumes: method, path, headers and cookies, plus the
/// per-request [`Stash`] and [`Flash`] scratch areas.
pub struct Request {
    method: Method,
    path: String,
    headers: HeaderMap,
    cookies: CookieJar,
    stash: Stash,
    flash: Flash,
}

impl Request {
    /// Creates a bare request from a method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            cookies: CookieJar::new(),
            stash: Stash::default(),
            flash: Flash::default(),
        }
    }

    /// Creates a request from host-transport parts, parsing the `Cookie`
    /// header into the cookie jar.
    pub fn from_parts(method: Method, path: impl Into<String>, headers: HeaderMap) -> Self {
        let mut cookies = CookieJar::new();
        for value in headers.get_all(header::COOKIE) {
            if let Ok(raw) = value.to_str() {
                for piece in raw.split(';') {
                    if let Ok(cookie) = Cookie::parse(piece.trim().to_string()) {
                        cookies.add_original(cookie);
                    }
                }
            }
        }
        Self {
            method,
            path: path.into(),
            headers,
            cookies,
            stash: Stash::default(),
            flash: Flash::default(),
        }
    }

    /// Returns the request method.
    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request path.
    ///
    /// Once dispatch begins this is the normalized path, with the configured
    /// base prefix already stripped.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    pub(crate) fn set_path(&mut self, path: String) {
        self.path = path;
    }

    /// Returns a reference to the associated header map.
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a mutable reference to the associated header map.
    #[inline]
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Returns the value of the named request cookie.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(|cookie| cookie.value())
    }

    /// Adds a request cookie, as if it had arrived in the `Cookie` header.
    pub fn add_cookie(&mut self, cookie: Cookie<'static>) {
        self.cookies.add_original(cookie);
    }

    /// Returns the per-request stash.
    #[inline]
    pub fn stash(&self) -> &Stash {
        &self.stash
    }

    /// Returns the per-request stash mutably.
    #[inline]
    pub fn stash_mut(&mut self) -> &mut Stash {
        &mut self.stash
    }

    /// Returns the flash message store.
    #[inline]
    pub fn flash(&self) -> &Flash {
        &self.flash
    }

    /// Returns the flash message store mutably.
    #[inline]
    pub fn flash_mut(&mut self) -> &mut Flash {
        &mut self.flash
    }
}

/// Per-request scratch storage.
///
/// Filters run before the handler and use the stash to pass loaded data
/// forward; the whole store is dropped with the request.
#[derive(Default)]
pub struct Stash(BTreeMap<String, Value>);

impl Stash {
    /// Get a value from the stash.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        self.0
            .get(name)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Sets a key-value pair into the stash.
    pub fn set(&mut self, name: &str, value: impl Serialize) {
        if let Ok(value) = serde_json::to_value(&value) {
            self.0.insert(name.to_string(), value);
        }
    }

    /// Remove a value from the stash.
    pub fn remove(&mut self, name: &str) {
        self.0.remove(name);
    }

    /// Returns `true` if the stash holds a value under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns `true` if the stash is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Clear the stash.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stash_roundtrip() {
        let mut stash = Stash::default();
        assert!(stash.is_empty());

        stash.set("count", 3);
        stash.set("name", "fern");
        assert_eq!(stash.get::<i32>("count"), Some(3));
        assert_eq!(stash.get::<String>("name"), Some("fern".to_string()));
        assert!(stash.contains("count"));

        stash.remove("count");
        assert_eq!(stash.get::<i32>("count"), None);
    }

    #[test]
    fn cookies_parsed_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            http::header::HeaderValue::from_static("a=1; b=two"),
        );
        let req = Request::from_parts(Method::GET, "/", headers);
        assert_eq!(req.cookie("a"), Some("1"));
        assert_eq!(req.cookie("b"), Some("two"));
        assert_eq!(req.cookie("c"), None);
    }
}
