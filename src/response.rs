use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::StatusCode;

/// Represents an HTTP response.
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl Response {
    /// Creates a response builder.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
        }
    }

    /// A `200 OK` plain-text response.
    pub fn text(body: impl Into<String>) -> Self {
        Response::builder()
            .content_type("text/plain")
            .body(body.into())
    }

    /// A response with the given status and no body.
    pub fn empty(status: StatusCode) -> Self {
        Response::builder().status(status).body(String::new())
    }

    /// Returns the associated status code.
    #[inline]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Sets the status code for this response.
    #[inline]
    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
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

    /// Returns the response body.
    #[inline]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consumes the response, returning status, headers and body.
    pub fn into_parts(self) -> (StatusCode, HeaderMap, String) {
        (self.status, self.headers, self.body)
    }
}

/// Builder for [`Response`].
pub struct ResponseBuilder {
    status: StatusCode,
    headers: HeaderMap,
}

impl ResponseBuilder {
    /// Sets the status code.
    #[must_use]
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Appends a header.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Sets the `Content-Type` header.
    #[must_use]
    pub fn content_type(self, value: &'static str) -> Self {
        self.header(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static(value),
        )
    }

    /// Finishes the response with the given body.
    pub fn body(self, body: impl Into<String>) -> Response {
        Response {
            status: self.status,
            headers: self.headers,
            body: body.into(),
        }
    }
}
