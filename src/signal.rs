//! Control-flow signals.
//!
//! A [`Signal`] is a terminal outcome raised from inside a filter or a
//! handler: a redirect to another location, or an explicit error with a
//! status and message. Signals travel up the dispatch pipeline as the `Err`
//! variant of [`Flow`], so a plain `?` aborts everything that would have run
//! after the raising call. Only the dispatcher consumes them; application
//! code never catches a signal.

use http::header::{self, HeaderValue};
use http::StatusCode;

use crate::response::Response;

/// A terminal outcome that supersedes the rest of the dispatch pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// Redirect the client to another location.
    Redirect {
        /// Response status, typically `302`.
        status: StatusCode,
        /// Value of the `Location` header.
        target: String,
    },
    /// Stop processing with an explicit error response.
    Halt {
        /// Response status.
        status: StatusCode,
        /// Plain-text body.
        message: String,
    },
}

/// The outcome of a pipeline step: continue normally, or terminate with a
/// [`Signal`].
pub type Flow<T = ()> = Result<T, Signal>;

impl Signal {
    /// Create a redirect signal.
    pub fn redirect(status: StatusCode, target: impl Into<String>) -> Self {
        Signal::Redirect {
            status,
            target: target.into(),
        }
    }

    /// Create a `302 Found` redirect signal.
    pub fn found(target: impl Into<String>) -> Self {
        Signal::redirect(StatusCode::FOUND, target)
    }

    /// Create an error signal.
    pub fn halt(status: StatusCode, message: impl Into<String>) -> Self {
        Signal::Halt {
            status,
            message: message.into(),
        }
    }

    /// The response status this signal terminates with.
    pub fn status(&self) -> StatusCode {
        match self {
            Signal::Redirect { status, .. } => *status,
            Signal::Halt { status, .. } => *status,
        }
    }

    pub(crate) fn into_response(self) -> Response {
        match self {
            Signal::Redirect { status, target } => {
                let mut resp = Response::builder().status(status).body(String::new());
                if let Ok(value) = HeaderValue::from_str(&target) {
                    resp.headers_mut().insert(header::LOCATION, value);
                }
                resp
            }
            Signal::Halt { status, message } => Response::builder()
                .status(status)
                .content_type("text/plain")
                .body(message),
        }
    }
}

/// Raise a redirect signal when `when` is true; otherwise do nothing.
///
/// Intended to be called with `?` so that a raised signal aborts the caller:
///
/// ```
/// use http::StatusCode;
/// use wicket::{redirect, Flow};
///
/// fn guard(logged_in: bool) -> Flow {
///     redirect(StatusCode::FORBIDDEN, "/users", !logged_in)?;
///     // never reached when the redirect fires
///     Ok(())
/// }
///
/// assert!(guard(true).is_ok());
/// assert!(guard(false).is_err());
/// ```
pub fn redirect(status: StatusCode, target: impl Into<String>, when: bool) -> Flow {
    if when {
        Err(Signal::redirect(status, target))
    } else {
        Ok(())
    }
}

/// Like [`redirect`], but the condition is a zero-argument predicate.
pub fn redirect_if(
    status: StatusCode,
    target: impl Into<String>,
    predicate: impl FnOnce() -> bool,
) -> Flow {
    redirect(status, target, predicate())
}

/// Unconditionally raise an error signal.
///
/// Generic over the continue type so a handler can `return halt(...)`
/// directly.
pub fn halt<T>(status: StatusCode, message: impl Into<String>) -> Flow<T> {
    Err(Signal::halt(status, message))
}
