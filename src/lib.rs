//! Wicket is a minimal front-controller: it maps an incoming HTTP method and
//! path to a registered handler, extracts named path segments, runs
//! pre-handler filters keyed to those segments, and dispatches to the
//! matching handler or a NotFound fallback.
//!
//! # Usage
//!
//! Routes are templates of literal segments and `:name` placeholders,
//! optionally ending in a `*` segment that captures the rest of the path.
//! Registration order is match priority: the first registered pattern that
//! matches wins, with no specificity scoring.
//!
//! ```
//! use http::{Method, StatusCode};
//! use wicket::{halt, App, Request, Response};
//!
//! let mut app = App::new();
//!
//! app.filters_mut()
//!     .on("blog_id", |req: &mut Request, value: &str, _: &[String]| {
//!         req.stash_mut().set("blog", format!("blog #{}", value));
//!         Ok(())
//!     });
//!
//! app.router_mut()
//!     .get("/blogs/:blog_id", |req: &mut Request, args: &[String]| {
//!         let blog: String = match req.stash().get("blog") {
//!             Some(blog) => blog,
//!             None => return halt(StatusCode::INTERNAL_SERVER_ERROR, "missing blog"),
//!         };
//!         Ok(Response::text(format!("{} ({})", blog, args[0])))
//!     })
//!     .unwrap();
//!
//! let mut req = Request::new(Method::GET, "/blogs/42");
//! let resp = app.dispatch(&mut req);
//! assert_eq!(resp.body(), "blog #42 (42)");
//! ```
//!
//! Filters and handlers abort the rest of the pipeline by raising a
//! [`Signal`] — see [`redirect`] and [`halt`]. The collaborators the
//! pipeline leans on live in their own modules: [`config`], [`cache`],
//! [`cookies`] and [`flash`].

#![forbid(unsafe_code)]
#![deny(unreachable_pub)]
#![warn(missing_docs)]

pub mod cache;
pub mod config;
pub mod cookies;
pub mod error;
pub mod filter;
pub mod flash;
pub mod logger;
pub mod pattern;
pub mod route;
pub mod signal;

mod dispatch;
mod request;
mod response;
mod server;

#[doc(inline)]
pub use http;

pub use cache::Cache;
pub use config::{Config, ConfigError};
pub use cookies::CookieKey;
pub use dispatch::App;
pub use error::{Result, RouteError};
pub use filter::FilterRegistry;
pub use flash::Flash;
pub use pattern::Pattern;
pub use request::{Request, Stash};
pub use response::{Response, ResponseBuilder};
pub use route::{Resource, Router};
pub use server::Server;
pub use signal::{halt, redirect, redirect_if, Flow, Signal};
