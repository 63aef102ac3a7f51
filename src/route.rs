//! Route table and registration DSL.

use fnv::FnvHashMap;
use http::Method;

use crate::error::Result;
use crate::pattern::Pattern;
use crate::request::Request;
use crate::response::Response;
use crate::signal::Flow;

/// A registered request handler.
///
/// Handlers receive the request and the values captured from the path, in
/// the order the symbols were declared in the template (wildcard remainder
/// last), and either produce a response or raise a terminal signal.
pub type Handler = Box<dyn Fn(&mut Request, &[String]) -> Flow<Response> + Send + Sync>;

pub(crate) struct RouteEntry {
    pub(crate) pattern: Pattern,
    pub(crate) handler: Handler,
}

/// An ordered collection of routes, one table per HTTP method.
///
/// Registration order is match priority: when two patterns both match a
/// path, the one registered first wins, regardless of specificity. The
/// table is built during application setup and read-only while serving.
///
/// # Example
///
/// ```
/// use wicket::{Request, Response, Router};
///
/// let mut router = Router::new();
/// router
///     .get("/blogs/:blog_id", |_req: &mut Request, args: &[String]| {
///         Ok(Response::text(format!("blog {}", args[0])))
///     })
///     .unwrap();
/// ```
#[derive(Default)]
pub struct Router {
    tables: FnvHashMap<Method, Vec<RouteEntry>>,
}

impl Router {
    /// Create an empty router.
    pub fn new() -> Self {
        Default::default()
    }

    /// Registers a handler for `method` and `template`.
    ///
    /// The template is compiled once; a malformed template is the only way
    /// this fails.
    pub fn register<H>(&mut self, method: Method, template: &str, handler: H) -> Result<()>
    where
        H: Fn(&mut Request, &[String]) -> Flow<Response> + Send + Sync + 'static,
    {
        self.add(method, template, Box::new(handler))
    }

    /// Registers a handler for `GET`.
    pub fn get<H>(&mut self, template: &str, handler: H) -> Result<()>
    where
        H: Fn(&mut Request, &[String]) -> Flow<Response> + Send + Sync + 'static,
    {
        self.register(Method::GET, template, handler)
    }

    /// Registers a handler for `POST`.
    pub fn post<H>(&mut self, template: &str, handler: H) -> Result<()>
    where
        H: Fn(&mut Request, &[String]) -> Flow<Response> + Send + Sync + 'static,
    {
        self.register(Method::POST, template, handler)
    }

    /// Registers a handler for `PUT`.
    pub fn put<H>(&mut self, template: &str, handler: H) -> Result<()>
    where
        H: Fn(&mut Request, &[String]) -> Flow<Response> + Send + Sync + 'static,
    {
        self.register(Method::PUT, template, handler)
    }

    /// Registers a handler for `DELETE`.
    pub fn delete<H>(&mut self, template: &str, handler: H) -> Result<()>
    where
        H: Fn(&mut Request, &[String]) -> Flow<Response> + Send + Sync + 'static,
    {
        self.register(Method::DELETE, template, handler)
    }

    /// Registers conventional REST sub-routes for `base` from a [`Resource`]
    /// capability descriptor.
    ///
    /// Only the operations the resource actually supplies are registered;
    /// the rest simply do not exist and dispatch to them yields NotFound.
    /// The resource identifier symbol is `:id`. `…/new` is registered ahead
    /// of `…/:id` so the form route is reachable.
    ///
    /// | operation   | route                |
    /// |-------------|----------------------|
    /// | `index`     | `GET    base`        |
    /// | `new_form`  | `GET    base/new`    |
    /// | `create`    | `POST   base`        |
    /// | `show`      | `GET    base/:id`    |
    /// | `edit_form` | `GET    base/:id/edit` |
    /// | `update`    | `PUT    base/:id`    |
    /// | `delete`    | `DELETE base/:id`    |
    pub fn restify(&mut self, base: &str, resource: Resource) -> Result<()> {
        let base = base.trim_end_matches('/').to_string();
        let Resource {
            index,
            new_form,
            create,
            show,
            edit_form,
            update,
            delete,
        } = resource;

        if let Some(handler) = index {
            self.add(Method::GET, &base, handler)?;
        }
        if let Some(handler) = new_form {
            self.add(Method::GET, &format!("{}/new", base), handler)?;
        }
        if let Some(handler) = create {
            self.add(Method::POST, &base, handler)?;
        }
        if let Some(handler) = show {
            self.add(Method::GET, &format!("{}/:id", base), handler)?;
        }
        if let Some(handler) = edit_form {
            self.add(Method::GET, &format!("{}/:id/edit", base), handler)?;
        }
        if let Some(handler) = update {
            self.add(Method::PUT, &format!("{}/:id", base), handler)?;
        }
        if let Some(handler) = delete {
            self.add(Method::DELETE, &format!("{}/:id", base), handler)?;
        }
        Ok(())
    }

    /// Total number of registered routes across all methods.
    pub fn route_count(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }

    fn add(&mut self, method: Method, template: &str, handler: Handler) -> Result<()> {
        let pattern = Pattern::compile(template)?;
        self.tables
            .entry(method)
            .or_insert_with(Vec::new)
            .push(RouteEntry { pattern, handler });
        Ok(())
    }

    /// First entry whose pattern matches, in registration order, together
    /// with the captured values.
    pub(crate) fn find(&self, method: &Method, path: &str) -> Option<(&RouteEntry, Vec<String>)> {
        let entries = self.tables.get(method)?;
        for entry in entries {
            if let Some(values) = entry.pattern.matches(path) {
                return Some((entry, values));
            }
        }
        None
    }
}

/// A capability descriptor for [`Router::restify`]: the subset of REST
/// operations a resource actually implements.
///
/// Operations left unset are skipped at registration time rather than
/// registered as handlers that would fail at dispatch time.
#[derive(Default)]
pub struct Resource {
    index: Option<Handler>,
    new_form: Option<Handler>,
    create: Option<Handler>,
    show: Option<Handler>,
    edit_form: Option<Handler>,
    update: Option<Handler>,
    delete: Option<Handler>,
}

macro_rules! resource_op {
    ($(#[$docs:meta] $name:ident;)*) => {
        $(
        #[$docs]
        #[must_use]
        pub fn $name<H>(mut self, handler: H) -> Self
        where
            H: Fn(&mut Request, &[String]) -> Flow<Response> + Send + Sync + 'static,
        {
            self.$name = Some(Box::new(handler));
            self
        }
        )*
    };
}

impl Resource {
    /// Create a descriptor with no operations.
    pub fn new() -> Self {
        Default::default()
    }

    resource_op!(
        /// List the collection (`GET base`).
        index;
        /// Render the creation form (`GET base/new`).
        new_form;
        /// Create a member (`POST base`).
        create;
        /// Show one member (`GET base/:id`).
        show;
        /// Render the edit form (`GET base/:id/edit`).
        edit_form;
        /// Update a member (`PUT base/:id`).
        update;
        /// Delete a member (`DELETE base/:id`).
        delete;
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_handler(tag: &'static str) -> impl Fn(&mut Request, &[String]) -> Flow<Response> {
        move |_req, _args| Ok(Response::text(tag))
    }

    #[test]
    fn registration_order_is_priority() {
        let mut router = Router::new();
        router.get("/posts/:id", ok_handler("dynamic")).unwrap();
        router.get("/posts/new", ok_handler("static")).unwrap();

        // the dynamic route was registered first, so it shadows the literal
        let (entry, values) = router.find(&Method::GET, "/posts/new").unwrap();
        assert_eq!(entry.pattern.template(), "/posts/:id");
        assert_eq!(values, ["new"]);
    }

    #[test]
    fn per_method_tables() {
        let mut router = Router::new();
        router.get("/things", ok_handler("list")).unwrap();
        router.post("/things", ok_handler("create")).unwrap();

        assert!(router.find(&Method::GET, "/things").is_some());
        assert!(router.find(&Method::POST, "/things").is_some());
        assert!(router.find(&Method::DELETE, "/things").is_none());
    }

    #[test]
    fn malformed_template_fails_registration() {
        let mut router = Router::new();
        assert!(router.get("/a/:x/:x", ok_handler("dup")).is_err());
        assert_eq!(router.route_count(), 0);
    }

    #[test]
    fn restify_registers_only_supplied_operations() {
        let mut router = Router::new();
        router
            .restify(
                "/pages",
                Resource::new()
                    .index(ok_handler("index"))
                    .show(ok_handler("show")),
            )
            .unwrap();

        assert_eq!(router.route_count(), 2);
        assert!(router.find(&Method::GET, "/pages").is_some());
        assert!(router.find(&Method::GET, "/pages/7").is_some());
        assert!(router.find(&Method::POST, "/pages").is_none());
        assert!(router.find(&Method::PUT, "/pages/7").is_none());
        assert!(router.find(&Method::DELETE, "/pages/7").is_none());
        assert!(router.find(&Method::GET, "/pages/7/edit").is_none());
    }

    #[test]
    fn restify_new_form_beats_id_capture() {
        let mut router = Router::new();
        router
            .restify(
                "/pages",
                Resource::new()
                    .new_form(ok_handler("new"))
                    .show(ok_handler("show")),
            )
            .unwrap();

        let (entry, _) = router.find(&Method::GET, "/pages/new").unwrap();
        assert_eq!(entry.pattern.template(), "/pages/new");
        let (entry, values) = router.find(&Method::GET, "/pages/42").unwrap();
        assert_eq!(entry.pattern.template(), "/pages/:id");
        assert_eq!(values, ["42"]);
    }

    #[test]
    fn restify_full_set() {
        let mut router = Router::new();
        router
            .restify(
                "/pages/",
                Resource::new()
                    .index(ok_handler("index"))
                    .new_form(ok_handler("new"))
                    .create(ok_handler("create"))
                    .show(ok_handler("show"))
                    .edit_form(ok_handler("edit"))
                    .update(ok_handler("update"))
                    .delete(ok_handler("delete")),
            )
            .unwrap();

        assert_eq!(router.route_count(), 7);
        assert!(router.find(&Method::GET, "/pages/3/edit").is_some());
        assert!(router.find(&Method::PUT, "/pages/3").is_some());
        assert!(router.find(&Method::DELETE, "/pages/3").is_some());
    }
}
