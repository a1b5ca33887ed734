//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. The router knows nothing
//! about middleware: wrap a handler with a [`Chain`](crate::middleware::Chain)
//! and register the result like any other handler.

use std::collections::HashMap;

use http::Method;
use matchit::Router as MatchitRouter;
use tracing::debug;

use crate::handler::{BoxedHandler, Handler};

/// Outcome of routing one request.
pub(crate) enum Lookup {
    Found(BoxedHandler, HashMap<String, String>),
    /// The path is registered, but not for this method.
    MethodNotAllowed,
    NotFound,
}

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each registration returns `self` so calls chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax — `req.param("name")` retrieves them:
    ///
    /// ```rust
    /// # use http::Method;
    /// # use strata::{Request, Response, Router};
    /// # use strata::middleware::{self, Chain};
    /// # async fn get_user(_: Request) -> Response { Response::text("") }
    /// # async fn delete_user(_: Request) -> Response { Response::text("") }
    /// let admin = Chain::new().outermost(middleware::require_header("x-admin", "1"));
    ///
    /// Router::new()
    ///     .on(Method::GET,    "/users/{id}", get_user)
    ///     .on(Method::DELETE, "/users/{id}", admin.wrap(delete_user));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is malformed or already registered for `method`.
    /// Routes are fixed at startup, so this surfaces on the first run.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        debug!(%method, path, "route registered");
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::GET, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::POST, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::PUT, path, handler)
    }

    pub fn patch(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::PATCH, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::DELETE, path, handler)
    }

    pub(crate) fn lookup(&self, method: &Method, path: &str) -> Lookup {
        if let Some(matched) = self.routes.get(method).and_then(|tree| tree.at(path).ok()) {
            let params = matched.params.iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect();
            return Lookup::Found(matched.value.clone(), params);
        }

        if self.routes.values().any(|tree| tree.at(path).is_ok()) {
            Lookup::MethodNotAllowed
        } else {
            Lookup::NotFound
        }
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Request;
    use crate::response::Response;

    async fn ok(_req: Request) -> Response {
        Response::text("ok")
    }

    #[test]
    fn lookup_extracts_params() {
        let router = Router::new().get("/users/{id}", ok);
        match router.lookup(&Method::GET, "/users/42") {
            Lookup::Found(_, params) => assert_eq!(params["id"], "42"),
            _ => panic!("expected a match"),
        }
    }

    #[test]
    fn lookup_distinguishes_wrong_method_from_missing_path() {
        let router = Router::new().post("/users", ok);
        assert!(matches!(router.lookup(&Method::GET, "/users"), Lookup::MethodNotAllowed));
        assert!(matches!(router.lookup(&Method::GET, "/nope"), Lookup::NotFound));
    }

    #[test]
    #[should_panic(expected = "invalid route `/users`")]
    fn duplicate_route_panics() {
        let _ = Router::new().get("/users", ok).get("/users", ok);
    }
}
