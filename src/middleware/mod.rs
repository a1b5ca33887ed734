//! Middleware layer.
//!
//! Middleware is the right place for cross-cutting concerns: structured
//! tracing, timing, authentication-header inspection. A middleware is any
//! function that takes the next handler in line and returns a new handler
//! with the same signature:
//!
//! ```text
//! fn(Next) -> BoxedHandler
//! ```
//!
//! What it does before calling `next`, after `next` returns, or instead of
//! calling `next` at all is entirely up to it. Layers are assembled into a
//! [`Chain`], which fixes their nesting order and wraps any handler:
//!
//! ```rust
//! use strata::{Request, Response, Router};
//! use strata::middleware::{self, Chain};
//!
//! let public = Chain::new().outermost(middleware::trace);
//! let secret = public.clone().innermost(middleware::require_header("x-word", "please"));
//!
//! let app = Router::new()
//!     .get("/",       public.wrap(hello))
//!     .get("/secret", secret.wrap(hello));
//!
//! async fn hello(_req: Request) -> Response { Response::text("hi") }
//! ```
//!
//! Built-in middleware:
//! - [`trace`] — per-request span with method, path, status, latency
//! - [`timing`] — `server-timing` response header
//! - [`require_header`] — `403 Forbidden` unless a header matches

use std::future::Future;
use std::sync::Arc;

use crate::handler::BoxedHandler;
use crate::request::Request;
use crate::response::IntoResponse;

mod auth;
mod chain;
mod timing;
mod trace;

pub use auth::require_header;
pub use chain::Chain;
pub use timing::timing;
pub use trace::trace;

/// The next link in a chain: either another middleware's handler or the
/// terminal route handler.
pub type Next = BoxedHandler;

/// A function that wraps a handler into a handler.
///
/// Implemented for every `Fn(Next) -> BoxedHandler`, so plain functions and
/// closures register directly. [`Chain`] implements it too, which lets a
/// whole chain be nested as a single layer of another.
pub trait Middleware: Send + Sync + 'static {
    fn wrap(&self, next: Next) -> BoxedHandler;
}

impl<F> Middleware for F
where
    F: Fn(Next) -> BoxedHandler + Send + Sync + 'static,
{
    fn wrap(&self, next: Next) -> BoxedHandler {
        self(next)
    }
}

/// Builds a middleware from an `async fn(Request, Next)`.
///
/// Saves the clone-`next`-into-a-closure boilerplate of writing a
/// [`Middleware`] by hand:
///
/// ```rust
/// use strata::{Request, Response};
/// use strata::middleware::{from_fn, Chain, Next};
///
/// async fn stamp(req: Request, next: Next) -> Response {
///     next.call(req).await.with_header("x-powered-by", "strata")
/// }
///
/// let chain = Chain::new().outermost(from_fn(stamp));
/// ```
pub fn from_fn<F, Fut, R>(f: F) -> impl Middleware
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    let f = Arc::new(f);
    move |next: Next| -> BoxedHandler {
        let f = Arc::clone(&f);
        BoxedHandler::new(move |req: Request| (*f)(req, next.clone()))
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::StatusCode;

    use super::*;
    use crate::response::Response;

    fn req() -> Request {
        http::Request::get("/").body(Bytes::new()).unwrap().into()
    }

    async fn ok(_req: Request) -> Response {
        Response::text("ok")
    }

    async fn deny(_req: Request, _next: Next) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    async fn stamp(req: Request, next: Next) -> Response {
        next.call(req).await.with_header("x-stamp", "1")
    }

    #[tokio::test]
    async fn from_fn_can_decorate_the_response() {
        let h = from_fn(stamp).wrap(BoxedHandler::new(ok));
        let res = h.call(req()).await;
        assert_eq!(res.body(), b"ok");
        assert_eq!(res.header("x-stamp"), Some("1"));
    }

    #[tokio::test]
    async fn from_fn_can_short_circuit() {
        let h = from_fn(deny).wrap(BoxedHandler::new(ok));
        assert_eq!(h.call(req()).await.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn plain_closures_are_middleware() {
        let mw = |next: Next| -> BoxedHandler {
            BoxedHandler::new(move |req: Request| {
                let next = next.clone();
                async move { next.call(req).await.with_header("x-closure", "yes") }
            })
        };
        let res = mw.wrap(BoxedHandler::new(ok)).call(req()).await;
        assert_eq!(res.header("x-closure"), Some("yes"));
    }
}
