//! # strata
//!
//! A minimal HTTP framework built around one idea: cross-cutting behaviour
//! (logging, auth, timing) lives in middleware layers that you stack around a
//! handler, in an order you can read straight off the code.
//!
//! ## The layering contract
//!
//! A middleware takes the next handler and returns a handler. A
//! [`middleware::Chain`] holds an ordered stack of them:
//!
//! - [`outermost`](middleware::Chain::outermost) adds a layer outside every
//!   layer so far — first to see the request, last to see the response.
//! - [`innermost`](middleware::Chain::innermost) adds a layer inside every
//!   layer so far — right next to the handler.
//! - [`wrap`](middleware::Chain::wrap) nests a handler in the whole stack and
//!   gives back a handler the [`Router`] accepts like any other.
//!
//! Outermost layers always sit outside innermost ones, however the calls are
//! interleaved. The chain is never consumed: wrap as many handlers as you like,
//! or clone it and extend the clone for a stricter set of routes.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use strata::{Request, Response, Router, Server};
//! use strata::middleware::{self, Chain};
//!
//! #[tokio::main]
//! async fn main() {
//!     let logged = Chain::new().outermost(middleware::trace);
//!     let secret = logged.clone().innermost(middleware::require_header("x-word", "please"));
//!
//!     let app = Router::new()
//!         .get("/",       logged.wrap(hello))
//!         .get("/secret", secret.wrap(secret_handler));
//!
//!     Server::bind("0.0.0.0:3000").serve(app).await.unwrap();
//! }
//!
//! async fn hello(_req: Request) -> Response {
//!     Response::text("Hello, world!")
//! }
//!
//! async fn secret_handler(_req: Request) -> Response {
//!     Response::text("You got in!")
//! }
//! ```

mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod middleware;

pub use error::Error;
pub use handler::{BoxFuture, BoxedHandler, Handler};
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
