//! Minimal strata example — one public route, one guarded route, shared
//! request logging.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Try:
//!   curl -i http://localhost:8080/
//!   curl -i http://localhost:8080/secret
//!   curl -i 'http://localhost:8080/secret?word=please'

use http::StatusCode;
use strata::middleware::{self, Chain, Next};
use strata::{Request, Response, Router, Server};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let mut chain = Chain::new();
    chain.push_outermost(middleware::trace);
    let public = chain.clone();

    // Everything registered so far still wraps the secret route; the guard
    // sits inside it.
    chain.push_innermost(middleware::from_fn(magic_word));

    let app = Router::new()
        .get("/",       public.wrap(handler))
        .get("/secret", chain.wrap(secret_handler));

    Server::bind("0.0.0.0:8080")
        .serve(app)
        .await
        .expect("server error");
}

async fn handler(_req: Request) -> Response {
    Response::text("Hello, world!")
}

async fn secret_handler(_req: Request) -> Response {
    Response::text("You got in!")
}

async fn magic_word(req: Request, next: Next) -> Response {
    if req.query_param("word") == Some("please") {
        next.call(req).await
    } else {
        Response::builder()
            .status(StatusCode::FORBIDDEN)
            .text("You didn't say the magic word!")
    }
}
