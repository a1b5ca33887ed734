//! Server-side latency reporting.

use std::time::Instant;

use super::Next;
use crate::handler::BoxedHandler;
use crate::request::Request;

/// Appends `server-timing: app;dur=<ms>` to every response, measuring the
/// time spent in the layers inside this one and the handler.
pub fn timing(next: Next) -> BoxedHandler {
    BoxedHandler::new(move |req: Request| {
        let next = next.clone();
        async move {
            let start = Instant::now();
            let res = next.call(req).await;
            let dur = start.elapsed().as_secs_f64() * 1000.0;
            res.with_header("server-timing", &format!("app;dur={dur:.3}"))
        }
    })
}
