//! Request tracing.

use std::time::Instant;

use tracing::{Instrument, error, info, info_span, warn};

use super::Next;
use crate::handler::BoxedHandler;
use crate::request::Request;

/// Opens a span per request carrying method and path, and logs the final
/// status and latency when the inner chain returns.
///
/// 5xx responses log at `ERROR`, 4xx at `WARN`, everything else at `INFO`.
/// Register it as the outermost layer so the latency covers the whole chain.
pub fn trace(next: Next) -> BoxedHandler {
    BoxedHandler::new(move |req: Request| {
        let next = next.clone();
        let span = info_span!("request", method = %req.method(), path = %req.path());

        async move {
            let start = Instant::now();
            let res = next.call(req).await;
            let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
            let status = res.status_code();

            if status.is_server_error() {
                error!(status = status.as_u16(), latency_ms, "request failed");
            } else if status.is_client_error() {
                warn!(status = status.as_u16(), latency_ms, "request rejected");
            } else {
                info!(status = status.as_u16(), latency_ms, "request completed");
            }
            res
        }
        .instrument(span)
    })
}
