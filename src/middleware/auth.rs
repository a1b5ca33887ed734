//! Header-based access control.

use std::sync::Arc;

use http::StatusCode;
use tracing::debug;

use super::{Middleware, Next, from_fn};
use crate::request::Request;
use crate::response::Response;

/// Rejects with `403 Forbidden` unless the request carries header `name`
/// with exactly `value`. Matching requests continue down the chain.
///
/// ```rust
/// use strata::middleware::{require_header, Chain};
///
/// let admin = Chain::new().innermost(require_header("x-api-key", "s3cret"));
/// ```
pub fn require_header(name: impl Into<String>, value: impl Into<String>) -> impl Middleware {
    let name: Arc<str> = name.into().into();
    let value: Arc<str> = value.into().into();

    from_fn(move |req: Request, next: Next| {
        let allowed = req.header(&name) == Some(&*value);
        if !allowed {
            debug!(header = %name, path = req.path(), "required header missing or wrong");
        }
        async move {
            if allowed {
                next.call(req).await
            } else {
                Response::status(StatusCode::FORBIDDEN)
            }
        }
    })
}
