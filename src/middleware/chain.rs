//! Ordered middleware composition.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use super::{Middleware, Next};
use crate::handler::{BoxedHandler, Handler};

/// An ordered stack of middleware layers around a handler.
///
/// Layers are kept outermost-first. [`outermost`](Chain::outermost) pushes
/// onto the outer end, [`innermost`](Chain::innermost) onto the inner end, so
/// every outermost layer nests outside every innermost layer no matter how
/// the calls interleave:
///
/// ```text
/// Chain::new()
///     .innermost(a)        [a]
///     .outermost(b)        [b, a]
///     .innermost(c)        [b, a, c]
///
/// request  → b → a → c → handler
/// response ← b ← a ← c ← handler
/// ```
///
/// Layers are never removed or reordered. [`wrap`](Chain::wrap) reads the
/// stack without changing it, so one chain can wrap any number of handlers.
/// Cloning is cheap and the clone is independent: extending it leaves the
/// original untouched.
#[derive(Clone, Default)]
pub struct Chain {
    layers: VecDeque<Arc<dyn Middleware>>,
}

impl Chain {
    pub fn new() -> Self {
        Self { layers: VecDeque::new() }
    }

    /// Adds `mw` as the new outermost layer: it sees the request before every
    /// layer already registered and the response after all of them.
    pub fn outermost(mut self, mw: impl Middleware) -> Self {
        self.push_outermost(mw);
        self
    }

    /// Adds `mw` as the new innermost layer: it runs immediately around the
    /// handler, inside every layer already registered.
    pub fn innermost(mut self, mw: impl Middleware) -> Self {
        self.push_innermost(mw);
        self
    }

    /// In-place form of [`outermost`](Chain::outermost).
    pub fn push_outermost(&mut self, mw: impl Middleware) -> &mut Self {
        self.layers.push_front(Arc::new(mw));
        self
    }

    /// In-place form of [`innermost`](Chain::innermost).
    pub fn push_innermost(&mut self, mw: impl Middleware) -> &mut Self {
        self.layers.push_back(Arc::new(mw));
        self
    }

    pub fn len(&self) -> usize { self.layers.len() }
    pub fn is_empty(&self) -> bool { self.layers.is_empty() }

    /// Wraps `handler` in every layer, innermost first, and returns the
    /// result as a single handler ready for [`Router::on`](crate::Router::on).
    ///
    /// With no layers the handler is returned as-is.
    pub fn wrap(&self, handler: impl Handler) -> BoxedHandler {
        self.layers
            .iter()
            .rev()
            .fold(handler.into_boxed_handler(), |next, mw| mw.wrap(next))
    }
}

impl Middleware for Chain {
    fn wrap(&self, next: Next) -> BoxedHandler {
        Chain::wrap(self, next)
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain").field("layers", &self.layers.len()).finish()
    }
}
