//! Handler trait, type erasure and the explicit continuation.
//!
//! # How a chain is driven
//!
//! Every stage of a route (inherited floats, the action, inherited sinks) is
//! a [`Handler`]. A handler receives the request, the response and a
//! [`Next`]: the rest of the chain. Control only moves forward when the
//! handler runs its continuation:
//!
//! ```text
//! float ── next.run ──▶ action ── next.run ──▶ sink ── next.run ──▶ caller's next
//!   │                     │                      │
//!   └ may stop here       └ may stop here        └ may stop here
//! ```
//!
//! Not running `next` short-circuits the chain (auth rejection, cached
//! reply). Awaiting something before running it is how a stage suspends.
//! `Next::run` takes `self` by value, so a continuation can run at most once;
//! re-entering downstream stages is not expressible.
//!
//! Handlers are stored as [`BoxedHandler`] = `Arc<dyn Handler>`. Composition
//! shares stages between routes by cloning the `Arc`, and a compiled route
//! table is `Send + Sync`.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::Response;

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future borrowing the request and response
/// for `'a`.
///
/// `Send` lets a transport run it on a multi-threaded runtime.
pub type BoxFuture<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

/// A type-erased handler shared between every route that inherits it.
pub type BoxedHandler = Arc<dyn Handler>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// One stage of a middleware chain.
///
/// Most code never implements this directly and uses [`from_fn`] instead.
/// Implement it on a struct when the stage carries configuration:
///
/// ```rust
/// use waypost::{BoxFuture, Handler, Next, Request, Response};
///
/// struct Tag(&'static str);
///
/// impl Handler for Tag {
///     fn call<'a>(&'a self, req: &'a mut Request, res: &'a mut Response, next: Next<'a>) -> BoxFuture<'a> {
///         res.set_header("x-tag", self.0);
///         next.run(req, res)
///     }
/// }
/// ```
pub trait Handler: Send + Sync + 'static {
    fn call<'a>(
        &'a self,
        req: &'a mut Request,
        res: &'a mut Response,
        next: Next<'a>,
    ) -> BoxFuture<'a>;
}

/// Boxes any handler value.
pub fn boxed(handler: impl Handler) -> BoxedHandler {
    Arc::new(handler)
}

/// Wraps a closure as a handler.
///
/// The closure gets `(req, res, next)` and returns a pinned, boxed future:
///
/// ```rust
/// use waypost::handler::from_fn;
///
/// let hello = from_fn(|_req, res, next| Box::pin(async move {
///     res.text("hello");
///     next.run(_req, res).await;
/// }));
/// ```
pub fn from_fn<F>(f: F) -> BoxedHandler
where
    F: for<'a> Fn(&'a mut Request, &'a mut Response, Next<'a>) -> BoxFuture<'a>
        + Send
        + Sync
        + 'static,
{
    Arc::new(FnHandler(f))
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// Newtype bridging a closure to the [`Handler`] trait object.
struct FnHandler<F>(F);

impl<F> Handler for FnHandler<F>
where
    F: for<'a> Fn(&'a mut Request, &'a mut Response, Next<'a>) -> BoxFuture<'a>
        + Send
        + Sync
        + 'static,
{
    fn call<'a>(
        &'a self,
        req: &'a mut Request,
        res: &'a mut Response,
        next: Next<'a>,
    ) -> BoxFuture<'a> {
        (self.0)(req, res, next)
    }
}

// ── Continuation ──────────────────────────────────────────────────────────────

/// The remainder of a chain.
///
/// A continuation is a slice of stages still to run, followed by the
/// continuation of whoever invoked the enclosing pipeline. Nested pipelines
/// therefore unwind into their caller without copying stage lists.
pub struct Next<'a> {
    stages: &'a [BoxedHandler],
    then: Option<Box<Next<'a>>>,
}

impl<'a> Next<'a> {
    /// The identity continuation: running it does nothing.
    pub fn end() -> Self {
        Self { stages: &[], then: None }
    }

    /// Runs `stages` in order, then `then`.
    pub(crate) fn chain(stages: &'a [BoxedHandler], then: Next<'a>) -> Self {
        let then = (!then.is_end()).then(|| Box::new(then));
        Self { stages, then }
    }

    /// Whether nothing remains downstream.
    pub fn is_end(&self) -> bool {
        self.stages.is_empty() && self.then.is_none()
    }

    /// Hands control to the next stage.
    pub fn run(self, req: &'a mut Request, res: &'a mut Response) -> BoxFuture<'a> {
        match self.stages.split_first() {
            Some((stage, rest)) => stage.call(req, res, Next { stages: rest, then: self.then }),
            None => match self.then {
                Some(then) => (*then).run(req, res),
                None => Box::pin(std::future::ready(())),
            },
        }
    }
}
