//! Middleware composition.
//!
//! `compose` folds an ordered list of optional stages into a single
//! [`Handler`]. Absent entries vanish, so callers can pass inherited layers
//! that may or may not exist without branching.

use std::sync::Arc;

use crate::handler::{BoxFuture, BoxedHandler, Handler, Next};
use crate::request::Request;
use crate::response::Response;

/// Composes `handlers` into one handler that runs them in order.
///
/// - no handlers left after dropping `None`s: a pass-through that just runs
///   its continuation;
/// - exactly one: that handler, unchanged;
/// - otherwise: a pipeline whose last stage continues into the caller's `next`.
///
/// ```rust
/// use waypost::{compose, handler::from_fn};
///
/// let auth = from_fn(|req, res, next| next.run(req, res));
/// let show = from_fn(|_req, res, _next| Box::pin(async move { res.text("ok"); }));
/// let chain = compose([Some(auth), None, Some(show)]);
/// ```
pub fn compose<I>(handlers: I) -> BoxedHandler
where
    I: IntoIterator,
    I::Item: Into<Option<BoxedHandler>>,
{
    try_compose(handlers).unwrap_or_else(pass_through)
}

/// Like [`compose`], but `None` when nothing is left to run.
pub(crate) fn try_compose<I>(handlers: I) -> Option<BoxedHandler>
where
    I: IntoIterator,
    I::Item: Into<Option<BoxedHandler>>,
{
    let mut stages: Vec<BoxedHandler> = handlers.into_iter().filter_map(Into::into).collect();
    match stages.len() {
        0 => None,
        1 => stages.pop(),
        _ => Some(Arc::new(Pipeline { stages: stages.into_boxed_slice() })),
    }
}

/// A handler that does nothing but continue.
pub fn pass_through() -> BoxedHandler {
    Arc::new(PassThrough)
}

struct PassThrough;

impl Handler for PassThrough {
    fn call<'a>(
        &'a self,
        req: &'a mut Request,
        res: &'a mut Response,
        next: Next<'a>,
    ) -> BoxFuture<'a> {
        next.run(req, res)
    }
}

struct Pipeline {
    stages: Box<[BoxedHandler]>,
}

impl Handler for Pipeline {
    fn call<'a>(
        &'a self,
        req: &'a mut Request,
        res: &'a mut Response,
        next: Next<'a>,
    ) -> BoxFuture<'a> {
        Next::chain(&self.stages, next).run(req, res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::from_fn;
    use crate::status::Status;
    use std::sync::Mutex;

    type Log = Arc<Mutex<Vec<&'static str>>>;

    fn step(log: &Log, name: &'static str) -> BoxedHandler {
        let log = Arc::clone(log);
        from_fn(move |req, res, next| {
            log.lock().unwrap().push(name);
            next.run(req, res)
        })
    }

    async fn drive(handler: &BoxedHandler, next: Next<'_>) -> Response {
        let mut req = Request::get("/");
        let mut res = Response::new();
        handler.call(&mut req, &mut res, next).await;
        res
    }

    #[test]
    fn single_handler_is_returned_unchanged() {
        let log = Log::default();
        let only = step(&log, "only");
        let composed = compose([None, Some(Arc::clone(&only)), None]);
        assert!(Arc::ptr_eq(&only, &composed));
    }

    #[tokio::test]
    async fn empty_composition_passes_through() {
        let log = Log::default();
        let after = [step(&log, "after")];
        let composed = compose(Vec::<Option<BoxedHandler>>::new());
        drive(&composed, Next::chain(&after, Next::end())).await;
        assert_eq!(*log.lock().unwrap(), ["after"]);
    }

    #[tokio::test]
    async fn runs_in_order_then_callers_next() {
        let log = Log::default();
        let composed = compose([step(&log, "a"), step(&log, "b"), step(&log, "c")]);
        let after = [step(&log, "next")];
        drive(&composed, Next::chain(&after, Next::end())).await;
        assert_eq!(*log.lock().unwrap(), ["a", "b", "c", "next"]);
    }

    #[tokio::test]
    async fn nested_pipelines_flatten_in_order() {
        let log = Log::default();
        let inner = compose([step(&log, "a"), step(&log, "b")]);
        let outer = compose([Some(inner), None, Some(step(&log, "c"))]);
        drive(&outer, Next::end()).await;
        assert_eq!(*log.lock().unwrap(), ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn skipping_next_halts_the_chain() {
        let log = Log::default();
        let reject = from_fn(|_req, res, _next| {
            res.set_status(Status::Unauthorized);
            Box::pin(async {})
        });
        let composed = compose([step(&log, "a"), reject, step(&log, "never")]);
        let res = drive(&composed, Next::end()).await;
        assert_eq!(res.status(), 401);
        assert_eq!(*log.lock().unwrap(), ["a"]);
    }

    #[tokio::test]
    async fn deferred_continuation_still_runs_in_order() {
        let log = Log::default();
        let deferred = {
            let log = Arc::clone(&log);
            from_fn(move |req, res, next| {
                let log = Arc::clone(&log);
                Box::pin(async move {
                    tokio::task::yield_now().await;
                    log.lock().unwrap().push("deferred");
                    next.run(req, res).await;
                })
            })
        };
        let composed = compose([deferred, step(&log, "b")]);
        drive(&composed, Next::end()).await;
        assert_eq!(*log.lock().unwrap(), ["deferred", "b"]);
    }
}
