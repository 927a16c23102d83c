//! Request dispatch.
//!
//! A linear, first-match-wins scan over the compiled table. No specificity
//! sort, no method-first index: two overlapping patterns are decided purely
//! by which one was declared first.

use bytes::Bytes;
use http_body_util::Full;
use tracing::{debug, trace, warn};

use crate::handler::{BoxFuture, BoxedHandler, Handler, Next, from_fn};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;
use crate::table::RouteTable;

/// Dispatches requests through a [`RouteTable`].
///
/// A `Router` is itself a [`Handler`]: mounted inside another chain it
/// forwards its continuation to the matched route, and does not run it when
/// nothing matched.
pub struct Router {
    table: RouteTable,
    fallback: BoxedHandler,
}

impl Router {
    pub fn new(table: RouteTable) -> Self {
        Self { table, fallback: default_action() }
    }

    /// Handler for matched routes that have no action of their own.
    pub fn fallback(mut self, handler: BoxedHandler) -> Self {
        self.fallback = handler;
        self
    }

    pub fn table(&self) -> &RouteTable { &self.table }

    /// Routes one request with no outer continuation.
    pub async fn handle(&self, req: &mut Request, res: &mut Response) {
        self.call(req, res, Next::end()).await
    }

    /// Adapts `http` crate types for whichever transport drives the router.
    pub async fn dispatch(&self, req: http::Request<Bytes>) -> http::Response<Full<Bytes>> {
        let mut req = Request::from_http(req);
        let mut res = Response::new();
        self.handle(&mut req, &mut res).await;
        res.into_http()
    }
}

impl Handler for Router {
    fn call<'a>(
        &'a self,
        req: &'a mut Request,
        res: &'a mut Response,
        next: Next<'a>,
    ) -> BoxFuture<'a> {
        let method = Method::from_request(req.method());

        let Some((route, captures)) = self.table.find(method, req.path()) else {
            debug!(method = %req.method(), url = %req.url(), "no route matched");
            res.set_status(Status::NotFound);
            return Box::pin(std::future::ready(()));
        };

        trace!(key = %route.key(), method = %route.method(), path = %route.path(), "route matched");
        for (name, value) in route.pattern().param_names().iter().zip(captures) {
            req.params.insert(name.clone(), value);
        }

        match route.handler() {
            Some(handler) => handler.call(req, res, next),
            None => {
                warn!(key = %route.key(), method = %route.method(), "route has no action, using fallback");
                self.fallback.call(req, res, next)
            }
        }
    }
}

/// Built-in fallback: `500` with an explanatory body, chain stops here.
pub fn default_action() -> BoxedHandler {
    from_fn(|_req, res, _next| {
        res.set_status(Status::InternalServerError)
            .text("No action defined at this route");
        Box::pin(std::future::ready(()))
    })
}
