use std::time::Instant;

use tracing::{Instrument, info, info_span};

use crate::handler::{BoxedHandler, from_fn};

/// Opens an `info` span around the rest of the chain and logs the final
/// status and latency once it unwinds.
pub fn trace() -> BoxedHandler {
    from_fn(|req, res, next| Box::pin(async move {
        let span = info_span!("request", method = %req.method(), url = %req.url());
        let started = Instant::now();

        next.run(&mut *req, &mut *res).instrument(span.clone()).await;

        info!(parent: &span, status = res.status(), latency = ?started.elapsed(), "request finished");
    }))
}
