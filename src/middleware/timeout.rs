use std::time::Duration;

use tracing::warn;

use crate::handler::{BoxedHandler, from_fn};
use crate::response::Response;
use crate::status::Status;

/// Races the rest of the chain against `limit`. When the limit wins, the
/// downstream future is dropped and whatever it had written is replaced by a
/// bare `504`.
pub fn timeout(limit: Duration) -> BoxedHandler {
    from_fn(move |req, res, next| Box::pin(async move {
        let finished = tokio::time::timeout(limit, next.run(&mut *req, &mut *res)).await;
        if finished.is_err() {
            warn!(url = %req.url(), ?limit, "request timed out");
            *res = Response::new();
            res.set_status(Status::GatewayTimeout);
        }
    }))
}
