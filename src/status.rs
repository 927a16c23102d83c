//! HTTP status codes as a typed enum.
//!
//! Only the codes a router and its stock middleware produce or commonly set
//! are listed. A handler that needs something exotic can still write any
//! `u16` through [`Response::set_status_code`](crate::Response::set_status_code).
//!
//! ```rust
//! use waypost::{Response, Status};
//!
//! let mut res = Response::new();
//! res.set_status(Status::NotFound);
//! assert_eq!(res.status(), 404);
//! ```

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                  // 200
    Created,             // 201
    NoContent,           // 204

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    Unauthorized,        // 401
    NotFound,            // 404
    Conflict,            // 409

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError, // 500
    GatewayTimeout,      // 504
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                  => 200,
            Status::Created             => 201,
            Status::NoContent           => 204,
            Status::Unauthorized        => 401,
            Status::NotFound            => 404,
            Status::Conflict            => 409,
            Status::InternalServerError => 500,
            Status::GatewayTimeout      => 504,
        }
    }
}
