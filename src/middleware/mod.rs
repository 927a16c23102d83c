//! Stock middleware.
//!
//! Each function here returns a [`BoxedHandler`](crate::BoxedHandler) meant
//! for a `float` slot, so it wraps everything beneath the node it is declared
//! on:
//!
//! ```rust
//! use std::time::Duration;
//! use waypost::{compose, middleware, MethodMap, Route};
//!
//! let api = Route::new("/api", "api").action(
//!     MethodMap::new().float(compose([
//!         middleware::trace(),
//!         middleware::timeout(Duration::from_secs(5)),
//!     ])),
//! );
//! ```
//!
//! - [`trace`]: per-request span with method, url, final status and latency
//! - [`timeout`]: answers `504` when the rest of the chain runs too long

mod timeout;
mod trace;

pub use timeout::timeout;
pub use trace::trace;
