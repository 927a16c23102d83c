//! # waypost
//!
//! Data-driven routing: describe your application as a nested tree of
//! routes, compile it once into a flat, ordered dispatch table, and route
//! requests through it. Nothing more. Nothing less.
//!
//! ## The contract
//!
//! - **Tree in, table out.** Paths nest; each node's path is relative to its
//!   parent. Compilation flattens the tree in pre-order, parent before
//!   children, and that order is the match order.
//! - **First match wins.** Requests are checked against routes in declared
//!   order. No specificity heuristics; overlapping routes are decided by
//!   position alone.
//! - **Layered middleware.** A node's `float` wraps the entry of every route
//!   beneath it, its `sink` the exit. Layers telescope: the outermost
//!   ancestor enters first and leaves last.
//! - **Explicit continuations.** Every stage gets a [`Next`]. Run it to
//!   continue, skip it to stop, await something first to suspend.
//! - **Reverse routing.** Any route key plus parameters gives back a URL.
//!
//! What waypost leaves to others: sockets and HTTP framing (see
//! [`Router::dispatch`] for the `http` crate hand-off), authentication,
//! content negotiation, and the handlers themselves.
//!
//! ## Quick start
//!
//! ```rust
//! use waypost::{handler::from_fn, MethodMap, Request, Response, Route, RouteTable, Router, ReverseOptions};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let stamp = from_fn(|req, res, next| {
//!     res.set_header("x-served-by", "waypost");
//!     next.run(req, res)
//! });
//! let show = from_fn(|req, res, _next| {
//!     let id = req.param("id").unwrap_or("unknown").to_owned();
//!     res.text(format!("user {id}"));
//!     Box::pin(async {})
//! });
//!
//! let table = RouteTable::build(&[
//!     Route::new("/users", "users")
//!         .action(MethodMap::new().float(stamp))
//!         .child(Route::new("/:id", "user").action(MethodMap::new().get(show))),
//! ]).unwrap();
//!
//! assert_eq!(table.reverse("user", [("id", 42)], ReverseOptions::default()).unwrap(), "/users/42");
//!
//! let router = Router::new(table);
//! let mut req = Request::get("/users/42");
//! let mut res = Response::new();
//! router.handle(&mut req, &mut res).await;
//!
//! assert_eq!(res.body().as_ref(), b"user 42");
//! assert_eq!(res.header("x-served-by"), Some("waypost"));
//! # }
//! ```

mod builder;
mod compat;
mod error;
mod method;
mod pattern;
mod pipeline;
mod request;
mod response;
mod reverse;
mod route;
mod router;
mod status;
mod table;

pub mod handler;
pub mod middleware;

pub use error::Error;
pub use handler::{BoxFuture, BoxedHandler, Handler, Next};
pub use method::{Method, RouteMethod};
pub use pattern::PathPattern;
pub use pipeline::{compose, pass_through};
pub use request::Request;
pub use response::{ContentType, Response};
pub use reverse::{ReverseOptions, reverse_route};
pub use route::{Action, MethodMap, Route};
pub use router::{Router, default_action};
pub use status::Status;
pub use table::{CompiledRoute, RouteTable, build_routes};
