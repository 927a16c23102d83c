//! Route tree description.
//!
//! Authors describe their application as a tree of [`Route`] nodes. Each node
//! names a path segment relative to its parent, a symbolic key for reverse
//! routing, an optional [`Action`] and optional children:
//!
//! ```rust
//! use waypost::{handler::from_fn, MethodMap, Route};
//!
//! let ok = from_fn(|req, res, next| next.run(req, res));
//!
//! let tree = [
//!     Route::new("/users", "users")
//!         .action(MethodMap::new().get(ok.clone()).post(ok.clone()))
//!         .child(Route::new("/:id", "user").action(ok.clone())),
//!     Route::new("/healthz", "health").action(ok),
//! ];
//! ```
//!
//! The tree is only read during compilation; it is never modified.

use crate::handler::BoxedHandler;
use crate::method::{Method, RouteMethod};

/// One node of a route tree.
#[derive(Clone)]
pub struct Route {
    pub(crate) path: String,
    pub(crate) key: String,
    pub(crate) action: Option<Action>,
    pub(crate) children: Vec<Route>,
}

impl Route {
    /// A node with no action and no children. Such a node compiles to nothing.
    pub fn new(path: impl Into<String>, key: impl Into<String>) -> Self {
        Self { path: path.into(), key: key.into(), action: None, children: Vec::new() }
    }

    /// Sets the node's action: a bare handler (any method) or a [`MethodMap`].
    pub fn action(mut self, action: impl Into<Action>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn child(mut self, child: Route) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Route>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn path(&self) -> &str { &self.path }
    pub fn key(&self) -> &str { &self.key }
}

/// What a node does when it matches.
#[derive(Clone)]
pub enum Action {
    /// Answers every method.
    Handler(BoxedHandler),
    /// Per-method handlers plus inheritable `float`/`sink` layers.
    Methods(MethodMap),
}

impl Action {
    /// The node's own `(float, sink)` layers. A bare handler has neither.
    pub(crate) fn layers(&self) -> (Option<&BoxedHandler>, Option<&BoxedHandler>) {
        match self {
            Self::Handler(_) => (None, None),
            Self::Methods(map) => (map.float.as_ref(), map.sink.as_ref()),
        }
    }

    /// `(method, handler)` pairs in declaration order. A declared method
    /// without a handler yields `None`.
    pub(crate) fn methods(&self) -> Vec<(RouteMethod, Option<&BoxedHandler>)> {
        match self {
            Self::Handler(h) => vec![(RouteMethod::All, Some(h))],
            Self::Methods(map) => map.entries.iter().map(|(m, h)| (*m, h.as_ref())).collect(),
        }
    }
}

impl From<BoxedHandler> for Action {
    fn from(h: BoxedHandler) -> Self { Self::Handler(h) }
}

impl From<MethodMap> for Action {
    fn from(map: MethodMap) -> Self { Self::Methods(map) }
}

macro_rules! method {
    ($fn_name:ident, $method:ident) => {
        #[doc = concat!("Handles `", stringify!($method), "` requests.")]
        pub fn $fn_name(self, handler: BoxedHandler) -> Self {
            self.on(Method::$method, handler)
        }
    };
}

/// A per-method action table.
///
/// `float` runs before this node's handlers and before every descendant's;
/// `sink` runs after them. Both are inherited by the whole subtree.
#[derive(Clone, Default)]
pub struct MethodMap {
    entries: Vec<(RouteMethod, Option<BoxedHandler>)>,
    float: Option<BoxedHandler>,
    sink: Option<BoxedHandler>,
}

impl MethodMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles `method`. Declaring the same method twice keeps the position
    /// of the first declaration and the handler of the second.
    pub fn on(self, method: impl Into<RouteMethod>, handler: BoxedHandler) -> Self {
        self.insert(method.into(), Some(handler))
    }

    /// Declares `method` without a handler. Requests that land on it are
    /// answered by the router's fallback.
    pub fn declare(self, method: impl Into<RouteMethod>) -> Self {
        self.insert(method.into(), None)
    }

    /// Handles every method.
    pub fn all(self, handler: BoxedHandler) -> Self {
        self.on(RouteMethod::All, handler)
    }

    method!(get, Get);
    method!(put, Put);
    method!(post, Post);
    method!(delete, Delete);
    method!(options, Options);
    method!(head, Head);
    method!(trace, Trace);
    method!(connect, Connect);
    method!(patch, Patch);

    pub fn float(mut self, handler: BoxedHandler) -> Self {
        self.float = Some(handler);
        self
    }

    pub fn sink(mut self, handler: BoxedHandler) -> Self {
        self.sink = Some(handler);
        self
    }

    fn insert(mut self, method: RouteMethod, handler: Option<BoxedHandler>) -> Self {
        match self.entries.iter_mut().find(|(m, _)| *m == method) {
            Some(entry) => entry.1 = handler,
            None => self.entries.push((method, handler)),
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::from_fn;
    use std::sync::Arc;

    fn noop() -> BoxedHandler {
        from_fn(|req, res, next| next.run(req, res))
    }

    #[test]
    fn bare_handler_answers_all_methods() {
        let action = Action::from(noop());
        let methods = action.methods();
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].0, RouteMethod::All);
        assert!(action.layers().0.is_none());
    }

    #[test]
    fn layers_are_not_methods() {
        let action = Action::from(
            MethodMap::new().float(noop()).get(noop()).sink(noop()).post(noop()),
        );
        let methods: Vec<_> = action.methods().into_iter().map(|(m, _)| m).collect();
        assert_eq!(methods, [RouteMethod::Only(Method::Get), RouteMethod::Only(Method::Post)]);
        let (float, sink) = action.layers();
        assert!(float.is_some() && sink.is_some());
    }

    #[test]
    fn redeclaring_a_method_replaces_in_place() {
        let first = noop();
        let second = noop();
        let map = MethodMap::new()
            .get(first)
            .all(noop())
            .on("GET".parse::<RouteMethod>().unwrap(), Arc::clone(&second))
            .declare(Method::Delete);
        let action = Action::from(map);
        let methods = action.methods();
        assert_eq!(methods.len(), 3);
        assert_eq!(methods[0].0, RouteMethod::Only(Method::Get));
        assert!(Arc::ptr_eq(methods[0].1.unwrap(), &second));
        assert!(methods[2].1.is_none());
    }
}
