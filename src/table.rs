//! The compiled dispatch table.
//!
//! Built once from a route tree, then read-only: there is no API to add or
//! remove routes afterwards, so one table can serve any number of concurrent
//! requests without locking.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::builder::{self, FlatRoute};
use crate::error::Error;
use crate::handler::BoxedHandler;
use crate::method::{Method, RouteMethod};
use crate::pattern::PathPattern;
use crate::reverse::{self, ReverseOptions};
use crate::route::Route;

/// One concrete `(path, method)` pair with its fully composed handler.
pub struct CompiledRoute {
    key: String,
    method: RouteMethod,
    pattern: PathPattern,
    handler: Option<BoxedHandler>,
}

impl CompiledRoute {
    pub fn key(&self) -> &str { &self.key }
    pub fn method(&self) -> RouteMethod { self.method }

    /// The absolute, slash-normalised path template.
    pub fn path(&self) -> &str { self.pattern.template() }
    pub fn pattern(&self) -> &PathPattern { &self.pattern }

    /// The composed chain: inherited floats, the action, inherited sinks.
    /// `None` for a method declared without a handler.
    pub fn handler(&self) -> Option<&BoxedHandler> { self.handler.as_ref() }
}

impl fmt::Debug for CompiledRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledRoute")
            .field("key", &self.key)
            .field("method", &self.method)
            .field("path", &self.path())
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

/// Routes in declaration order plus a key index.
#[derive(Debug, Default)]
pub struct RouteTable {
    order: Vec<CompiledRoute>,
    mapping: HashMap<String, usize>,
}

impl RouteTable {
    /// Compiles a route tree rooted at `/`.
    pub fn build(routes: &[Route]) -> Result<Self, Error> {
        Self::build_under("", routes)
    }

    /// Compiles a route tree with every path prefixed by `root`.
    pub fn build_under(root: &str, routes: &[Route]) -> Result<Self, Error> {
        let root = builder::normalize_root(root);
        let mut table = Self::default();
        for route in builder::flatten(&root, None, None, routes) {
            table.merge(route)?;
        }
        debug!(root = %root, routes = table.order.len(), keys = table.mapping.len(), "route table built");
        Ok(table)
    }

    /// Appends a route and points its key at it. A key reused for several
    /// methods keeps every route in order; the index holds the last one.
    fn merge(&mut self, route: FlatRoute) -> Result<(), Error> {
        let pattern = PathPattern::compile(&route.path)?;
        self.mapping.insert(route.key.clone(), self.order.len());
        self.order.push(CompiledRoute {
            key: route.key,
            method: route.method,
            pattern,
            handler: route.handler,
        });
        Ok(())
    }

    /// Every compiled route, in match order.
    pub fn routes(&self) -> &[CompiledRoute] { &self.order }

    /// The last route compiled under `key`.
    pub fn get(&self, key: &str) -> Option<&CompiledRoute> {
        self.mapping.get(key).map(|&i| &self.order[i])
    }

    pub fn len(&self) -> usize { self.order.len() }
    pub fn is_empty(&self) -> bool { self.order.is_empty() }

    /// First route, in declaration order, accepting `method` and matching
    /// `path`, with its positional captures.
    pub(crate) fn find(
        &self,
        method: Option<Method>,
        path: &str,
    ) -> Option<(&CompiledRoute, Vec<String>)> {
        self.order.iter()
            .filter(|route| route.method.accepts(method))
            .find_map(|route| route.pattern.captures(path).map(|caps| (route, caps)))
    }

    /// See [`reverse_route`](crate::reverse_route).
    pub fn reverse<I, K, V>(&self, key: &str, params: I, options: ReverseOptions) -> Result<String, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToString,
    {
        reverse::reverse_route(self, key, params, options)
    }

    /// Path for a route without parameters.
    pub fn url_for(&self, key: &str) -> Result<String, Error> {
        self.reverse(key, std::iter::empty::<(&str, &str)>(), ReverseOptions::default())
    }
}

/// Compiles `routes` under `root` into a [`RouteTable`].
pub fn build_routes(routes: &[Route], root: &str) -> Result<RouteTable, Error> {
    RouteTable::build_under(root, routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::from_fn;
    use crate::route::MethodMap;

    fn noop() -> BoxedHandler {
        from_fn(|req, res, next| next.run(req, res))
    }

    #[test]
    fn builds_routes_from_route_tree() {
        let tree = [
            Route::new("/ocean", "ocean")
                .action(noop())
                .child(Route::new("/floor", "floor").action(noop())),
            Route::new("/sky", "sky").action(noop()),
        ];
        let table = RouteTable::build(&tree).unwrap();

        let keys: Vec<_> = table.routes().iter().map(CompiledRoute::key).collect();
        let paths: Vec<_> = table.routes().iter().map(CompiledRoute::path).collect();
        assert_eq!(keys, ["ocean", "floor", "sky"]);
        assert_eq!(paths, ["/ocean", "/ocean/floor", "/sky"]);
        assert!(table.routes().iter().all(|r| r.method() == RouteMethod::All));
    }

    #[test]
    fn reused_key_keeps_every_route_but_indexes_the_last() {
        let tree = [
            Route::new("/a", "dup").action(MethodMap::new().get(noop())),
            Route::new("/b", "dup").action(MethodMap::new().post(noop())),
        ];
        let table = RouteTable::build(&tree).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("dup").map(CompiledRoute::path), Some("/b"));
    }

    #[test]
    fn root_prefixes_every_path() {
        let tree = [Route::new("/ocean", "ocean").action(noop())];
        let table = build_routes(&tree, "/azz/").unwrap();
        assert_eq!(table.get("ocean").unwrap().path(), "/azz/ocean");
    }

    #[test]
    fn invalid_patterns_fail_the_build() {
        let tree = [Route::new("/files/*rest/meta", "meta").action(noop())];
        assert!(matches!(RouteTable::build(&tree), Err(Error::InvalidPattern { .. })));
    }

    #[test]
    fn empty_tree_is_empty() {
        let table = RouteTable::build(&[]).unwrap();
        assert!(table.is_empty());
        assert!(table.get("anything").is_none());
    }

    #[test]
    fn table_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RouteTable>();
    }
}
