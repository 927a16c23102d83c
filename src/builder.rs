//! Route tree flattening.
//!
//! Walks a [`Route`] tree once, top-down, and emits one [`FlatRoute`] per
//! `(node, method)` pair. Inherited middleware is carried down as two values,
//! `pre` and `post`; each node folds its own `float`/`sink` into them before
//! recursing:
//!
//! ```text
//! child pre  = parent pre  ▸ node float     (outermost runs first on entry)
//! child post = node sink   ▸ parent post    (innermost runs first on exit)
//! handler    = pre ▸ action ▸ post
//! ```
//!
//! A route nested k levels deep therefore runs its k ancestors' floats
//! outside-in before its action and their sinks inside-out after it.

use crate::handler::BoxedHandler;
use crate::method::RouteMethod;
use crate::pipeline::{compose, try_compose};
use crate::route::Route;

/// One flattened `(key, method, full path, composed handler)` tuple.
pub(crate) struct FlatRoute {
    pub key: String,
    pub method: RouteMethod,
    pub path: String,
    /// `None` when the method was declared without a handler.
    pub handler: Option<BoxedHandler>,
}

/// Flattens `nodes` under `root`, in pre-order: each node's own routes come
/// before its children's, siblings left to right.
pub(crate) fn flatten(
    root: &str,
    pre: Option<&BoxedHandler>,
    post: Option<&BoxedHandler>,
    nodes: &[Route],
) -> Vec<FlatRoute> {
    let mut out = Vec::new();
    for node in nodes {
        flatten_node(root, pre, post, node, &mut out);
    }
    out
}

fn flatten_node(
    root: &str,
    pre: Option<&BoxedHandler>,
    post: Option<&BoxedHandler>,
    node: &Route,
    out: &mut Vec<FlatRoute>,
) {
    let path = join(root, &node.path);
    let (float, sink) = node.action.as_ref().map_or((None, None), |a| a.layers());

    let floated = try_compose([pre.cloned(), float.cloned()]);
    let sunk = try_compose([sink.cloned(), post.cloned()]);

    if let Some(action) = &node.action {
        for (method, handler) in action.methods() {
            let handler = handler.map(|h| compose([floated.clone(), Some(h.clone()), sunk.clone()]));
            out.push(FlatRoute { key: node.key.clone(), method, path: path.clone(), handler });
        }
    }

    for child in &node.children {
        flatten_node(&path, floated.as_ref(), sunk.as_ref(), child, out);
    }
}

/// `root` + `/` + `segment`, minus one leading slash on the segment and one
/// trailing slash on the result.
pub(crate) fn join(root: &str, segment: &str) -> String {
    let segment = segment.strip_prefix('/').unwrap_or(segment);
    let mut path = format!("{root}/{segment}");
    if path.ends_with('/') {
        path.pop();
    }
    path
}

/// Drops a trailing slash and ensures a leading one on a non-empty root.
pub(crate) fn normalize_root(root: &str) -> String {
    let root = root.strip_suffix('/').unwrap_or(root);
    match root {
        "" => String::new(),
        r if r.starts_with('/') => r.to_owned(),
        r => format!("/{r}"),
    }
}
