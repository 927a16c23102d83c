//! Reverse routing: from a route key and parameters back to a URL.

use url::form_urlencoded;

use crate::error::Error;
use crate::table::RouteTable;

/// Options for [`reverse_route`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ReverseOptions {
    /// Drop parameters the path does not use instead of appending them as a
    /// query string.
    pub no_query: bool,
}

impl ReverseOptions {
    pub fn no_query() -> Self {
        Self { no_query: true }
    }
}

/// Builds the URL of the route registered under `key`.
///
/// Parameters named by the route's template are substituted into the path;
/// the rest become a form-encoded query string, in the order given, unless
/// [`ReverseOptions::no_query`] is set.
///
/// ```rust
/// use waypost::{handler::from_fn, reverse_route, ReverseOptions, Route, RouteTable};
///
/// let ok = from_fn(|req, res, next| next.run(req, res));
/// let table = RouteTable::build(&[Route::new("/a/:x/b", "ab").action(ok)]).unwrap();
///
/// let url = reverse_route(&table, "ab", [("x", "v"), ("y", "q")], ReverseOptions::default());
/// assert_eq!(url.unwrap(), "/a/v/b?y=q");
/// ```
///
/// # Errors
///
/// [`Error::RouteNotFound`] for an unknown key, [`Error::MissingParam`] when
/// a parameter of the template has no value.
pub fn reverse_route<I, K, V>(
    table: &RouteTable,
    key: &str,
    params: I,
    options: ReverseOptions,
) -> Result<String, Error>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: ToString,
{
    let route = table.get(key).ok_or_else(|| Error::RouteNotFound(key.to_owned()))?;
    let pattern = route.pattern();

    let (route_params, query_params): (Vec<_>, Vec<_>) = params
        .into_iter()
        .map(|(k, v)| (k.as_ref().to_owned(), v.to_string()))
        .partition(|(k, _)| pattern.has_param(k));

    let base = pattern
        .render(|name| {
            route_params.iter().rev()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        })
        .map_err(|param| Error::MissingParam { key: key.to_owned(), param })?;

    if options.no_query || query_params.is_empty() {
        return Ok(base);
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(&query_params)
        .finish();
    Ok(format!("{base}?{query}"))
}
