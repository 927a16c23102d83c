//! Conversions to and from the `http` crate types.
//!
//! waypost does not own a socket. Whatever accepts connections (hyper, a
//! test harness, a serverless shim) hands over an `http::Request<Bytes>` and
//! gets an `http::Response<Full<Bytes>>` back via [`Router::dispatch`](crate::Router::dispatch).

use std::collections::HashMap;

use bytes::Bytes;
use http::StatusCode;
use http_body_util::Full;
use tracing::error;

use crate::request::Request;
use crate::response::Response;

impl Request {
    /// Takes method, path-and-query, headers and body. Header values that are
    /// not visible ASCII are skipped.
    pub fn from_http(req: http::Request<Bytes>) -> Self {
        let (parts, body) = req.into_parts();
        let url = parts.uri.path_and_query()
            .map(|pq| pq.as_str().to_owned())
            .unwrap_or_else(|| "/".to_owned());
        let headers = parts.headers.iter()
            .filter_map(|(k, v)| Some((k.as_str().to_owned(), v.to_str().ok()?.to_owned())))
            .collect();
        Self {
            method: parts.method.as_str().to_owned(),
            url,
            headers,
            body,
            params: HashMap::new(),
        }
    }
}

impl Response {
    /// Converts into an `http` response. A status outside `100..=999` or an
    /// invalid header becomes a bare `500`.
    pub fn into_http(self) -> http::Response<Full<Bytes>> {
        let mut builder = http::Response::builder().status(self.status);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder.body(Full::new(self.body)).unwrap_or_else(|e| {
            error!("invalid response: {e}");
            let mut res = http::Response::new(Full::new(Bytes::new()));
            *res.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            res
        })
    }
}
