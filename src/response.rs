//! Outgoing response type.
//!
//! Unlike a handler-returns-a-response design, a [`Response`] here is a
//! mutable value threaded through the whole middleware chain: floats may
//! write headers before the handler runs, sinks may inspect or rewrite the
//! status afterwards.

use bytes::Bytes;

use crate::status::Status;

// ── ContentType ───────────────────────────────────────────────────────────────

/// Common content-type values for use with [`Response::bytes`].
#[derive(Clone, Copy, Debug)]
pub enum ContentType {
    Html,         // text/html; charset=utf-8
    Json,         // application/json
    OctetStream,  // application/octet-stream
    Text,         // text/plain; charset=utf-8
}

impl ContentType {
    fn as_str(self) -> &'static str {
        match self {
            Self::Html        => "text/html; charset=utf-8",
            Self::Json        => "application/json",
            Self::OctetStream => "application/octet-stream",
            Self::Text        => "text/plain; charset=utf-8",
        }
    }
}

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing response under construction. Starts as `200 OK`, no body.
///
/// ```rust
/// use waypost::{Response, Status};
///
/// let mut res = Response::new();
/// res.set_status(Status::Created);
/// res.set_header("location", "/users/42");
/// res.json(br#"{"id":42}"#.to_vec());
/// assert_eq!(res.status(), 201);
/// ```
#[derive(Debug)]
pub struct Response {
    pub(crate) status: u16,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Bytes,
}

impl Default for Response {
    fn default() -> Self { Self::new() }
}

impl Response {
    pub fn new() -> Self {
        Self { status: Status::Ok.into(), headers: Vec::new(), body: Bytes::new() }
    }

    pub fn status(&self) -> u16 { self.status }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &Bytes { &self.body }

    pub fn set_status(&mut self, code: Status) -> &mut Self {
        self.status = code.into();
        self
    }

    /// Raw escape hatch for codes [`Status`] does not list.
    pub fn set_status_code(&mut self, code: u16) -> &mut Self {
        self.status = code;
        self
    }

    /// Sets a header, replacing any earlier value (case-insensitive name).
    pub fn set_header(&mut self, name: &str, value: &str) -> &mut Self {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Sets the body without touching `content-type`.
    pub fn send(&mut self, body: impl Into<Bytes>) -> &mut Self {
        self.body = body.into();
        self
    }

    /// Body as `text/plain; charset=utf-8`.
    pub fn text(&mut self, body: impl Into<String>) -> &mut Self {
        let body: String = body.into();
        self.bytes(ContentType::Text, body)
    }

    /// Body as `application/json`. Pass serialiser output straight through.
    pub fn json(&mut self, body: Vec<u8>) -> &mut Self {
        self.bytes(ContentType::Json, body)
    }

    pub fn bytes(&mut self, content_type: ContentType, body: impl Into<Bytes>) -> &mut Self {
        self.set_header("content-type", content_type.as_str());
        self.send(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_bodies_set_content_type() {
        let mut res = Response::new();
        res.text("hello");
        assert_eq!(res.header("Content-Type"), Some("text/plain; charset=utf-8"));
        assert_eq!(res.body().as_ref(), b"hello");

        res.bytes(ContentType::Html, "<p>hi</p>");
        assert_eq!(res.header("content-type"), Some("text/html; charset=utf-8"));
        assert_eq!(res.headers().len(), 1);
    }

    #[test]
    fn status_defaults_to_ok() {
        let mut res = Response::default();
        assert_eq!(res.status(), 200);
        res.set_status(Status::GatewayTimeout);
        assert_eq!(res.status(), 504);
        res.set_status_code(418);
        assert_eq!(res.status(), 418);
    }
}
