//! HTTP method tokens as typed enums.
//!
//! Route trees only recognise the nine RFC 9110 methods plus the `all`
//! wildcard. Anything else a request carries can still reach a wildcard
//! route, but never a method-specific one.

use std::fmt;
use std::str::FromStr;

/// A known HTTP method.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    Connect,
    Delete,
    Get,
    Head,
    Options,
    Patch,
    Post,
    Put,
    Trace,
}

impl Method {
    /// Returns the uppercase wire representation (e.g. `"GET"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "CONNECT",
            Self::Delete  => "DELETE",
            Self::Get     => "GET",
            Self::Head    => "HEAD",
            Self::Options => "OPTIONS",
            Self::Patch   => "PATCH",
            Self::Post    => "POST",
            Self::Put     => "PUT",
            Self::Trace   => "TRACE",
        }
    }

    /// Normalises a request's method. An empty method means `GET`; an
    /// unrecognised one yields `None`.
    pub(crate) fn from_request(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return Some(Self::Get);
        }
        raw.parse().ok()
    }
}

/// Parses a method token, ignoring ASCII case (`"get"`, `"GET"`, `"Get"`).
impl FromStr for Method {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ALL: [Method; 9] = [
            Method::Connect,
            Method::Delete,
            Method::Get,
            Method::Head,
            Method::Options,
            Method::Patch,
            Method::Post,
            Method::Put,
            Method::Trace,
        ];
        ALL.into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The method a compiled route answers to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RouteMethod {
    /// Wildcard: every request method, known or not.
    All,
    Only(Method),
}

impl RouteMethod {
    /// Whether a request carrying `method` may be dispatched to this route.
    pub fn accepts(self, method: Option<Method>) -> bool {
        match self {
            Self::All => true,
            Self::Only(m) => method == Some(m),
        }
    }
}

impl From<Method> for RouteMethod {
    fn from(m: Method) -> Self {
        Self::Only(m)
    }
}

/// Parses `"all"` or a method token, ignoring ASCII case.
impl FromStr for RouteMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// Lower-case, the canonical stored form: `all`, `get`, `put`, ...
impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.pad("all"),
            Self::Only(m) => f.pad(&m.as_str().to_ascii_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_parse_case_insensitively() {
        assert_eq!("get".parse(), Ok(Method::Get));
        assert_eq!("PaTcH".parse(), Ok(Method::Patch));
        assert_eq!("PROPFIND".parse::<Method>(), Err(()));
        assert_eq!("ALL".parse(), Ok(RouteMethod::All));
        assert_eq!("delete".parse(), Ok(RouteMethod::Only(Method::Delete)));
    }

    #[test]
    fn empty_request_method_defaults_to_get() {
        assert_eq!(Method::from_request(""), Some(Method::Get));
        assert_eq!(Method::from_request("post"), Some(Method::Post));
        assert_eq!(Method::from_request("MKCOL"), None);
    }

    #[test]
    fn wildcard_accepts_unknown_methods() {
        assert!(RouteMethod::All.accepts(None));
        assert!(!RouteMethod::Only(Method::Get).accepts(None));
        assert!(RouteMethod::Only(Method::Put).accepts(Some(Method::Put)));
        assert!(!RouteMethod::Only(Method::Put).accepts(Some(Method::Post)));
    }

    #[test]
    fn displays_lower_case() {
        assert_eq!(RouteMethod::All.to_string(), "all");
        assert_eq!(RouteMethod::Only(Method::Options).to_string(), "options");
        assert_eq!(Method::Options.to_string(), "OPTIONS");
    }

    #[test]
    fn display_honours_width() {
        assert_eq!(format!("{:<7}|", RouteMethod::Only(Method::Get)), "get    |");
        assert_eq!(format!("{:>5}", RouteMethod::All), "  all");
        assert_eq!(format!("{:<6}|", Method::Put), "PUT   |");
    }
}
