//! Path templates.
//!
//! A template is the slash-joined path of a compiled route, e.g.
//! `/users/:id/files/*rest`. Segments starting with `:` capture one segment,
//! a final segment starting with `*` captures the remainder. Everything else
//! is literal.
//!
//! Matching is delegated to a one-route [`matchit`] radix tree; reverse
//! routing walks the parsed segments directly, so substitution never searches
//! the template text.

use std::fmt;

use matchit::Router as MatchitRouter;

use crate::error::Error;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Segment {
    Static(String),
    Param(String),
    CatchAll(String),
}

/// A compiled path template: ordered parameter names plus a matcher.
pub struct PathPattern {
    template: String,
    segments: Vec<Segment>,
    params: Vec<String>,
    matcher: MatchitRouter<()>,
}

impl PathPattern {
    /// Parses and compiles `template`.
    ///
    /// Fails on an empty parameter name, a repeated name, or a catch-all that
    /// is not the final segment.
    pub fn compile(template: &str) -> Result<Self, Error> {
        let body = template.strip_prefix('/').unwrap_or(template);
        let parts: Vec<&str> = if body.is_empty() { Vec::new() } else { body.split('/').collect() };

        let mut segments = Vec::with_capacity(parts.len());
        let mut params: Vec<String> = Vec::new();

        for (i, part) in parts.iter().enumerate() {
            let segment = if let Some(name) = part.strip_prefix(':') {
                Segment::Param(name.to_owned())
            } else if let Some(name) = part.strip_prefix('*') {
                if i + 1 != parts.len() {
                    return Err(Error::invalid_pattern(template, "catch-all must be the final segment"));
                }
                Segment::CatchAll(name.to_owned())
            } else {
                Segment::Static((*part).to_owned())
            };

            if let Segment::Param(name) | Segment::CatchAll(name) = &segment {
                if name.is_empty() {
                    return Err(Error::invalid_pattern(template, "parameter without a name"));
                }
                if params.contains(name) {
                    return Err(Error::invalid_pattern(template, format!("parameter `{name}` repeated")));
                }
                params.push(name.clone());
            }
            segments.push(segment);
        }

        let mut matcher = MatchitRouter::new();
        matcher
            .insert(matchit_route(&segments), ())
            .map_err(|e| Error::invalid_pattern(template, e))?;

        Ok(Self { template: template.to_owned(), segments, params, matcher })
    }

    /// The template this pattern was compiled from.
    pub fn template(&self) -> &str { &self.template }

    /// Parameter names, in the order they appear in the template.
    pub fn param_names(&self) -> &[String] { &self.params }

    pub fn has_param(&self, name: &str) -> bool {
        self.params.iter().any(|p| p == name)
    }

    /// Matches a request path. On success the captured values are returned
    /// positionally: capture `i` belongs to `param_names()[i]`.
    ///
    /// The path must not carry a query string. One trailing slash is ignored,
    /// unless the template ends in a catch-all, which keeps it.
    pub fn captures(&self, path: &str) -> Option<Vec<String>> {
        let ends_in_catch_all = matches!(self.segments.last(), Some(Segment::CatchAll(_)));
        let path = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() && !ends_in_catch_all => trimmed,
            _ => path,
        };
        let matched = self.matcher.at(path).ok()?;
        self.params.iter()
            .map(|name| matched.params.get(name).map(str::to_owned))
            .collect()
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.captures(path).is_some()
    }

    /// Substitutes every parameter with the value `lookup` yields for it.
    ///
    /// Returns the name of the first parameter `lookup` cannot resolve.
    pub(crate) fn render<'v>(
        &self,
        lookup: impl Fn(&str) -> Option<&'v str>,
    ) -> Result<String, String> {
        if self.segments.is_empty() {
            return Ok("/".to_owned());
        }
        let mut out = String::with_capacity(self.template.len());
        for segment in &self.segments {
            out.push('/');
            match segment {
                Segment::Static(s) => out.push_str(s),
                Segment::Param(name) | Segment::CatchAll(name) => {
                    out.push_str(lookup(name).ok_or_else(|| name.clone())?);
                }
            }
        }
        Ok(out)
    }
}

impl fmt::Debug for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathPattern")
            .field("template", &self.template)
            .field("params", &self.params)
            .finish()
    }
}

/// Translates parsed segments into matchit's `{name}` / `{*name}` syntax,
/// escaping literal braces.
fn matchit_route(segments: &[Segment]) -> String {
    if segments.is_empty() {
        return "/".to_owned();
    }
    let mut route = String::new();
    for segment in segments {
        route.push('/');
        match segment {
            Segment::Static(s) => route.push_str(&s.replace('{', "{{").replace('}', "}}")),
            Segment::Param(name) => route.push_str(&format!("{{{name}}}")),
            Segment::CatchAll(name) => route.push_str(&format!("{{*{name}}}")),
        }
    }
    route
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_are_positional() {
        let p = PathPattern::compile("/users/:id/posts/:post").unwrap();
        assert_eq!(p.param_names(), ["id", "post"]);
        assert_eq!(
            p.captures("/users/7/posts/hello"),
            Some(vec!["7".to_owned(), "hello".to_owned()])
        );
        assert_eq!(p.captures("/users/7/posts"), None);
        assert_eq!(p.captures("/users/7/comments/hello"), None);
    }

    #[test]
    fn tolerates_one_trailing_slash() {
        let p = PathPattern::compile("/ocean/floor").unwrap();
        assert!(p.is_match("/ocean/floor"));
        assert!(p.is_match("/ocean/floor/"));
        assert!(!p.is_match("/ocean"));
    }

    #[test]
    fn empty_template_matches_root() {
        let p = PathPattern::compile("").unwrap();
        assert!(p.is_match("/"));
        assert!(!p.is_match("/x"));
        assert_eq!(p.render(|_| None).unwrap(), "/");
    }

    #[test]
    fn catch_all_takes_the_rest() {
        let p = PathPattern::compile("/static/*file").unwrap();
        assert_eq!(p.captures("/static/css/site.css"), Some(vec!["css/site.css".to_owned()]));
        assert_eq!(p.captures("/static/css/"), Some(vec!["css/".to_owned()]));
    }

    #[test]
    fn literal_braces_are_escaped() {
        let p = PathPattern::compile("/odd/{literal}").unwrap();
        assert!(p.is_match("/odd/{literal}"));
        assert!(p.param_names().is_empty());
    }

    #[test]
    fn rejects_malformed_templates() {
        assert!(matches!(PathPattern::compile("/a/:"), Err(Error::InvalidPattern { .. })));
        assert!(matches!(PathPattern::compile("/a/:x/b/:x"), Err(Error::InvalidPattern { .. })));
        assert!(matches!(PathPattern::compile("/a/*rest/b"), Err(Error::InvalidPattern { .. })));
    }

    #[test]
    fn render_substitutes_by_segment() {
        let p = PathPattern::compile("/a/:x/b/:xy").unwrap();
        let out = p.render(|name| match name {
            "x" => Some(":xy"),
            "xy" => Some("2"),
            _ => None,
        });
        assert_eq!(out.unwrap(), "/a/:xy/b/2");
        assert_eq!(p.render(|name| (name == "x").then_some("1")), Err("xy".to_owned()));
    }
}
