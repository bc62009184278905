use crate::config::{PARAM_MARKER, PATH_SEPARATOR, WILDCARD};
use crate::err::RouteError;

const CATCH_ALL: &str = "wildcard";

/// One registered redirect: the path pattern requests are matched against,
/// and the template their location is computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pattern: String,
    template: String,
}

impl Redirect {
    pub fn new(pattern: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            template: template.into(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Names of the `:name` segments in the pattern, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.pattern
            .split(PATH_SEPARATOR)
            .filter_map(|segment| segment.strip_prefix(PARAM_MARKER))
    }

    /// Computes the redirect location for a matched request.
    ///
    /// Every `:name` token in the template is replaced with the value `param` yields
    /// for it, or the empty string. This is plain substring replacement, so a
    /// parameter whose name prefixes another (`:user`, `:username`) will clobber it.
    /// A non-empty `query` is appended verbatim.
    pub fn location<'v>(
        &self,
        param: impl Fn(&str) -> Option<&'v str>,
        query: Option<&str>,
    ) -> String {
        let mut location = self.template.clone();

        for name in self.param_names() {
            let token = format!("{}{}", PARAM_MARKER, name);
            location = location.replace(&token, param(name).unwrap_or_default());
        }

        if let Some(query) = query.filter(|q| !q.is_empty()) {
            location.push(if location.contains('?') { '&' } else { '?' });
            location.push_str(query);
        }

        location
    }

    /// The pattern in router syntax: `:name` segments become `{name}`, a trailing `*`
    /// segment becomes a catch-all, literal braces are escaped.
    pub fn route(&self) -> Result<String, RouteError> {
        let last = self.pattern.split(PATH_SEPARATOR).count() - 1;
        let segments = self
            .pattern
            .split(PATH_SEPARATOR)
            .enumerate()
            .map(|(i, segment)| match segment.strip_prefix(PARAM_MARKER) {
                Some("") => Err(RouteError::UnnamedParam(self.pattern.clone())),
                Some(name) => Ok(format!("{{{}}}", name)),
                None if segment == WILDCARD && i == last => Ok(format!("{{*{}}}", CATCH_ALL)),
                None if segment.contains(WILDCARD) => {
                    Err(RouteError::MisplacedWildcard(self.pattern.clone()))
                }
                None => Ok(segment.replace('{', "{{").replace('}', "}}")),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(segments.join(PATH_SEPARATOR.to_string().as_str()))
    }
}
