use std::{fmt, str::FromStr};

use crate::{
    error::PatternError,
    pattern::{normalize_path, split_segments, PathPattern},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("GET") {
            Ok(HttpMethod::Get)
        } else if s.eq_ignore_ascii_case("POST") {
            Ok(HttpMethod::Post)
        } else {
            Err(PatternError::UnsupportedMethod(s.to_string()))
        }
    }
}

#[derive(Debug, Clone)]
pub struct Route<H> {
    pub method: HttpMethod,
    pub pattern: PathPattern,
    pub handler: H,
}

/// Path captures bound by name, in the order the pattern declares them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    values: Vec<(String, String)>,
}

impl RouteParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Option<T> {
        self.get(name).and_then(|value| value.parse().ok())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum MatchResult<'a, H> {
    Matched { handler: &'a H, params: RouteParams },
    NotFound,
}

impl<'a, H> MatchResult<'a, H> {
    pub fn is_matched(&self) -> bool {
        matches!(self, MatchResult::Matched { .. })
    }

    pub fn handler(&self) -> Option<&'a H> {
        match self {
            MatchResult::Matched { handler, .. } => Some(*handler),
            MatchResult::NotFound => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    routes: Vec<Route<H>>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<H> RouteTable<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(
        mut self,
        method: HttpMethod,
        pattern: &str,
        handler: H,
    ) -> Result<Self, PatternError> {
        let pattern = PathPattern::parse(pattern)?;
        self.routes.push(Route {
            method,
            pattern,
            handler,
        });
        Ok(self)
    }

    pub fn get(self, pattern: &str, handler: H) -> Result<Self, PatternError> {
        self.route(HttpMethod::Get, pattern, handler)
    }

    pub fn post(self, pattern: &str, handler: H) -> Result<Self, PatternError> {
        self.route(HttpMethod::Post, pattern, handler)
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route<H>> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// First route in declaration order whose method and pattern both match.
    pub fn dispatch(&self, method: &str, path: &str) -> MatchResult<'_, H> {
        let Ok(method) = method.parse::<HttpMethod>() else {
            return MatchResult::NotFound;
        };
        let segments = split_segments(normalize_path(path));

        for route in &self.routes {
            if route.method != method {
                continue;
            }
            if let Some(values) = route.pattern.captures(&segments) {
                return MatchResult::Matched {
                    handler: &route.handler,
                    params: RouteParams { values },
                };
            }
        }
        MatchResult::NotFound
    }
}

#[cfg(test)]
#[path = "tests/table_tests.rs"]
mod tests;
