use crate::error::PatternError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    /// Named capture matching one segment of ASCII digits.
    Numeric(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        if !raw.starts_with('/') {
            return Err(PatternError::MissingLeadingSlash(raw.to_string()));
        }

        let normalized = normalize_path(raw);
        let mut segments = Vec::new();
        for segment in split_segments(normalized) {
            segments.push(parse_segment(raw, segment)?);
        }

        let mut names: Vec<&str> = Vec::new();
        for segment in &segments {
            if let Segment::Numeric(name) = segment {
                if names.contains(&name.as_str()) {
                    return Err(PatternError::DuplicateCapture {
                        pattern: raw.to_string(),
                        name: name.clone(),
                    });
                }
                names.push(name);
            }
        }

        Ok(Self {
            raw: normalized.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_literal(&self) -> bool {
        self.segments
            .iter()
            .all(|segment| matches!(segment, Segment::Literal(_)))
    }

    /// Returns the captures in declaration order when every segment matches.
    pub(crate) fn captures(&self, path_segments: &[&str]) -> Option<Vec<(String, String)>> {
        if path_segments.len() != self.segments.len() {
            return None;
        }

        let mut captures = Vec::new();
        for (segment, actual) in self.segments.iter().zip(path_segments) {
            match segment {
                Segment::Literal(expected) => {
                    if expected != actual {
                        return None;
                    }
                }
                Segment::Numeric(name) => {
                    if actual.is_empty() || !actual.bytes().all(|b| b.is_ascii_digit()) {
                        return None;
                    }
                    captures.push((name.clone(), (*actual).to_string()));
                }
            }
        }
        Some(captures)
    }
}

/// Strips trailing slashes; the empty path and `/` both become `/`.
pub fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

pub(crate) fn split_segments(normalized: &str) -> Vec<&str> {
    let body = normalized.strip_prefix('/').unwrap_or(normalized);
    if body.is_empty() {
        Vec::new()
    } else {
        body.split('/').collect()
    }
}

fn parse_segment(pattern: &str, segment: &str) -> Result<Segment, PatternError> {
    if segment.is_empty() {
        return Err(PatternError::EmptySegment {
            pattern: pattern.to_string(),
        });
    }

    if let Some(name) = segment
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
    {
        let name = name.trim();
        if name.is_empty() {
            return Err(PatternError::EmptyCapture {
                pattern: pattern.to_string(),
            });
        }
        if name.contains(['{', '}']) {
            return Err(PatternError::UnbalancedBrace {
                pattern: pattern.to_string(),
                segment: segment.to_string(),
            });
        }
        return Ok(Segment::Numeric(name.to_string()));
    }

    if segment.contains(['{', '}']) {
        return Err(PatternError::UnbalancedBrace {
            pattern: pattern.to_string(),
            segment: segment.to_string(),
        });
    }

    Ok(Segment::Literal(segment.to_string()))
}
