use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("route pattern '{0}' must start with '/'")]
    MissingLeadingSlash(String),

    #[error("route pattern '{pattern}' has an empty capture name")]
    EmptyCapture { pattern: String },

    #[error("route pattern '{pattern}' has an unbalanced brace in segment '{segment}'")]
    UnbalancedBrace { pattern: String, segment: String },

    #[error("route pattern '{pattern}' captures '{name}' more than once")]
    DuplicateCapture { pattern: String, name: String },

    #[error("route pattern '{pattern}' has an empty segment")]
    EmptySegment { pattern: String },

    #[error("unsupported http method '{0}'")]
    UnsupportedMethod(String),
}
