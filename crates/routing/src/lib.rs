//! Typed route table for the portal.
//!
//! Routes are declared once at startup as `(method, pattern, handler)` and
//! tested in declaration order. Patterns are literal segments plus named
//! numeric captures (`/projets/{id}`); a capture only ever matches a single
//! segment made of ASCII digits.

mod error;
mod pattern;
mod table;

pub use error::PatternError;
pub use pattern::{normalize_path, PathPattern, Segment};
pub use table::{HttpMethod, MatchResult, Route, RouteParams, RouteTable};
