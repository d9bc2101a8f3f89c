use serde::{Deserialize, Serialize};
use shared::domain::{parse_date_text, EntityRecord, FieldValue};

use crate::table::FieldType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    Equals,
    Contains,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub field: String,
    pub op: FilterOp,
    pub value: String,
}

impl FilterSpec {
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterOp::Equals, value)
    }

    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterOp::Contains, value)
    }

    /// Whitespace-only values filter nothing.
    pub fn is_active(&self) -> bool {
        !self.value.trim().is_empty()
    }

    pub fn matches(&self, record: &EntityRecord, field_type: FieldType) -> bool {
        let actual = record.value(&self.field);
        let wanted = self.value.trim();
        match self.op {
            FilterOp::Contains => contains_ignore_case(&actual.to_string(), wanted),
            FilterOp::Equals => equals_typed(actual, wanted, field_type),
        }
    }
}

pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn equals_typed(actual: &FieldValue, wanted: &str, field_type: FieldType) -> bool {
    if actual.is_null() {
        return false;
    }
    match field_type {
        FieldType::Number => match (actual.as_f64(), parse_number(wanted)) {
            (Some(left), Some(right)) => left == right,
            _ => actual.to_string() == wanted,
        },
        FieldType::Date => match (actual.as_datetime(), parse_date_text(wanted)) {
            (Some(left), Some(right)) if is_date_only(wanted) => left.date() == right.date(),
            (Some(left), Some(right)) => left == right,
            _ => actual.to_string() == wanted,
        },
        FieldType::Text => actual.to_string() == wanted,
    }
}

/// Accepts a decimal comma as typed in French forms.
fn parse_number(raw: &str) -> Option<f64> {
    raw.replace(',', ".").parse().ok()
}

fn is_date_only(raw: &str) -> bool {
    raw.len() == 10
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
