use std::cmp::Ordering;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use shared::domain::{EntityRecord, FieldValue};

use crate::table::{Column, FieldType, TableDecl};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

/// The requested sort when its field is sortable, otherwise the table default.
/// `None` keeps the records in the order the data source returned them.
pub(crate) fn effective_sort<'t>(
    table: &'t TableDecl,
    requested: Option<&SortSpec>,
) -> Option<(&'t Column, SortDirection)> {
    if let Some(spec) = requested {
        if let Some(column) = table.sortable(&spec.field) {
            return Some((column, spec.direction));
        }
    }
    let default = table.default_sort?;
    table
        .column(default.field)
        .map(|column| (column, default.direction))
}

#[derive(Debug, Clone)]
enum SortKey {
    Null,
    Number(f64),
    Date(NaiveDateTime),
    Text { folded: String, raw: String },
}

impl SortKey {
    fn of(value: &FieldValue, field_type: FieldType) -> Self {
        if value.is_null() {
            return SortKey::Null;
        }
        let typed = match field_type {
            FieldType::Number => value.as_f64().map(SortKey::Number),
            FieldType::Date => value.as_datetime().map(SortKey::Date),
            FieldType::Text => None,
        };
        typed.unwrap_or_else(|| {
            let raw = value.to_string();
            SortKey::Text {
                folded: collation_key(&raw),
                raw,
            }
        })
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Null => 0,
            SortKey::Number(_) | SortKey::Date(_) => 1,
            SortKey::Text { .. } => 2,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            (
                SortKey::Text { folded: a, raw: ra },
                SortKey::Text { folded: b, raw: rb },
            ) => a.cmp(b).then_with(|| ra.cmp(rb)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Stable sort; equal keys keep their input order in both directions.
pub(crate) fn sort_records(
    records: Vec<EntityRecord>,
    column: &Column,
    direction: SortDirection,
) -> Vec<EntityRecord> {
    let mut keyed: Vec<(SortKey, EntityRecord)> = records
        .into_iter()
        .map(|record| (SortKey::of(record.value(column.field), column.field_type), record))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = a.compare(b);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    keyed.into_iter().map(|(_, record)| record).collect()
}

/// Lowercased text with Latin diacritics and ligatures folded, so that
/// "Élodie" sorts next to "elodie" rather than after "z".
pub fn collation_key(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    for c in raw.chars().flat_map(char::to_lowercase) {
        match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => key.push('a'),
            'ç' => key.push('c'),
            'è' | 'é' | 'ê' | 'ë' => key.push('e'),
            'ì' | 'í' | 'î' | 'ï' => key.push('i'),
            'ñ' => key.push('n'),
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => key.push('o'),
            'ù' | 'ú' | 'û' | 'ü' => key.push('u'),
            'ý' | 'ÿ' => key.push('y'),
            'æ' => key.push_str("ae"),
            'œ' => key.push_str("oe"),
            'ß' => key.push_str("ss"),
            other => key.push(other),
        }
    }
    key
}

#[cfg(test)]
#[path = "tests/sort_tests.rs"]
mod tests;
