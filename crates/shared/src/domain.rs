use std::{fmt, str::FromStr};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Users,
    Teams,
    Projects,
    Publications,
    Equipment,
    Events,
    News,
    Notifications,
}

impl EntityKind {
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Users,
        EntityKind::Teams,
        EntityKind::Projects,
        EntityKind::Publications,
        EntityKind::Equipment,
        EntityKind::Events,
        EntityKind::News,
        EntityKind::Notifications,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Users => "users",
            EntityKind::Teams => "teams",
            EntityKind::Projects => "projects",
            EntityKind::Publications => "publications",
            EntityKind::Equipment => "equipment",
            EntityKind::Events => "events",
            EntityKind::News => "news",
            EntityKind::Notifications => "notifications",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown entity kind '{0}'")]
pub struct UnknownEntityKind(pub String);

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownEntityKind(s.to_string()))
    }
}

/// A single scalar cell of an entity row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(v) => Some(*v as f64),
            FieldValue::Float(v) => Some(*v),
            FieldValue::Text(v) => v.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            FieldValue::Date(d) => d.and_hms_opt(0, 0, 0),
            FieldValue::Timestamp(ts) => Some(*ts),
            FieldValue::Text(v) => parse_date_text(v),
            _ => None,
        }
    }
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM[:SS]` and the `T`-separated form.
pub fn parse_date_text(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    for format in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Text(v) => f.write_str(v),
            FieldValue::Integer(v) => write!(f, "{v}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::Timestamp(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// One row of a domain entity, keeping the column order it was built with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityRecord {
    fields: Vec<(String, FieldValue)>,
}

static NULL: FieldValue = FieldValue::Null;

impl EntityRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Replaces the value in place when the field already exists.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((field, value)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Missing fields read as `Null`.
    pub fn value(&self, field: &str) -> &FieldValue {
        self.get(field).unwrap_or(&NULL)
    }

    pub fn id(&self) -> Option<RecordId> {
        match self.get("id") {
            Some(FieldValue::Integer(id)) => Some(RecordId(*id)),
            _ => None,
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for EntityRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for EntityRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = EntityRecord::new();
        for (field, value) in iter {
            record.set(field, value);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keeps_insertion_order_and_overwrites_in_place() {
        let mut record = EntityRecord::new()
            .with("id", 7_i64)
            .with("nom", "Dupont")
            .with("email", "dupont@labo.fr");
        record.set("nom", "Durand");

        let names: Vec<&str> = record.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["id", "nom", "email"]);
        assert_eq!(record.value("nom"), &FieldValue::Text("Durand".into()));
        assert_eq!(record.id(), Some(RecordId(7)));
        assert!(record.value("missing").is_null());
    }

    #[test]
    fn record_serializes_as_ordered_json_object() {
        let record = EntityRecord::new()
            .with("id", 1_i64)
            .with("titre", "Atlas")
            .with("date_debut", NaiveDate::from_ymd_opt(2024, 3, 1).expect("date"))
            .with("budget", FieldValue::Null);
        let json = serde_json::to_string(&record).expect("json");
        assert_eq!(
            json,
            r#"{"id":1,"titre":"Atlas","date_debut":"2024-03-01","budget":null}"#
        );
    }

    #[test]
    fn entity_kind_parses_case_insensitively() {
        assert_eq!("Equipment".parse::<EntityKind>(), Ok(EntityKind::Equipment));
        assert!("rooms".parse::<EntityKind>().is_err());
    }

    #[test]
    fn parses_common_date_layouts() {
        assert!(parse_date_text("2024-05-02").is_some());
        assert!(parse_date_text("2024-05-02 14:30").is_some());
        assert!(parse_date_text("2024-05-02T14:30:00").is_some());
        assert!(parse_date_text("02/05/2024").is_none());
    }
}
