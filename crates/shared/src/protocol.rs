use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::EntityKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityCount {
    pub kind: EntityKind,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub counts: Vec<EntityCount>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub sujet: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactAck {
    pub status: String,
    pub contact_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfo {
    pub laboratory: String,
    pub email: String,
    pub address: String,
}

/// Field layout the back-office uses to build an entity form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormDescriptor {
    pub kind: EntityKind,
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub input: String,
    pub required: bool,
}
