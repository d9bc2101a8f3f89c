use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use listing::{build_page, export_csv, ListPage, TableDecl};
use shared::{
    domain::{EntityKind, EntityRecord, RecordId},
    error::{ApiError, ErrorCode},
    protocol::{
        ContactAck, ContactForm, ContactInfo, DashboardSummary, EntityCount, FormDescriptor,
        FormField,
    },
};
use storage::Storage;
use thiserror::Error;
use tracing::{debug, info};

pub mod query;
pub mod routes;
pub mod tables;

use query::QueryParams;
use tables::Screen;

/// Data-access seam the list actions read through.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_all(&self, kind: EntityKind) -> anyhow::Result<Vec<EntityRecord>>;
    async fn fetch_one(&self, kind: EntityKind, id: RecordId) -> anyhow::Result<Option<EntityRecord>>;
    async fn count(&self, kind: EntityKind) -> anyhow::Result<u64>;
}

#[async_trait]
impl RecordSource for Storage {
    async fn fetch_all(&self, kind: EntityKind) -> anyhow::Result<Vec<EntityRecord>> {
        Storage::fetch_all(self, kind).await
    }

    async fn fetch_one(&self, kind: EntityKind, id: RecordId) -> anyhow::Result<Option<EntityRecord>> {
        Storage::fetch_one(self, kind, id).await
    }

    async fn count(&self, kind: EntityKind) -> anyhow::Result<u64> {
        Storage::count(self, kind).await
    }
}

#[derive(Clone)]
pub struct ApiContext {
    pub storage: Storage,
    pub contact: ContactInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("field '{0}' is required")]
    MissingField(&'static str),
    #[error("email address '{0}' is not valid")]
    InvalidEmail(String),
    #[error("field '{field}' exceeds {max} characters")]
    TooLong { field: &'static str, max: usize },
}

impl From<ContactError> for ApiError {
    fn from(value: ContactError) -> Self {
        ApiError::new(ErrorCode::Validation, value.to_string())
    }
}

const MAX_CONTACT_FIELD_CHARS: usize = 200;
const MAX_CONTACT_MESSAGE_CHARS: usize = 5000;

pub async fn list_screen<S: RecordSource + ?Sized>(
    source: &S,
    screen: &Screen,
    query: &QueryParams,
) -> Result<ListPage, ApiError> {
    let records = source.fetch_all(screen.kind).await.map_err(internal)?;
    let request = query.list_request(&screen.table);
    let page = build_page(&screen.table, records, &request);
    debug!(
        screen = screen.table.name,
        total_items = page.pagination.total_items,
        current_page = page.pagination.current_page,
        "list page built"
    );
    Ok(page)
}

pub async fn export_screen<S: RecordSource + ?Sized>(
    source: &S,
    screen: &Screen,
    query: &QueryParams,
) -> Result<CsvExport, ApiError> {
    let records = source.fetch_all(screen.kind).await.map_err(internal)?;
    let request = query.list_request(&screen.table);
    let body = export_csv(&screen.table, records, &request);
    info!(screen = screen.table.name, bytes = body.len(), "csv export generated");
    Ok(CsvExport {
        filename: csv_filename(&screen.table, Utc::now().date_naive()),
        body,
    })
}

pub fn csv_filename(table: &TableDecl, date: NaiveDate) -> String {
    format!("{}_{}.csv", table.name, date.format("%Y-%m-%d"))
}

pub async fn record_detail<S: RecordSource + ?Sized>(
    source: &S,
    kind: EntityKind,
    id: RecordId,
) -> Result<EntityRecord, ApiError> {
    source
        .fetch_one(kind, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| ApiError::not_found(format!("{kind} {id} not found")))
}

pub async fn dashboard<S: RecordSource + ?Sized>(source: &S) -> Result<DashboardSummary, ApiError> {
    let mut counts = Vec::with_capacity(EntityKind::ALL.len());
    for kind in EntityKind::ALL {
        let count = source.count(kind).await.map_err(internal)?;
        counts.push(EntityCount { kind, count });
    }
    Ok(DashboardSummary {
        counts,
        generated_at: Utc::now(),
    })
}

pub fn validate_contact(form: &ContactForm) -> Result<ContactForm, ContactError> {
    let cleaned = ContactForm {
        nom: form.nom.trim().to_string(),
        email: form.email.trim().to_string(),
        sujet: form.sujet.trim().to_string(),
        message: form.message.trim().to_string(),
    };

    for (field, value, max) in [
        ("nom", &cleaned.nom, MAX_CONTACT_FIELD_CHARS),
        ("email", &cleaned.email, MAX_CONTACT_FIELD_CHARS),
        ("sujet", &cleaned.sujet, MAX_CONTACT_FIELD_CHARS),
        ("message", &cleaned.message, MAX_CONTACT_MESSAGE_CHARS),
    ] {
        if value.is_empty() {
            return Err(ContactError::MissingField(field));
        }
        if value.chars().count() > max {
            return Err(ContactError::TooLong { field, max });
        }
    }

    let valid_email = cleaned
        .email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid_email {
        return Err(ContactError::InvalidEmail(cleaned.email));
    }
    Ok(cleaned)
}

pub async fn submit_contact(ctx: &ApiContext, form: &ContactForm) -> Result<ContactAck, ApiError> {
    let cleaned = validate_contact(form)?;
    let contact_id = ctx
        .storage
        .insert_contact_message(&cleaned)
        .await
        .map_err(internal)?;
    info!(contact_id, sujet = %cleaned.sujet, "contact message received");
    Ok(ContactAck {
        status: "ok".to_string(),
        contact_id,
    })
}

pub fn project_form() -> FormDescriptor {
    let field = |name: &str, label: &str, input: &str, required: bool| FormField {
        name: name.to_string(),
        label: label.to_string(),
        input: input.to_string(),
        required,
    };
    FormDescriptor {
        kind: EntityKind::Projects,
        fields: vec![
            field("titre", "Titre", "text", true),
            field("responsable", "Responsable", "text", true),
            field("thematique", "Thematique", "text", false),
            field("type_financement", "Type de financement", "select", false),
            field("statut", "Statut", "select", true),
            field("date_debut", "Date de debut", "date", true),
            field("date_fin", "Date de fin", "date", false),
            field("budget", "Budget", "number", false),
        ],
    }
}

fn internal(err: anyhow::Error) -> ApiError {
    ApiError::new(ErrorCode::Internal, err.to_string())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
