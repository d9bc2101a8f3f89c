use anyhow::{Context, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::warn;

use shared::{
    domain::{parse_date_text, EntityKind, EntityRecord, FieldValue, RecordId},
    protocol::ContactForm,
};

mod schema;

use schema::{schema_for, ColumnType, EntitySchema};

pub const DEFAULT_ROW_LIMIT: usize = 5000;

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
    row_limit: usize,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self {
            pool,
            row_limit: DEFAULT_ROW_LIMIT,
        })
    }

    /// Upper bound on rows returned by [`Storage::fetch_all`].
    pub fn with_row_limit(mut self, row_limit: usize) -> Self {
        self.row_limit = row_limit.max(1);
        self
    }

    pub fn row_limit(&self) -> usize {
        self.row_limit
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    /// Rows of one entity kind in primary-key order, capped at the row limit.
    pub async fn fetch_all(&self, kind: EntityKind) -> Result<Vec<EntityRecord>> {
        let schema = schema_for(kind);
        let sql = format!("{} ORDER BY {} LIMIT ?", schema.select, schema.id_column);
        let fetch_limit = i64::try_from(self.row_limit)
            .unwrap_or(i64::MAX)
            .saturating_add(1);
        let rows = sqlx::query(&sql)
            .bind(fetch_limit)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("failed to list {kind}"))?;

        let mut records = rows
            .iter()
            .map(|row| decode_record(schema, row))
            .collect::<Result<Vec<_>>>()?;
        if records.len() > self.row_limit {
            warn!(
                %kind,
                row_limit = self.row_limit,
                "row limit reached; list results are truncated"
            );
            records.truncate(self.row_limit);
        }
        Ok(records)
    }

    pub async fn fetch_one(&self, kind: EntityKind, id: RecordId) -> Result<Option<EntityRecord>> {
        let schema = schema_for(kind);
        let sql = format!("{} WHERE {} = ?", schema.select, schema.id_column);
        let row = sqlx::query(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("failed to load {kind} {id}"))?;
        row.map(|row| decode_record(schema, &row)).transpose()
    }

    pub async fn count(&self, kind: EntityKind) -> Result<u64> {
        let schema = schema_for(kind);
        let sql = format!("SELECT COUNT(*) FROM {}", schema.table);
        let count: i64 = sqlx::query_scalar(&sql)
            .fetch_one(&self.pool)
            .await
            .with_context(|| format!("failed to count {kind}"))?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// Inserts the record's writable fields; unknown and read-only fields
    /// (including `id`) are skipped.
    pub async fn insert_record(&self, kind: EntityKind, record: &EntityRecord) -> Result<RecordId> {
        let schema = schema_for(kind);
        let fields: Vec<(&str, &FieldValue)> = record
            .fields()
            .filter(|(name, _)| schema.writable(name).is_some())
            .collect();
        anyhow::ensure!(!fields.is_empty(), "no writable fields for {kind}");

        let columns: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
        let placeholders = vec!["?"; fields.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({placeholders}) RETURNING id",
            schema.table,
            columns.join(", ")
        );

        let mut query = sqlx::query(&sql);
        for (_, value) in &fields {
            query = match value {
                FieldValue::Null => query.bind(Option::<String>::None),
                FieldValue::Text(v) => query.bind(v.clone()),
                FieldValue::Integer(v) => query.bind(*v),
                FieldValue::Float(v) => query.bind(*v),
                FieldValue::Date(v) => query.bind(*v),
                FieldValue::Timestamp(v) => query.bind(*v),
            };
        }
        let rec = query
            .fetch_one(&self.pool)
            .await
            .with_context(|| format!("failed to insert into {}", schema.table))?;
        Ok(RecordId(rec.get::<i64, _>(0)))
    }

    pub async fn insert_contact_message(&self, form: &ContactForm) -> Result<i64> {
        let rec = sqlx::query(
            "INSERT INTO contact_messages (nom, email, sujet, message) VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(&form.nom)
        .bind(&form.email)
        .bind(&form.sujet)
        .bind(&form.message)
        .fetch_one(&self.pool)
        .await
        .context("failed to store contact message")?;
        Ok(rec.get::<i64, _>(0))
    }
}

fn decode_record(schema: &EntitySchema, row: &SqliteRow) -> Result<EntityRecord> {
    let mut record = EntityRecord::new();
    for column in schema.columns {
        let name = column.name;
        let value = match column.column_type {
            ColumnType::Integer => FieldValue::from(row.try_get::<Option<i64>, _>(name)?),
            ColumnType::Real => FieldValue::from(row.try_get::<Option<f64>, _>(name)?),
            ColumnType::Text => FieldValue::from(row.try_get::<Option<String>, _>(name)?),
            ColumnType::Date | ColumnType::Timestamp => {
                decode_date(column.column_type, row.try_get::<Option<String>, _>(name)?)
            }
        };
        record.set(name, value);
    }
    Ok(record)
}

/// Date columns are stored as text. Values that do not parse as ISO dates
/// come back as `Text`.
fn decode_date(column_type: ColumnType, raw: Option<String>) -> FieldValue {
    let Some(raw) = raw else {
        return FieldValue::Null;
    };
    match (parse_date_text(&raw), column_type) {
        (Some(ts), ColumnType::Date) => FieldValue::Date(ts.date()),
        (Some(ts), _) => FieldValue::Timestamp(ts),
        (None, _) => FieldValue::Text(raw),
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url == "sqlite::memory:" || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
