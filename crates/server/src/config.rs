use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::Deserialize;
use shared::protocol::ContactInfo;

const CONFIG_FILE: &str = "labportal";
const DEFAULT_DATABASE_URL: &str = "sqlite://./data/labportal.db";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub database_url: String,
    /// Prefix the portal is mounted under, e.g. `/labo`. Empty for the root.
    pub base_path: String,
    pub log_level: String,
    pub max_records: usize,
    pub max_body_bytes: usize,
    /// Overrides each screen's declared page size when set.
    pub default_page_size: Option<usize>,
    pub laboratory: String,
    pub contact_email: String,
    pub contact_address: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            database_url: DEFAULT_DATABASE_URL.into(),
            base_path: String::new(),
            log_level: "info".into(),
            max_records: storage::DEFAULT_ROW_LIMIT,
            max_body_bytes: 64 * 1024,
            default_page_size: None,
            laboratory: "Laboratoire de recherche".into(),
            contact_email: "contact@labo.example".into(),
            contact_address: "1 rue des Sciences".into(),
        }
    }
}

impl Settings {
    pub fn contact_info(&self) -> ContactInfo {
        ContactInfo {
            laboratory: self.laboratory.clone(),
            email: self.contact_email.clone(),
            address: self.contact_address.clone(),
        }
    }
}

/// Defaults, then `labportal.toml` if present, then `APP__*` variables.
/// A bare `DATABASE_URL` is honoured as well.
pub fn load_settings() -> anyhow::Result<Settings> {
    let defaults = Settings::default();
    let builder = Config::builder()
        .set_default("server_bind", defaults.server_bind)?
        .set_default("database_url", defaults.database_url)?
        .set_default("base_path", defaults.base_path)?
        .set_default("log_level", defaults.log_level)?
        .set_default("max_records", defaults.max_records as u64)?
        .set_default("max_body_bytes", defaults.max_body_bytes as u64)?
        .set_default("laboratory", defaults.laboratory)?
        .set_default("contact_email", defaults.contact_email)?
        .set_default("contact_address", defaults.contact_address)?
        .add_source(File::with_name(CONFIG_FILE).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("database_url", std::env::var("DATABASE_URL").ok())?;

    let mut settings: Settings = builder
        .build()
        .context("failed to read configuration")?
        .try_deserialize()
        .context("invalid configuration")?;
    settings.base_path = normalize_base_path(&settings.base_path);
    Ok(settings)
}

/// `""`, `"/"` and `"/labo/"` become `""`, `""` and `"/labo"`.
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

pub fn prepare_database_url(raw_database_url: &str) -> anyhow::Result<String> {
    let database_url = normalize_database_url(raw_database_url);
    ensure_parent_dir_exists(&database_url)?;
    Ok(database_url)
}

fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.is_empty() {
        return DEFAULT_DATABASE_URL.to_string();
    }

    if raw_database_url.starts_with("sqlite::memory:")
        || raw_database_url.starts_with("sqlite://")
        || raw_database_url.contains("://")
    {
        return raw_database_url.to_string();
    }

    if let Some(path) = raw_database_url.strip_prefix("sqlite:") {
        return format!("sqlite://{}", path.replace('\\', "/"));
    }

    format!("sqlite://{}", raw_database_url.replace('\\', "/"))
}

fn ensure_parent_dir_exists(database_url: &str) -> anyhow::Result<()> {
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
    if database_url.starts_with("sqlite::memory:") || !database_url.starts_with("sqlite:") {
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
#[path = "tests/config_tests.rs"]
mod tests;
