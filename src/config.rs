// src/config.rs
use serde::{Deserialize, Serialize};
use std::{env, str::FromStr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// When the assignment hook recomputes a document's slug.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegeneratePolicy {
    /// New documents, and updates that modified the source attribute.
    #[default]
    OnSourceChange,
    /// New documents, and every update carrying a source value.
    Always,
}

impl FromStr for RegeneratePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on-source-change" | "on_source_change" | "changed" => Ok(Self::OnSourceChange),
            "always" => Ok(Self::Always),
            other => Err(ConfigError::Invalid(format!(
                "unknown slug regenerate policy {other:?}"
            ))),
        }
    }
}

fn default_source_field() -> String {
    "name".into()
}

fn default_slug_field() -> String {
    "slug".into()
}

fn default_conflict_retries() -> u32 {
    3
}

/// Options accepted by the slug plugin. Deserializes from the
/// `{ "field": ..., "slugField": ... }` shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlugOptions {
    #[serde(rename = "field")]
    pub source_field: String,
    pub slug_field: String,
    pub regenerate: RegeneratePolicy,
    /// How many times a save re-resolves the slug after the store reports a
    /// duplicate on the slug field.
    pub conflict_retries: u32,
}

impl Default for SlugOptions {
    fn default() -> Self {
        Self {
            source_field: default_source_field(),
            slug_field: default_slug_field(),
            regenerate: RegeneratePolicy::default(),
            conflict_retries: default_conflict_retries(),
        }
    }
}

impl SlugOptions {
    pub fn new(source_field: impl Into<String>, slug_field: impl Into<String>) -> Self {
        Self {
            source_field: source_field.into(),
            slug_field: slug_field.into(),
            ..Self::default()
        }
    }

    pub fn with_regenerate(mut self, policy: RegeneratePolicy) -> Self {
        self.regenerate = policy;
        self
    }

    pub fn with_conflict_retries(mut self, retries: u32) -> Self {
        self.conflict_retries = retries;
        self
    }

    /// Build options from environment variables, falling back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let source_field = env::var("SLUG_SOURCE_FIELD").unwrap_or_else(|_| default_source_field());
        let slug_field = env::var("SLUG_FIELD").unwrap_or_else(|_| default_slug_field());

        let regenerate = match env::var("SLUG_REGENERATE") {
            Ok(v) => v.parse()?,
            Err(_) => RegeneratePolicy::default(),
        };

        let conflict_retries = match env::var("SLUG_CONFLICT_RETRIES") {
            Ok(v) => v.trim().parse::<u32>().map_err(|_| {
                ConfigError::Invalid("SLUG_CONFLICT_RETRIES must be a non-negative integer".into())
            })?,
            Err(_) => default_conflict_retries(),
        };

        Ok(Self {
            source_field,
            slug_field,
            regenerate,
            conflict_retries,
        })
    }
}

fn default_collection() -> String {
    "models".into()
}

/// Runtime settings for the `docslug` binary.
#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: Option<String>,
    collection: String,
    slug: SlugOptions,
}

impl AppConfig {
    /// Build configuration from environment variables. Without `DATABASE_URL`
    /// the binary runs against the in-memory store.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Allow dotenv files to populate env vars when present.
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let collection = env::var("SLUG_COLLECTION").unwrap_or_else(|_| default_collection());

        if collection.trim().is_empty() {
            return Err(ConfigError::Invalid("SLUG_COLLECTION cannot be empty".into()));
        }

        Ok(Self {
            database_url,
            collection,
            slug: SlugOptions::from_env()?,
        })
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn slug(&self) -> &SlugOptions {
        &self.slug
    }
}
