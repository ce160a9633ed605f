//! Process configuration read from the environment

use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_UPLOAD_FOLDER: &str = "uploads";
pub const DEFAULT_EMBEDDING_SERVICE_URL: &str = "http://127.0.0.1:8083";
pub const DEFAULT_EMBEDDING_MODEL: &str = "paraphrase-MiniLM-L6-v2";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub upload_folder: PathBuf,
    pub embedding_service_url: String,
    pub embedding_model: String,
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            upload_folder: PathBuf::from(DEFAULT_UPLOAD_FOLDER),
            embedding_service_url: DEFAULT_EMBEDDING_SERVICE_URL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            port: parse_or("PORT", lookup("PORT"), defaults.port),
            upload_folder: lookup("UPLOAD_FOLDER")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_folder),
            embedding_service_url: lookup("EMBEDDING_SERVICE_URL")
                .unwrap_or(defaults.embedding_service_url),
            embedding_model: lookup("EMBEDDING_MODEL").unwrap_or(defaults.embedding_model),
            max_upload_bytes: parse_or(
                "MAX_UPLOAD_BYTES",
                lookup("MAX_UPLOAD_BYTES"),
                defaults.max_upload_bytes,
            ),
        }
    }
}

fn parse_or<T: std::str::FromStr + std::fmt::Display>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using {}", key, value, default);
            default
        }),
    }
}
