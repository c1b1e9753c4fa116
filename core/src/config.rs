//! Client configuration.
//!
//! Resolved once at process startup and passed in; nothing in this crate
//! reads environment variables.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_FHIR_BASE_URL: &str = "https://fhir.example.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_base_url: String,
    fhir_base_url: String,
    export_dir: PathBuf,
}

impl ClientConfig {
    pub fn new(
        api_base_url: &str,
        fhir_base_url: &str,
        export_dir: PathBuf,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: validate_url("api_base_url", api_base_url)?,
            fhir_base_url: validate_url("fhir_base_url", fhir_base_url)?,
            export_dir,
        })
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn fhir_base_url(&self) -> &str {
        &self.fhir_base_url
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            fhir_base_url: DEFAULT_FHIR_BASE_URL.to_string(),
            export_dir: PathBuf::from("."),
        }
    }
}

fn validate_url(name: &'static str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::Empty { name });
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::NotHttp {
            name,
            value: value.to_string(),
        });
    }
    Ok(trimmed.to_string())
}
