//! # Application Configuration
//!
//! Defines the configuration structure for the `pubmeta-server` and the logic
//! for loading it from a `config.yml` file and environment variables. The
//! YAML file may reference environment variables as `${VAR}`, which are
//! substituted before parsing; `PUBMETA_`-prefixed variables override nested
//! keys (e.g. `PUBMETA_REGISTRY__API_KEY`).

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The extraction service. Optional: when absent the metadata endpoints
    /// answer 503 instead of failing at startup.
    #[serde(default)]
    pub extraction: ExtractionConfig,
    /// The document registry the documents are fetched from.
    pub registry: RegistryConfig,
    /// The audit-trail identity attached to every registry call.
    #[serde(default)]
    pub audit: AuditConfig,
}

fn default_port() -> u16 {
    9090
}

/// Configuration for the extraction service connection.
#[derive(Debug, Deserialize, Clone)]
pub struct ExtractionConfig {
    /// Base URL of the extraction service. `None` disables the feature.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Timeout for the health probe, in seconds.
    #[serde(default = "default_health_timeout_secs")]
    pub health_timeout_secs: u64,
    /// Timeout for a generation call, in seconds. Materially larger than the
    /// health timeout since inference is slow.
    #[serde(default = "default_generation_timeout_secs")]
    pub generation_timeout_secs: u64,
}

// The serde field defaults only apply while the section is being
// deserialized; an absent `extraction:` table goes through this impl.
impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            health_timeout_secs: default_health_timeout_secs(),
            generation_timeout_secs: default_generation_timeout_secs(),
        }
    }
}

fn default_health_timeout_secs() -> u64 {
    30
}

fn default_generation_timeout_secs() -> u64 {
    120
}

/// Configuration for the document registry connection.
#[derive(Debug, Deserialize, Clone)]
pub struct RegistryConfig {
    pub base_url: String,
    pub api_key: String,
}

/// The audit identity this service presents to the registry. Authentication
/// of end users is out of scope, so the service identifies itself.
#[derive(Debug, Deserialize, Clone)]
pub struct AuditConfig {
    #[serde(default = "default_audit_user_id")]
    pub user_id: String,
    #[serde(default = "default_audit_user_representation")]
    pub user_representation: String,
    #[serde(default = "default_audit_remarks")]
    pub remarks: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            user_id: default_audit_user_id(),
            user_representation: default_audit_user_representation(),
            remarks: default_audit_remarks(),
        }
    }
}

fn default_audit_user_id() -> String {
    "pubmeta-server".to_string()
}

fn default_audit_user_representation() -> String {
    "Metadata suggestion service".to_string()
}

fn default_audit_remarks() -> String {
    "Automatische metadatasuggestie".to_string()
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}").unwrap();
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_else(|_| "".to_string())
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment variables.
///
/// - Top-level keys like `port` are overridden by `PORT`.
/// - Nested keys are overridden by `PUBMETA_...` variables
///   (e.g. `PUBMETA_EXTRACTION__BASE_URL`).
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let config_path = match config_path_override {
        Some(path) => path.to_string(),
        None => format!("{}/config.yml", env!("CARGO_MANIFEST_DIR")),
    };

    let content = read_and_substitute(&config_path)?.ok_or_else(|| {
        ConfigError::NotFound(format!(
            "Config file not found at '{config_path}'. Copy 'config.example.yml' to 'config.yml' and fill in the registry settings."
        ))
    })?;
    info!("Loading configuration from '{config_path}'.");

    let settings = ConfigBuilder::builder()
        .add_source(File::from_str(&content, FileFormat::Yaml))
        // Environment variables for top-level keys like PORT.
        .add_source(Environment::default())
        // Prefixed environment variables for deeper overrides.
        .add_source(
            Environment::with_prefix("PUBMETA")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
