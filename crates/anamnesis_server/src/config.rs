//! Service configuration loading.
//!
//! Settings layer an optional `anamnesis.toml` under `ANAMNESIS_`-prefixed
//! environment variables (double underscore as the section separator, e.g.
//! `ANAMNESIS_SERVER__PORT=8080`). A `.env` file is loaded first when
//! present.

use anamnesis_error::{AnamnesisResult, ConfigError};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Bind address and caller tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    /// Address to bind
    #[serde(default = "default_host")]
    pub host: IpAddr,
    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,
    /// Accepted bearer tokens, token to user id
    #[serde(default)]
    pub tokens: HashMap<String, String>,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            tokens: HashMap::new(),
        }
    }
}

impl ServerSection {
    /// The socket address to bind.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Audio object store location.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSection {
    /// Base directory for the filesystem store
    #[serde(default = "default_storage_root")]
    pub root: PathBuf,
}

fn default_storage_root() -> PathBuf {
    PathBuf::from("./data/audio")
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            root: default_storage_root(),
        }
    }
}

/// Database connection settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSection {
    /// Connection URL; falls back to the `DATABASE_URL` environment
    /// variable when unset
    #[serde(default)]
    pub url: Option<String>,
}

/// External AI provider settings.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiSection {
    /// API key
    pub api_key: String,
    /// Speech-to-text model
    #[serde(default = "default_transcription_model")]
    pub transcription_model: String,
    /// Summarization and answer model
    #[serde(default = "default_note_model")]
    pub note_model: String,
    /// Vector store holding the fixed reference corpus, if any
    #[serde(default)]
    pub vector_store_id: Option<String>,
    /// Spoken-language hint for transcription, if any
    #[serde(default)]
    pub language: Option<String>,
}

fn default_transcription_model() -> String {
    "whisper-1".to_string()
}

fn default_note_model() -> String {
    "gpt-4o-mini".to_string()
}

/// The whole service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSection,
    /// Audio store settings
    #[serde(default)]
    pub storage: StorageSection,
    /// Database settings
    #[serde(default)]
    pub database: DatabaseSection,
    /// Provider settings
    pub openai: OpenAiSection,
}

impl AppConfig {
    /// Load configuration from `anamnesis.toml` (optional) and the
    /// environment.
    pub fn load() -> AnamnesisResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_file("anamnesis.toml")
    }

    /// Load configuration from a specific file path plus the environment.
    pub fn from_file(path: &str) -> AnamnesisResult<Self> {
        let settings = Config::builder()
            .add_source(File::new(path, FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("ANAMNESIS").separator("__"))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to load configuration: {}", e)))?;

        settings
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Invalid configuration: {}", e)).into())
    }
}
