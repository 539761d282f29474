//! Command-line interface for the service binary.

use anamnesis_database::{
    PostgresClientRepository, PostgresMessageRepository, PostgresSessionRepository, connect,
    establish_connection, run_migrations,
};
use anamnesis_error::AnamnesisResult;
use anamnesis_interface::{
    ClientRepository, IdentityStore, MessageRepository, NoteDriver, SessionRepository, Transcriber,
};
use anamnesis_models::{ResponsesClient, WhisperClient};
use anamnesis_pipeline::{AnswerService, ErasureService, SessionPipeline};
use anamnesis_server::{AppConfig, AppState, StaticTokenVerifier, serve};
use anamnesis_storage::{AudioStore, FileSystemStore};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use diesel::pg::PgConnection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Anamnesis - session pipeline service for therapist clinical notes
#[derive(Parser, Debug)]
#[command(name = "anamnesis")]
#[command(about = "Session pipeline service for therapist clinical notes", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP service
    Serve {
        /// Path to a configuration file (default: anamnesis.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Load and print the effective configuration, then exit
    CheckConfig {
        /// Path to a configuration file (default: anamnesis.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Run pending database migrations, then exit
    Migrate {
        /// Path to a configuration file (default: anamnesis.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>) -> AnamnesisResult<AppConfig> {
    match path.and_then(Path::to_str) {
        Some(path) => AppConfig::from_file(path),
        None => AppConfig::load(),
    }
}

fn open_database(config: &AppConfig) -> AnamnesisResult<PgConnection> {
    match &config.database.url {
        Some(url) => connect(url),
        None => establish_connection(),
    }
}

/// Identity records live with the external auth provider; this service only
/// signals the deletion. The log line is the integration point until a
/// provider client is wired in.
struct ProviderlessIdentities;

#[async_trait]
impl IdentityStore for ProviderlessIdentities {
    async fn delete_user(&self, uid: &str) -> AnamnesisResult<()> {
        tracing::warn!(uid = %uid, "No identity provider configured, deletion not forwarded");
        Ok(())
    }
}

/// Run the HTTP service until the listener fails.
pub async fn run_serve(config_path: Option<&Path>) -> AnamnesisResult<()> {
    let config = load_config(config_path)?;

    let mut conn = open_database(&config)?;
    run_migrations(&mut conn)?;
    let conn = Arc::new(Mutex::new(conn));

    let sessions: Arc<dyn SessionRepository> =
        Arc::new(PostgresSessionRepository::from_arc(conn.clone()));
    let messages: Arc<dyn MessageRepository> =
        Arc::new(PostgresMessageRepository::from_arc(conn.clone()));
    let clients: Arc<dyn ClientRepository> =
        Arc::new(PostgresClientRepository::from_arc(conn.clone()));

    let audio: Arc<dyn AudioStore> = Arc::new(FileSystemStore::new(&config.storage.root)?);
    let transcriber: Arc<dyn Transcriber> = Arc::new(WhisperClient::new(
        &config.openai.api_key,
        &config.openai.transcription_model,
    ));
    let driver: Arc<dyn NoteDriver> = Arc::new(ResponsesClient::new(
        &config.openai.api_key,
        &config.openai.note_model,
        config.openai.vector_store_id.clone(),
    ));

    let mut pipeline = SessionPipeline::new(
        transcriber,
        driver.clone(),
        audio.clone(),
        sessions.clone(),
        messages.clone(),
        clients.clone(),
    );
    if let Some(language) = &config.openai.language {
        pipeline = pipeline.with_language(language);
    }

    let answers = AnswerService::new(sessions, messages, driver);
    let erasure = ErasureService::new(clients, audio, Arc::new(ProviderlessIdentities));
    let verifier = Arc::new(StaticTokenVerifier::new(config.server.tokens.clone()));

    let state = AppState::new(
        Arc::new(pipeline),
        Arc::new(answers),
        Arc::new(erasure),
        verifier,
    );

    serve(config.server.bind_addr(), state).await
}

/// Load the configuration and report what would be used.
pub fn check_config(config_path: Option<&Path>) -> AnamnesisResult<()> {
    let config = load_config(config_path)?;

    println!("bind address:       {}", config.server.bind_addr());
    println!("caller tokens:      {}", config.server.tokens.len());
    println!("storage root:       {}", config.storage.root.display());
    println!(
        "database url:       {}",
        if config.database.url.is_some() {
            "from file"
        } else {
            "from DATABASE_URL"
        }
    );
    println!("transcription:      {}", config.openai.transcription_model);
    println!("note model:         {}", config.openai.note_model);
    println!(
        "reference corpus:   {}",
        config.openai.vector_store_id.as_deref().unwrap_or("none")
    );
    Ok(())
}

/// Run pending embedded migrations.
pub fn run_migrate(config_path: Option<&Path>) -> AnamnesisResult<()> {
    let config = load_config(config_path)?;
    let mut conn = open_database(&config)?;
    run_migrations(&mut conn)?;
    tracing::info!("Migrations are up to date");
    Ok(())
}
