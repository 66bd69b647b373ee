use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use medibot_application::{DocumentDelivery, SessionStore};
use medibot_core::api::MediBotApi;
use medibot_core::config::ClientConfig;
use medibot_core::user::IdentityRepository;
use medibot_infrastructure::{
    ConfigService, DocumentStore, HttpMediBotApi, MedibotPaths, SystemDocumentViewer,
    TomlIdentityRepository,
};

mod app;
mod commands;
mod helper;
mod render;

use app::App;

/// Environment variable holding the `tracing` filter directive.
const LOG_ENV: &str = "MEDIBOT_LOG";

#[derive(Parser, Debug)]
#[command(name = "medibot")]
#[command(about = "MediBot - chat with the MediBot medical assistant and generate prescriptions", long_about = None)]
struct Args {
    /// API base URL, e.g. http://localhost:3000/api/
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Config file to read instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory downloaded prescriptions are written to
    #[arg(long, value_name = "PATH")]
    documents_dir: Option<PathBuf>,

    /// Save prescriptions without opening them
    #[arg(long)]
    no_open: bool,
}

impl Args {
    /// Command-line flags win over the file and the environment.
    fn apply(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(dir) = &self.documents_dir {
            config.documents.dir = Some(dir.clone());
        }
        if self.no_open {
            config.documents.open_after_download = false;
        }
        config
    }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Entry point of the `medibot` REPL.
///
/// Loads configuration, wires the HTTP client and local storage into the
/// session, then hands control to the screen loop.
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_service = match &args.config {
        Some(path) => ConfigService::with_path(path.clone()),
        None => ConfigService::new()?,
    };
    let config = args.apply(config_service.load()?);

    init_tracing(&config.logging.filter);
    tracing::info!(base_url = %config.api.base_url, "Starting MediBot");

    let api: Arc<dyn MediBotApi> = Arc::new(HttpMediBotApi::new(&config.api)?);
    let identities: Arc<dyn IdentityRepository> = Arc::new(TomlIdentityRepository::new()?);
    let session = SessionStore::new(api, identities);

    let documents_dir = match config.documents.dir.clone() {
        Some(dir) => dir,
        None => MedibotPaths::documents_dir()?,
    };
    let delivery = DocumentDelivery::new(
        DocumentStore::new(documents_dir),
        Arc::new(SystemDocumentViewer::new()),
        config.documents.open_after_download,
    );

    let mut app = App::new(session, delivery)?;
    app.run().await
}
