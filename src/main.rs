use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use files_manager::config::{CacheBackend, ServerConfig};
use files_manager::files::ContentStorage;
use files_manager::server::{AppState, create_router};
use files_manager::store::{SqliteStore, Store};

#[derive(Parser)]
#[command(name = "files-manager")]
#[command(about = "A small file hosting backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum CacheKind {
    Memory,
    Sqlite,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Serve {
        /// Host to bind to
        #[arg(long, env = "HOST", default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(long, short, env = "PORT", default_value = "5000")]
        port: u16,

        /// SQLite database for users and file records
        #[arg(long, env = "DB_PATH", default_value = "./data/files_manager.db")]
        db_path: PathBuf,

        /// Directory uploaded content is written to
        #[arg(long, env = "FOLDER_PATH", default_value = "/tmp/files_manager")]
        folder_path: PathBuf,

        /// Session cache backend
        #[arg(long, env = "CACHE_BACKEND", value_enum, default_value = "sqlite")]
        cache_backend: CacheKind,

        /// Session cache file, for the sqlite backend
        #[arg(long, env = "CACHE_PATH", default_value = "./data/cache.db")]
        cache_path: PathBuf,
    },
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let store = SqliteStore::new(&config.db_path)?;
    store.initialize()?;
    let cache = config.cache.connect()?;

    let state = Arc::new(AppState::new(
        Arc::new(store),
        cache,
        ContentStorage::new(&config.folder_path),
    ));

    let app = create_router(state.clone());
    let addr = config.socket_addr()?;

    info!("Database at {}", config.db_path.display());
    info!("Content stored under {}", config.folder_path.display());
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.close()?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("files_manager=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            db_path,
            folder_path,
            cache_backend,
            cache_path,
        } => {
            let cache = match cache_backend {
                CacheKind::Memory => CacheBackend::Memory,
                CacheKind::Sqlite => CacheBackend::Sqlite(cache_path),
            };

            serve(ServerConfig {
                host,
                port,
                db_path,
                folder_path,
                cache,
            })
            .await?;
        }
    }

    Ok(())
}
