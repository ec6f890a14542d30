//! `opencmsd` — the OpenCMS server binary.
//!
//! Usage:
//!   opencmsd -c <context-name-or-path> [--listen <addr>]
//!
//! The context name resolves to `/etc/opencms/<name>.toml`.
//! If a path with `/` or `.` is given, it's used directly.

mod bootstrap;
mod config;
mod routes;

use std::sync::Arc;

use clap::Parser;
use opencms_core::Module;
use tracing::info;

use config::ServerConfig;

/// OpenCMS server.
#[derive(Parser, Debug)]
#[command(name = "opencmsd", about = "OpenCMS server")]
struct Cli {
    /// Context name or path to config file.
    #[arg(short = 'c', long = "config", required = true)]
    config: String,

    /// Listen address.
    #[arg(long = "listen", default_value = "0.0.0.0:8080")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load server configuration.
    let config_path = ServerConfig::resolve_path(&cli.config);
    info!("Loading configuration from {}", config_path.display());
    let server_config = ServerConfig::load(&config_path)?;
    bootstrap::verify_config(&server_config)?;

    // Initialize storage.
    let data_dir = std::path::PathBuf::from(&server_config.storage.data_dir);
    std::fs::create_dir_all(&data_dir)?;

    let core_config = opencms_core::ServiceConfig {
        data_dir: Some(data_dir.clone()),
        listen: cli.listen.clone(),
        ..Default::default()
    };

    let sql: Arc<dyn opencms_sql::SQLStore> = Arc::new(
        opencms_sql::SqliteStore::open(&core_config.resolve_sqlite_path())
            .map_err(|e| anyhow::anyhow!("failed to open SQL store: {}", e))?,
    );
    let kv: Arc<dyn opencms_kv::KVStore> = Arc::new(
        opencms_kv::RedbStore::open(&core_config.resolve_kv_path())
            .map_err(|e| anyhow::anyhow!("failed to open KV store: {}", e))?,
    );

    // Initialize the CMS module.
    let service = cms::service::CmsService::new(sql, kv)
        .map_err(|e| anyhow::anyhow!("failed to initialize CMS service: {}", e))?;
    bootstrap::ensure_default_types(&service)?;
    let cms_module = cms::CmsModule::new(service);
    info!("CMS module initialized");

    let module_routes = vec![(cms_module.name(), cms_module.routes())];

    // Build router.
    let app = routes::build_router(module_routes);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&cli.listen).await?;
    info!("OpenCMS server listening on {}", cli.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
