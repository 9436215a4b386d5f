use anyhow::{Context, Result};
use productsapp::config::ProductsConfig;
use productsapp::{http, FsBackend, ProductRepository, StorageBackend};
use std::sync::Arc;
use tracing::{info, warn};

pub fn serve(config: &ProductsConfig) -> Result<()> {
    let backend = FsBackend::new(&config.storage.data_file);
    let path = backend.path().display().to_string();

    if config.storage.create_if_missing {
        if backend.initialize()? {
            info!(path = %path, "created empty product document");
        }
    } else if !backend.path().exists() {
        warn!(path = %path, "product document does not exist; requests will fail until it does");
    }

    let repo = Arc::new(ProductRepository::new(backend));
    let location = repo.store().location();
    let app = http::router(repo, config.server.static_dir.clone());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;

    info!(path = %location.display(), "serving products");
    runtime
        .block_on(http::serve(app, &config.server.bind, shutdown_signal()))
        .with_context(|| format!("server on {} failed", config.server.bind))?;
    Ok(())
}

pub fn init(config: &ProductsConfig) -> Result<()> {
    let backend = FsBackend::new(&config.storage.data_file);
    let path = backend.path().display().to_string();

    if backend.initialize()? {
        println!("Initialized empty product document at {}", path);
    } else {
        println!("Product document already exists at {}", path);
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
