use std::process::ExitCode;
use std::sync::Arc;

use dotenvy::dotenv;
use service::storage::{json_collection_store::JsonFileStore, CollectionStore};
use tracing::{error, info};

async fn seed(cfg: configs::AppConfig) -> anyhow::Result<()> {
    cfg.database.validate()?;
    let db = models::db::connect_with_config(&cfg.database).await?;
    let store: Arc<dyn CollectionStore> = JsonFileStore::new(cfg.storage.data_dir.clone()).await?;

    let report = service::seed::run(&db, store).await?;
    for (resource, rows) in &report.inserted {
        info!(service = "seed", resource = *resource, rows = *rows, "collection seeded");
    }
    Ok(())
}

fn main() -> ExitCode {
    dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "seed", event = "config_invalid", error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "seed", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(service = "seed", data_dir = %cfg.storage.data_dir, "seeding database");
    match rt.block_on(seed(cfg)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(service = "seed", event = "seed_failed", error = %e, "Error seeding data");
            ExitCode::FAILURE
        }
    }
}
