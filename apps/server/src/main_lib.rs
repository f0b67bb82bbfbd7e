use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, StorageBackend};
use spendwise_core::budgets::{BudgetRepositoryTrait, BudgetService, BudgetServiceTrait};
use spendwise_core::settings::{SettingsRepositoryTrait, SettingsService, SettingsServiceTrait};
use spendwise_core::transactions::{
    TransactionRepositoryTrait, TransactionService, TransactionServiceTrait,
};
use spendwise_storage_sqlite::db::{self, DbPool};

/// Handle onto the active persistence backend, kept for the connectivity
/// health check.
pub enum StorageHandle {
    Sqlite(Arc<DbPool>),
    Memory,
}

pub struct AppState {
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub settings_service: Arc<dyn SettingsServiceTrait>,
    pub storage: StorageHandle,
    pub started_at: Instant,
}

pub fn init_tracing() {
    let log_format = std::env::var("SPENDWISE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let (budget_repo, transaction_repo, settings_repo, storage): (
        Arc<dyn BudgetRepositoryTrait>,
        Arc<dyn TransactionRepositoryTrait>,
        Arc<dyn SettingsRepositoryTrait>,
        StorageHandle,
    ) = match config.storage {
        StorageBackend::Sqlite => {
            db::init(&config.db_path)?;
            let pool = db::create_pool(&config.db_path)?;
            let writer = db::spawn_writer(pool.as_ref().clone());
            (
                Arc::new(spendwise_storage_sqlite::budgets::BudgetRepository::new(
                    pool.clone(),
                    writer.clone(),
                )),
                Arc::new(
                    spendwise_storage_sqlite::transactions::TransactionRepository::new(
                        pool.clone(),
                        writer.clone(),
                    ),
                ),
                Arc::new(spendwise_storage_sqlite::settings::SettingsRepository::new(
                    pool.clone(),
                    writer,
                )),
                StorageHandle::Sqlite(pool),
            )
        }
        StorageBackend::Memory => {
            let store = spendwise_storage_memory::SnapshotStore::open(Path::new(&config.data_dir))?;
            (
                Arc::new(spendwise_storage_memory::BudgetRepository::new(
                    store.clone(),
                )),
                Arc::new(spendwise_storage_memory::TransactionRepository::new(
                    store.clone(),
                )),
                Arc::new(spendwise_storage_memory::SettingsRepository::new(store)),
                StorageHandle::Memory,
            )
        }
    };

    let budget_service: Arc<dyn BudgetServiceTrait> = Arc::new(BudgetService::new(
        budget_repo.clone(),
        transaction_repo.clone(),
        settings_repo.clone(),
    ));
    let transaction_service: Arc<dyn TransactionServiceTrait> = Arc::new(TransactionService::new(
        transaction_repo,
        budget_repo,
        settings_repo.clone(),
    ));
    let settings_service: Arc<dyn SettingsServiceTrait> =
        Arc::new(SettingsService::new(settings_repo));

    // First run: seed budgets for the previous and current month.
    if let Err(e) = budget_service.initialize_seed_budgets().await {
        tracing::warn!("Seed budgets skipped: {}", e);
    }

    Ok(Arc::new(AppState {
        budget_service,
        transaction_service,
        settings_service,
        storage,
        started_at: Instant::now(),
    }))
}
