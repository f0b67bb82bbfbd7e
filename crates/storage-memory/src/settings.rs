//! Settings repository over the snapshot store.

use std::sync::Arc;

use async_trait::async_trait;

use spendwise_core::errors::Result;
use spendwise_core::settings::{Settings, SettingsRepositoryTrait, SettingsUpdate};

use crate::store::SnapshotStore;

pub struct SettingsRepository {
    store: Arc<SnapshotStore>,
}

impl SettingsRepository {
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        SettingsRepository { store }
    }
}

#[async_trait]
impl SettingsRepositoryTrait for SettingsRepository {
    fn get_settings(&self) -> Result<Settings> {
        Ok(self
            .store
            .read(|state| state.settings.clone())
            .unwrap_or_default())
    }

    async fn update_settings(&self, update: &SettingsUpdate) -> Result<()> {
        self.store.mutate(|state| {
            let mut settings = state.settings.clone().unwrap_or_default();
            if let Some(savings_goal) = update.savings_goal {
                settings.savings_goal = savings_goal;
            }
            if let Some(ref description) = update.savings_goal_description {
                settings.savings_goal_description = description.clone();
            }
            if let Some(ref current_month) = update.current_month {
                settings.current_month = current_month.clone();
            }
            state.settings = Some(settings);
            Ok(())
        })
    }
}
