use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;

use super::settings_model::{Settings, SettingsUpdate};
use super::settings_traits::SettingsRepositoryTrait;
use crate::errors::Result;
use crate::months;

/// Trait for settings service operations.
#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    fn get_settings(&self) -> Result<Settings>;
    async fn update_settings(&self, update: &SettingsUpdate) -> Result<()>;

    fn get_current_month(&self) -> Result<String>;
    async fn set_current_month(&self, month: &str) -> Result<()>;

    async fn set_savings_goal(&self, goal: Decimal, description: String) -> Result<()>;
}

pub struct SettingsService {
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
}

impl SettingsService {
    pub fn new(settings_repository: Arc<dyn SettingsRepositoryTrait>) -> Self {
        SettingsService {
            settings_repository,
        }
    }
}

#[async_trait]
impl SettingsServiceTrait for SettingsService {
    fn get_settings(&self) -> Result<Settings> {
        self.settings_repository.get_settings()
    }

    async fn update_settings(&self, update: &SettingsUpdate) -> Result<()> {
        if let Some(ref month) = update.current_month {
            months::validate_month_key(month)?;
        }
        self.settings_repository.update_settings(update).await
    }

    fn get_current_month(&self) -> Result<String> {
        Ok(self.settings_repository.get_settings()?.current_month)
    }

    async fn set_current_month(&self, month: &str) -> Result<()> {
        months::validate_month_key(month)?;
        debug!("Switching current month to {}", month);
        self.settings_repository
            .update_settings(&SettingsUpdate {
                current_month: Some(month.to_string()),
                ..Default::default()
            })
            .await
    }

    async fn set_savings_goal(&self, goal: Decimal, description: String) -> Result<()> {
        self.settings_repository
            .update_settings(&SettingsUpdate {
                savings_goal: Some(goal),
                savings_goal_description: Some(description),
                ..Default::default()
            })
            .await
    }
}
