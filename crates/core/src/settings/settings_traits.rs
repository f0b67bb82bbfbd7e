//! Repository traits for user settings.

use async_trait::async_trait;

use crate::errors::Result;
use crate::settings::settings_model::{Settings, SettingsUpdate};

/// Repository trait for user settings.
///
/// `get_settings` materializes defaults when no settings row/snapshot entry
/// exists yet, so it never reports not-found.
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    fn get_settings(&self) -> Result<Settings>;
    async fn update_settings(&self, update: &SettingsUpdate) -> Result<()>;
}
