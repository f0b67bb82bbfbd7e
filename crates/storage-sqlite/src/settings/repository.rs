use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use spendwise_core::errors::Result;
use spendwise_core::settings::{Settings, SettingsRepositoryTrait, SettingsUpdate};

use super::model::UserSettingsDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::user_settings;

pub struct SettingsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SettingsRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SettingsRepository { pool, writer }
    }
}

fn load_row(conn: &mut SqliteConnection) -> Result<Option<UserSettingsDB>> {
    Ok(user_settings::table
        .first::<UserSettingsDB>(conn)
        .optional()
        .map_err(StorageError::from)?)
}

#[async_trait]
impl SettingsRepositoryTrait for SettingsRepository {
    fn get_settings(&self) -> Result<Settings> {
        let mut conn = get_connection(&self.pool)?;
        Ok(load_row(&mut conn)?
            .map(Settings::from)
            .unwrap_or_default())
    }

    async fn update_settings(&self, update: &SettingsUpdate) -> Result<()> {
        let update = update.clone();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let now = Utc::now().naive_utc();
                match load_row(conn)? {
                    Some(mut row) => {
                        if let Some(savings_goal) = update.savings_goal {
                            row.savings_goal = savings_goal.to_string();
                        }
                        if let Some(description) = update.savings_goal_description {
                            row.savings_goal_description = description;
                        }
                        if let Some(current_month) = update.current_month {
                            row.current_month = current_month;
                        }
                        row.updated_at = now;
                        diesel::update(user_settings::table.find(&row.id))
                            .set(&row)
                            .execute(conn)
                            .map_err(StorageError::from)?;
                    }
                    None => {
                        // First write: start from defaults and overlay.
                        let mut defaults = Settings::default();
                        if let Some(savings_goal) = update.savings_goal {
                            defaults.savings_goal = savings_goal;
                        }
                        if let Some(description) = update.savings_goal_description {
                            defaults.savings_goal_description = description;
                        }
                        if let Some(current_month) = update.current_month {
                            defaults.current_month = current_month;
                        }
                        let row = UserSettingsDB {
                            id: Uuid::new_v4().to_string(),
                            savings_goal: defaults.savings_goal.to_string(),
                            savings_goal_description: defaults.savings_goal_description,
                            current_month: defaults.current_month,
                            created_at: now,
                            updated_at: now,
                        };
                        diesel::insert_into(user_settings::table)
                            .values(&row)
                            .execute(conn)
                            .map_err(StorageError::from)?;
                    }
                }
                Ok(())
            })
            .await
    }
}
