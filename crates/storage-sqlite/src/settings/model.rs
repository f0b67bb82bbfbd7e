//! Database model for user settings.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use spendwise_core::settings::Settings;

use crate::utils::parse_amount;

/// Database model for the single user settings row.
#[derive(
    Insertable, Queryable, Identifiable, AsChangeset, Selectable, Serialize, Deserialize, Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::user_settings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct UserSettingsDB {
    pub id: String,
    pub savings_goal: String,
    pub savings_goal_description: String,
    pub current_month: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<UserSettingsDB> for Settings {
    fn from(db: UserSettingsDB) -> Self {
        Settings {
            savings_goal: parse_amount(&db.savings_goal),
            savings_goal_description: db.savings_goal_description,
            current_month: db.current_month,
        }
    }
}
