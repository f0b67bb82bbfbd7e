//! User settings domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SAVINGS_GOAL, DEFAULT_SAVINGS_GOAL_DESCRIPTION};
use crate::months;

/// Store-wide user settings: the savings goal and the current-month pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub savings_goal: Decimal,
    pub savings_goal_description: String,
    /// `YYYY-MM` month key the dashboard is focused on. May reference a
    /// month whose budget does not exist yet.
    pub current_month: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            savings_goal: DEFAULT_SAVINGS_GOAL.parse().unwrap_or(Decimal::ZERO),
            savings_goal_description: DEFAULT_SAVINGS_GOAL_DESCRIPTION.to_string(),
            current_month: months::current_month(),
        }
    }
}

/// Partial update for settings. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub savings_goal: Option<Decimal>,
    pub savings_goal_description: Option<String>,
    pub current_month: Option<String>,
}
