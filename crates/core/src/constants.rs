/// Decimal places kept for money amounts (matches the DECIMAL(12,2) columns).
pub const AMOUNT_DECIMAL_PLACES: u32 = 2;

/// Decimal places kept for variable-category proportions (DECIMAL(5,4)).
pub const PROPORTION_DECIMAL_PLACES: u32 = 4;

/// Storage key for the local snapshot store (file stem of the JSON snapshot).
pub const SNAPSHOT_STORE_KEY: &str = "finance-store";

/// Default savings goal applied when user settings are first created.
pub const DEFAULT_SAVINGS_GOAL: &str = "100000";

/// Default description shown next to the savings goal.
pub const DEFAULT_SAVINGS_GOAL_DESCRIPTION: &str = "Savings goal";

/// Starter categories seeded into every newly created budget.
pub const STARTER_FIXED_CATEGORY: &str = "Housing";
pub const STARTER_VARIABLE_CATEGORY: &str = "Everyday spending";
pub const STARTER_SAVINGS_CATEGORY: &str = "Savings";

pub const STARTER_FIXED_COLOR: &str = "#EF4444";
pub const STARTER_VARIABLE_COLOR: &str = "#3B82F6";
pub const STARTER_SAVINGS_COLOR: &str = "#10B981";
