//! In-memory storage with JSON snapshot persistence for spendwise.
//!
//! The local-store counterpart of `spendwise-storage-sqlite`: the whole
//! state lives in memory behind one lock and every mutation rewrites a
//! single JSON snapshot file, the way the web client persists its store
//! under a fixed browser-storage key. Suited to single-user setups that
//! want a plain-text data file instead of a database.

mod store;

mod budgets;
mod settings;
mod transactions;

pub use budgets::BudgetRepository;
pub use settings::SettingsRepository;
pub use store::SnapshotStore;
pub use transactions::TransactionRepository;
