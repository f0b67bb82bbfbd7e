//! SQLite storage implementation for spendwise.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `spendwise-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations for the four finance tables
//! - Repository implementations behind a single-writer actor
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist; everything above it works with the core traits.

pub mod db;
pub mod errors;
pub mod schema;

mod utils;

// Repository implementations
pub mod budgets;
pub mod settings;
pub mod transactions;

// Re-export database utilities
pub use db::{
    create_pool, db_ping, get_connection, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from spendwise-core for convenience
pub use spendwise_core::errors::{DatabaseError, Error, Result};
