//! verso — document service with immutable version history.
//!
//! Every content- or title-affecting edit is recorded as a sequentially
//! numbered, self-contained snapshot; documents can be restored to any prior
//! snapshot (itself a new snapshot), and any two snapshots can be compared
//! with a deterministic line diff.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

/// Embedded sqlx migrations; run by `main` at startup and by the test
/// harness against throwaway databases.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
