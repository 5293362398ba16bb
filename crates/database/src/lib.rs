//! # Superheroes Database Crate
//!
//! This crate is the only code that speaks SQL. It hides the store behind
//! `DbRepository`, whose methods hand back the shapes defined in
//! `core-types`.
//!
//! ## Public API
//!
//! - `connect`: establishes the SQLite connection pool.
//! - `run_migrations`: applies the embedded schema migrations.
//! - `DbRepository`: every read and write; writes run inside a scoped
//!   transaction that only commits once all checks have passed.
//! - `seed`: fills the store with a sample roster.
//! - `DbError`: the error type returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;
pub mod seed;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use repository::DbRepository;
pub use seed::{SeedReport, seed_database};
