//! SQLite-backed persistence
//!
//! Provides the connection pool wrapper, schema migrations, and the
//! row-to-entity mapping helpers shared by all repositories.

pub mod database;
pub mod mapper;
pub mod migrations;

pub use database::{Database, DatabaseConfig};
