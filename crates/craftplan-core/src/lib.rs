//! Craftplan Core Library
//!
//! This crate provides the core functionality for craftplan, including:
//! - Storage (SQLite connection handling, migrations, row mapping)
//! - The project domain (entities, data access, services)
//! - Configuration with file persistence

pub mod config;
pub mod domain;
pub mod error;
pub mod storage;

pub use error::{Error, Result};
