//! Infrastructure layer - external concerns
//!
//! - `crypto`: password hashing and JWT signing
//! - `database`: SeaORM entities, migrations and repositories

pub mod crypto;
pub mod database;

pub use database::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
