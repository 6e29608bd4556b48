//! # Tenant Admin
//!
//! Multi-tenant administration backend: companies and the users that
//! belong to them, managed by admins through resource routes
//! (`/companies/{company}/users`).
//!
//! ## Architecture
//!
//! - **domain**: entities, DTOs and repository traits
//! - **application**: use cases and the access guard
//! - **infrastructure**: SeaORM persistence, password hashing, JWT
//! - **interfaces**: Axum HTTP API with Swagger documentation
//! - **server**: runtime wiring and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

pub use interfaces::http::{create_api_router, ApiDoc, AppServices};
