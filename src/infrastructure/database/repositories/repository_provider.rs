//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::repositories::RepositoryProvider;
use crate::domain::{CompanyRepositoryInterface, UserRepositoryInterface};

use super::company_repository::SeaOrmCompanyRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
pub struct SeaOrmRepositoryProvider {
    companies: SeaOrmCompanyRepository,
    users: SeaOrmUserRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            companies: SeaOrmCompanyRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn companies(&self) -> &dyn CompanyRepositoryInterface {
        &self.companies
    }

    fn users(&self) -> &dyn UserRepositoryInterface {
        &self.users
    }
}
