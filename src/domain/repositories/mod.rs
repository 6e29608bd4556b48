//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::company::CompanyRepositoryInterface;
use super::user::UserRepositoryInterface;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let company = repos.companies().get_company_by_id("c-1").await?;
///     let admin = repos.users().get_user_by_email("admin@localhost").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn companies(&self) -> &dyn CompanyRepositoryInterface;
    fn users(&self) -> &dyn UserRepositoryInterface;
}
