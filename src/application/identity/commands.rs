//! Write-side inputs for company-scoped user management

use crate::domain::UserRole;

/// A user to create inside a company. `password` is clear text; the
/// service hashes it before it reaches the repository.
#[derive(Debug, Clone)]
pub struct NewCompanyUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Fields an admin may change on a company user. `None` keeps the current
/// value.
#[derive(Debug, Clone, Default)]
pub struct CompanyUserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
}
