//! Application layer: use-case orchestration
//!
//! - `identity`: authentication, the access guard and company-scoped user
//!   management
//! - `tenancy`: company lifecycle

pub mod identity;
pub mod tenancy;

pub use identity::{Actor, AuthResult, CompanyUserChanges, NewCompanyUser, UserService};
pub use tenancy::CompanyService;
