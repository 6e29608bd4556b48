//! Identity module: authentication, access control & user management
//!
//! Contains the `UserService` which orchestrates the user-related
//! use-cases (login, company-scoped CRUD, bootstrap) and the access guard
//! every one of them passes through.

pub mod access;
pub mod commands;
pub mod service;

pub use access::{ensure_company_admin, ensure_global_admin, Actor};
pub use commands::{CompanyUserChanges, NewCompanyUser};
pub use service::{AuthResult, UserService};
