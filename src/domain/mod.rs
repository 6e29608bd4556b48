//! Domain layer
//!
//! Aggregates (`company`, `user`), their DTOs and the repository
//! interfaces the infrastructure layer implements.

pub mod company;
pub mod repositories;
pub mod user;

pub use company::{
    Company, CompanyRepositoryInterface, CreateCompanyDto, GetCompanyDto, UpdateCompanyDto,
};
pub use repositories::{DomainResult, RepositoryProvider};
pub use user::{
    CreateUserDto, GetUserDto, UpdateUserDto, User, UserRepositoryInterface, UserRole,
};

pub use crate::shared::errors::DomainError;
