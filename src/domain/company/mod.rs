//! Company aggregate (tenant)

pub mod dto;
pub mod model;
pub mod repository;

pub use dto::{CreateCompanyDto, GetCompanyDto, UpdateCompanyDto};
pub use model::Company;
pub use repository::CompanyRepositoryInterface;
