//! Tenancy module: company lifecycle

pub mod service;

pub use service::CompanyService;
