//! HTTP interface
//!
//! - `common`: response envelope, error mapping, validating extractors
//! - `middleware`: bearer-token authentication
//! - `modules`: request handlers grouped by resource
//! - `routes`: named path builders for the resource routes
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod routes;

pub use router::{create_api_router, ApiDoc, AppServices};
