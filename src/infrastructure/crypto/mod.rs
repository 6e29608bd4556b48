//! Credential primitives

pub mod jwt;
pub mod password;
