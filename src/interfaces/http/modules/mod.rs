pub mod auth;
pub mod companies;
pub mod company_users;
pub mod health;
pub mod metrics;
pub mod request_id;
