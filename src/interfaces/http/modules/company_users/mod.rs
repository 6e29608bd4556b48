//! Company users module: admin CRUD on `companies/{company}/users`

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
