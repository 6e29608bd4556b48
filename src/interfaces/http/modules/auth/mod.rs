//! Authentication module: login and current actor

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
