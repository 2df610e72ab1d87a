pub mod auth;
pub mod error;
pub mod error_handler;
pub mod permission;

pub use auth::*;
pub use error::*;
pub use error_handler::*;
pub use permission::*;
