pub mod auth_service;
pub mod hotel_service;
pub mod permission_service;

pub use auth_service::*;
pub use hotel_service::*;
pub use permission_service::*;
