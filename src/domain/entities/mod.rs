pub mod hotel;
pub mod role;

pub use hotel::*;
pub use role::*;
