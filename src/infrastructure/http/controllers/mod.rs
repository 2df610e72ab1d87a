pub mod health;
pub mod hotels;

pub use health::*;
pub use hotels::*;
