/// Utility modules
pub mod summation;

pub use summation::*;
