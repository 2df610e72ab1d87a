#![allow(dead_code, unused_imports)]
pub mod http;
pub mod test_db;

pub use http::*;
pub use test_db::*;
