pub mod controllers;
pub mod envelope;
pub mod extractors;
pub mod middleware;
pub mod router;
