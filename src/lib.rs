pub mod config;
pub mod extractors;
pub mod idiom;
pub mod logging;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;
