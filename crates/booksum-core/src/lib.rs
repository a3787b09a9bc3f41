pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod router;
pub mod session;
pub mod token;
pub mod views;
