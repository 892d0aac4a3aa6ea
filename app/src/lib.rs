pub mod app;
pub mod bootstrap;
pub mod config;
pub mod services;

pub use bootstrap::init_foundation;
