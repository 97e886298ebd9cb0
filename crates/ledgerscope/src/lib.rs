pub mod config;
pub mod render;
pub mod routes;

pub use config::{AppConfig, ConfigError, LogFormat};
pub use routes::router;
