//! Configuration management for todo-rs
//!
//! Layered TOML files plus `TODO_*` environment overrides; see [`loader`].

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{DatabaseConfig, JwtConfig, Settings, WeatherConfig};
