//! Outbound integrations.

pub mod client;
pub mod weather;

pub use weather::{WeatherClient, WeatherEntry, WeatherProvider};
