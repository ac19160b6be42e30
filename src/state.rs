//! Application state for Axum web framework.

use std::sync::Arc;

use crate::db::AsyncDbPool;
use crate::external::WeatherProvider;
use crate::services::Services;
use crate::utils::jwt::JwtService;

/// Shared state handed to every handler.
///
/// Cloning is cheap: the pool, services and weather provider are all
/// reference counted.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    /// Used directly by the health checks
    pub db_pool: AsyncDbPool,
    pub jwt: JwtService,
}

impl AppState {
    /// Wires services from their explicit collaborators.
    ///
    /// # Example
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let jwt = JwtService::new(&settings.jwt.secret, settings.jwt.access_token_expiration);
    /// let weather = Arc::new(WeatherClient::from_config(&settings.weather)?);
    /// let state = AppState::new(pool, jwt, weather);
    /// ```
    pub fn new(pool: AsyncDbPool, jwt: JwtService, weather: Arc<dyn WeatherProvider>) -> Self {
        let services = Services::new(pool.clone(), jwt.clone(), weather);
        Self {
            services,
            db_pool: pool,
            jwt,
        }
    }
}
