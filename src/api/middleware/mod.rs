//! Middleware components for request processing.

mod admin;
mod auth;
mod error_handler;
mod logging;
mod request_id;

pub use admin::admin_middleware;
pub use auth::auth_middleware;
pub use error_handler::{error_to_status_code, global_error_handler};
pub use logging::logging_middleware;
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
