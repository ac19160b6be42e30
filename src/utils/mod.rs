pub mod date;
pub mod jwt;
pub mod password;
pub mod validate;

pub use jwt::{AuthUser, JwtService};
pub use validate::{ValidatedJson, ValidatedQuery};
