pub mod models;
pub mod ports;
pub mod services;

pub use models::access_token::{AccessToken, Jwt, JwtSecret};
pub use models::credentials::{Credentials, RawCredentials};
pub use models::error::AuthError;
pub use ports::{AuthRepository, AuthService};
pub use services::Service;
