use super::access_token::InvalidJwt;
use super::credentials::CredentialsError;
use thiserror::Error;

/// Errors surfaced by the authentication service and repository.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("user already exists")]
    UserExists,
    #[error("user not found")]
    UserNotFound,
    #[error("invalid password")]
    InvalidPassword,
    #[error(transparent)]
    InvalidCredentials(#[from] CredentialsError),
    #[error(transparent)]
    Jwt(#[from] InvalidJwt),
    #[error("password hashing failed: {0}")]
    Hash(argon2::password_hash::Error),
    #[error(transparent)]
    Database(anyhow::Error),
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(value: argon2::password_hash::Error) -> Self {
        Self::Hash(value)
    }
}
