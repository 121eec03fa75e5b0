//! Port traits for authentication.
//!
//! - `AuthRepository` is the database port: create and look up accounts.
//! - `AuthService` is the service port: orchestrates hashing, repository
//!   calls, and JWT issuance.

use crate::domain::auth::models::{
    access_token::{AccessToken, Jwt, JwtSecret},
    credentials::{Credentials, PasswordHash},
    error::AuthError,
};
use crate::domain::user::models::User;
use std::future::Future;

pub trait AuthRepository: Clone + Send + Sync + 'static {
    /// Inserts a new account. Fails with [`AuthError::UserExists`] if the
    /// login is already taken.
    fn create_user(
        &self,
        login: &str,
        password_hash: &PasswordHash,
    ) -> impl Future<Output = Result<User, AuthError>> + Send;

    /// Looks up an account by login, returning its password hash alongside
    /// it for verification.
    fn find_user_by_login(
        &self,
        login: &str,
    ) -> impl Future<Output = Result<Option<(User, PasswordHash)>, AuthError>> + Send;
}

pub trait AuthService: Clone + Send + Sync + 'static {
    fn jwt_secret(&self) -> &JwtSecret;

    /// Registers a new account and returns it with a freshly issued token.
    fn register(
        &self,
        credentials: Credentials,
    ) -> impl Future<Output = Result<(User, AccessToken), AuthError>> + Send;

    /// Verifies a login/password pair and returns the account with a fresh
    /// token. The returned account never carries a password or hash.
    fn login(
        &self,
        credentials: Credentials,
    ) -> impl Future<Output = Result<(User, AccessToken), AuthError>> + Send;

    /// Validates a bearer token and returns the authenticated `uid`.
    fn verify_token(&self, token: &Jwt) -> Result<i64, AuthError>;
}
