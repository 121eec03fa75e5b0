//! Login/password credentials.
//!
//! Unlike the teacher's account model, a login here is an opaque identifier
//! chosen by the client — not an email, not subject to a complexity policy.
//! The original system accepted any non-empty login/password pair, so that's
//! the only invariant enforced here.

use argon2::{
    password_hash::{self, rand_core::OsRng, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CredentialsError {
    #[error("login must not be empty")]
    EmptyLogin,
    #[error("password must not be empty")]
    EmptyPassword,
}

/// A login/password pair as received over the wire, not yet validated.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCredentials {
    pub login: String,
    pub password: String,
}

/// A validated, non-empty login/password pair, ready to be hashed or checked
/// against a stored hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl TryFrom<RawCredentials> for Credentials {
    type Error = CredentialsError;

    fn try_from(raw: RawCredentials) -> Result<Self, Self::Error> {
        if raw.login.is_empty() {
            return Err(CredentialsError::EmptyLogin);
        }
        if raw.password.is_empty() {
            return Err(CredentialsError::EmptyPassword);
        }
        Ok(Self {
            login: raw.login,
            password: raw.password,
        })
    }
}

/// An Argon2id password hash, as stored in the `users` table.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn from_stored(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn generate(plaintext: &str) -> Result<Self, password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)?
            .to_string();
        Ok(Self(hash))
    }

    pub fn verify(&self, plaintext: &str) -> Result<bool, password_hash::Error> {
        let parsed = argon2::PasswordHash::new(&self.0)?;
        match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_login_or_password() {
        let raw = RawCredentials {
            login: String::new(),
            password: "pw".into(),
        };
        assert!(matches!(
            Credentials::try_from(raw).unwrap_err(),
            CredentialsError::EmptyLogin
        ));

        let raw = RawCredentials {
            login: "alice".into(),
            password: String::new(),
        };
        assert!(matches!(
            Credentials::try_from(raw).unwrap_err(),
            CredentialsError::EmptyPassword
        ));
    }

    #[test]
    fn accepts_any_nonempty_pair() {
        let raw = RawCredentials {
            login: "alice".into(),
            password: "x".into(),
        };
        assert!(Credentials::try_from(raw).is_ok());
    }

    #[test]
    fn hash_round_trips_and_rejects_wrong_password() {
        let hash = PasswordHash::generate("correct horse").unwrap();
        assert!(hash.verify("correct horse").unwrap());
        assert!(!hash.verify("wrong").unwrap());
    }

    #[test]
    fn hash_generation_is_salted() {
        let a = PasswordHash::generate("same").unwrap();
        let b = PasswordHash::generate("same").unwrap();
        assert_ne!(a.as_str(), b.as_str());
    }
}
