//! JWT access tokens.
//!
//! Tokens are short-lived (3 hours) and carry nothing but the account's
//! `uid`. There is no refresh token and no session table: once a token
//! expires the client re-authenticates with login/password.
//!
//! Wire convention: the token travels as the raw, unprefixed value of the
//! `Authorization` header — no `Bearer ` prefix.

use chrono::{Duration, NaiveDateTime, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

const TOKEN_TTL_HOURS: i64 = 3;

/// Errors when constructing a JWT secret.
#[derive(Debug, Clone, Error)]
pub enum JwtSecretError {
    #[error("secret length must be 32+")]
    TooShort,
    #[error("secret must be present")]
    MissingSecret,
}

/// Errors when creating or validating JWT tokens.
#[derive(Debug, Error)]
pub enum InvalidJwt {
    #[error("token must be present")]
    MissingToken,
    #[error("invalid token format")]
    Format,
    #[error(transparent)]
    Encoding(#[from] jsonwebtoken::errors::Error),
}

/// Server-side secret key for signing and validating JWT tokens.
#[derive(Debug, Clone)]
pub struct JwtSecret(String);

impl AsRef<[u8]> for JwtSecret {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl JwtSecret {
    pub fn new(raw: &str) -> Result<Self, JwtSecretError> {
        if raw.is_empty() {
            return Err(JwtSecretError::MissingSecret);
        }
        if raw.len() < 32 {
            return Err(JwtSecretError::TooShort);
        }
        Ok(Self(raw.to_string()))
    }
}

/// JWT claims: just the account id and the standard timing fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The account's `uid`, serialized as a string (the JWT `sub` convention).
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn uid(&self) -> Result<i64, InvalidJwt> {
        self.sub.parse().map_err(|_| InvalidJwt::Format)
    }
}

/// A validated JWT token string with the correct `header.payload.signature` shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Jwt(String);

impl Jwt {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Verifies the signature and expiry, returning the embedded claims.
    pub fn validate(&self, secret: &JwtSecret) -> Result<Claims, InvalidJwt> {
        let token_data = decode::<Claims>(
            self.as_str(),
            &DecodingKey::from_secret(secret.as_ref()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}

impl FromStr for Jwt {
    type Err = InvalidJwt;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(InvalidJwt::MissingToken);
        }
        if s.split('.').count() != 3 {
            return Err(InvalidJwt::Format);
        }
        Ok(Self(s.to_string()))
    }
}

impl Display for Jwt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Jwt {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Jwt {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Jwt::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// A complete access token: the JWT value plus its expiry, as handed back to
/// clients on register/login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub value: Jwt,
    pub expires_at: NaiveDateTime,
}

impl AccessToken {
    pub fn new(value: Jwt, expires_at: NaiveDateTime) -> Self {
        Self { value, expires_at }
    }

    /// Generates a fresh token for `uid`, valid for [`TOKEN_TTL_HOURS`] hours.
    pub fn generate(uid: i64, secret: &JwtSecret) -> Result<AccessToken, InvalidJwt> {
        let issued_at = Utc::now().naive_utc();
        let expires_at = issued_at + Duration::hours(TOKEN_TTL_HOURS);

        let claims = Claims {
            sub: uid.to_string(),
            exp: expires_at.and_utc().timestamp(),
            iat: issued_at.and_utc().timestamp(),
        };

        let value = Jwt::from_str(&encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )?)?;

        Ok(AccessToken::new(value, expires_at))
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now().naive_utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jwt_secret_rejects_empty_and_short_secrets() {
        assert!(matches!(
            JwtSecret::new("").unwrap_err(),
            JwtSecretError::MissingSecret
        ));
        assert!(matches!(
            JwtSecret::new("short").unwrap_err(),
            JwtSecretError::TooShort
        ));
        assert!(JwtSecret::new(&"a".repeat(32)).is_ok());
    }

    #[test]
    fn jwt_from_str_validates_shape() {
        assert!(Jwt::from_str("").is_err());
        assert!(Jwt::from_str("too.few").is_err());
        assert!(Jwt::from_str("a.b.c.d").is_err());
        assert!(Jwt::from_str("a.b.c").is_ok());
    }

    #[test]
    fn generate_and_validate_round_trip() {
        let secret = JwtSecret::new(&"a".repeat(32)).unwrap();
        let token = AccessToken::generate(42, &secret).unwrap();
        let claims = token.value.validate(&secret).unwrap();
        assert_eq!(claims.uid().unwrap(), 42);
        assert!(!token.is_expired());
    }

    #[test]
    fn validate_rejects_wrong_secret() {
        let secret = JwtSecret::new(&"a".repeat(32)).unwrap();
        let other = JwtSecret::new(&"b".repeat(32)).unwrap();
        let token = AccessToken::generate(1, &secret).unwrap();
        assert!(token.value.validate(&other).is_err());
    }

    #[test]
    fn token_expires_three_hours_from_issuance() {
        let secret = JwtSecret::new(&"a".repeat(32)).unwrap();
        let token = AccessToken::generate(7, &secret).unwrap();
        let claims = token.value.validate(&secret).unwrap();
        assert_eq!(claims.exp - claims.iat, 3 * 3600);
    }
}
