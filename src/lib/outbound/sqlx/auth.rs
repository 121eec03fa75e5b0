use anyhow::anyhow;
use sqlx::{query, query_as};

use crate::domain::auth::{
    models::{credentials::PasswordHash, error::AuthError},
    ports::AuthRepository,
};
use crate::domain::user::models::User;
use crate::outbound::sqlx::postgres::{IsConstraintViolation, Postgres};

struct DatabaseUser {
    uid: i64,
    login: String,
}

impl From<DatabaseUser> for User {
    fn from(value: DatabaseUser) -> Self {
        User::new(value.uid, value.login)
    }
}

impl AuthRepository for Postgres {
    async fn create_user(&self, login: &str, password_hash: &PasswordHash) -> Result<User, AuthError> {
        let row = query_as!(
            DatabaseUser,
            "INSERT INTO users (login, hash) VALUES ($1, $2) RETURNING uid, login",
            login,
            password_hash.as_str(),
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.is_unique_constraint_violation() {
                AuthError::UserExists
            } else {
                AuthError::Database(anyhow!("{e}"))
            }
        })?;

        Ok(row.into())
    }

    async fn find_user_by_login(&self, login: &str) -> Result<Option<(User, PasswordHash)>, AuthError> {
        let row = query!(
            "SELECT uid, login, hash FROM users WHERE login = $1",
            login
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Database(anyhow!("{e}")))?;

        Ok(row.map(|r| {
            let user = User::new(r.uid, r.login);
            let hash = PasswordHash::from_stored(r.hash);
            (user, hash)
        }))
    }
}
