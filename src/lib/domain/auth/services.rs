use crate::domain::auth::{
    models::{
        access_token::{AccessToken, Jwt, JwtSecret},
        credentials::{Credentials, PasswordHash},
        error::AuthError,
    },
    ports::{AuthRepository, AuthService},
};
use crate::domain::user::models::User;

/// structure which implements `AuthService`
#[derive(Debug, Clone)]
pub struct Service<R: AuthRepository> {
    repo: R,
    jwt_secret: JwtSecret,
}

impl<R: AuthRepository> Service<R> {
    pub fn new(repo: R, jwt_secret: JwtSecret) -> Self {
        Self { repo, jwt_secret }
    }
}

impl<R: AuthRepository> AuthService for Service<R> {
    fn jwt_secret(&self) -> &JwtSecret {
        &self.jwt_secret
    }

    async fn register(&self, credentials: Credentials) -> Result<(User, AccessToken), AuthError> {
        let password_hash = PasswordHash::generate(&credentials.password)?;
        let user = self.repo.create_user(&credentials.login, &password_hash).await?;
        let token = AccessToken::generate(user.uid, &self.jwt_secret)?;
        Ok((user, token))
    }

    async fn login(&self, credentials: Credentials) -> Result<(User, AccessToken), AuthError> {
        let (user, password_hash) = self
            .repo
            .find_user_by_login(&credentials.login)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !password_hash.verify(&credentials.password)? {
            return Err(AuthError::InvalidPassword);
        }

        let token = AccessToken::generate(user.uid, &self.jwt_secret)?;
        Ok((user, token))
    }

    fn verify_token(&self, token: &Jwt) -> Result<i64, AuthError> {
        let claims = token.validate(&self.jwt_secret)?;
        Ok(claims.uid()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct FakeRepo {
        users: Arc<Mutex<Vec<(User, PasswordHash)>>>,
    }

    impl AuthRepository for FakeRepo {
        async fn create_user(&self, login: &str, password_hash: &PasswordHash) -> Result<User, AuthError> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|(u, _)| u.login == login) {
                return Err(AuthError::UserExists);
            }
            let user = User::new(users.len() as i64 + 1, login.to_string());
            users.push((user.clone(), password_hash.clone()));
            Ok(user)
        }

        async fn find_user_by_login(&self, login: &str) -> Result<Option<(User, PasswordHash)>, AuthError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|(u, _)| u.login == login)
                .cloned())
        }
    }

    fn secret() -> JwtSecret {
        JwtSecret::new(&"a".repeat(32)).unwrap()
    }

    #[tokio::test]
    async fn register_then_login_round_trips() {
        let service = Service::new(FakeRepo::default(), secret());
        let credentials = Credentials {
            login: "alice".into(),
            password: "hunter2".into(),
        };

        let (user, _token) = service.register(credentials.clone()).await.unwrap();
        assert_eq!(user.login, "alice");

        let (logged_in, _token) = service.login(credentials).await.unwrap();
        assert_eq!(logged_in.uid, user.uid);
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let service = Service::new(FakeRepo::default(), secret());
        service
            .register(Credentials {
                login: "bob".into(),
                password: "right".into(),
            })
            .await
            .unwrap();

        let err = service
            .login(Credentials {
                login: "bob".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidPassword));
    }

    #[tokio::test]
    async fn login_rejects_unknown_user() {
        let service = Service::new(FakeRepo::default(), secret());
        let err = service
            .login(Credentials {
                login: "ghost".into(),
                password: "x".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn register_rejects_duplicate_login() {
        let service = Service::new(FakeRepo::default(), secret());
        let credentials = Credentials {
            login: "carol".into(),
            password: "x".into(),
        };
        service.register(credentials.clone()).await.unwrap();
        let err = service.register(credentials).await.unwrap_err();
        assert!(matches!(err, AuthError::UserExists));
    }

    #[test]
    fn verify_token_recovers_uid() {
        let secret = secret();
        let token = AccessToken::generate(99, &secret).unwrap();
        let service = Service::new(FakeRepo::default(), secret);
        assert_eq!(service.verify_token(&token.value).unwrap(), 99);
    }
}
