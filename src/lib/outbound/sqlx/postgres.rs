use anyhow::Context;

const UNIQUE_CONSTRAINT_VIOLATION_CODE: &str = "23505";

pub trait IsConstraintViolation {
    fn is_unique_constraint_violation(&self) -> bool;
}

impl IsConstraintViolation for sqlx::Error {
    fn is_unique_constraint_violation(&self) -> bool {
        if let sqlx::Error::Database(e) = self {
            if let Some(code) = e.code() {
                return code == UNIQUE_CONSTRAINT_VIOLATION_CODE;
            }
        }
        false
    }
}

/// postgresql connection pool with production-ready defaults
pub struct PostgresPoolOptions(sqlx::postgres::PgPoolOptions);

impl PostgresPoolOptions {
    pub fn new() -> Self {
        Self(
            sqlx::postgres::PgPoolOptions::new()
                .min_connections(2)
                .max_connections(10)
                .idle_timeout(Some(std::time::Duration::from_secs(300)))
                .acquire_timeout(std::time::Duration::from_secs(5)),
        )
    }

    pub async fn connect(self, url: &str) -> Result<sqlx::postgres::PgPool, sqlx::Error> {
        self.0.connect(url).await
    }
}

/// postgresql database adapter with connection pooling
#[derive(Debug, Clone)]
pub struct Postgres {
    pub pool: sqlx::PgPool,
}

impl Postgres {
    pub async fn new(url: &str) -> anyhow::Result<Self> {
        let pool = PostgresPoolOptions::new()
            .connect(url)
            .await
            .context(format!("failed to open database at {}", url))?;

        Ok(Self { pool })
    }
}
