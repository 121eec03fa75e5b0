//! PostgreSQL adapter for the sync engine.
//!
//! Each record kind gets its own table and its own transaction. Per record,
//! Step A runs a conditional upsert (`WITH updated_rows AS (UPDATE ...
//! RETURNING ...) INSERT ... WHERE NOT EXISTS (...)`) keyed on `(uid, name)`
//! with a strict `last_update <` guard, then Step B probes for a stored row
//! newer than what was just pushed. After the whole incoming batch for a
//! kind is processed, Step C enumerates every row for `uid` whose `name`
//! wasn't mentioned by the client.
//!
//! The "unknown to client" query parameterizes the exclusion list as a
//! Postgres array bound through `= ANY($n)` rather than interpolating names
//! into the SQL text.

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use sqlx::{query, query_as, Postgres as Pg, Transaction};

use crate::domain::sync::{
    models::{
        error::SyncError,
        record::{AuthRecord, BinRecord, CardRecord, TextRecord},
    },
    ports::SyncRepository,
};
use crate::outbound::sqlx::postgres::Postgres;

fn db_err(e: sqlx::Error) -> SyncError {
    SyncError::Database(anyhow!("{e}"))
}

struct TextRow {
    name: String,
    data: String,
    deleted: bool,
    last_update: DateTime<Utc>,
}

impl From<TextRow> for TextRecord {
    fn from(r: TextRow) -> Self {
        Self {
            name: r.name,
            data: r.data,
            deleted: r.deleted,
            last_update: r.last_update,
        }
    }
}

struct AuthRow {
    name: String,
    login: String,
    password: String,
    deleted: bool,
    last_update: DateTime<Utc>,
}

impl From<AuthRow> for AuthRecord {
    fn from(r: AuthRow) -> Self {
        Self {
            name: r.name,
            login: r.login,
            password: r.password,
            deleted: r.deleted,
            last_update: r.last_update,
        }
    }
}

struct BinRow {
    name: String,
    data: Vec<u8>,
    deleted: bool,
    last_update: DateTime<Utc>,
}

impl From<BinRow> for BinRecord {
    fn from(r: BinRow) -> Self {
        Self {
            name: r.name,
            data: r.data,
            deleted: r.deleted,
            last_update: r.last_update,
        }
    }
}

struct CardRow {
    name: String,
    number: String,
    date: String,
    cvv: i32,
    deleted: bool,
    last_update: DateTime<Utc>,
}

impl From<CardRow> for CardRecord {
    fn from(r: CardRow) -> Self {
        Self {
            name: r.name,
            number: r.number,
            date: r.date,
            cvv: r.cvv,
            deleted: r.deleted,
            last_update: r.last_update,
        }
    }
}

impl SyncRepository for Postgres {
    async fn sync_text(&self, uid: i64, incoming: Vec<TextRecord>) -> Result<Vec<TextRecord>, SyncError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;
        let mut results = Vec::new();
        let mut names: Vec<String> = Vec::with_capacity(incoming.len());

        for record in incoming {
            names.push(record.name.clone());

            query!(
                r#"
                WITH updated_rows AS (
                    UPDATE text_data
                    SET data = $1, deleted = $2, last_update = $3
                    WHERE uid = $4 AND name = $5 AND last_update < $3
                    RETURNING name
                )
                INSERT INTO text_data (uid, name, data, deleted, last_update)
                SELECT $4, $5, $1, $2, $3
                WHERE NOT EXISTS (SELECT 1 FROM updated_rows)
                  AND NOT EXISTS (SELECT 1 FROM text_data WHERE uid = $4 AND name = $5)
                "#,
                record.data,
                record.deleted,
                record.last_update,
                uid,
                record.name,
            )
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

            if let Some(row) = fetch_newer_text(&mut tx, uid, &record.name, record.last_update).await? {
                results.push(row.into());
            }
        }

        let unknown = query_as!(
            TextRow,
            r#"SELECT name, data, deleted, last_update FROM text_data
               WHERE uid = $1 AND NOT (name = ANY($2))"#,
            uid,
            &names,
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(db_err)?;
        results.extend(unknown.into_iter().map(Into::into));

        tx.commit().await.map_err(db_err)?;
        Ok(results)
    }

    async fn sync_auth(&self, uid: i64, incoming: Vec<AuthRecord>) -> Result<Vec<AuthRecord>, SyncError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;
        let mut results = Vec::new();
        let mut names: Vec<String> = Vec::with_capacity(incoming.len());

        for record in incoming {
            names.push(record.name.clone());

            query!(
                r#"
                WITH updated_rows AS (
                    UPDATE logins
                    SET login = $1, password = $2, deleted = $3, last_update = $4
                    WHERE uid = $5 AND name = $6 AND last_update < $4
                    RETURNING name
                )
                INSERT INTO logins (uid, name, login, password, deleted, last_update)
                SELECT $5, $6, $1, $2, $3, $4
                WHERE NOT EXISTS (SELECT 1 FROM updated_rows)
                  AND NOT EXISTS (SELECT 1 FROM logins WHERE uid = $5 AND name = $6)
                "#,
                record.login,
                record.password,
                record.deleted,
                record.last_update,
                uid,
                record.name,
            )
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

            if let Some(row) = fetch_newer_auth(&mut tx, uid, &record.name, record.last_update).await? {
                results.push(row.into());
            }
        }

        let unknown = query_as!(
            AuthRow,
            r#"SELECT name, login, password, deleted, last_update FROM logins
               WHERE uid = $1 AND NOT (name = ANY($2))"#,
            uid,
            &names,
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(db_err)?;
        results.extend(unknown.into_iter().map(Into::into));

        tx.commit().await.map_err(db_err)?;
        Ok(results)
    }

    async fn sync_bin(&self, uid: i64, incoming: Vec<BinRecord>) -> Result<Vec<BinRecord>, SyncError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;
        let mut results = Vec::new();
        let mut names: Vec<String> = Vec::with_capacity(incoming.len());

        for record in incoming {
            names.push(record.name.clone());

            query!(
                r#"
                WITH updated_rows AS (
                    UPDATE binares_data
                    SET data = $1, deleted = $2, last_update = $3
                    WHERE uid = $4 AND name = $5 AND last_update < $3
                    RETURNING name
                )
                INSERT INTO binares_data (uid, name, data, deleted, last_update)
                SELECT $4, $5, $1, $2, $3
                WHERE NOT EXISTS (SELECT 1 FROM updated_rows)
                  AND NOT EXISTS (SELECT 1 FROM binares_data WHERE uid = $4 AND name = $5)
                "#,
                record.data,
                record.deleted,
                record.last_update,
                uid,
                record.name,
            )
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

            if let Some(row) = fetch_newer_bin(&mut tx, uid, &record.name, record.last_update).await? {
                results.push(row.into());
            }
        }

        let unknown = query_as!(
            BinRow,
            r#"SELECT name, data, deleted, last_update FROM binares_data
               WHERE uid = $1 AND NOT (name = ANY($2))"#,
            uid,
            &names,
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(db_err)?;
        results.extend(unknown.into_iter().map(Into::into));

        tx.commit().await.map_err(db_err)?;
        Ok(results)
    }

    async fn sync_card(&self, uid: i64, incoming: Vec<CardRecord>) -> Result<Vec<CardRecord>, SyncError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;
        let mut results = Vec::new();
        let mut names: Vec<String> = Vec::with_capacity(incoming.len());

        for record in incoming {
            names.push(record.name.clone());

            query!(
                r#"
                WITH updated_rows AS (
                    UPDATE cards
                    SET number = $1, date = $2, cvv = $3, deleted = $4, last_update = $5
                    WHERE uid = $6 AND name = $7 AND last_update < $5
                    RETURNING name
                )
                INSERT INTO cards (uid, name, number, date, cvv, deleted, last_update)
                SELECT $6, $7, $1, $2, $3, $4, $5
                WHERE NOT EXISTS (SELECT 1 FROM updated_rows)
                  AND NOT EXISTS (SELECT 1 FROM cards WHERE uid = $6 AND name = $7)
                "#,
                record.number,
                record.date,
                record.cvv,
                record.deleted,
                record.last_update,
                uid,
                record.name,
            )
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

            if let Some(row) = fetch_newer_card(&mut tx, uid, &record.name, record.last_update).await? {
                results.push(row.into());
            }
        }

        let unknown = query_as!(
            CardRow,
            r#"SELECT name, number, date, cvv, deleted, last_update FROM cards
               WHERE uid = $1 AND NOT (name = ANY($2))"#,
            uid,
            &names,
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(db_err)?;
        results.extend(unknown.into_iter().map(Into::into));

        tx.commit().await.map_err(db_err)?;
        Ok(results)
    }

    /// Physically removes tombstoned rows across all four kinds for `uid`,
    /// in one transaction (unlike the per-kind sync, which intentionally
    /// runs uncoordinated).
    async fn clear(&self, uid: i64) -> Result<(), SyncError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        query!("DELETE FROM logins WHERE deleted = true AND uid = $1", uid)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        query!("DELETE FROM text_data WHERE deleted = true AND uid = $1", uid)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        query!("DELETE FROM binares_data WHERE deleted = true AND uid = $1", uid)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        query!("DELETE FROM cards WHERE deleted = true AND uid = $1", uid)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;
        Ok(())
    }
}

async fn fetch_newer_text(
    tx: &mut Transaction<'_, Pg>,
    uid: i64,
    name: &str,
    last_update: DateTime<Utc>,
) -> Result<Option<TextRow>, SyncError> {
    query_as!(
        TextRow,
        "SELECT name, data, deleted, last_update FROM text_data WHERE uid = $1 AND name = $2 AND last_update > $3",
        uid,
        name,
        last_update,
    )
    .fetch_optional(&mut **tx)
    .await
    .map_err(db_err)
}

async fn fetch_newer_auth(
    tx: &mut Transaction<'_, Pg>,
    uid: i64,
    name: &str,
    last_update: DateTime<Utc>,
) -> Result<Option<AuthRow>, SyncError> {
    query_as!(
        AuthRow,
        "SELECT name, login, password, deleted, last_update FROM logins WHERE uid = $1 AND name = $2 AND last_update > $3",
        uid,
        name,
        last_update,
    )
    .fetch_optional(&mut **tx)
    .await
    .map_err(db_err)
}

async fn fetch_newer_bin(
    tx: &mut Transaction<'_, Pg>,
    uid: i64,
    name: &str,
    last_update: DateTime<Utc>,
) -> Result<Option<BinRow>, SyncError> {
    query_as!(
        BinRow,
        "SELECT name, data, deleted, last_update FROM binares_data WHERE uid = $1 AND name = $2 AND last_update > $3",
        uid,
        name,
        last_update,
    )
    .fetch_optional(&mut **tx)
    .await
    .map_err(db_err)
}

async fn fetch_newer_card(
    tx: &mut Transaction<'_, Pg>,
    uid: i64,
    name: &str,
    last_update: DateTime<Utc>,
) -> Result<Option<CardRow>, SyncError> {
    query_as!(
        CardRow,
        "SELECT name, number, date, cvv, deleted, last_update FROM cards WHERE uid = $1 AND name = $2 AND last_update > $3",
        uid,
        name,
        last_update,
    )
    .fetch_optional(&mut **tx)
    .await
    .map_err(db_err)
}
