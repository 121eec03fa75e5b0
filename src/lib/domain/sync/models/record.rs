//! Internal (post-wire-conversion) record shapes. One type per record kind,
//! matching the five-table schema in `outbound/sqlx/sync.rs`.
//!
//! `cvv` is stored and compared as an integer, not a string — this mirrors a
//! defect in the original system (a leading-zero CVV like `"012"` round-trips
//! as `12`), kept intentionally rather than silently "fixed" out from under
//! callers who may depend on the existing stored values.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct AuthRecord {
    pub name: String,
    pub login: String,
    pub password: String,
    pub deleted: bool,
    pub last_update: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardRecord {
    pub name: String,
    pub number: String,
    pub date: String,
    pub cvv: i32,
    pub deleted: bool,
    pub last_update: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRecord {
    pub name: String,
    pub data: String,
    pub deleted: bool,
    pub last_update: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinRecord {
    pub name: String,
    pub data: Vec<u8>,
    pub deleted: bool,
    pub last_update: DateTime<Utc>,
}
