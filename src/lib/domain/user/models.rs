//! The authenticated account. Just a server-assigned id and the login string
//! the account registered with — no email, no username, no profile fields.

use serde::{Deserialize, Serialize};

/// A registered account.
///
/// `uid` is a server-assigned, monotonically increasing identifier (backed by
/// a `BIGSERIAL` column), not a client-supplied or random identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uid: i64,
    pub login: String,
}

impl User {
    pub fn new(uid: i64, login: String) -> Self {
        Self { uid, login }
    }
}
