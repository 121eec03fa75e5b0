//! JSON wire shapes for the sync RPC, and the conversions to/from the
//! internal record types. `cvv` travels as a string on the wire (it may
//! carry a leading zero); `last_update` travels as RFC3339; bin `data`
//! travels base64-encoded.

use super::error::SyncError;
use super::record::{AuthRecord, BinRecord, CardRecord, TextRecord};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WireAuthRecord {
    pub name: String,
    pub login: String,
    pub password: String,
    pub deleted: bool,
    pub last_update: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WireCardRecord {
    pub name: String,
    pub number: String,
    pub date: String,
    pub cvv: String,
    pub deleted: bool,
    pub last_update: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WireTextRecord {
    pub name: String,
    pub data: String,
    pub deleted: bool,
    pub last_update: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WireBinRecord {
    pub name: String,
    pub data: String,
    pub deleted: bool,
    pub last_update: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct WireSyncBatch {
    #[serde(default)]
    pub auth: Vec<WireAuthRecord>,
    #[serde(default)]
    pub cards: Vec<WireCardRecord>,
    #[serde(default)]
    pub texts: Vec<WireTextRecord>,
    #[serde(default)]
    pub bins: Vec<WireBinRecord>,
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, SyncError> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}

fn parse_cvv(raw: &str) -> Result<i32, SyncError> {
    raw.parse().map_err(|_| SyncError::InvalidCvv(raw.to_string()))
}

impl TryFrom<WireAuthRecord> for AuthRecord {
    type Error = SyncError;
    fn try_from(w: WireAuthRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            name: w.name,
            login: w.login,
            password: w.password,
            deleted: w.deleted,
            last_update: parse_timestamp(&w.last_update)?,
        })
    }
}

impl From<AuthRecord> for WireAuthRecord {
    fn from(r: AuthRecord) -> Self {
        Self {
            name: r.name,
            login: r.login,
            password: r.password,
            deleted: r.deleted,
            last_update: r.last_update.to_rfc3339(),
        }
    }
}

impl TryFrom<WireCardRecord> for CardRecord {
    type Error = SyncError;
    fn try_from(w: WireCardRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            name: w.name,
            number: w.number,
            date: w.date,
            cvv: parse_cvv(&w.cvv)?,
            deleted: w.deleted,
            last_update: parse_timestamp(&w.last_update)?,
        })
    }
}

impl From<CardRecord> for WireCardRecord {
    fn from(r: CardRecord) -> Self {
        Self {
            name: r.name,
            number: r.number,
            date: r.date,
            cvv: r.cvv.to_string(),
            deleted: r.deleted,
            last_update: r.last_update.to_rfc3339(),
        }
    }
}

impl TryFrom<WireTextRecord> for TextRecord {
    type Error = SyncError;
    fn try_from(w: WireTextRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            name: w.name,
            data: w.data,
            deleted: w.deleted,
            last_update: parse_timestamp(&w.last_update)?,
        })
    }
}

impl From<TextRecord> for WireTextRecord {
    fn from(r: TextRecord) -> Self {
        Self {
            name: r.name,
            data: r.data,
            deleted: r.deleted,
            last_update: r.last_update.to_rfc3339(),
        }
    }
}

impl TryFrom<WireBinRecord> for BinRecord {
    type Error = SyncError;
    fn try_from(w: WireBinRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            name: w.name,
            data: STANDARD.decode(w.data)?,
            deleted: w.deleted,
            last_update: parse_timestamp(&w.last_update)?,
        })
    }
}

impl From<BinRecord> for WireBinRecord {
    fn from(r: BinRecord) -> Self {
        Self {
            name: r.name,
            data: STANDARD.encode(r.data),
            deleted: r.deleted,
            last_update: r.last_update.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cvv_preserves_leading_zero_as_integer() {
        let wire = WireCardRecord {
            name: "c1".into(),
            number: "4111".into(),
            date: "12/30".into(),
            cvv: "012".into(),
            deleted: false,
            last_update: "2024-01-01T00:00:00Z".into(),
        };
        let record = CardRecord::try_from(wire).unwrap();
        assert_eq!(record.cvv, 12);
    }

    #[test]
    fn bin_data_round_trips_through_base64() {
        let bytes = vec![0u8, 1, 2, 255];
        let record = BinRecord {
            name: "b1".into(),
            data: bytes.clone(),
            deleted: false,
            last_update: Utc::now(),
        };
        let wire: WireBinRecord = record.clone().into();
        let back = BinRecord::try_from(wire).unwrap();
        assert_eq!(back.data, bytes);
    }

    #[test]
    fn rejects_non_numeric_cvv() {
        let wire = WireCardRecord {
            name: "c1".into(),
            number: "4111".into(),
            date: "12/30".into(),
            cvv: "abc".into(),
            deleted: false,
            last_update: "2024-01-01T00:00:00Z".into(),
        };
        assert!(CardRecord::try_from(wire).is_err());
    }

    #[test]
    fn rejects_malformed_timestamp() {
        let wire = WireTextRecord {
            name: "t1".into(),
            data: "hi".into(),
            deleted: false,
            last_update: "not-a-date".into(),
        };
        assert!(TextRecord::try_from(wire).is_err());
    }
}
