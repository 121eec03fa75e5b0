//! Port traits for the sync engine.
//!
//! - `SyncRepository` is the database port: one reconcile method per record
//!   kind (each kind's upsert/probe/enumerate loop is independent SQL), plus
//!   tombstone cleanup.
//! - `SyncService` is the service port: fans the four kinds out in
//!   parallel and owns the wire/internal conversions.

use crate::domain::sync::models::{
    error::SyncError,
    record::{AuthRecord, BinRecord, CardRecord, TextRecord},
    wire::WireSyncBatch,
};
use std::future::Future;

pub trait SyncRepository: Clone + Send + Sync + 'static {
    /// Reconciles the `auth` kind for `uid` against `incoming`, per the
    /// conditional-upsert / newer-on-server / unknown-to-client algorithm.
    fn sync_auth(
        &self,
        uid: i64,
        incoming: Vec<AuthRecord>,
    ) -> impl Future<Output = Result<Vec<AuthRecord>, SyncError>> + Send;

    fn sync_card(
        &self,
        uid: i64,
        incoming: Vec<CardRecord>,
    ) -> impl Future<Output = Result<Vec<CardRecord>, SyncError>> + Send;

    fn sync_text(
        &self,
        uid: i64,
        incoming: Vec<TextRecord>,
    ) -> impl Future<Output = Result<Vec<TextRecord>, SyncError>> + Send;

    fn sync_bin(
        &self,
        uid: i64,
        incoming: Vec<BinRecord>,
    ) -> impl Future<Output = Result<Vec<BinRecord>, SyncError>> + Send;

    /// Physically deletes every tombstoned (`deleted = true`) row for `uid`
    /// across all four kinds, in a single transaction.
    fn clear(&self, uid: i64) -> impl Future<Output = Result<(), SyncError>> + Send;
}

pub trait SyncService: Clone + Send + Sync + 'static {
    /// Reconciles a client's batch and returns the rows it should adopt:
    /// newer-on-server rows plus rows unknown to the client, per kind.
    fn sync(
        &self,
        uid: i64,
        batch: WireSyncBatch,
    ) -> impl Future<Output = Result<WireSyncBatch, SyncError>> + Send;

    /// Purges tombstones for `uid`. Called after a client has acknowledged
    /// a sync round.
    fn clear(&self, uid: i64) -> impl Future<Output = Result<(), SyncError>> + Send;
}
