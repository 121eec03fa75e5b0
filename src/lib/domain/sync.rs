//! The synchronization engine: four independent record kinds (auth, card,
//! text, bin), each reconciled with a last-writer-wins rule keyed on
//! `(uid, name)`.

pub mod models;
pub mod ports;
pub mod services;

pub use models::batch::SyncBatch;
pub use models::error::SyncError;
pub use models::record::{AuthRecord, BinRecord, CardRecord, TextRecord};
pub use models::wire::WireSyncBatch;
pub use ports::{SyncRepository, SyncService};
pub use services::Service;
