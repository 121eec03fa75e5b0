use crate::domain::sync::{
    models::{
        error::SyncError,
        record::{AuthRecord, BinRecord, CardRecord, TextRecord},
        wire::{WireAuthRecord, WireBinRecord, WireCardRecord, WireSyncBatch, WireTextRecord},
    },
    ports::{SyncRepository, SyncService},
};

/// structure which implements `SyncService`
#[derive(Debug, Clone)]
pub struct Service<R: SyncRepository> {
    repo: R,
}

impl<R: SyncRepository> Service<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }
}

impl<R: SyncRepository> SyncService for Service<R> {
    /// Each record kind is independent, so the four reconciliations run
    /// concurrently rather than inside one shared transaction: a failure in
    /// one kind aborts that kind's transaction without touching the others
    /// (see the design notes on cross-kind atomicity).
    async fn sync(&self, uid: i64, batch: WireSyncBatch) -> Result<WireSyncBatch, SyncError> {
        let auth: Vec<AuthRecord> = batch
            .auth
            .into_iter()
            .map(AuthRecord::try_from)
            .collect::<Result<_, _>>()?;
        let cards: Vec<CardRecord> = batch
            .cards
            .into_iter()
            .map(CardRecord::try_from)
            .collect::<Result<_, _>>()?;
        let texts: Vec<TextRecord> = batch
            .texts
            .into_iter()
            .map(TextRecord::try_from)
            .collect::<Result<_, _>>()?;
        let bins: Vec<BinRecord> = batch
            .bins
            .into_iter()
            .map(BinRecord::try_from)
            .collect::<Result<_, _>>()?;

        let (auth, cards, texts, bins) = tokio::try_join!(
            self.repo.sync_auth(uid, auth),
            self.repo.sync_card(uid, cards),
            self.repo.sync_text(uid, texts),
            self.repo.sync_bin(uid, bins),
        )?;

        Ok(WireSyncBatch {
            auth: auth.into_iter().map(WireAuthRecord::from).collect(),
            cards: cards.into_iter().map(WireCardRecord::from).collect(),
            texts: texts.into_iter().map(WireTextRecord::from).collect(),
            bins: bins.into_iter().map(WireBinRecord::from).collect(),
        })
    }

    async fn clear(&self, uid: i64) -> Result<(), SyncError> {
        self.repo.clear(uid).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sync::models::wire::WireTextRecord;
    use chrono::Utc;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct FakeRepo {
        texts: Arc<Mutex<Vec<TextRecord>>>,
        cleared: Arc<Mutex<bool>>,
    }

    impl SyncRepository for FakeRepo {
        async fn sync_auth(&self, _uid: i64, _incoming: Vec<AuthRecord>) -> Result<Vec<AuthRecord>, SyncError> {
            Ok(vec![])
        }

        async fn sync_card(&self, _uid: i64, _incoming: Vec<CardRecord>) -> Result<Vec<CardRecord>, SyncError> {
            Ok(vec![])
        }

        async fn sync_text(&self, _uid: i64, incoming: Vec<TextRecord>) -> Result<Vec<TextRecord>, SyncError> {
            let mut stored = self.texts.lock().unwrap();
            for record in incoming {
                if !stored.iter().any(|s| s.name == record.name) {
                    stored.push(record);
                }
            }
            Ok(stored.clone())
        }

        async fn sync_bin(&self, _uid: i64, _incoming: Vec<BinRecord>) -> Result<Vec<BinRecord>, SyncError> {
            Ok(vec![])
        }

        async fn clear(&self, _uid: i64) -> Result<(), SyncError> {
            *self.cleared.lock().unwrap() = true;
            Ok(())
        }
    }

    #[tokio::test]
    async fn sync_converts_wire_records_and_dispatches_by_kind() {
        let service = Service::new(FakeRepo::default());
        let batch = WireSyncBatch {
            texts: vec![WireTextRecord {
                name: "n1".into(),
                data: "v1".into(),
                deleted: false,
                last_update: Utc::now().to_rfc3339(),
            }],
            ..Default::default()
        };

        let response = service.sync(1, batch).await.unwrap();
        assert_eq!(response.texts.len(), 1);
        assert!(response.auth.is_empty());
        assert!(response.cards.is_empty());
        assert!(response.bins.is_empty());
    }

    #[tokio::test]
    async fn sync_rejects_malformed_wire_input_before_touching_repository() {
        let service = Service::new(FakeRepo::default());
        let batch = WireSyncBatch {
            texts: vec![WireTextRecord {
                name: "n1".into(),
                data: "v1".into(),
                deleted: false,
                last_update: "not-a-timestamp".into(),
            }],
            ..Default::default()
        };
        assert!(service.sync(1, batch).await.is_err());
    }

    #[tokio::test]
    async fn clear_delegates_to_repository() {
        let repo = FakeRepo::default();
        let service = Service::new(repo.clone());
        service.clear(1).await.unwrap();
        assert!(*repo.cleared.lock().unwrap());
    }
}
