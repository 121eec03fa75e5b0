use super::record::{AuthRecord, BinRecord, CardRecord, TextRecord};

/// A sync request or response: the four record kinds, each independent of
/// the others. Used both for what the client sends and what the server
/// hands back (unknown-to-client and newer-on-server rows).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncBatch {
    pub auth: Vec<AuthRecord>,
    pub cards: Vec<CardRecord>,
    pub texts: Vec<TextRecord>,
    pub bins: Vec<BinRecord>,
}

impl SyncBatch {
    pub fn is_empty(&self) -> bool {
        self.auth.is_empty() && self.cards.is_empty() && self.texts.is_empty() && self.bins.is_empty()
    }
}
