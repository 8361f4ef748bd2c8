//! In-memory favorites backend for testing.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use tokio::sync::oneshot;

use leaderflix_core::{FavoriteItem, ItemId, Session, UserId};

use crate::error::GatewayError;
use crate::gateway::FavoritesGateway;

/// A call as observed by the in-memory gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    List(UserId),
    Add(UserId, ItemId),
    Remove(UserId, ItemId),
}

#[derive(Default)]
struct Failures {
    list: bool,
    adds: HashSet<ItemId>,
    removals: HashSet<ItemId>,
}

/// In-memory gateway with failure injection and call gating.
///
/// `list` answers with the records as they were when the call started, so a
/// held list call can return data that has since changed.
#[derive(Default)]
pub struct InMemoryFavoritesGateway {
    records: Mutex<HashMap<UserId, Vec<FavoriteItem>>>,
    failures: Mutex<Failures>,
    holds: Mutex<VecDeque<oneshot::Receiver<()>>>,
    calls: Mutex<Vec<GatewayCall>>,
}

impl InMemoryFavoritesGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the server-side favorites of a user.
    pub fn seed(&self, user_id: &UserId, items: Vec<FavoriteItem>) {
        self.records.lock().unwrap().insert(user_id.clone(), items);
    }

    pub fn records_for(&self, user_id: &UserId) -> Vec<FavoriteItem> {
        self.records
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn fail_list(&self, fail: bool) {
        self.failures.lock().unwrap().list = fail;
    }

    pub fn fail_add(&self, item_id: ItemId) {
        self.failures.lock().unwrap().adds.insert(item_id);
    }

    pub fn fail_remove(&self, item_id: ItemId) {
        self.failures.lock().unwrap().removals.insert(item_id);
    }

    /// Suspend the next call that is not already claimed by an earlier hold
    /// until the returned sender fires (or is dropped).
    pub fn hold_next_call(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.holds.lock().unwrap().push_back(rx);
        tx
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record_call(&self, call: GatewayCall) -> Option<oneshot::Receiver<()>> {
        self.calls.lock().unwrap().push(call);
        self.holds.lock().unwrap().pop_front()
    }

    async fn wait(gate: Option<oneshot::Receiver<()>>) {
        if let Some(rx) = gate {
            let _ = rx.await;
        }
    }
}

impl FavoritesGateway for InMemoryFavoritesGateway {
    async fn list(&self, session: &Session) -> Result<Vec<FavoriteItem>, GatewayError> {
        let gate = self.record_call(GatewayCall::List(session.user_id.clone()));
        let failing = self.failures.lock().unwrap().list;
        let snapshot = self.records_for(&session.user_id);

        Self::wait(gate).await;

        if failing {
            return Err(GatewayError::Network("connection refused".to_string()));
        }
        Ok(snapshot)
    }

    async fn add(&self, session: &Session, item: &FavoriteItem) -> Result<(), GatewayError> {
        let gate = self.record_call(GatewayCall::Add(session.user_id.clone(), item.item_id));
        Self::wait(gate).await;

        if self.failures.lock().unwrap().adds.contains(&item.item_id) {
            return Err(GatewayError::Status(500));
        }

        let mut records = self.records.lock().unwrap();
        let user_records = records.entry(session.user_id.clone()).or_default();
        if !user_records.iter().any(|i| i.item_id == item.item_id) {
            user_records.push(item.clone());
        }
        Ok(())
    }

    async fn remove(&self, session: &Session, item_id: ItemId) -> Result<(), GatewayError> {
        let gate = self.record_call(GatewayCall::Remove(session.user_id.clone(), item_id));
        Self::wait(gate).await;

        if self.failures.lock().unwrap().removals.contains(&item_id) {
            return Err(GatewayError::Status(500));
        }

        let mut records = self.records.lock().unwrap();
        let user_records = records.entry(session.user_id.clone()).or_default();
        let before = user_records.len();
        user_records.retain(|i| i.item_id != item_id);
        if user_records.len() == before {
            return Err(GatewayError::Status(404));
        }
        Ok(())
    }
}
