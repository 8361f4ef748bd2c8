use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use futures::future::join_all;

use leaderflix_core::{FavoriteItem, FavoritesList, ItemId, Session, UserId, Validator};

use crate::error::{FavoritesError, GatewayError};
use crate::gateway::FavoritesGateway;

const NOT_FOUND: u16 = 404;

/// Result of a successful toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

/// Result of a fully successful `clear_all`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkRemoval {
    pub removed: Vec<ItemId>,
}

/// A backend-confirmed change to the list.
#[derive(Debug, Clone)]
enum Mutation {
    Insert(FavoriteItem),
    Remove(ItemId),
}

impl Mutation {
    fn apply(&self, list: &mut FavoritesList) {
        match self {
            Mutation::Insert(item) => {
                list.insert(item.clone());
            }
            Mutation::Remove(item_id) => {
                list.remove(*item_id);
            }
        }
    }
}

struct StoreState {
    list: FavoritesList,
    owner: Option<UserId>,
    /// Ticket of the newest load applied so far.
    applied_load: u64,
    /// Bumped whenever the held list stops belonging to the current user.
    /// Mutations started under an older epoch are dropped.
    epoch: u64,
    /// Count of committed mutations.
    mutations: u64,
    /// Commits since the last applied load, replayed over slower loads.
    journal: Vec<(u64, Mutation)>,
}

impl StoreState {
    /// Drop the held list and everything still in flight against it.
    fn discard(&mut self) {
        self.list.clear();
        self.journal.clear();
        self.epoch += 1;
    }

    /// Make `user` the owner of the held list, discarding another user's list.
    fn adopt(&mut self, user: &UserId) {
        if self.owner.as_ref() == Some(user) {
            return;
        }
        if let Some(previous) = self.owner.take() {
            tracing::debug!("Switching favorites from {} to {}", previous, user);
            self.discard();
        }
        self.owner = Some(user.clone());
    }
}

/// Session-scoped source of truth for "is this video a favorite".
///
/// Membership only changes after the backend confirms an add or remove, and
/// the list and its id index are always swapped or mutated under one lock,
/// so readers never see a half-applied update. Share it between views with
/// an `Arc`.
///
/// The held list belongs to one user. A load or toggle for a different user
/// first discards it, along with any result still in flight for the previous
/// user.
pub struct FavoritesStore<G: FavoritesGateway> {
    gateway: Arc<G>,
    state: RwLock<StoreState>,
    pending: Mutex<HashSet<ItemId>>,
    load_tickets: AtomicU64,
}

impl<G: FavoritesGateway> FavoritesStore<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            state: RwLock::new(StoreState {
                list: FavoritesList::new(),
                owner: None,
                applied_load: 0,
                epoch: 0,
                mutations: 0,
                journal: Vec::new(),
            }),
            pending: Mutex::new(HashSet::new()),
            load_tickets: AtomicU64::new(0),
        }
    }

    /// Replace the in-memory favorites with the backend's list for the
    /// session's user.
    ///
    /// If a load issued later has already been applied when this one
    /// completes, the result is discarded and `Superseded` is returned. The
    /// same happens when the store was reset or switched to another user
    /// while the request was out. Toggles committed while the request was out
    /// are re-applied on top of the fetched list.
    pub async fn load(
        &self,
        session: Option<&Session>,
    ) -> Result<Vec<FavoriteItem>, FavoritesError> {
        let session = session.ok_or(FavoritesError::Unauthenticated)?;
        let user = &session.user_id;

        let (ticket, issued_epoch, issued_owner, issued_mutations) = {
            let state = self.read_state();
            let ticket = self.load_tickets.fetch_add(1, Ordering::SeqCst) + 1;
            (ticket, state.epoch, state.owner.clone(), state.mutations)
        };

        tracing::debug!("Loading favorites for {} (load #{})", user, ticket);

        let items = self.gateway.list(session).await.map_err(|e| {
            tracing::warn!("Failed to load favorites for {}: {}", user, e);
            FavoritesError::TransientFetch(e)
        })?;

        let mut state = self.write_state();
        if ticket <= state.applied_load {
            tracing::debug!(
                "Discarding load #{} (load #{} already applied)",
                ticket,
                state.applied_load
            );
            return Err(FavoritesError::Superseded);
        }
        let handed_over = state.epoch != issued_epoch || state.owner != issued_owner;
        if handed_over && state.owner.as_ref() != Some(user) {
            tracing::debug!("Discarding load #{} from a previous session", ticket);
            return Err(FavoritesError::Superseded);
        }

        if state.owner.as_ref() != Some(user) {
            state.discard();
            state.owner = Some(user.clone());
        }

        let mut list = FavoritesList::from_items(items);
        let mut replayed = 0;
        for (_, mutation) in state.journal.iter().filter(|(seq, _)| *seq > issued_mutations) {
            mutation.apply(&mut list);
            replayed += 1;
        }
        // Loads that can still apply were issued after this one.
        state.journal.retain(|(seq, _)| *seq > issued_mutations);
        state.list = list;
        state.applied_load = ticket;

        tracing::debug!(
            "Loaded {} favorites for {} ({} newer changes kept)",
            state.list.len(),
            user,
            replayed
        );

        Ok(state.list.items().to_vec())
    }

    /// Membership test against the committed state. Never touches the network.
    pub fn is_favorite(&self, item_id: ItemId) -> bool {
        self.read_state().list.contains(item_id)
    }

    /// Add the item if absent, remove it if present.
    ///
    /// Fails with `ToggleInProgress` if a toggle for the same id has not
    /// resolved yet. On any other failure the membership is unchanged.
    /// A removal the backend answers with 404 counts as done.
    pub async fn toggle(
        &self,
        session: Option<&Session>,
        item: FavoriteItem,
    ) -> Result<ToggleOutcome, FavoritesError> {
        let session = session.ok_or(FavoritesError::Unauthenticated)?;
        let item_id = item.item_id;

        let _pending = self
            .claim(item_id)
            .ok_or(FavoritesError::ToggleInProgress(item_id))?;

        let (present, epoch) = {
            let mut state = self.write_state();
            state.adopt(&session.user_id);
            (state.list.contains(item_id), state.epoch)
        };

        if present {
            let result = self.gateway.remove(session, item_id).await;
            confirm_removal(item_id, result).map_err(|source| {
                tracing::warn!("Failed to remove favorite {}: {}", item_id, source);
                FavoritesError::ToggleFailed { item_id, source }
            })?;

            self.commit(epoch, Mutation::Remove(item_id));
            tracing::debug!("Removed favorite {}", item_id);
            Ok(ToggleOutcome::Removed)
        } else {
            Validator::validate_item(&item)?;

            self.gateway.add(session, &item).await.map_err(|source| {
                tracing::warn!("Failed to add favorite {}: {}", item_id, source);
                FavoritesError::ToggleFailed { item_id, source }
            })?;

            self.commit(epoch, Mutation::Insert(item));
            tracing::debug!("Added favorite {}", item_id);
            Ok(ToggleOutcome::Added)
        }
    }

    /// Remove every known favorite, one concurrent request per item.
    ///
    /// Each confirmed removal is committed as it lands. If any removal fails
    /// (or the item already has a toggle in flight) the successful ones stay
    /// removed and `PartialBulkFailure` lists both sides.
    pub async fn clear_all(
        &self,
        session: Option<&Session>,
    ) -> Result<BulkRemoval, FavoritesError> {
        let session = session.ok_or(FavoritesError::Unauthenticated)?;

        let (ids, epoch) = {
            let mut state = self.write_state();
            state.adopt(&session.user_id);
            (state.list.ids(), state.epoch)
        };

        let mut failed = Vec::new();
        let mut claimed = Vec::with_capacity(ids.len());
        for item_id in ids {
            match self.claim(item_id) {
                Some(guard) => claimed.push((item_id, guard)),
                None => {
                    tracing::warn!("Skipping favorite {}: toggle in progress", item_id);
                    failed.push(item_id);
                }
            }
        }

        let results = join_all(claimed.into_iter().map(move |(item_id, guard)| async move {
            let result = confirm_removal(item_id, self.gateway.remove(session, item_id).await);
            if result.is_ok() {
                self.commit(epoch, Mutation::Remove(item_id));
            }
            drop(guard);
            (item_id, result)
        }))
        .await;

        let mut removed = Vec::new();
        for (item_id, result) in results {
            match result {
                Ok(()) => removed.push(item_id),
                Err(e) => {
                    tracing::warn!("Failed to remove favorite {}: {}", item_id, e);
                    failed.push(item_id);
                }
            }
        }

        if failed.is_empty() {
            tracing::info!("Cleared {} favorites", removed.len());
            Ok(BulkRemoval { removed })
        } else {
            Err(FavoritesError::PartialBulkFailure { removed, failed })
        }
    }

    /// Forget the current session's favorites (sign-out).
    ///
    /// Loads and toggles still in flight complete against the backend but
    /// their results are not applied.
    pub fn reset(&self) {
        let mut state = self.write_state();
        state.discard();
        state.owner = None;
        tracing::debug!("Favorites reset");
    }

    pub fn items(&self) -> Vec<FavoriteItem> {
        self.read_state().list.items().to_vec()
    }

    pub fn len(&self) -> usize {
        self.read_state().list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_state().list.is_empty()
    }

    /// User whose favorites are currently held, if any.
    pub fn owner(&self) -> Option<UserId> {
        self.read_state().owner.clone()
    }

    /// Whether a toggle or bulk removal for this id is awaiting the backend.
    pub fn is_pending(&self, item_id: ItemId) -> bool {
        self.lock_pending().contains(&item_id)
    }

    pub fn pending(&self) -> Vec<ItemId> {
        let mut ids: Vec<_> = self.lock_pending().iter().copied().collect();
        ids.sort();
        ids
    }

    fn claim(&self, item_id: ItemId) -> Option<PendingGuard<'_>> {
        if !self.lock_pending().insert(item_id) {
            return None;
        }
        Some(PendingGuard {
            pending: &self.pending,
            item_id,
        })
    }

    /// Apply a confirmed mutation unless the list changed hands meanwhile.
    fn commit(&self, epoch: u64, mutation: Mutation) -> bool {
        let mut state = self.write_state();
        if state.epoch != epoch {
            tracing::debug!("Dropping {:?} from a previous session", mutation);
            return false;
        }
        mutation.apply(&mut state.list);
        state.mutations += 1;
        let seq = state.mutations;
        state.journal.push((seq, mutation));
        true
    }

    fn read_state(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, HashSet<ItemId>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A 404 on delete means the backend no longer has the favorite.
fn confirm_removal(item_id: ItemId, result: Result<(), GatewayError>) -> Result<(), GatewayError> {
    match result {
        Err(GatewayError::Status(NOT_FOUND)) => {
            tracing::debug!("Favorite {} was already gone on the backend", item_id);
            Ok(())
        }
        other => other,
    }
}

/// Releases a pending id when the owning operation finishes or is dropped.
struct PendingGuard<'a> {
    pending: &'a Mutex<HashSet<ItemId>>,
    item_id: ItemId,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.item_id);
    }
}
