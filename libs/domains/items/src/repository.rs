//! In-memory item store for local runs and handler tests.

use async_trait::async_trait;
use database::{
    Change, ChangeSet, Committed, DatabaseError, DatabaseResult, Repository, RepositoryProvider,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::models::Item;

#[derive(Debug, Clone)]
struct StoreState {
    items: BTreeMap<i32, Item>,
    next_id: i32,
}

impl StoreState {
    fn apply(
        &mut self,
        change: Change<Item>,
        committed: &mut Committed<Item>,
    ) -> DatabaseResult<()> {
        match change {
            Change::Create(mut item) => {
                item.id = self.next_id;
                self.next_id = self
                    .next_id
                    .checked_add(1)
                    .ok_or(DatabaseError::IdSequenceExhausted { entity: "Item" })?;
                self.items.insert(item.id, item.clone());
                committed.created.push(item);
            }
            Change::Update(item) => {
                let slot = self
                    .items
                    .get_mut(&item.id)
                    .ok_or_else(|| DatabaseError::record_not_found("Item", item.id))?;
                *slot = item;
                committed.updated += 1;
            }
            Change::Delete(item) => {
                self.items
                    .remove(&item.id)
                    .ok_or_else(|| DatabaseError::record_not_found("Item", item.id))?;
                committed.deleted += 1;
            }
        }
        Ok(())
    }
}

/// Shared map of items keyed by id.
///
/// Ids start at 1. Ids taken by a save that fails are handed out again.
#[derive(Debug, Clone)]
pub struct InMemoryItemStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState {
                items: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }

    /// Number of stored items
    pub async fn len(&self) -> usize {
        self.state.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider<Item, i32> for InMemoryItemStore {
    type Repository = InMemoryItemRepository;

    fn repository(&self) -> InMemoryItemRepository {
        InMemoryItemRepository {
            state: Arc::clone(&self.state),
            changes: ChangeSet::new(),
        }
    }
}

/// One unit of work against an [`InMemoryItemStore`]
#[derive(Debug)]
pub struct InMemoryItemRepository {
    state: Arc<RwLock<StoreState>>,
    changes: ChangeSet<Item>,
}

#[async_trait]
impl Repository<Item, i32> for InMemoryItemRepository {
    async fn get_all(&self) -> DatabaseResult<Vec<Item>> {
        Ok(self.state.read().await.items.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> DatabaseResult<Option<Item>> {
        Ok(self.state.read().await.items.get(&id).cloned())
    }

    fn create(&mut self, entity: Item) {
        self.changes.push(Change::Create(entity));
    }

    fn update(&mut self, entity: Item) {
        self.changes.push(Change::Update(entity));
    }

    fn delete(&mut self, entity: Item) {
        self.changes.push(Change::Delete(entity));
    }

    #[instrument(skip(self), fields(staged = self.changes.len()))]
    async fn save(&mut self) -> DatabaseResult<Committed<Item>> {
        let changes = self.changes.take();
        let mut state = self.state.write().await;

        // Staged changes land on a copy that replaces the live state only if all succeed
        let mut next = state.clone();
        let mut committed = Committed::empty();
        for change in changes {
            next.apply(change, &mut committed)?;
        }
        *state = next;

        debug!(
            created = committed.created.len(),
            updated = committed.updated,
            deleted = committed.deleted,
            "Committed item changes"
        );
        Ok(committed)
    }
}
