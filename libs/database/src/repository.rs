//! Store-agnostic repository contract with unit-of-work staging.
//!
//! A [`Repository`] reads immediately but only records writes. Nothing reaches the
//! backing store until [`Repository::save`] commits every staged change as one unit.
//! Services ask a [`RepositoryProvider`] for a fresh repository per operation, so the
//! staged changes of concurrent requests never share a buffer.
//!
//! ```ignore
//! let mut repo = provider.repository();
//! repo.create(item);
//! let committed = repo.save().await?;
//! let stored = committed.created.into_iter().next();
//! ```

use async_trait::async_trait;

use crate::common::DatabaseResult;

/// A write recorded on a repository and not yet committed
#[derive(Debug, Clone, PartialEq)]
pub enum Change<E> {
    Create(E),
    Update(E),
    Delete(E),
}

/// Ordered buffer of staged changes
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeSet<E> {
    changes: Vec<Change<E>>,
}

impl<E> ChangeSet<E> {
    pub fn new() -> Self {
        Self {
            changes: Vec::new(),
        }
    }

    pub fn push(&mut self, change: Change<E>) {
        self.changes.push(change);
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Drain the buffer, leaving it empty for the next unit of work
    pub fn take(&mut self) -> Vec<Change<E>> {
        std::mem::take(&mut self.changes)
    }
}

impl<E> Default for ChangeSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a successful [`Repository::save`]
#[derive(Debug, Clone, PartialEq)]
pub struct Committed<E> {
    /// Created entities as stored, carrying store-assigned identifiers, in staging order
    pub created: Vec<E>,
    pub updated: usize,
    pub deleted: usize,
}

impl<E> Committed<E> {
    pub fn empty() -> Self {
        Self {
            created: Vec::new(),
            updated: 0,
            deleted: 0,
        }
    }
}

impl<E> Default for Committed<E> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Generic persistence access over entities `E` keyed by `Id`
#[async_trait]
pub trait Repository<E, Id>: Send + Sync
where
    E: Send + 'static,
    Id: Send + 'static,
{
    /// Every stored entity, ascending by identifier
    async fn get_all(&self) -> DatabaseResult<Vec<E>>;

    /// The entity with `id`, or `None` when the store holds no such entity
    async fn get(&self, id: Id) -> DatabaseResult<Option<E>>;

    /// Stage an insertion; the store assigns the identifier on save
    fn create(&mut self, entity: E);

    /// Stage an in-place modification of an existing entity
    fn update(&mut self, entity: E);

    /// Stage a removal
    fn delete(&mut self, entity: E);

    /// Commit all staged changes atomically
    ///
    /// On failure nothing is applied and the staged changes are discarded.
    async fn save(&mut self) -> DatabaseResult<Committed<E>>;
}

/// Hands out one repository per unit of work
pub trait RepositoryProvider<E, Id>: Send + Sync + 'static
where
    E: Send + 'static,
    Id: Send + 'static,
{
    type Repository: Repository<E, Id>;

    fn repository(&self) -> Self::Repository;
}
