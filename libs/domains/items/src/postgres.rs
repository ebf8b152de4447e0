use async_trait::async_trait;
use database::{
    Change, ChangeSet, Committed, DatabaseError, DatabaseResult, Repository, RepositoryProvider,
};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QueryOrder,
    TransactionTrait,
};
use tracing::{debug, instrument};

use crate::{entity, models::Item};

/// PostgreSQL-backed item store sharing one connection pool
#[derive(Debug, Clone)]
pub struct PgItemStore {
    db: DatabaseConnection,
}

impl PgItemStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl RepositoryProvider<Item, i32> for PgItemStore {
    type Repository = PgItemRepository;

    fn repository(&self) -> PgItemRepository {
        PgItemRepository::new(self.db.clone())
    }
}

/// Unit of work over the `items` table.
///
/// Reads go straight to the pool; staged writes are committed by [`Repository::save`]
/// inside a single transaction.
#[derive(Debug)]
pub struct PgItemRepository {
    db: DatabaseConnection,
    changes: ChangeSet<Item>,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            changes: ChangeSet::new(),
        }
    }

    async fn apply(
        txn: &DatabaseTransaction,
        change: Change<Item>,
        committed: &mut Committed<Item>,
    ) -> DatabaseResult<()> {
        match change {
            Change::Create(item) => {
                let model = entity::ActiveModel::for_insert(item).insert(txn).await?;
                committed.created.push(model.into());
            }
            Change::Update(item) => {
                let id = item.id;
                entity::ActiveModel::for_update(item)
                    .update(txn)
                    .await
                    .map_err(|e| match e {
                        DbErr::RecordNotUpdated => DatabaseError::record_not_found("Item", id),
                        other => other.into(),
                    })?;
                committed.updated += 1;
            }
            Change::Delete(item) => {
                let result = entity::Entity::delete_by_id(item.id).exec(txn).await?;
                if result.rows_affected == 0 {
                    return Err(DatabaseError::record_not_found("Item", item.id));
                }
                committed.deleted += 1;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Repository<Item, i32> for PgItemRepository {
    async fn get_all(&self) -> DatabaseResult<Vec<Item>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Item::from).collect())
    }

    async fn get(&self, id: i32) -> DatabaseResult<Option<Item>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Item::from))
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
        if changes.is_empty() {
            return Ok(Committed::empty());
        }

        // Dropping the transaction on an early return rolls it back
        let txn = self.db.begin().await?;
        let mut committed = Committed::empty();
        for change in changes {
            Self::apply(&txn, change, &mut committed).await?;
        }
        txn.commit().await?;

        debug!(
            created = committed.created.len(),
            updated = committed.updated,
            deleted = committed.deleted,
            "Committed item changes"
        );
        Ok(committed)
    }
}
