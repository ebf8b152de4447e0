//! Item Service - argument checks, existence checks and unit-of-work orchestration

use database::{Repository, RepositoryProvider};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::error::{ItemError, ItemResult};
use crate::mapping::ItemMapper;
use crate::models::{Item, ItemDto};

/// Item service over any store that can hand out item repositories.
///
/// Every operation takes a fresh repository from the provider, so changes staged by
/// one call are never committed by another. Identifiers are checked before the store
/// is touched.
pub struct ItemService<P> {
    provider: Arc<P>,
    mapper: ItemMapper,
}

impl<P> Clone for ItemService<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            mapper: self.mapper,
        }
    }
}

fn ensure_valid_id(id: i32) -> ItemResult<()> {
    if id <= 0 {
        return Err(ItemError::invalid_argument(
            "id",
            format!("must be positive, got {id}"),
        ));
    }
    Ok(())
}

impl<P> ItemService<P>
where
    P: RepositoryProvider<Item, i32>,
{
    pub fn new(provider: P) -> Self {
        Self {
            provider: Arc::new(provider),
            mapper: ItemMapper,
        }
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> ItemResult<Vec<ItemDto>> {
        let items = self.provider.repository().get_all().await?;
        Ok(self.mapper.to_dtos(items))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> ItemResult<ItemDto> {
        ensure_valid_id(id)?;

        let item = self
            .provider
            .repository()
            .get(id)
            .await?
            .ok_or(ItemError::NotFound(id))?;

        Ok(self.mapper.to_dto(item))
    }

    /// Store a new item and return it with the id the store assigned
    #[instrument(skip(self, dto))]
    pub async fn create(&self, dto: Option<ItemDto>) -> ItemResult<ItemDto> {
        let dto = dto.ok_or(ItemError::NullArgument("item"))?;

        let mut repo = self.provider.repository();
        repo.create(self.mapper.to_entity(dto));
        let committed = repo.save().await?;

        let created = committed
            .created
            .into_iter()
            .next()
            .ok_or_else(|| ItemError::Internal("store reported no created item".to_string()))?;

        debug!(item_id = created.id, "Created item");
        Ok(self.mapper.to_dto(created))
    }

    /// Overwrite name and completion flag of an existing item
    #[instrument(skip(self, dto))]
    pub async fn update(&self, id: i32, dto: Option<ItemDto>) -> ItemResult<()> {
        ensure_valid_id(id)?;
        let dto = dto.ok_or_else(|| ItemError::invalid_argument("item", "must not be null"))?;

        let mut repo = self.provider.repository();
        let mut item = repo.get(id).await?.ok_or(ItemError::NotFound(id))?;

        item.name = dto.name;
        item.is_complete = dto.is_complete;

        repo.update(item);
        repo.save().await?;

        debug!(item_id = id, "Updated item");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> ItemResult<()> {
        ensure_valid_id(id)?;

        let mut repo = self.provider.repository();
        let item = repo.get(id).await?.ok_or(ItemError::NotFound(id))?;

        repo.delete(item);
        repo.save().await?;

        debug!(item_id = id, "Deleted item");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use database::{Committed, DatabaseError, DatabaseResult};
    use mockall::{mock, predicate::eq};
    use std::sync::Mutex;

    mock! {
        pub ItemRepo {}

        #[async_trait]
        impl Repository<Item, i32> for ItemRepo {
            async fn get_all(&self) -> DatabaseResult<Vec<Item>>;
            async fn get(&self, id: i32) -> DatabaseResult<Option<Item>>;
            fn create(&mut self, entity: Item);
            fn update(&mut self, entity: Item);
            fn delete(&mut self, entity: Item);
            async fn save(&mut self) -> DatabaseResult<Committed<Item>>;
        }
    }

    /// Hands out pre-programmed repositories; panics if the service asks for one too many
    struct QueuedRepos(Mutex<Vec<MockItemRepo>>);

    impl RepositoryProvider<Item, i32> for QueuedRepos {
        type Repository = MockItemRepo;

        fn repository(&self) -> MockItemRepo {
            self.0
                .lock()
                .unwrap()
                .pop()
                .expect("service requested an unexpected repository")
        }
    }

    fn service_with(repo: MockItemRepo) -> ItemService<QueuedRepos> {
        ItemService::new(QueuedRepos(Mutex::new(vec![repo])))
    }

    fn untouched_store() -> ItemService<QueuedRepos> {
        ItemService::new(QueuedRepos(Mutex::new(Vec::new())))
    }

    fn item(id: i32, name: &str, is_complete: bool) -> Item {
        Item {
            id,
            name: Some(name.to_string()),
            is_complete,
        }
    }

    fn dto(id: i32, name: &str, is_complete: bool) -> ItemDto {
        ItemDto {
            id,
            name: Some(name.to_string()),
            is_complete,
        }
    }

    #[tokio::test]
    async fn test_get_all_maps_every_item() {
        let mut repo = MockItemRepo::new();
        repo.expect_get_all()
            .times(1)
            .returning(|| Ok(vec![item(1, "a", false), item(2, "b", true)]));

        let dtos = service_with(repo).get_all().await.unwrap();
        assert_eq!(dtos, vec![dto(1, "a", false), dto(2, "b", true)]);
    }

    #[tokio::test]
    async fn test_non_positive_ids_are_rejected_before_the_store() {
        let service = untouched_store();

        for id in [0, -1, i32::MIN] {
            assert!(matches!(
                service.get(id).await,
                Err(ItemError::InvalidArgument { argument: "id", .. })
            ));
            assert!(matches!(
                service.update(id, Some(dto(id, "x", true))).await,
                Err(ItemError::InvalidArgument { argument: "id", .. })
            ));
            assert!(matches!(
                service.delete(id).await,
                Err(ItemError::InvalidArgument { argument: "id", .. })
            ));
        }
    }

    #[tokio::test]
    async fn test_update_checks_id_before_payload() {
        let err = untouched_store().update(0, None).await.unwrap_err();
        assert!(matches!(
            err,
            ItemError::InvalidArgument { argument: "id", .. }
        ));
    }

    #[tokio::test]
    async fn test_get_returns_mapped_item() {
        let mut repo = MockItemRepo::new();
        repo.expect_get()
            .with(eq(3))
            .times(1)
            .returning(|id| Ok(Some(item(id, "Buy milk", false))));

        let found = service_with(repo).get(3).await.unwrap();
        assert_eq!(found, dto(3, "Buy milk", false));
    }

    #[tokio::test]
    async fn test_get_miss_is_not_found() {
        let mut repo = MockItemRepo::new();
        repo.expect_get().with(eq(9)).times(1).returning(|_| Ok(None));

        let err = service_with(repo).get(9).await.unwrap_err();
        assert!(matches!(err, ItemError::NotFound(9)));
    }

    #[tokio::test]
    async fn test_create_without_payload_is_null_argument() {
        let err = untouched_store().create(None).await.unwrap_err();
        assert!(matches!(err, ItemError::NullArgument("item")));
    }

    #[tokio::test]
    async fn test_create_ignores_supplied_id_and_returns_assigned_one() {
        let mut repo = MockItemRepo::new();
        repo.expect_create()
            .withf(|entity| entity.id == 0 && entity.name.as_deref() == Some("Buy milk"))
            .times(1)
            .return_const(());
        repo.expect_save().times(1).returning(|| {
            Ok(Committed {
                created: vec![item(7, "Buy milk", false)],
                ..Committed::empty()
            })
        });

        let created = service_with(repo)
            .create(Some(dto(99, "Buy milk", false)))
            .await
            .unwrap();
        assert_eq!(created, dto(7, "Buy milk", false));
    }

    #[tokio::test]
    async fn test_create_with_nothing_committed_is_internal() {
        let mut repo = MockItemRepo::new();
        repo.expect_create().times(1).return_const(());
        repo.expect_save()
            .times(1)
            .returning(|| Ok(Committed::empty()));

        let err = service_with(repo)
            .create(Some(dto(0, "x", false)))
            .await
            .unwrap_err();
        assert!(matches!(err, ItemError::Internal(_)));
    }

    #[tokio::test]
    async fn test_update_without_payload_is_invalid_argument() {
        let err = untouched_store().update(5, None).await.unwrap_err();
        assert!(matches!(
            err,
            ItemError::InvalidArgument {
                argument: "item",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_update_of_missing_item_looks_up_once_and_writes_nothing() {
        let mut repo = MockItemRepo::new();
        repo.expect_get().with(eq(5)).times(1).returning(|_| Ok(None));
        repo.expect_update().never();
        repo.expect_save().never();

        let err = service_with(repo)
            .update(5, Some(dto(5, "x", true)))
            .await
            .unwrap_err();
        assert!(matches!(err, ItemError::NotFound(5)));
    }

    #[tokio::test]
    async fn test_update_copies_name_and_flag_but_keeps_id() {
        let mut repo = MockItemRepo::new();
        repo.expect_get()
            .with(eq(5))
            .times(1)
            .returning(|id| Ok(Some(item(id, "old", false))));
        repo.expect_update()
            .with(eq(item(5, "new", true)))
            .times(1)
            .return_const(());
        repo.expect_save().times(1).returning(|| {
            Ok(Committed {
                updated: 1,
                ..Committed::empty()
            })
        });

        service_with(repo)
            .update(5, Some(dto(42, "new", true)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_losing_the_row_before_commit_surfaces_the_store_miss() {
        let mut repo = MockItemRepo::new();
        repo.expect_get()
            .returning(|id| Ok(Some(item(id, "old", false))));
        repo.expect_update().return_const(());
        repo.expect_save()
            .returning(|| Err(DatabaseError::record_not_found("Item", 5)));

        let err = service_with(repo)
            .update(5, Some(dto(5, "new", true)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ItemError::Database(DatabaseError::RecordNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_present_item_stages_one_delete_and_commits_once() {
        let mut repo = MockItemRepo::new();
        repo.expect_get()
            .with(eq(7))
            .times(1)
            .returning(|id| Ok(Some(item(id, "done", true))));
        repo.expect_delete()
            .with(eq(item(7, "done", true)))
            .times(1)
            .return_const(());
        repo.expect_save().times(1).returning(|| {
            Ok(Committed {
                deleted: 1,
                ..Committed::empty()
            })
        });

        service_with(repo).delete(7).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_of_missing_item_is_not_found() {
        let mut repo = MockItemRepo::new();
        repo.expect_get().with(eq(7)).times(1).returning(|_| Ok(None));
        repo.expect_delete().never();
        repo.expect_save().never();

        let err = service_with(repo).delete(7).await.unwrap_err();
        assert!(matches!(err, ItemError::NotFound(7)));
    }

    #[tokio::test]
    async fn test_store_failures_propagate_as_database_errors() {
        let mut repo = MockItemRepo::new();
        repo.expect_get_all()
            .returning(|| Err(DatabaseError::ConnectionFailed("refused".to_string())));

        let err = service_with(repo).get_all().await.unwrap_err();
        assert!(matches!(
            err,
            ItemError::Database(DatabaseError::ConnectionFailed(_))
        ));
    }
}
