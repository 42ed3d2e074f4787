use crate::application::checked_id;
use crate::errors::AppError;
use shop_types::domain::item::Item;
use shop_types::ports::item_repository::ItemRepository;
use shop_types::validator::{is_empty_object, is_valid_object};

pub struct ItemService<R: ItemRepository> {
    repo: R,
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn get_all_items(&self) -> Result<Vec<Item>, AppError> {
        let items = self.repo.get_all().await?;
        if is_empty_object(&items) {
            return Err(AppError::not_found());
        }
        Ok(items)
    }

    pub async fn get_item_by_id(&self, id: f64) -> Result<Item, AppError> {
        let id = checked_id(id)?;
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(AppError::not_found)
    }

    /// Persists a new item and links it to `order_id`.
    pub async fn add_new_item(&self, item: Item, order_id: f64) -> Result<Item, AppError> {
        if !is_valid_object(Some(&item), &["id"]) {
            return Err(AppError::BadRequest(
                "Invalid property values found in provided item.".into(),
            ));
        }
        let order_id = checked_id(order_id)?;
        let persisted = self.repo.save(item, order_id).await?;
        tracing::debug!(item_id = persisted.id, order_id, "item added");
        Ok(persisted)
    }

    pub async fn update_item(&self, id: f64, mut item: Item) -> Result<bool, AppError> {
        if !is_valid_object(Some(&item), &[]) {
            return Err(AppError::BadRequest(
                "Invalid item provided (invalid values found).".into(),
            ));
        }
        item.id = checked_id(id)?;
        Ok(self.repo.update(item).await?)
    }

    pub async fn delete_by_id(&self, id: f64) -> Result<bool, AppError> {
        let id = checked_id(id)?;
        Ok(self.repo.delete_by_id(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shop_repo::memory::InMemoryRepo;
    use shop_types::ports::RepoError;

    /// Fails the test if the service reaches the store.
    struct Untouchable;

    #[async_trait]
    impl ItemRepository for Untouchable {
        async fn get_all(&self) -> Result<Vec<Item>, RepoError> {
            unreachable!("store queried")
        }
        async fn get_by_id(&self, _: i64) -> Result<Option<Item>, RepoError> {
            unreachable!("store queried")
        }
        async fn save(&self, _: Item, _: i64) -> Result<Item, RepoError> {
            unreachable!("store queried")
        }
        async fn update(&self, _: Item) -> Result<bool, RepoError> {
            unreachable!("store queried")
        }
        async fn delete_by_id(&self, _: i64) -> Result<bool, RepoError> {
            unreachable!("store queried")
        }
    }

    /// Every call fails the way a dropped connection would.
    struct Broken;

    #[async_trait]
    impl ItemRepository for Broken {
        async fn get_all(&self) -> Result<Vec<Item>, RepoError> {
            Err(RepoError::DbError("connection refused".into()))
        }
        async fn get_by_id(&self, _: i64) -> Result<Option<Item>, RepoError> {
            Err(RepoError::DbError("connection refused".into()))
        }
        async fn save(&self, _: Item, _: i64) -> Result<Item, RepoError> {
            Err(RepoError::DbError("connection refused".into()))
        }
        async fn update(&self, _: Item) -> Result<bool, RepoError> {
            Err(RepoError::DbError("connection refused".into()))
        }
        async fn delete_by_id(&self, _: i64) -> Result<bool, RepoError> {
            Err(RepoError::DbError("connection refused".into()))
        }
    }

    fn water() -> Item {
        Item::new("Water", "MalWart H2O 1L", 0.99, 50)
    }

    #[tokio::test]
    async fn get_all_items_on_empty_store_is_not_found() {
        let svc = ItemService::new(InMemoryRepo::new());
        let res = svc.get_all_items().await;
        assert!(matches!(res, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn get_all_items_returns_stored_items() {
        let repo = InMemoryRepo::new();
        let svc = ItemService::new(repo.clone());
        svc.add_new_item(water(), 1.0).await.unwrap();

        let items = svc.get_all_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 1);
        assert_eq!(items[0].name, "Water");
    }

    #[tokio::test]
    async fn invalid_ids_never_reach_the_store() {
        let svc = ItemService::new(Untouchable);
        for id in [3.14, 0.0, -1.0, f64::NAN, 1e19] {
            assert!(matches!(
                svc.get_item_by_id(id).await,
                Err(AppError::BadRequest(_))
            ));
            assert!(matches!(
                svc.delete_by_id(id).await,
                Err(AppError::BadRequest(_))
            ));
        }
        assert!(matches!(
            svc.add_new_item(water(), 2.5).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let svc = ItemService::new(InMemoryRepo::new());
        let res = svc.get_item_by_id(7.0).await;
        assert!(matches!(res, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn add_rejects_blank_fields() {
        let svc = ItemService::new(Untouchable);
        let mut item = water();
        item.description.clear();
        let res = svc.add_new_item(item, 1.0).await;
        assert!(matches!(res, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn update_requires_an_id_in_the_body() {
        let repo = InMemoryRepo::new();
        let svc = ItemService::new(repo.clone());
        let saved = svc.add_new_item(water(), 1.0).await.unwrap();

        let res = svc.update_item(saved.id as f64, water()).await;
        assert!(matches!(res, Err(AppError::BadRequest(_))));

        let mut body = water();
        body.id = 999;
        body.amount = 10;
        assert!(svc.update_item(saved.id as f64, body).await.unwrap());
        let fetched = svc.get_item_by_id(saved.id as f64).await.unwrap();
        assert_eq!(fetched.amount, 10);
        assert_eq!(fetched.id, saved.id);
    }

    #[tokio::test]
    async fn delete_reports_success_for_unknown_ids() {
        let svc = ItemService::new(InMemoryRepo::new());
        assert!(svc.delete_by_id(12.0).await.unwrap());
    }

    #[tokio::test]
    async fn store_failures_surface_as_internal() {
        let svc = ItemService::new(Broken);
        assert!(matches!(
            svc.get_all_items().await,
            Err(AppError::Internal(_))
        ));
        assert!(matches!(
            svc.add_new_item(water(), 1.0).await,
            Err(AppError::Internal(_))
        ));
    }
}
