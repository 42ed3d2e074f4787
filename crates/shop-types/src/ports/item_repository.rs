use async_trait::async_trait;

use super::RepoError;
use crate::domain::item::Item;

#[async_trait]
pub trait ItemRepository: Send + Sync + 'static {
    async fn get_all(&self) -> Result<Vec<Item>, RepoError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Item>, RepoError>;
    /// Inserts the item and links it to `order_id`.
    async fn save(&self, item: Item, order_id: i64) -> Result<Item, RepoError>;
    async fn update(&self, item: Item) -> Result<bool, RepoError>;
    async fn delete_by_id(&self, id: i64) -> Result<bool, RepoError>;
}
