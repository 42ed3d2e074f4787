use async_trait::async_trait;

use super::RepoError;
use crate::domain::item::Item;
use crate::domain::order::Order;

#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    async fn get_all(&self) -> Result<Vec<Order>, RepoError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Order>, RepoError>;
    async fn get_orders_by_user_id(&self, user_id: i64) -> Result<Vec<Order>, RepoError>;
    async fn get_items_by_order_id(&self, order_id: i64) -> Result<Vec<Item>, RepoError>;
    async fn save(&self, order: Order) -> Result<Order, RepoError>;
    async fn update(&self, order: Order) -> Result<bool, RepoError>;
    /// Removes the order's item links, then the order.
    async fn delete_by_id(&self, id: i64) -> Result<bool, RepoError>;
}
