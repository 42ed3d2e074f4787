use crate::application::checked_id;
use crate::errors::AppError;
use shop_types::domain::item::Item;
use shop_types::domain::order::Order;
use shop_types::ports::order_repository::OrderRepository;
use shop_types::validator::{is_empty_object, is_valid_object};

pub struct OrderService<R: OrderRepository> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn get_all_orders(&self) -> Result<Vec<Order>, AppError> {
        let orders = self.repo.get_all().await?;
        if is_empty_object(&orders) {
            return Err(AppError::not_found());
        }
        Ok(orders)
    }

    pub async fn get_order_by_id(&self, id: f64) -> Result<Order, AppError> {
        let id = checked_id(id)?;
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(AppError::not_found)
    }

    pub async fn get_orders_by_user_id(&self, user_id: f64) -> Result<Vec<Order>, AppError> {
        let user_id = checked_id(user_id)?;
        let orders = self.repo.get_orders_by_user_id(user_id).await?;
        if is_empty_object(&orders) {
            return Err(AppError::not_found());
        }
        Ok(orders)
    }

    pub async fn get_items_by_order_id(&self, order_id: f64) -> Result<Vec<Item>, AppError> {
        let order_id = checked_id(order_id)?;
        let items = self.repo.get_items_by_order_id(order_id).await?;
        if is_empty_object(&items) {
            return Err(AppError::not_found());
        }
        Ok(items)
    }

    pub async fn add_new_order(&self, order: Order) -> Result<Order, AppError> {
        if !is_valid_object(Some(&order), &["id"]) {
            return Err(AppError::BadRequest(
                "Invalid property values found in provided order.".into(),
            ));
        }
        let persisted = self.repo.save(order).await?;
        tracing::debug!(order_id = persisted.id, customer_id = persisted.customer_id, "order added");
        Ok(persisted)
    }

    pub async fn update_order(&self, id: f64, mut order: Order) -> Result<bool, AppError> {
        if !is_valid_object(Some(&order), &[]) {
            return Err(AppError::BadRequest(
                "Invalid order provided (invalid values found).".into(),
            ));
        }
        order.id = checked_id(id)?;
        Ok(self.repo.update(order).await?)
    }

    /// Removes the order and its item links. Succeeds for unknown ids.
    pub async fn delete_by_id(&self, id: f64) -> Result<bool, AppError> {
        let id = checked_id(id)?;
        Ok(self.repo.delete_by_id(id).await?)
    }
}
