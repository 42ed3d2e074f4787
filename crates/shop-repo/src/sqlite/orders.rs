use async_trait::async_trait;
use shop_types::domain::item::Item;
use shop_types::domain::order::Order;
use shop_types::ports::order_repository::OrderRepository;
use shop_types::ports::RepoError;

use super::rows::{map_items, map_order, map_orders, ItemRow, OrderRow};
use super::{db_err, SqliteRepo};

const ORDER_QUERY: &str =
    "SELECT ao.id, ao.customerid, ao.status, ao.location, ao.destination FROM app_orders ao";

#[async_trait]
impl OrderRepository for SqliteRepo {
    async fn get_all(&self) -> Result<Vec<Order>, RepoError> {
        let rows: Vec<OrderRow> = sqlx::query_as(&format!("{ORDER_QUERY} ORDER BY ao.id"))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(map_orders(rows))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Order>, RepoError> {
        let row: Option<OrderRow> = sqlx::query_as(&format!("{ORDER_QUERY} WHERE ao.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(map_order(row))
    }

    async fn get_orders_by_user_id(&self, user_id: i64) -> Result<Vec<Order>, RepoError> {
        let sql = format!("{ORDER_QUERY} WHERE ao.customerid = ? ORDER BY ao.id");
        let rows: Vec<OrderRow> = sqlx::query_as(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(map_orders(rows))
    }

    async fn get_items_by_order_id(&self, order_id: i64) -> Result<Vec<Item>, RepoError> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            "SELECT i.id, i.name, i.description, i.cost, i.amount
             FROM app_items i
             JOIN order_item_jc j ON j.itemid = i.id
             WHERE j.orderid = ?
             ORDER BY i.id",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(map_items(rows))
    }

    async fn save(&self, mut order: Order) -> Result<Order, RepoError> {
        let res = sqlx::query(
            "INSERT INTO app_orders (customerid, status, location, destination) VALUES (?, ?, ?, ?)",
        )
        .bind(order.customer_id)
        .bind(order.status)
        .bind(&order.location)
        .bind(&order.destination)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        order.id = res.last_insert_rowid();
        Ok(order)
    }

    async fn update(&self, order: Order) -> Result<bool, RepoError> {
        sqlx::query(
            "UPDATE app_orders SET customerid = ?, status = ?, location = ?, destination = ?
             WHERE id = ?",
        )
        .bind(order.customer_id)
        .bind(order.status)
        .bind(&order.location)
        .bind(&order.destination)
        .bind(order.id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(true)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, RepoError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;
        sqlx::query("DELETE FROM order_item_jc WHERE orderid = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        sqlx::query("DELETE FROM app_orders WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        tx.commit().await.map_err(db_err)?;
        Ok(true)
    }
}
