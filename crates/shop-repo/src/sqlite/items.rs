use async_trait::async_trait;
use shop_types::domain::item::Item;
use shop_types::ports::item_repository::ItemRepository;
use shop_types::ports::RepoError;

use super::rows::{map_item, map_items, ItemRow};
use super::{db_err, SqliteRepo};

const ITEM_QUERY: &str =
    "SELECT ai.id, ai.name, ai.description, ai.cost, ai.amount FROM app_items ai";

#[async_trait]
impl ItemRepository for SqliteRepo {
    async fn get_all(&self) -> Result<Vec<Item>, RepoError> {
        let rows: Vec<ItemRow> = sqlx::query_as(&format!("{ITEM_QUERY} ORDER BY ai.id"))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(map_items(rows))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Item>, RepoError> {
        let row: Option<ItemRow> = sqlx::query_as(&format!("{ITEM_QUERY} WHERE ai.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(map_item(row))
    }

    // Item row and its order link commit together or not at all.
    async fn save(&self, mut item: Item, order_id: i64) -> Result<Item, RepoError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;
        let res = sqlx::query(
            "INSERT INTO app_items (name, description, cost, amount) VALUES (?, ?, ?, ?)",
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.cost)
        .bind(item.amount)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;
        item.id = res.last_insert_rowid();

        sqlx::query("INSERT INTO order_item_jc (orderid, itemid) VALUES (?, ?)")
            .bind(order_id)
            .bind(item.id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        tx.commit().await.map_err(db_err)?;
        Ok(item)
    }

    async fn update(&self, item: Item) -> Result<bool, RepoError> {
        sqlx::query(
            "UPDATE app_items SET name = ?, description = ?, cost = ?, amount = ? WHERE id = ?",
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.cost)
        .bind(item.amount)
        .bind(item.id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(true)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, RepoError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;
        sqlx::query("DELETE FROM order_item_jc WHERE itemid = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        sqlx::query("DELETE FROM app_items WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        tx.commit().await.map_err(db_err)?;
        Ok(true)
    }
}
