//! Row shapes as they come back from the store, and their mapping onto
//! domain records. A missing row maps to `None`.

use shop_types::domain::item::Item;
use shop_types::domain::order::Order;
use shop_types::domain::role::Role;
use shop_types::domain::user::User;
use shop_types::ports::RepoError;
use sqlx::FromRow;

#[derive(FromRow)]
pub(super) struct UserRow {
    id: i64,
    username: String,
    password: String,
    first_name: String,
    last_name: String,
    email: String,
    role_name: String,
}

impl UserRow {
    fn into_user(self) -> Result<User, RepoError> {
        let role = self
            .role_name
            .parse::<Role>()
            .map_err(|e| RepoError::DbError(e.to_string()))?;
        Ok(User {
            id: self.id,
            username: self.username,
            password: Some(self.password),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            role,
        })
    }
}

#[derive(FromRow)]
pub(super) struct OrderRow {
    id: i64,
    customerid: i64,
    status: bool,
    location: String,
    destination: String,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order {
            id: row.id,
            customer_id: row.customerid,
            status: row.status,
            location: row.location,
            destination: row.destination,
        }
    }
}

#[derive(FromRow)]
pub(super) struct ItemRow {
    id: i64,
    name: String,
    description: String,
    cost: f64,
    amount: i64,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: row.id,
            name: row.name,
            description: row.description,
            cost: row.cost,
            amount: row.amount,
        }
    }
}

pub(super) fn map_user(row: Option<UserRow>) -> Result<Option<User>, RepoError> {
    row.map(UserRow::into_user).transpose()
}

pub(super) fn map_users(rows: Vec<UserRow>) -> Result<Vec<User>, RepoError> {
    rows.into_iter().map(UserRow::into_user).collect()
}

pub(super) fn map_order(row: Option<OrderRow>) -> Option<Order> {
    row.map(Order::from)
}

pub(super) fn map_orders(rows: Vec<OrderRow>) -> Vec<Order> {
    rows.into_iter().map(Order::from).collect()
}

pub(super) fn map_item(row: Option<ItemRow>) -> Option<Item> {
    row.map(Item::from)
}

pub(super) fn map_items(rows: Vec<ItemRow>) -> Vec<Item> {
    rows.into_iter().map(Item::from).collect()
}
