use async_trait::async_trait;
use dashmap::DashMap;
use shop_types::domain::item::Item;
use shop_types::domain::order::Order;
use shop_types::domain::user::{User, UserKey};
use shop_types::ports::item_repository::ItemRepository;
use shop_types::ports::order_repository::OrderRepository;
use shop_types::ports::user_repository::UserRepository;
use shop_types::ports::RepoError;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct Tables {
    users: DashMap<i64, User>,
    orders: DashMap<i64, Order>,
    items: DashMap<i64, Item>,
    // (order id, item id)
    order_items: DashMap<(i64, i64), ()>,
    user_seq: AtomicI64,
    order_seq: AtomicI64,
    item_seq: AtomicI64,
}

/// DashMap-backed store with the same observable behavior as the SQL
/// adapter, including unique usernames and emails.
#[derive(Clone, Default)]
pub struct InMemoryRepo {
    tables: Arc<Tables>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of order/item links currently stored.
    pub fn link_count(&self) -> usize {
        self.tables.order_items.len()
    }

    fn next_id(seq: &AtomicI64) -> i64 {
        seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn sorted<T: Clone>(map: &DashMap<i64, T>, keep: impl Fn(&T) -> bool) -> Vec<T> {
        let mut rows: Vec<(i64, T)> = map
            .iter()
            .filter(|kv| keep(kv.value()))
            .map(|kv| (*kv.key(), kv.value().clone()))
            .collect();
        rows.sort_by_key(|(id, _)| *id);
        rows.into_iter().map(|(_, v)| v).collect()
    }

    fn check_unique(&self, user: &User) -> Result<(), RepoError> {
        let taken = self.tables.users.iter().any(|kv| {
            let other = kv.value();
            other.id != user.id && (other.username == user.username || other.email == user.email)
        });
        if taken {
            return Err(RepoError::DbError(
                "UNIQUE constraint failed: app_users".into(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryRepo {
    async fn get_all(&self) -> Result<Vec<User>, RepoError> {
        Ok(Self::sorted(&self.tables.users, |_| true))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        Ok(self.tables.users.get(&id).map(|r| r.clone()))
    }

    async fn get_by_unique_key(
        &self,
        key: UserKey,
        value: &str,
    ) -> Result<Option<User>, RepoError> {
        Ok(Self::sorted(&self.tables.users, |u| key.value_of(u) == value)
            .into_iter()
            .next())
    }

    async fn get_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, RepoError> {
        Ok(Self::sorted(&self.tables.users, |u| {
            u.username == username && u.password.as_deref() == Some(password)
        })
        .into_iter()
        .next())
    }

    async fn save(&self, mut user: User) -> Result<User, RepoError> {
        user.id = 0;
        self.check_unique(&user)?;
        user.id = Self::next_id(&self.tables.user_seq);
        self.tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<bool, RepoError> {
        self.check_unique(&user)?;
        if let Some(mut row) = self.tables.users.get_mut(&user.id) {
            *row = user;
        }
        Ok(true)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, RepoError> {
        self.tables.users.remove(&id);
        Ok(true)
    }
}

#[async_trait]
impl OrderRepository for InMemoryRepo {
    async fn get_all(&self) -> Result<Vec<Order>, RepoError> {
        Ok(Self::sorted(&self.tables.orders, |_| true))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Order>, RepoError> {
        Ok(self.tables.orders.get(&id).map(|r| r.clone()))
    }

    async fn get_orders_by_user_id(&self, user_id: i64) -> Result<Vec<Order>, RepoError> {
        Ok(Self::sorted(&self.tables.orders, |o| o.customer_id == user_id))
    }

    async fn get_items_by_order_id(&self, order_id: i64) -> Result<Vec<Item>, RepoError> {
        let linked: Vec<i64> = self
            .tables
            .order_items
            .iter()
            .filter(|kv| kv.key().0 == order_id)
            .map(|kv| kv.key().1)
            .collect();
        Ok(Self::sorted(&self.tables.items, |i| linked.contains(&i.id)))
    }

    async fn save(&self, mut order: Order) -> Result<Order, RepoError> {
        order.id = Self::next_id(&self.tables.order_seq);
        self.tables.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn update(&self, order: Order) -> Result<bool, RepoError> {
        if let Some(mut row) = self.tables.orders.get_mut(&order.id) {
            *row = order;
        }
        Ok(true)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, RepoError> {
        self.tables.order_items.retain(|(order_id, _), _| *order_id != id);
        self.tables.orders.remove(&id);
        Ok(true)
    }
}

#[async_trait]
impl ItemRepository for InMemoryRepo {
    async fn get_all(&self) -> Result<Vec<Item>, RepoError> {
        Ok(Self::sorted(&self.tables.items, |_| true))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Item>, RepoError> {
        Ok(self.tables.items.get(&id).map(|r| r.clone()))
    }

    async fn save(&self, mut item: Item, order_id: i64) -> Result<Item, RepoError> {
        item.id = Self::next_id(&self.tables.item_seq);
        self.tables.items.insert(item.id, item.clone());
        self.tables.order_items.insert((order_id, item.id), ());
        Ok(item)
    }

    async fn update(&self, item: Item) -> Result<bool, RepoError> {
        if let Some(mut row) = self.tables.items.get_mut(&item.id) {
            *row = item;
        }
        Ok(true)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, RepoError> {
        self.tables.order_items.retain(|(_, item_id), _| *item_id != id);
        self.tables.items.remove(&id);
        Ok(true)
    }
}
