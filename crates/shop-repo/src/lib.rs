#[cfg(not(any(feature = "memory", feature = "sqlite")))]
compile_error!("Enable a repo feature: `memory` or `sqlite`.");

use async_trait::async_trait;
use shop_types::domain::item::Item;
use shop_types::domain::order::Order;
use shop_types::domain::user::{User, UserKey};
use shop_types::ports::item_repository::ItemRepository;
use shop_types::ports::order_repository::OrderRepository;
use shop_types::ports::user_repository::UserRepository;
use shop_types::ports::RepoError;

#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://shop.db";
pub const DEFAULT_POOL_MAX: u32 = 5;

/// The store selected at startup. Every variant serves users, orders and
/// items from the same backing data.
#[derive(Clone)]
pub enum Repo {
    #[cfg(feature = "memory")]
    Memory(memory::InMemoryRepo),
    #[cfg(feature = "sqlite")]
    Sqlite(sqlite::SqliteRepo),
}

pub async fn build_repo(url: Option<&str>, pool_max: u32) -> anyhow::Result<Repo> {
    Repo::build_repo(url, pool_max).await
}

impl Repo {
    #[cfg(all(feature = "memory", not(feature = "sqlite")))]
    pub async fn build_repo(_: Option<&str>, _: u32) -> anyhow::Result<Self> {
        tracing::info!("using in-memory store");
        Ok(Self::Memory(memory::InMemoryRepo::new()))
    }

    #[cfg(all(feature = "sqlite", not(feature = "memory")))]
    pub async fn build_repo(database_url: Option<&str>, pool_max: u32) -> anyhow::Result<Self> {
        let url = database_url.unwrap_or(DEFAULT_DATABASE_URL);
        let sqlite = sqlite::SqliteRepo::new(url, pool_max).await?;
        Ok(Self::Sqlite(sqlite))
    }

    // With both adapters compiled in, a database url picks sqlite.
    #[cfg(all(feature = "sqlite", feature = "memory"))]
    pub async fn build_repo(database_url: Option<&str>, pool_max: u32) -> anyhow::Result<Self> {
        match database_url {
            Some(url) => Ok(Self::Sqlite(sqlite::SqliteRepo::new(url, pool_max).await?)),
            None => {
                tracing::info!("no DATABASE_URL set, using in-memory store");
                Ok(Self::Memory(memory::InMemoryRepo::new()))
            }
        }
    }
}

macro_rules! delegate {
    ($self:ident, $port:ident :: $method:ident ( $($arg:expr),* )) => {
        match $self {
            #[cfg(feature = "memory")]
            Repo::Memory(r) => $port::$method(r, $($arg),*).await,
            #[cfg(feature = "sqlite")]
            Repo::Sqlite(r) => $port::$method(r, $($arg),*).await,
        }
    };
}

#[async_trait]
impl UserRepository for Repo {
    async fn get_all(&self) -> Result<Vec<User>, RepoError> {
        delegate!(self, UserRepository::get_all())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        delegate!(self, UserRepository::get_by_id(id))
    }

    async fn get_by_unique_key(
        &self,
        key: UserKey,
        value: &str,
    ) -> Result<Option<User>, RepoError> {
        delegate!(self, UserRepository::get_by_unique_key(key, value))
    }

    async fn get_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, RepoError> {
        delegate!(self, UserRepository::get_by_credentials(username, password))
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        delegate!(self, UserRepository::save(user))
    }

    async fn update(&self, user: User) -> Result<bool, RepoError> {
        delegate!(self, UserRepository::update(user))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, RepoError> {
        delegate!(self, UserRepository::delete_by_id(id))
    }
}

#[async_trait]
impl OrderRepository for Repo {
    async fn get_all(&self) -> Result<Vec<Order>, RepoError> {
        delegate!(self, OrderRepository::get_all())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Order>, RepoError> {
        delegate!(self, OrderRepository::get_by_id(id))
    }

    async fn get_orders_by_user_id(&self, user_id: i64) -> Result<Vec<Order>, RepoError> {
        delegate!(self, OrderRepository::get_orders_by_user_id(user_id))
    }

    async fn get_items_by_order_id(&self, order_id: i64) -> Result<Vec<Item>, RepoError> {
        delegate!(self, OrderRepository::get_items_by_order_id(order_id))
    }

    async fn save(&self, order: Order) -> Result<Order, RepoError> {
        delegate!(self, OrderRepository::save(order))
    }

    async fn update(&self, order: Order) -> Result<bool, RepoError> {
        delegate!(self, OrderRepository::update(order))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, RepoError> {
        delegate!(self, OrderRepository::delete_by_id(id))
    }
}

#[async_trait]
impl ItemRepository for Repo {
    async fn get_all(&self) -> Result<Vec<Item>, RepoError> {
        delegate!(self, ItemRepository::get_all())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Item>, RepoError> {
        delegate!(self, ItemRepository::get_by_id(id))
    }

    async fn save(&self, item: Item, order_id: i64) -> Result<Item, RepoError> {
        delegate!(self, ItemRepository::save(item, order_id))
    }

    async fn update(&self, item: Item) -> Result<bool, RepoError> {
        delegate!(self, ItemRepository::update(item))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, RepoError> {
        delegate!(self, ItemRepository::delete_by_id(id))
    }
}
