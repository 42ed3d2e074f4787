pub mod item_repository;
pub mod order_repository;
pub mod user_repository;

#[derive(thiserror::Error, Debug)]
pub enum RepoError {
    #[error("db error: {0}")]
    DbError(String),
}

/// One store backing all three repositories.
pub trait ShopRepository:
    user_repository::UserRepository
    + order_repository::OrderRepository
    + item_repository::ItemRepository
    + Clone
{
}

impl<T> ShopRepository for T where
    T: user_repository::UserRepository
        + order_repository::OrderRepository
        + item_repository::ItemRepository
        + Clone
{
}
