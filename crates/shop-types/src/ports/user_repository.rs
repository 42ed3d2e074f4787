use async_trait::async_trait;

use super::RepoError;
use crate::domain::user::{User, UserKey};

#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    async fn get_all(&self) -> Result<Vec<User>, RepoError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<User>, RepoError>;
    async fn get_by_unique_key(&self, key: UserKey, value: &str)
        -> Result<Option<User>, RepoError>;
    async fn get_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, RepoError>;
    async fn save(&self, user: User) -> Result<User, RepoError>;
    async fn update(&self, user: User) -> Result<bool, RepoError>;
    async fn delete_by_id(&self, id: i64) -> Result<bool, RepoError>;
}
