use async_trait::async_trait;
use shop_types::domain::user::{User, UserKey};
use shop_types::ports::user_repository::UserRepository;
use shop_types::ports::RepoError;

use super::rows::{map_user, map_users, UserRow};
use super::{db_err, SqliteRepo};

const USER_QUERY: &str = "SELECT au.id, au.username, au.password, au.first_name, au.last_name, au.email, ur.name AS role_name
     FROM app_users au
     JOIN user_roles ur ON au.role_id = ur.id";

fn column(key: UserKey) -> &'static str {
    match key {
        UserKey::Username => "au.username",
        UserKey::Email => "au.email",
        UserKey::FirstName => "au.first_name",
        UserKey::LastName => "au.last_name",
    }
}

#[async_trait]
impl UserRepository for SqliteRepo {
    async fn get_all(&self) -> Result<Vec<User>, RepoError> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!("{USER_QUERY} ORDER BY au.id"))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        map_users(rows)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{USER_QUERY} WHERE au.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        map_user(row)
    }

    async fn get_by_unique_key(
        &self,
        key: UserKey,
        value: &str,
    ) -> Result<Option<User>, RepoError> {
        let sql = format!("{USER_QUERY} WHERE {} = ? ORDER BY au.id", column(key));
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        map_user(row)
    }

    async fn get_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, RepoError> {
        let sql = format!("{USER_QUERY} WHERE au.username = ? AND au.password = ?");
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(username)
            .bind(password)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        map_user(row)
    }

    async fn save(&self, mut user: User) -> Result<User, RepoError> {
        let res = sqlx::query(
            "INSERT INTO app_users (username, password, first_name, last_name, email, role_id)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.username)
        .bind(user.password.as_deref().unwrap_or_default())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(user.role.id())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        user.id = res.last_insert_rowid();
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<bool, RepoError> {
        sqlx::query(
            "UPDATE app_users
             SET username = ?, password = ?, first_name = ?, last_name = ?, email = ?, role_id = ?
             WHERE id = ?",
        )
        .bind(&user.username)
        .bind(user.password.as_deref().unwrap_or_default())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(user.role.id())
        .bind(user.id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(true)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, RepoError> {
        sqlx::query("DELETE FROM app_users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(true)
    }
}
