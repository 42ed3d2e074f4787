use crate::application::checked_id;
use crate::errors::AppError;
use shop_types::domain::role::Role;
use shop_types::domain::user::{User, UserKey};
use shop_types::ports::user_repository::UserRepository;
use shop_types::validator::{
    is_empty_object, is_property_of, is_valid_object, is_valid_strings, to_number,
};

pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn get_all_users(&self) -> Result<Vec<User>, AppError> {
        let users = self.repo.get_all().await?;
        if is_empty_object(&users) {
            return Err(AppError::not_found());
        }
        Ok(users.into_iter().map(User::without_password).collect())
    }

    pub async fn get_user_by_id(&self, id: f64) -> Result<User, AppError> {
        let id = checked_id(id)?;
        self.repo
            .get_by_id(id)
            .await?
            .map(User::without_password)
            .ok_or_else(AppError::not_found)
    }

    /// Looks a user up by a single `field=value` pair. Only the first pair is
    /// used, but every key must name a user field.
    pub async fn get_user_by_unique_key(
        &self,
        query: &[(String, String)],
    ) -> Result<User, AppError> {
        if !query.iter().all(|(key, _)| is_property_of::<User>(key)) {
            return Err(AppError::bad_request());
        }
        let (key, value) = query.first().ok_or_else(AppError::bad_request)?;

        if key == "id" {
            return self.get_user_by_id(to_number(value)).await;
        }
        if !is_valid_strings(&[value.as_str()]) {
            return Err(AppError::bad_request());
        }
        let key = UserKey::from_field(key).ok_or_else(|| {
            AppError::BadRequest(format!("Users cannot be searched by {key}."))
        })?;

        self.repo
            .get_by_unique_key(key, value)
            .await?
            .map(User::without_password)
            .ok_or_else(AppError::not_found)
    }

    pub async fn authenticate_user(&self, username: &str, password: &str) -> Result<User, AppError> {
        if !is_valid_strings(&[username, password]) {
            return Err(AppError::bad_request());
        }
        match self.repo.get_by_credentials(username, password).await? {
            Some(user) => {
                tracing::info!(user_id = user.id, "user authenticated");
                Ok(user.without_password())
            }
            None => {
                tracing::debug!(username, "bad credentials");
                Err(AppError::Authentication("Bad credentials provided.".into()))
            }
        }
    }

    /// Registers a user. New accounts always get the `User` role.
    pub async fn add_new_user(&self, mut user: User) -> Result<User, AppError> {
        if !is_valid_object(Some(&user), &["id"]) {
            return Err(AppError::BadRequest(
                "Invalid property values found in provided user.".into(),
            ));
        }
        self.ensure_available(&user, None).await?;

        user.id = 0;
        user.role = Role::User;
        let persisted = self.repo.save(user).await?;
        tracing::info!(user_id = persisted.id, "user registered");
        Ok(persisted.without_password())
    }

    pub async fn update_user(&self, id: f64, mut user: User) -> Result<bool, AppError> {
        if !is_valid_object(Some(&user), &["id"]) {
            return Err(AppError::BadRequest(
                "Invalid property values found in provided user.".into(),
            ));
        }
        let id = checked_id(id)?;
        self.ensure_available(&user, Some(id)).await?;

        user.id = id;
        user.role = Role::User;
        Ok(self.repo.update(user).await?)
    }

    pub async fn delete_by_id(&self, id: f64) -> Result<bool, AppError> {
        let id = checked_id(id)?;
        Ok(self.repo.delete_by_id(id).await?)
    }

    /// A username is available when nobody holds it, or `owner` does.
    pub async fn is_username_available(
        &self,
        username: &str,
        owner: Option<i64>,
    ) -> Result<bool, AppError> {
        self.is_available(UserKey::Username, username, owner).await
    }

    pub async fn is_email_available(
        &self,
        email: &str,
        owner: Option<i64>,
    ) -> Result<bool, AppError> {
        self.is_available(UserKey::Email, email, owner).await
    }

    async fn is_available(
        &self,
        key: UserKey,
        value: &str,
        owner: Option<i64>,
    ) -> Result<bool, AppError> {
        let holder = self.repo.get_by_unique_key(key, value).await?;
        Ok(holder.map_or(true, |u| Some(u.id) == owner))
    }

    async fn ensure_available(&self, user: &User, owner: Option<i64>) -> Result<(), AppError> {
        if !self.is_username_available(&user.username, owner).await? {
            return Err(AppError::Persistence(
                "The provided username is already taken.".into(),
            ));
        }
        if !self.is_email_available(&user.email, owner).await? {
            return Err(AppError::Persistence(
                "The provided email is already taken.".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_repo::memory::InMemoryRepo;

    fn user(username: &str, email: &str) -> User {
        User::new(username, "password", "Emily", "Einstein", email, Role::User)
    }

    async fn seeded() -> (InMemoryRepo, UserService<InMemoryRepo>) {
        let repo = InMemoryRepo::new();
        let admin = User::new(
            "aanderson",
            "password",
            "Alice",
            "Anderson",
            "aanderson@revature.com",
            Role::Admin,
        );
        UserRepository::save(&repo, admin).await.unwrap();
        (repo.clone(), UserService::new(repo))
    }

    #[tokio::test]
    async fn passwords_never_leave_the_service() {
        let (_, svc) = seeded().await;
        let all = svc.get_all_users().await.unwrap();
        assert!(all.iter().all(|u| u.password.is_none()));

        let one = svc.get_user_by_id(1.0).await.unwrap();
        assert!(one.password.is_none());

        let authed = svc.authenticate_user("aanderson", "password").await.unwrap();
        assert!(authed.password.is_none());
        assert_eq!(authed.role, Role::Admin);
    }

    #[tokio::test]
    async fn empty_store_is_not_found() {
        let svc = UserService::new(InMemoryRepo::new());
        assert!(matches!(
            svc.get_all_users().await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn add_forces_the_user_role() {
        let (_, svc) = seeded().await;
        let mut input = user("eeinstein", "eeinstein@revature.com");
        input.role = Role::Admin;
        let created = svc.add_new_user(input).await.unwrap();
        assert_eq!(created.role, Role::User);
        assert!(created.password.is_none());
        assert_eq!(created.id, 2);
    }

    #[tokio::test]
    async fn taken_username_is_never_saved() {
        let (repo, svc) = seeded().await;
        let res = svc
            .add_new_user(user("aanderson", "fresh@revature.com"))
            .await;
        assert!(matches!(res, Err(AppError::Persistence(_))));

        let res = svc
            .add_new_user(user("fresh", "aanderson@revature.com"))
            .await;
        assert!(matches!(res, Err(AppError::Persistence(_))));

        assert_eq!(UserRepository::get_all(&repo).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn blank_fields_are_bad_requests() {
        let (_, svc) = seeded().await;
        let mut input = user("ddavis", "ddavis@revature.com");
        input.last_name.clear();
        assert!(matches!(
            svc.add_new_user(input).await,
            Err(AppError::BadRequest(_))
        ));

        let mut no_password = user("ddavis", "ddavis@revature.com");
        no_password.password = None;
        assert!(matches!(
            svc.add_new_user(no_password).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn update_keeps_own_username_and_email() {
        let (_, svc) = seeded().await;
        let created = svc
            .add_new_user(user("ccountryman", "ccountryman@revature.com"))
            .await
            .unwrap();

        let mut changed = user("ccountryman", "ccountryman@revature.com");
        changed.first_name = "Charles".into();
        assert!(svc.update_user(created.id as f64, changed).await.unwrap());
        assert_eq!(
            svc.get_user_by_id(created.id as f64).await.unwrap().first_name,
            "Charles"
        );

        let stolen = user("aanderson", "ccountryman@revature.com");
        assert!(matches!(
            svc.update_user(created.id as f64, stolen).await,
            Err(AppError::Persistence(_))
        ));
    }

    #[tokio::test]
    async fn lookup_by_unique_key() {
        let (_, svc) = seeded().await;
        let q = vec![("email".to_string(), "aanderson@revature.com".to_string())];
        let found = svc.get_user_by_unique_key(&q).await.unwrap();
        assert_eq!(found.username, "aanderson");
        assert!(found.password.is_none());

        let by_id = vec![("id".to_string(), "1".to_string())];
        assert_eq!(svc.get_user_by_unique_key(&by_id).await.unwrap().id, 1);

        let missing = vec![("username".to_string(), "nobody".to_string())];
        assert!(matches!(
            svc.get_user_by_unique_key(&missing).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn lookup_rejects_unknown_or_unsearchable_keys() {
        let (_, svc) = seeded().await;
        for q in [
            vec![("shoeSize".to_string(), "9".to_string())],
            vec![("password".to_string(), "password".to_string())],
            vec![("username".to_string(), String::new())],
            vec![("id".to_string(), "abc".to_string())],
            vec![],
        ] {
            assert!(matches!(
                svc.get_user_by_unique_key(&q).await,
                Err(AppError::BadRequest(_))
            ));
        }
    }

    #[tokio::test]
    async fn authentication_paths() {
        let (_, svc) = seeded().await;
        assert!(matches!(
            svc.authenticate_user("x", "wrong").await,
            Err(AppError::Authentication(_))
        ));
        assert!(matches!(
            svc.authenticate_user("", "password").await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn availability_checks() {
        let (_, svc) = seeded().await;
        assert!(!svc.is_username_available("aanderson", None).await.unwrap());
        assert!(svc.is_username_available("aanderson", Some(1)).await.unwrap());
        assert!(svc.is_email_available("new@revature.com", None).await.unwrap());
    }

    #[tokio::test]
    async fn delete_by_id() {
        let (_, svc) = seeded().await;
        assert!(matches!(
            svc.delete_by_id(-1.0).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(svc.delete_by_id(1.0).await.unwrap());
        assert!(matches!(
            svc.get_user_by_id(1.0).await,
            Err(AppError::NotFound(_))
        ));
    }
}
