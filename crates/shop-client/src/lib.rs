use std::time::Duration;

use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, COOKIE, SET_COOKIE};
use reqwest::{Method, RequestBuilder, Url};
use serde::Serialize;
use shop_types::domain::item::Item;
use shop_types::domain::order::Order;
use shop_types::domain::principal::Principal;
use shop_types::domain::user::User;

#[derive(Clone)]
pub struct ShopClientBuilder {
    base: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

/// Thin typed wrapper over the shop REST API.
///
/// Admin-only routes need a session; call [`ShopClient::login`] and use the
/// client it returns.
#[derive(Clone)]
pub struct ShopClient {
    base: Url,
    client: reqwest::Client,
    session: Option<HeaderValue>,
}

#[derive(Serialize, Debug, Clone)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

impl ShopClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::builder(base_url)?.build()
    }

    pub fn builder(base_url: &str) -> anyhow::Result<ShopClientBuilder> {
        let base = Url::parse(base_url).context("invalid base url")?;
        Ok(ShopClientBuilder {
            base,
            headers: HeaderMap::new(),
            timeout: None,
            client: None,
        })
    }

    fn url(&self, path: &str) -> anyhow::Result<Url> {
        self.base.join(path).context("failed to join url")
    }

    fn request(&self, method: Method, path: &str) -> anyhow::Result<RequestBuilder> {
        let mut req = self.client.request(method, self.url(path)?);
        if let Some(cookie) = &self.session {
            req = req.header(COOKIE, cookie.clone());
        }
        Ok(req)
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Logs in and returns the principal plus a client carrying the session
    /// cookie.
    pub async fn login(&self, username: &str, password: &str) -> anyhow::Result<(Principal, Self)> {
        let res = self
            .request(Method::POST, "auth")?
            .json(&Credentials { username, password })
            .send()
            .await?
            .error_for_status()?;

        let raw = res
            .headers()
            .get(SET_COOKIE)
            .context("login response carried no session cookie")?
            .to_str()
            .context("session cookie is not valid text")?;
        let pair = raw.split(';').next().unwrap_or_default().trim();
        let session = HeaderValue::from_str(pair).context("invalid session cookie")?;

        let principal: Principal = res.json().await?;
        tracing::debug!(user_id = principal.id, "logged in");
        let authed = Self {
            session: Some(session),
            ..self.clone()
        };
        Ok((principal, authed))
    }

    pub async fn logout(&self) -> anyhow::Result<Self> {
        self.request(Method::GET, "auth")?
            .send()
            .await?
            .error_for_status()?;
        Ok(Self {
            session: None,
            ..self.clone()
        })
    }

    pub async fn list_items(&self) -> anyhow::Result<Vec<Item>> {
        let res = self
            .request(Method::GET, "items")?
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn get_item(&self, id: i64) -> anyhow::Result<Item> {
        let res = self
            .request(Method::GET, &format!("items/{id}"))?
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    /// Creates an item and links it to `order_id`.
    pub async fn add_item(&self, order_id: i64, item: &Item) -> anyhow::Result<Item> {
        let res = self
            .request(Method::POST, &format!("items/{order_id}"))?
            .json(item)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn update_item(&self, item: &Item) -> anyhow::Result<()> {
        self.request(Method::PATCH, &format!("items/{}", item.id))?
            .json(item)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn delete_item(&self, id: i64) -> anyhow::Result<()> {
        self.request(Method::DELETE, &format!("items/{id}"))?
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn list_orders(&self) -> anyhow::Result<Vec<Order>> {
        let res = self
            .request(Method::GET, "orders")?
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn get_order(&self, id: i64) -> anyhow::Result<Order> {
        let res = self
            .request(Method::GET, &format!("orders/{id}"))?
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn get_order_items(&self, id: i64) -> anyhow::Result<Vec<Item>> {
        let res = self
            .request(Method::GET, &format!("orders/{id}/items"))?
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn create_order(&self, order: &Order) -> anyhow::Result<Order> {
        let res = self
            .request(Method::POST, "orders")?
            .json(order)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn update_order(&self, order: &Order) -> anyhow::Result<()> {
        self.request(Method::PATCH, &format!("orders/{}", order.id))?
            .json(order)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn delete_order(&self, id: i64) -> anyhow::Result<()> {
        self.request(Method::DELETE, &format!("orders/{id}"))?
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn list_users(&self) -> anyhow::Result<Vec<User>> {
        let res = self
            .request(Method::GET, "users")?
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn get_user(&self, id: i64) -> anyhow::Result<User> {
        let res = self
            .request(Method::GET, &format!("users/{id}"))?
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    /// Looks a user up by one unique field, e.g. `("email", "a@b.com")`.
    pub async fn find_user(&self, key: &str, value: &str) -> anyhow::Result<User> {
        let res = self
            .request(Method::GET, "users")?
            .query(&[(key, value)])
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn get_user_orders(&self, id: i64) -> anyhow::Result<Vec<Order>> {
        let res = self
            .request(Method::GET, &format!("users/{id}/orders"))?
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn register(&self, user: &User) -> anyhow::Result<User> {
        let res = self
            .request(Method::POST, "users")?
            .json(user)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn update_user(&self, user: &User) -> anyhow::Result<()> {
        self.request(Method::PATCH, &format!("users/{}", user.id))?
            .json(user)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn delete_user(&self, id: i64) -> anyhow::Result<()> {
        self.request(Method::DELETE, &format!("users/{id}"))?
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

impl ShopClientBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(
        mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> anyhow::Result<Self> {
        let header_name =
            HeaderName::from_bytes(key.as_ref().as_bytes()).context("invalid header name")?;
        let header_value = HeaderValue::from_str(value.as_ref()).context("invalid header value")?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> anyhow::Result<ShopClient> {
        if let Some(client) = self.client {
            return Ok(ShopClient {
                base: self.base,
                client,
                session: None,
            });
        }

        let mut builder = reqwest::Client::builder();
        if !self.headers.is_empty() {
            builder = builder.default_headers(self.headers);
        }
        if let Some(t) = self.timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build()?;
        Ok(ShopClient {
            base: self.base,
            client,
            session: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use shop_types::domain::role::Role;

    fn sample_item() -> Item {
        Item {
            id: 4,
            ..Item::new("Flapjack Mix", "Pancake mix 32oz", 4.5, 10)
        }
    }

    #[tokio::test]
    async fn create_order_and_add_item() {
        let server = MockServer::start();
        let order = Order::new(2, true, "Austin", "Denver");
        let created = Order { id: 9, ..order.clone() };
        let item = sample_item();

        let create_mock = server.mock(|when, then| {
            when.method(POST).path("/orders").json_body_obj(&order);
            then.status(201).json_body_obj(&created);
        });
        let item_mock = server.mock(|when, then| {
            when.method(POST).path("/items/9");
            then.status(201).json_body_obj(&item);
        });
        let items_mock = server.mock(|when, then| {
            when.method(GET).path("/orders/9/items");
            then.status(200).json_body_obj(&vec![item.clone()]);
        });

        let client = ShopClient::new(&server.base_url()).unwrap();
        let got = client.create_order(&order).await.unwrap();
        assert_eq!(got.id, 9);

        let added = client.add_item(got.id, &item).await.unwrap();
        assert_eq!(added, item);
        assert_eq!(client.get_order_items(9).await.unwrap(), vec![item]);

        create_mock.assert();
        item_mock.assert();
        items_mock.assert();
    }

    #[tokio::test]
    async fn login_attaches_session_cookie() {
        let server = MockServer::start();
        let principal = Principal {
            id: 1,
            username: "aanderson".into(),
            role: Role::Admin,
        };

        let login_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/auth")
                .json_body(json!({ "username": "aanderson", "password": "password" }));
            then.status(200)
                .header("set-cookie", "sid=abc123; HttpOnly; Path=/")
                .json_body_obj(&principal);
        });
        let list_mock = server.mock(|when, then| {
            when.method(GET).path("/items").header("cookie", "sid=abc123");
            then.status(200).json_body_obj(&vec![sample_item()]);
        });

        let client = ShopClient::new(&server.base_url()).unwrap();
        assert!(!client.has_session());
        let (who, authed) = client.login("aanderson", "password").await.unwrap();
        assert_eq!(who, principal);
        assert!(authed.has_session());
        assert_eq!(authed.list_items().await.unwrap().len(), 1);

        login_mock.assert();
        list_mock.assert();
    }

    #[tokio::test]
    async fn error_statuses_surface_as_errors() {
        let server = MockServer::start();
        let missing = server.mock(|when, then| {
            when.method(GET).path("/orders/77");
            then.status(404).json_body(json!({ "error": "No resource found" }));
        });
        let guarded = server.mock(|when, then| {
            when.method(GET).path("/users");
            then.status(401);
        });

        let client = ShopClient::new(&server.base_url()).unwrap();
        assert!(client.get_order(77).await.is_err());
        assert!(client.list_users().await.is_err());

        missing.assert();
        guarded.assert();
    }

    #[tokio::test]
    async fn update_find_and_delete_user() {
        let server = MockServer::start();
        let user = User {
            id: 3,
            ..User::new("ccarter", "pw", "Cal", "Carter", "cc@example.com", Role::User)
        };

        let find_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/users")
                .query_param("email", "cc@example.com");
            then.status(200).json_body_obj(&user.clone().without_password());
        });
        let update_mock = server.mock(|when, then| {
            when.method(httpmock::Method::PATCH).path("/users/3");
            then.status(204);
        });
        let delete_mock = server.mock(|when, then| {
            when.method(DELETE).path("/users/3");
            then.status(204);
        });

        let client = ShopClient::new(&server.base_url()).unwrap();
        let found = client.find_user("email", "cc@example.com").await.unwrap();
        assert_eq!(found.username, "ccarter");
        assert!(found.password.is_none());

        client.update_user(&user).await.unwrap();
        client.delete_user(3).await.unwrap();

        find_mock.assert();
        update_mock.assert();
        delete_mock.assert();
    }
}
