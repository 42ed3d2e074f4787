use axum::extract::FromRef;
use axum::{routing::get, serve, Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use super::session::SessionStore;
use super::{auth, items, orders, users};
use crate::application::item_service::ItemService;
use crate::application::order_service::OrderService;
use crate::application::user_service::UserService;
use shop_types::ports::ShopRepository;

#[derive(Clone)]
pub struct HttpServerConfig {
    pub port: String,
    pub session_ttl_secs: i64,
}

/// Shared handler state. Handlers pull out the piece they need via `FromRef`.
pub struct AppState<R: ShopRepository> {
    pub users: Arc<UserService<R>>,
    pub orders: Arc<OrderService<R>>,
    pub items: Arc<ItemService<R>>,
    pub sessions: SessionStore,
}

impl<R: ShopRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            orders: self.orders.clone(),
            items: self.items.clone(),
            sessions: self.sessions.clone(),
        }
    }
}

impl<R: ShopRepository> FromRef<AppState<R>> for Arc<UserService<R>> {
    fn from_ref(state: &AppState<R>) -> Self {
        state.users.clone()
    }
}

impl<R: ShopRepository> FromRef<AppState<R>> for Arc<OrderService<R>> {
    fn from_ref(state: &AppState<R>) -> Self {
        state.orders.clone()
    }
}

impl<R: ShopRepository> FromRef<AppState<R>> for Arc<ItemService<R>> {
    fn from_ref(state: &AppState<R>) -> Self {
        state.items.clone()
    }
}

impl<R: ShopRepository> FromRef<AppState<R>> for SessionStore {
    fn from_ref(state: &AppState<R>) -> Self {
        state.sessions.clone()
    }
}

pub struct HttpServer<R: ShopRepository> {
    pub state: AppState<R>,
    pub config: HttpServerConfig,
}

impl<R: ShopRepository> HttpServer<R> {
    pub async fn new(repo: R, config: HttpServerConfig) -> anyhow::Result<Self> {
        let state = AppState {
            users: Arc::new(UserService::new(repo.clone())),
            orders: Arc::new(OrderService::new(repo.clone())),
            items: Arc::new(ItemService::new(repo)),
            sessions: SessionStore::new(config.session_ttl_secs),
        };
        Ok(Self { state, config })
    }

    pub fn router(&self) -> Router {
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &axum::extract::Request<_>| {
                let uri = request.uri().to_string();
                let request_id = Uuid::new_v4();
                tracing::info_span!(
                    "http_request",
                    %request_id,
                    method = %request.method(),
                    uri
                )
            })
            .on_request(
                |request: &axum::extract::Request<_>, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        method = %request.method(),
                        uri = %request.uri(),
                        "request"
                    );
                },
            )
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        status = %response.status(),
                        latency_ms = %latency.as_millis(),
                        "response"
                    );
                },
            );

        Router::new()
            .route("/health", get(health))
            .merge(items::routes::<R>())
            .merge(orders::routes::<R>())
            .merge(users::routes::<R>())
            .merge(auth::routes::<R>())
            .layer(CorsLayer::very_permissive())
            .layer(trace_layer)
            .with_state(self.state.clone())
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let app = self.router();
        let addr: SocketAddr = format!("0.0.0.0:{}", self.config.port).parse()?;
        tracing::info!("starting server on {}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        serve(listener, app.into_make_service()).await?;
        Ok(())
    }
}

async fn health() -> (axum::http::StatusCode, Json<serde_json::Value>) {
    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({ "status": "ok" })),
    )
}
