use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

use super::server::AppState;
use super::session::AdminPrincipal;
use crate::application::order_service::OrderService;
use crate::application::user_service::UserService;
use crate::errors::AppError;
use shop_types::domain::order::Order;
use shop_types::domain::user::User;
use shop_types::ports::ShopRepository;
use shop_types::validator::{is_empty_object, to_number};

pub(super) fn routes<R: ShopRepository>() -> Router<AppState<R>> {
    Router::new()
        .route("/users", get(get_users::<R>).post(add_user::<R>))
        .route(
            "/users/{id}",
            get(get_user::<R>)
                .patch(update_user::<R>)
                .delete(delete_user::<R>),
        )
        .route("/users/{id}/orders", get(get_user_orders::<R>))
}

/// Lists every user, or looks one up when a query pair is given
/// (`/users?username=...`).
async fn get_users<R: ShopRepository>(
    _admin: AdminPrincipal,
    State(service): State<Arc<UserService<R>>>,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    if is_empty_object(&query) {
        Ok(Json(service.get_all_users().await?).into_response())
    } else {
        Ok(Json(service.get_user_by_unique_key(&query).await?).into_response())
    }
}

async fn get_user<R: ShopRepository>(
    _admin: AdminPrincipal,
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    Ok(Json(service.get_user_by_id(to_number(&id)).await?))
}

async fn get_user_orders<R: ShopRepository>(
    _admin: AdminPrincipal,
    State(service): State<Arc<OrderService<R>>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(service.get_orders_by_user_id(to_number(&id)).await?))
}

async fn add_user<R: ShopRepository>(
    State(service): State<Arc<UserService<R>>>,
    payload: Result<Json<User>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let Json(user) = payload?;
    let created = service.add_new_user(user).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_user<R: ShopRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<String>,
    payload: Result<Json<User>, JsonRejection>,
) -> Result<(StatusCode, Json<bool>), AppError> {
    let Json(user) = payload?;
    let updated = service.update_user(to_number(&id), user).await?;
    Ok((StatusCode::NO_CONTENT, Json(updated)))
}

async fn delete_user<R: ShopRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<bool>), AppError> {
    let deleted = service.delete_by_id(to_number(&id)).await?;
    Ok((StatusCode::NO_CONTENT, Json(deleted)))
}
