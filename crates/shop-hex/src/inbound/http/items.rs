use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

use super::server::AppState;
use super::session::AdminPrincipal;
use crate::application::item_service::ItemService;
use crate::errors::AppError;
use shop_types::domain::item::Item;
use shop_types::ports::ShopRepository;
use shop_types::validator::to_number;

pub(super) fn routes<R: ShopRepository>() -> Router<AppState<R>> {
    Router::new()
        .route("/items", get(get_all_items::<R>))
        .route(
            "/items/{id}",
            get(get_item::<R>)
                .post(add_item::<R>)
                .patch(update_item::<R>)
                .delete(delete_item::<R>),
        )
}

async fn get_all_items<R: ShopRepository>(
    _admin: AdminPrincipal,
    State(service): State<Arc<ItemService<R>>>,
) -> Result<Json<Vec<Item>>, AppError> {
    Ok(Json(service.get_all_items().await?))
}

async fn get_item<R: ShopRepository>(
    State(service): State<Arc<ItemService<R>>>,
    Path(id): Path<String>,
) -> Result<Json<Item>, AppError> {
    Ok(Json(service.get_item_by_id(to_number(&id)).await?))
}

// The path id names the order the new item is added to.
async fn add_item<R: ShopRepository>(
    State(service): State<Arc<ItemService<R>>>,
    Path(order_id): Path<String>,
    payload: Result<Json<Item>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), AppError> {
    let Json(item) = payload?;
    let created = service.add_new_item(item, to_number(&order_id)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_item<R: ShopRepository>(
    State(service): State<Arc<ItemService<R>>>,
    Path(id): Path<String>,
    payload: Result<Json<Item>, JsonRejection>,
) -> Result<(StatusCode, Json<bool>), AppError> {
    let Json(item) = payload?;
    let updated = service.update_item(to_number(&id), item).await?;
    Ok((StatusCode::NO_CONTENT, Json(updated)))
}

async fn delete_item<R: ShopRepository>(
    State(service): State<Arc<ItemService<R>>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<bool>), AppError> {
    let deleted = service.delete_by_id(to_number(&id)).await?;
    Ok((StatusCode::NO_CONTENT, Json(deleted)))
}
