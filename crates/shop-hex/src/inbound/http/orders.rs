use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

use super::server::AppState;
use super::session::AdminPrincipal;
use crate::application::order_service::OrderService;
use crate::errors::AppError;
use shop_types::domain::item::Item;
use shop_types::domain::order::Order;
use shop_types::ports::ShopRepository;
use shop_types::validator::to_number;

pub(super) fn routes<R: ShopRepository>() -> Router<AppState<R>> {
    Router::new()
        .route("/orders", get(get_all_orders::<R>).post(add_order::<R>))
        .route(
            "/orders/{id}",
            get(get_order::<R>)
                .patch(update_order::<R>)
                .delete(delete_order::<R>),
        )
        .route("/orders/{id}/items", get(get_order_items::<R>))
}

async fn get_all_orders<R: ShopRepository>(
    _admin: AdminPrincipal,
    State(service): State<Arc<OrderService<R>>>,
) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(service.get_all_orders().await?))
}

async fn get_order<R: ShopRepository>(
    State(service): State<Arc<OrderService<R>>>,
    Path(id): Path<String>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(service.get_order_by_id(to_number(&id)).await?))
}

async fn get_order_items<R: ShopRepository>(
    State(service): State<Arc<OrderService<R>>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Item>>, AppError> {
    Ok(Json(service.get_items_by_order_id(to_number(&id)).await?))
}

async fn add_order<R: ShopRepository>(
    State(service): State<Arc<OrderService<R>>>,
    payload: Result<Json<Order>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let Json(order) = payload?;
    let created = service.add_new_order(order).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_order<R: ShopRepository>(
    State(service): State<Arc<OrderService<R>>>,
    Path(id): Path<String>,
    payload: Result<Json<Order>, JsonRejection>,
) -> Result<(StatusCode, Json<bool>), AppError> {
    let Json(order) = payload?;
    let updated = service.update_order(to_number(&id), order).await?;
    Ok((StatusCode::NO_CONTENT, Json(updated)))
}

async fn delete_order<R: ShopRepository>(
    State(service): State<Arc<OrderService<R>>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<bool>), AppError> {
    let deleted = service.delete_by_id(to_number(&id)).await?;
    Ok((StatusCode::NO_CONTENT, Json(deleted)))
}
