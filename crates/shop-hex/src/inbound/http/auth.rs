use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;

use super::server::AppState;
use super::session::{cleared_cookie, session_cookie, session_id, SessionStore};
use crate::application::user_service::UserService;
use crate::errors::AppError;
use shop_types::domain::principal::Principal;
use shop_types::ports::ShopRepository;

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

pub(super) fn routes<R: ShopRepository>() -> Router<AppState<R>> {
    Router::new().route("/auth", get(logout).post(login::<R>))
}

async fn login<R: ShopRepository>(
    State(service): State<Arc<UserService<R>>>,
    State(sessions): State<SessionStore>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<(StatusCode, [(axum::http::HeaderName, String); 1], Json<Principal>), AppError> {
    let Json(creds) = payload?;
    let user = service
        .authenticate_user(&creds.username, &creds.password)
        .await?;
    let principal = Principal::from(&user);
    let sid = sessions.create(principal.clone());
    Ok((
        StatusCode::OK,
        [(SET_COOKIE, session_cookie(sid))],
        Json(principal),
    ))
}

async fn logout(
    State(sessions): State<SessionStore>,
    headers: HeaderMap,
) -> (StatusCode, [(axum::http::HeaderName, String); 1]) {
    if let Some(sid) = session_id(&headers) {
        sessions.remove(&sid);
    }
    (StatusCode::NO_CONTENT, [(SET_COOKIE, cleared_cookie())])
}
