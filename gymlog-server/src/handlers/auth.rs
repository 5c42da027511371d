use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use gymlog::db::models::User;
use gymlog::tracker::AuthSession;
use gymlog::tracker::requests::{LoginRequest, RegisterRequest, UpdateProfileRequest};

use crate::error::ApiError;
use crate::extract::{AuthUser, ValidJson};
use crate::{AppState, run};

pub async fn register(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthSession>), ApiError> {
    let session = run(&state, move |t| t.register(req)).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn login(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> Result<Json<AuthSession>, ApiError> {
    Ok(Json(run(&state, move |t| t.login(req)).await?))
}

pub async fn me(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<User>, ApiError> {
    Ok(Json(run(&state, move |t| t.current_user(caller)).await?))
}

pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidJson(req): ValidJson<UpdateProfileRequest>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(
        run(&state, move |t| t.update_current_user(caller, req)).await?,
    ))
}
