use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use gymlog::db::models::ExerciseSet;
use gymlog::tracker::requests::{NewSetRequest, UpdateSetRequest};

use crate::error::ApiError;
use crate::extract::{AuthUser, ValidJson, ValidPath};
use crate::{AppState, run};

pub async fn add(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidPath(workout_exercise_id): ValidPath<i32>,
    ValidJson(req): ValidJson<NewSetRequest>,
) -> Result<(StatusCode, Json<ExerciseSet>), ApiError> {
    let set = run(&state, move |t| t.add_set(caller, workout_exercise_id, req)).await?;
    Ok((StatusCode::CREATED, Json(set)))
}

pub async fn update(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidPath(id): ValidPath<i32>,
    ValidJson(req): ValidJson<UpdateSetRequest>,
) -> Result<Json<ExerciseSet>, ApiError> {
    Ok(Json(run(&state, move |t| t.update_set(caller, id, req)).await?))
}

/// Remaining sets are renumbered before the response is sent.
pub async fn remove(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidPath(id): ValidPath<i32>,
) -> Result<StatusCode, ApiError> {
    run(&state, move |t| t.delete_set(caller, id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
