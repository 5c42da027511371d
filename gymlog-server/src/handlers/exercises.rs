use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use gymlog::db::models::Exercise;
use gymlog::tracker::requests::{ExerciseFilter, NewExerciseRequest};

use crate::error::ApiError;
use crate::extract::{AuthUser, ValidJson, ValidPath, ValidQuery};
use crate::{AppState, run};

pub async fn list(
    State(state): State<AppState>,
    ValidQuery(filter): ValidQuery<ExerciseFilter>,
) -> Result<Json<Vec<Exercise>>, ApiError> {
    Ok(Json(run(&state, move |t| t.list_exercises(&filter)).await?))
}

pub async fn get_one(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> Result<Json<Exercise>, ApiError> {
    Ok(Json(run(&state, move |t| t.get_exercise(id)).await?))
}

pub async fn create(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidJson(req): ValidJson<NewExerciseRequest>,
) -> Result<(StatusCode, Json<Exercise>), ApiError> {
    let exercise = run(&state, move |t| t.create_custom_exercise(caller, req)).await?;
    Ok((StatusCode::CREATED, Json(exercise)))
}

pub async fn muscle_groups(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(run(&state, |t| t.muscle_groups()).await?))
}

pub async fn equipment(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(run(&state, |t| t.equipment()).await?))
}
