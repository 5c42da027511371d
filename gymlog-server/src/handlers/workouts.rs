use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gymlog::tracker::requests::{AddExerciseRequest, StartWorkoutRequest, UpdateWorkoutRequest};
use gymlog::tracker::{WorkoutExerciseView, WorkoutView};

use crate::error::ApiError;
use crate::extract::{AuthUser, ValidJson, ValidPath};
use crate::{AppState, run};

pub async fn start(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidJson(req): ValidJson<StartWorkoutRequest>,
) -> Result<(StatusCode, Json<WorkoutView>), ApiError> {
    let workout = run(&state, move |t| t.start_workout(caller, req)).await?;
    Ok((StatusCode::CREATED, Json(workout)))
}

/// 204 with an empty body when no session is open.
pub async fn active(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Response, ApiError> {
    Ok(match run(&state, move |t| t.active_workout(caller)).await? {
        Some(workout) => Json(workout).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

pub async fn get_one(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidPath(id): ValidPath<i32>,
) -> Result<Json<WorkoutView>, ApiError> {
    Ok(Json(run(&state, move |t| t.get_workout(caller, id)).await?))
}

/// PUT ends the workout.
pub async fn finish(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidPath(id): ValidPath<i32>,
    ValidJson(req): ValidJson<UpdateWorkoutRequest>,
) -> Result<Json<WorkoutView>, ApiError> {
    Ok(Json(
        run(&state, move |t| t.update_workout(caller, id, req, true)).await?,
    ))
}

pub async fn edit(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidPath(id): ValidPath<i32>,
    ValidJson(req): ValidJson<UpdateWorkoutRequest>,
) -> Result<Json<WorkoutView>, ApiError> {
    Ok(Json(
        run(&state, move |t| t.update_workout(caller, id, req, false)).await?,
    ))
}

pub async fn add_exercise(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidPath(id): ValidPath<i32>,
    ValidJson(req): ValidJson<AddExerciseRequest>,
) -> Result<(StatusCode, Json<WorkoutExerciseView>), ApiError> {
    let entry = run(&state, move |t| t.add_exercise(caller, id, req)).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn remove_exercise(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidPath(id): ValidPath<i32>,
) -> Result<StatusCode, ApiError> {
    run(&state, move |t| t.remove_exercise(caller, id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn for_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidPath(user_id): ValidPath<i32>,
) -> Result<Json<Vec<WorkoutView>>, ApiError> {
    Ok(Json(
        run(&state, move |t| t.user_workouts(caller, user_id)).await?,
    ))
}
