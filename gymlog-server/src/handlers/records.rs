use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use gymlog::tracker::PersonalRecordView;
use gymlog::tracker::requests::NewRecordRequest;

use crate::error::ApiError;
use crate::extract::{AuthUser, ValidJson, ValidPath};
use crate::{AppState, run};

pub async fn for_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidPath(user_id): ValidPath<i32>,
) -> Result<Json<Vec<PersonalRecordView>>, ApiError> {
    Ok(Json(
        run(&state, move |t| t.personal_records(caller, user_id)).await?,
    ))
}

pub async fn create(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidJson(req): ValidJson<NewRecordRequest>,
) -> Result<(StatusCode, Json<PersonalRecordView>), ApiError> {
    let record = run(&state, move |t| t.record_personal_record(caller, req)).await?;
    Ok((StatusCode::CREATED, Json(record)))
}
