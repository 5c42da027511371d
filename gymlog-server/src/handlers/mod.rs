pub mod auth;
pub mod deprecated;
pub mod exercises;
pub mod records;
pub mod sets;
pub mod workouts;

use axum::Json;
use serde_json::{Value, json};

pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
