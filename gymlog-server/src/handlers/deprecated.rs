use gymlog::TrackerError;

use crate::error::ApiError;
use crate::extract::ValidPath;

/// Replacement route for a legacy `/_deprecated/...` path.
fn replacement(rest: &str) -> Option<&'static str> {
    let segments: Vec<&str> = rest.trim_matches('/').split('/').collect();
    match segments.as_slice() {
        ["users"] => Some("/api/register, /api/login, /api/me"),
        ["users", _, "workouts"] => Some("/api/users/{id}/workouts"),
        ["users", _, "personal-records"] => Some("/api/users/{id}/personal-records"),
        ["users", _] => Some("/api/me"),
        ["workouts", ..] => Some("/api/workouts"),
        ["workout-exercises", ..] => Some("/api/workout-exercises"),
        ["sets", ..] => Some("/api/sets"),
        _ => None,
    }
}

pub async fn gone(ValidPath(rest): ValidPath<String>) -> ApiError {
    let message = match replacement(&rest) {
        Some(route) => format!("Deprecated: use {}", route),
        None => "Deprecated endpoint".to_string(),
    };
    ApiError::from(TrackerError::Deprecated(message))
}
