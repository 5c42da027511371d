//! Typed request payloads. Presence of a field is checked at deserialization,
//! business rules in the tracker operations.

use serde::{Deserialize, Deserializer};

use crate::db::models::RecordType;

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
/// Pair with `#[serde(default)]`.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Trimmed value, `None` when absent or blank.
pub(crate) fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub profile_picture: Option<Option<String>>,
}

/// Query string of `GET /exercises`. Blank values are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExerciseFilter {
    pub muscle_group: Option<String>,
    pub equipment: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewExerciseRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub muscle_group: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub equipment: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartWorkoutRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWorkoutRequest {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub notes: Option<Option<String>>,
    /// Any truthy value ends the workout now; the value itself is not used.
    #[serde(default)]
    pub end_time: Option<serde_json::Value>,
}

impl UpdateWorkoutRequest {
    pub fn requests_finish(&self) -> bool {
        use serde_json::Value;
        match &self.end_time {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(a)) => !a.is_empty(),
            Some(Value::Object(o)) => !o.is_empty(),
            Some(Value::Bool(true)) => true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddExerciseRequest {
    #[serde(default)]
    pub exercise_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewSetRequest {
    #[serde(default)]
    pub reps: Option<i32>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub duration: Option<i32>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub rest_time: Option<i32>,
    #[serde(default)]
    pub set_type: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSetRequest {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub reps: Option<Option<i32>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub weight: Option<Option<f64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub duration: Option<Option<i32>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub distance: Option<Option<f64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub rest_time: Option<Option<i32>>,
    /// `null` leaves the type untouched; the column is not nullable.
    #[serde(default)]
    pub set_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub notes: Option<Option<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewRecordRequest {
    pub exercise_id: i32,
    pub record_type: RecordType,
    pub value: f64,
    #[serde(default)]
    pub workout_session_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_null_and_value_are_distinct() {
        let req: UpdateSetRequest =
            serde_json::from_value(json!({"reps": 10, "weight": null})).unwrap();
        assert_eq!(req.reps, Some(Some(10)));
        assert_eq!(req.weight, Some(None));
        assert_eq!(req.duration, None);
        assert_eq!(req.notes, None);
    }

    #[test]
    fn end_time_truthiness() {
        let finish = |v: serde_json::Value| {
            serde_json::from_value::<UpdateWorkoutRequest>(v)
                .unwrap()
                .requests_finish()
        };
        assert!(finish(json!({"end_time": "2025-01-01T10:00:00"})));
        assert!(finish(json!({"end_time": true})));
        assert!(!finish(json!({"end_time": null})));
        assert!(!finish(json!({"end_time": ""})));
        assert!(!finish(json!({"end_time": 0})));
        assert!(!finish(json!({"notes": "x"})));
    }

    #[test]
    fn trimmed_drops_blank() {
        assert_eq!(trimmed(Some("  bob ")).as_deref(), Some("bob"));
        assert_eq!(trimmed(Some("   ")), None);
        assert_eq!(trimmed(None), None);
    }
}
