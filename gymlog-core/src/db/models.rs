use chrono::NaiveDateTime;
use diesel::{AsChangeset, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::db::schema;

// User models
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, Serialize)]
#[diesel(table_name = schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub profile_picture: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = schema::users)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub profile_picture: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = schema::users)]
pub struct UpdateUser {
    pub email: Option<Option<String>>,
    pub profile_picture: Option<Option<String>>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.profile_picture.is_none()
    }
}

// Exercise models
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, Serialize)]
#[diesel(table_name = schema::exercises)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Exercise {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub muscle_group: String,
    pub equipment: Option<String>,
    pub difficulty: Option<String>,
    pub instructions: Option<String>,
    pub is_custom: bool,
    pub created_by: Option<i32>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = schema::exercises)]
pub struct NewExercise {
    pub name: String,
    pub description: Option<String>,
    pub muscle_group: String,
    pub equipment: Option<String>,
    pub difficulty: Option<String>,
    pub instructions: Option<String>,
    pub is_custom: bool,
    pub created_by: Option<i32>,
}

// Workout session models
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, Serialize)]
#[diesel(table_name = schema::workout_sessions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WorkoutSession {
    pub id: i32,
    pub user_id: i32,
    pub name: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub notes: Option<String>,
}

impl WorkoutSession {
    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }
}

#[derive(Insertable)]
#[diesel(table_name = schema::workout_sessions)]
pub struct NewWorkoutSession {
    pub user_id: i32,
    pub name: Option<String>,
    pub start_time: NaiveDateTime,
    pub notes: Option<String>,
}

#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = schema::workout_sessions)]
pub struct UpdateWorkoutSession {
    pub name: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub end_time: Option<Option<NaiveDateTime>>,
}

impl UpdateWorkoutSession {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.notes.is_none() && self.end_time.is_none()
    }
}

// Workout exercise models
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, Serialize)]
#[diesel(table_name = schema::workout_exercises)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WorkoutExercise {
    pub id: i32,
    pub session_id: i32,
    pub exercise_id: i32,
    pub order_in_workout: i32,
}

#[derive(Insertable)]
#[diesel(table_name = schema::workout_exercises)]
pub struct NewWorkoutExercise {
    pub session_id: i32,
    pub exercise_id: i32,
    pub order_in_workout: i32,
}

// Set models
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, Serialize)]
#[diesel(table_name = schema::exercise_sets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExerciseSet {
    pub id: i32,
    pub workout_exercise_id: i32,
    pub set_number: i32,
    pub reps: Option<i32>,
    pub weight: Option<f64>,
    pub duration: Option<i32>,
    pub distance: Option<f64>,
    pub rest_time: Option<i32>,
    pub set_type: String,
    pub notes: Option<String>,
}

impl fmt::Display for ExerciseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Set {}", self.set_number)?;
        if let Some(weight) = self.weight {
            write!(f, ": {:.1}kg", weight)?;
        }
        if let Some(reps) = self.reps {
            write!(f, " x {} reps", reps)?;
        }
        if let Some(duration) = self.duration {
            write!(f, " {}s", duration)?;
        }
        if let Some(distance) = self.distance {
            write!(f, " {:.2}km", distance)?;
        }
        if self.set_type != SetType::Normal.as_str() {
            write!(f, " ({})", self.set_type)?;
        }
        Ok(())
    }
}

// Helper struct for displaying sets with exercise names
pub struct DisplayableSet {
    pub set: ExerciseSet,
    pub exercise_name: String,
}

impl DisplayableSet {
    pub fn new(set: ExerciseSet, exercise_name: String) -> Self {
        Self { set, exercise_name }
    }
}

impl fmt::Display for DisplayableSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.exercise_name, self.set)
    }
}

#[derive(Insertable)]
#[diesel(table_name = schema::exercise_sets)]
pub struct NewExerciseSet {
    pub workout_exercise_id: i32,
    pub set_number: i32,
    pub reps: Option<i32>,
    pub weight: Option<f64>,
    pub duration: Option<i32>,
    pub distance: Option<f64>,
    pub rest_time: Option<i32>,
    pub set_type: String,
    pub notes: Option<String>,
}

#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = schema::exercise_sets)]
pub struct UpdateExerciseSet {
    pub reps: Option<Option<i32>>,
    pub weight: Option<Option<f64>>,
    pub duration: Option<Option<i32>>,
    pub distance: Option<Option<f64>>,
    pub rest_time: Option<Option<i32>>,
    pub set_type: Option<String>,
    pub notes: Option<Option<String>>,
}

impl UpdateExerciseSet {
    pub fn is_empty(&self) -> bool {
        self.reps.is_none()
            && self.weight.is_none()
            && self.duration.is_none()
            && self.distance.is_none()
            && self.rest_time.is_none()
            && self.set_type.is_none()
            && self.notes.is_none()
    }
}

// Personal record models
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, Serialize)]
#[diesel(table_name = schema::personal_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PersonalRecord {
    pub id: i32,
    pub user_id: i32,
    pub exercise_id: i32,
    pub record_type: String,
    pub value: f64,
    pub achieved_date: NaiveDateTime,
    pub workout_session_id: Option<i32>,
}

#[derive(Insertable)]
#[diesel(table_name = schema::personal_records)]
pub struct NewPersonalRecord {
    pub user_id: i32,
    pub exercise_id: i32,
    pub record_type: String,
    pub value: f64,
    pub achieved_date: NaiveDateTime,
    pub workout_session_id: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }

    /// Case-insensitive, surrounding whitespace ignored. Anything else is "no difficulty".
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "beginner" => Some(Difficulty::Beginner),
            "intermediate" => Some(Difficulty::Intermediate),
            "advanced" => Some(Difficulty::Advanced),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetType {
    #[default]
    Normal,
    Warmup,
    Dropset,
    Superset,
}

impl SetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SetType::Normal => "normal",
            SetType::Warmup => "warmup",
            SetType::Dropset => "dropset",
            SetType::Superset => "superset",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "normal" => Some(SetType::Normal),
            "warmup" => Some(SetType::Warmup),
            "dropset" => Some(SetType::Dropset),
            "superset" => Some(SetType::Superset),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    MaxWeight,
    MaxReps,
    MaxVolume,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::MaxWeight => "max_weight",
            RecordType::MaxReps => "max_reps",
            RecordType::MaxVolume => "max_volume",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parse_is_case_insensitive() {
        assert_eq!(Difficulty::parse(" Advanced "), Some(Difficulty::Advanced));
        assert_eq!(Difficulty::parse("BEGINNER"), Some(Difficulty::Beginner));
        assert_eq!(Difficulty::parse("expert"), None);
        assert_eq!(Difficulty::parse(""), None);
    }

    #[test]
    fn set_display_skips_missing_fields() {
        let set = ExerciseSet {
            id: 1,
            workout_exercise_id: 1,
            set_number: 2,
            reps: Some(8),
            weight: Some(60.0),
            duration: None,
            distance: None,
            rest_time: None,
            set_type: "warmup".into(),
            notes: None,
        };
        assert_eq!(set.to_string(), "Set 2: 60.0kg x 8 reps (warmup)");
        let shown = DisplayableSet::new(set, "Bench Press".into());
        assert_eq!(shown.to_string(), "Bench Press - Set 2: 60.0kg x 8 reps (warmup)");
    }
}
