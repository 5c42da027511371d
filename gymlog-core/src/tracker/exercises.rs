use log::info;

use super::requests::{ExerciseFilter, NewExerciseRequest, trimmed};
use super::{Tracker, require_user};
use crate::db::models::{Difficulty, Exercise, NewExercise};
use crate::db::operations;
use crate::error::{Result, TrackerError};

impl Tracker {
    pub fn list_exercises(&self, filter: &ExerciseFilter) -> Result<Vec<Exercise>> {
        let muscle_group = trimmed(filter.muscle_group.as_deref());
        let equipment = trimmed(filter.equipment.as_deref());
        let search = trimmed(filter.search.as_deref());
        self.read(|conn| {
            Ok(operations::search_exercises(
                conn,
                muscle_group.as_deref(),
                equipment.as_deref(),
                search.as_deref(),
            )?)
        })
    }

    pub fn get_exercise(&self, exercise_id: i32) -> Result<Exercise> {
        self.read(|conn| {
            operations::get_exercise(conn, exercise_id)?
                .ok_or_else(|| TrackerError::not_found("Exercise"))
        })
    }

    pub fn create_custom_exercise(&self, caller: i32, req: NewExerciseRequest) -> Result<Exercise> {
        let (Some(name), Some(muscle_group)) =
            (trimmed(req.name.as_deref()), trimmed(req.muscle_group.as_deref()))
        else {
            return Err(TrackerError::validation("name and muscle_group are required"));
        };
        let difficulty = match trimmed(req.difficulty.as_deref()) {
            None => None,
            Some(raw) => Some(Difficulty::parse(&raw).ok_or_else(|| {
                TrackerError::validation("difficulty must be beginner, intermediate or advanced")
            })?),
        };

        let exercise = self.write(|conn| {
            require_user(conn, caller)?;
            Ok(operations::insert_exercise(
                conn,
                &NewExercise {
                    name,
                    description: req.description,
                    muscle_group,
                    equipment: trimmed(req.equipment.as_deref()),
                    difficulty: difficulty.map(|d| d.as_str().to_string()),
                    instructions: req.instructions,
                    is_custom: true,
                    created_by: Some(caller),
                },
            )?)
        })?;
        info!("User {} created exercise '{}' ({})", caller, exercise.name, exercise.id);
        Ok(exercise)
    }

    pub fn muscle_groups(&self) -> Result<Vec<String>> {
        self.read(|conn| Ok(operations::distinct_muscle_groups(conn)?))
    }

    pub fn equipment(&self) -> Result<Vec<String>> {
        self.read(|conn| Ok(operations::distinct_equipment(conn)?))
    }
}
