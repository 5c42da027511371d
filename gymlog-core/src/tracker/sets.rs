use log::debug;

use super::Tracker;
use super::ownership::{OwnedEntity, authorize};
use super::requests::{NewSetRequest, UpdateSetRequest};
use crate::db::models::{ExerciseSet, NewExerciseSet, SetType, UpdateExerciseSet};
use crate::db::operations;
use crate::error::{Result, TrackerError};

fn parse_set_type(raw: Option<&str>) -> Result<Option<SetType>> {
    match raw {
        None => Ok(None),
        Some(value) => SetType::parse(value).map(Some).ok_or_else(|| {
            TrackerError::validation("set_type must be one of normal, warmup, dropset, superset")
        }),
    }
}

impl Tracker {
    /// Append a set; it is numbered after the current highest set number.
    pub fn add_set(
        &self,
        caller: i32,
        workout_exercise_id: i32,
        req: NewSetRequest,
    ) -> Result<ExerciseSet> {
        let set_type = parse_set_type(req.set_type.as_deref())?.unwrap_or_default();
        self.write(|conn| {
            authorize(conn, caller, OwnedEntity::WorkoutExercise(workout_exercise_id))?;
            let next = operations::max_set_number(conn, workout_exercise_id)?.unwrap_or(0) + 1;
            Ok(operations::insert_set(
                conn,
                &NewExerciseSet {
                    workout_exercise_id,
                    set_number: next,
                    reps: req.reps,
                    weight: req.weight,
                    duration: req.duration,
                    distance: req.distance,
                    rest_time: req.rest_time,
                    set_type: set_type.as_str().to_string(),
                    notes: Some(req.notes.unwrap_or_default()),
                },
            )?)
        })
    }

    pub fn update_set(&self, caller: i32, set_id: i32, req: UpdateSetRequest) -> Result<ExerciseSet> {
        let set_type = parse_set_type(req.set_type.as_deref())?;
        self.write(|conn| {
            authorize(conn, caller, OwnedEntity::Set(set_id))?;
            let changes = UpdateExerciseSet {
                reps: req.reps,
                weight: req.weight,
                duration: req.duration,
                distance: req.distance,
                rest_time: req.rest_time,
                set_type: set_type.map(|t| t.as_str().to_string()),
                notes: req.notes,
            };
            Ok(operations::update_set(conn, set_id, &changes)?)
        })
    }

    /// Delete a set and close the gap it leaves, in the same transaction.
    pub fn delete_set(&self, caller: i32, set_id: i32) -> Result<()> {
        self.write(|conn| {
            authorize(conn, caller, OwnedEntity::Set(set_id))?;
            let set = operations::get_set(conn, set_id)?
                .ok_or_else(|| TrackerError::not_found("Set"))?;
            operations::delete_set(conn, set_id)?;
            let moved = operations::renumber_sets(conn, set.workout_exercise_id)?;
            debug!(
                "Deleted set {} of workout exercise {}, renumbered {}",
                set_id, set.workout_exercise_id, moved
            );
            Ok(())
        })
    }
}
