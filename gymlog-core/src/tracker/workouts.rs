use log::info;

use super::ownership::{OwnedEntity, authorize, ensure_same_user};
use super::requests::{AddExerciseRequest, StartWorkoutRequest, UpdateWorkoutRequest};
use super::views::{WorkoutExerciseView, WorkoutView, load_workout, load_workout_exercise, load_workouts};
use super::{Tracker, require_user};
use crate::db::models::{NewWorkoutExercise, NewWorkoutSession, UpdateWorkoutSession};
use crate::db::operations;
use crate::error::{Result, TrackerError};

const DEFAULT_WORKOUT_NAME: &str = "Workout";

impl Tracker {
    /// Open a new session for `caller`. At most one session per user may be open.
    pub fn start_workout(&self, caller: i32, req: StartWorkoutRequest) -> Result<WorkoutView> {
        let view = self.write(|conn| {
            require_user(conn, caller)?;
            if let Some(open) = operations::find_open_session(conn, caller)? {
                return Err(TrackerError::conflict(format!(
                    "Workout {} is still in progress; finish it before starting another",
                    open.id
                )));
            }
            let session = operations::insert_workout_session(
                conn,
                &NewWorkoutSession {
                    user_id: caller,
                    name: Some(req.name.unwrap_or_else(|| DEFAULT_WORKOUT_NAME.to_string())),
                    start_time: operations::now(),
                    notes: Some(req.notes.unwrap_or_default()),
                },
            )?;
            Ok(load_workout(conn, session)?)
        })?;
        info!("User {} started workout {}", caller, view.session.id);
        Ok(view)
    }

    pub fn active_workout(&self, caller: i32) -> Result<Option<WorkoutView>> {
        self.read(|conn| match operations::find_open_session(conn, caller)? {
            Some(session) => Ok(Some(load_workout(conn, session)?)),
            None => Ok(None),
        })
    }

    pub fn get_workout(&self, caller: i32, workout_id: i32) -> Result<WorkoutView> {
        self.read(|conn| {
            authorize(conn, caller, OwnedEntity::Workout(workout_id))?;
            let session = operations::get_workout_session(conn, workout_id)?
                .ok_or_else(|| TrackerError::not_found("Workout"))?;
            Ok(load_workout(conn, session)?)
        })
    }

    /// Edit name and notes. `finish` (or a truthy `end_time` in the request) ends the
    /// session now.
    pub fn update_workout(
        &self,
        caller: i32,
        workout_id: i32,
        req: UpdateWorkoutRequest,
        finish: bool,
    ) -> Result<WorkoutView> {
        let ends = finish || req.requests_finish();
        self.write(|conn| {
            authorize(conn, caller, OwnedEntity::Workout(workout_id))?;
            let changes = UpdateWorkoutSession {
                name: req.name,
                notes: req.notes,
                end_time: ends.then(|| Some(operations::now())),
            };
            let session = operations::update_workout_session(conn, workout_id, &changes)?;
            if ends {
                info!("User {} finished workout {}", caller, workout_id);
            }
            Ok(load_workout(conn, session)?)
        })
    }

    /// All sessions of `user_id`, newest first. Only the user themself may list them.
    pub fn user_workouts(&self, caller: i32, user_id: i32) -> Result<Vec<WorkoutView>> {
        ensure_same_user(caller, user_id)?;
        self.read(|conn| {
            let sessions = operations::list_user_sessions(conn, user_id)?;
            Ok(load_workouts(conn, sessions)?)
        })
    }

    /// Append a catalog exercise to the workout, after every existing entry.
    pub fn add_exercise(
        &self,
        caller: i32,
        workout_id: i32,
        req: AddExerciseRequest,
    ) -> Result<WorkoutExerciseView> {
        let exercise_id = req
            .exercise_id
            .ok_or_else(|| TrackerError::validation("exercise_id is required"))?;
        self.write(|conn| {
            authorize(conn, caller, OwnedEntity::Workout(workout_id))?;
            let exercise = operations::get_exercise(conn, exercise_id)?
                .ok_or_else(|| TrackerError::not_found("Exercise"))?;
            let next_order = operations::max_order_in_workout(conn, workout_id)?.unwrap_or(0) + 1;
            let entry = operations::insert_workout_exercise(
                conn,
                &NewWorkoutExercise {
                    session_id: workout_id,
                    exercise_id,
                    order_in_workout: next_order,
                },
            )?;
            Ok(load_workout_exercise(conn, entry, exercise)?)
        })
    }

    /// Remove an entry from its workout together with all of its sets.
    pub fn remove_exercise(&self, caller: i32, workout_exercise_id: i32) -> Result<()> {
        self.write(|conn| {
            authorize(conn, caller, OwnedEntity::WorkoutExercise(workout_exercise_id))?;
            operations::delete_workout_exercise(conn, workout_exercise_id)?;
            Ok(())
        })
    }
}
