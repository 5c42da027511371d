use super::ownership::{OwnedEntity, authorize, ensure_same_user};
use super::requests::NewRecordRequest;
use super::views::PersonalRecordView;
use super::{Tracker, require_user};
use crate::db::models::NewPersonalRecord;
use crate::db::operations;
use crate::error::{Result, TrackerError};

impl Tracker {
    pub fn personal_records(&self, caller: i32, user_id: i32) -> Result<Vec<PersonalRecordView>> {
        ensure_same_user(caller, user_id)?;
        self.read(|conn| {
            Ok(operations::personal_records_for_user(conn, user_id)?
                .into_iter()
                .map(|(record, exercise)| PersonalRecordView { record, exercise })
                .collect())
        })
    }

    /// Records are never derived from sets; an external writer stores them here.
    pub fn record_personal_record(
        &self,
        caller: i32,
        req: NewRecordRequest,
    ) -> Result<PersonalRecordView> {
        if !req.value.is_finite() || req.value < 0.0 {
            return Err(TrackerError::validation("value must be a non-negative number"));
        }
        self.write(|conn| {
            require_user(conn, caller)?;
            let exercise = operations::get_exercise(conn, req.exercise_id)?
                .ok_or_else(|| TrackerError::not_found("Exercise"))?;
            if let Some(session_id) = req.workout_session_id {
                authorize(conn, caller, OwnedEntity::Workout(session_id))?;
            }
            let record = operations::insert_personal_record(
                conn,
                &NewPersonalRecord {
                    user_id: caller,
                    exercise_id: exercise.id,
                    record_type: req.record_type.as_str().to_string(),
                    value: req.value,
                    achieved_date: operations::now(),
                    workout_session_id: req.workout_session_id,
                },
            )?;
            Ok(PersonalRecordView { record, exercise })
        })
    }
}
