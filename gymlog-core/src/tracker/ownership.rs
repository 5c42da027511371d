//! Owner-chain resolution: set → workout exercise → workout session → user.
//!
//! Missing records are `NotFound`; records that exist but belong to someone else are
//! `Forbidden`. Every endpoint uses the same rule.

use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;

use crate::db::schema::{exercise_sets, workout_exercises, workout_sessions};
use crate::error::{Result, TrackerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnedEntity {
    Workout(i32),
    WorkoutExercise(i32),
    Set(i32),
}

impl OwnedEntity {
    pub fn label(&self) -> &'static str {
        match self {
            OwnedEntity::Workout(_) => "Workout",
            OwnedEntity::WorkoutExercise(_) => "Workout exercise",
            OwnedEntity::Set(_) => "Set",
        }
    }
}

/// User id at the top of the entity's owner chain, `None` if the entity does not exist.
pub fn resolve_owner(conn: &mut SqliteConnection, entity: OwnedEntity) -> QueryResult<Option<i32>> {
    match entity {
        OwnedEntity::Workout(id) => workout_sessions::table
            .find(id)
            .select(workout_sessions::user_id)
            .first(conn)
            .optional(),
        OwnedEntity::WorkoutExercise(id) => workout_exercises::table
            .inner_join(workout_sessions::table)
            .filter(workout_exercises::id.eq(id))
            .select(workout_sessions::user_id)
            .first(conn)
            .optional(),
        OwnedEntity::Set(id) => exercise_sets::table
            .inner_join(workout_exercises::table.inner_join(workout_sessions::table))
            .filter(exercise_sets::id.eq(id))
            .select(workout_sessions::user_id)
            .first(conn)
            .optional(),
    }
}

pub fn authorize(conn: &mut SqliteConnection, caller: i32, entity: OwnedEntity) -> Result<()> {
    match resolve_owner(conn, entity)? {
        None => Err(TrackerError::not_found(entity.label())),
        Some(owner) if owner == caller => Ok(()),
        Some(owner) => {
            debug!("User {} denied access to {:?} owned by {}", caller, entity, owner);
            Err(TrackerError::access_denied())
        }
    }
}

/// For `/users/{id}/...` routes: the path identity must be the caller.
pub fn ensure_same_user(caller: i32, user_id: i32) -> Result<()> {
    if caller == user_id {
        Ok(())
    } else {
        Err(TrackerError::access_denied())
    }
}
