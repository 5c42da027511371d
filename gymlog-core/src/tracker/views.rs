use diesel::{QueryResult, SqliteConnection};
use serde::Serialize;
use std::collections::HashMap;

use crate::db::models::{
    DisplayableSet, Exercise, ExerciseSet, PersonalRecord, WorkoutExercise, WorkoutSession,
};
use crate::db::operations;

/// A workout session with its exercises in order, each carrying its sets.
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutView {
    #[serde(flatten)]
    pub session: WorkoutSession,
    pub exercises: Vec<WorkoutExerciseView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkoutExerciseView {
    #[serde(flatten)]
    pub entry: WorkoutExercise,
    pub exercise: Exercise,
    pub sets: Vec<ExerciseSet>,
}

impl WorkoutExerciseView {
    pub fn displayable_sets(&self) -> impl Iterator<Item = DisplayableSet> + '_ {
        self.sets
            .iter()
            .map(|set| DisplayableSet::new(set.clone(), self.exercise.name.clone()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonalRecordView {
    #[serde(flatten)]
    pub record: PersonalRecord,
    pub exercise: Exercise,
}

pub(crate) fn load_workout(
    conn: &mut SqliteConnection,
    session: WorkoutSession,
) -> QueryResult<WorkoutView> {
    load_workouts(conn, vec![session])?
        .into_iter()
        .next()
        .ok_or(diesel::result::Error::NotFound)
}

/// Attach exercises and sets to `sessions`, preserving the order of `sessions`.
pub(crate) fn load_workouts(
    conn: &mut SqliteConnection,
    sessions: Vec<WorkoutSession>,
) -> QueryResult<Vec<WorkoutView>> {
    let session_ids: Vec<i32> = sessions.iter().map(|s| s.id).collect();
    let entries = operations::load_workout_entries(conn, &session_ids)?;
    let entry_ids: Vec<i32> = entries.iter().map(|(entry, _)| entry.id).collect();

    let mut sets_by_entry: HashMap<i32, Vec<ExerciseSet>> = HashMap::new();
    for set in operations::sets_for_workout_exercises(conn, &entry_ids)? {
        sets_by_entry
            .entry(set.workout_exercise_id)
            .or_default()
            .push(set);
    }

    let mut entries_by_session: HashMap<i32, Vec<WorkoutExerciseView>> = HashMap::new();
    for (entry, exercise) in entries {
        let sets = sets_by_entry.remove(&entry.id).unwrap_or_default();
        entries_by_session
            .entry(entry.session_id)
            .or_default()
            .push(WorkoutExerciseView {
                entry,
                exercise,
                sets,
            });
    }

    Ok(sessions
        .into_iter()
        .map(|session| WorkoutView {
            exercises: entries_by_session.remove(&session.id).unwrap_or_default(),
            session,
        })
        .collect())
}

pub(crate) fn load_workout_exercise(
    conn: &mut SqliteConnection,
    entry: WorkoutExercise,
    exercise: Exercise,
) -> QueryResult<WorkoutExerciseView> {
    let sets = operations::sets_for_workout_exercise(conn, entry.id)?;
    Ok(WorkoutExerciseView {
        entry,
        exercise,
        sets,
    })
}
