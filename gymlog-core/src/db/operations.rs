use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::{QueryResult, SqliteConnection};

use crate::db::models::{
    Exercise, ExerciseSet, NewExercise, NewExerciseSet, NewPersonalRecord, NewUser,
    NewWorkoutExercise, NewWorkoutSession, PersonalRecord, UpdateExerciseSet, UpdateUser,
    UpdateWorkoutSession, User, WorkoutExercise, WorkoutSession,
};
use crate::db::schema::{
    exercise_sets, exercises, personal_records, users, workout_exercises, workout_sessions,
};

// Users
pub fn insert_user(conn: &mut SqliteConnection, new: &NewUser) -> QueryResult<User> {
    diesel::insert_into(users::table)
        .values(new)
        .returning(User::as_returning())
        .get_result(conn)
}

pub fn get_user(conn: &mut SqliteConnection, user_id: i32) -> QueryResult<Option<User>> {
    users::table
        .find(user_id)
        .select(User::as_select())
        .first(conn)
        .optional()
}

pub fn find_user_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> QueryResult<Option<User>> {
    users::table
        .filter(users::username.eq(username))
        .select(User::as_select())
        .first(conn)
        .optional()
}

/// Another user (not `except_id`) already holding `email`, if any.
pub fn email_taken(
    conn: &mut SqliteConnection,
    email: &str,
    except_id: Option<i32>,
) -> QueryResult<bool> {
    let mut query = users::table
        .filter(users::email.eq(email))
        .select(users::id)
        .into_boxed();
    if let Some(id) = except_id {
        query = query.filter(users::id.ne(id));
    }
    Ok(query.first::<i32>(conn).optional()?.is_some())
}

pub fn update_user(
    conn: &mut SqliteConnection,
    user_id: i32,
    changes: &UpdateUser,
) -> QueryResult<User> {
    if changes.is_empty() {
        return users::table
            .find(user_id)
            .select(User::as_select())
            .first(conn);
    }
    diesel::update(users::table.find(user_id))
        .set(changes)
        .returning(User::as_returning())
        .get_result(conn)
}

// Exercises
pub fn get_exercise(conn: &mut SqliteConnection, exercise_id: i32) -> QueryResult<Option<Exercise>> {
    exercises::table
        .find(exercise_id)
        .select(Exercise::as_select())
        .first(conn)
        .optional()
}

/// Exact, case-sensitive name lookup. Names are not unique at storage level, so the
/// lowest id wins.
pub fn find_exercise_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> QueryResult<Option<Exercise>> {
    exercises::table
        .filter(exercises::name.eq(name))
        .order(exercises::id.asc())
        .select(Exercise::as_select())
        .first(conn)
        .optional()
}

pub fn count_exercises(conn: &mut SqliteConnection) -> QueryResult<i64> {
    exercises::table.count().get_result(conn)
}

pub fn insert_exercise(conn: &mut SqliteConnection, new: &NewExercise) -> QueryResult<Exercise> {
    diesel::insert_into(exercises::table)
        .values(new)
        .returning(Exercise::as_returning())
        .get_result(conn)
}

pub fn insert_exercises(conn: &mut SqliteConnection, batch: &[NewExercise]) -> QueryResult<usize> {
    if batch.is_empty() {
        return Ok(0);
    }
    diesel::insert_into(exercises::table)
        .values(batch)
        .execute(conn)
}

pub fn set_exercise_difficulty(
    conn: &mut SqliteConnection,
    exercise_id: i32,
    difficulty: &str,
) -> QueryResult<usize> {
    diesel::update(exercises::table.find(exercise_id))
        .set(exercises::difficulty.eq(Some(difficulty)))
        .execute(conn)
}

fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Substring filters; SQLite `LIKE` is case-insensitive for ASCII.
pub fn search_exercises(
    conn: &mut SqliteConnection,
    muscle_group: Option<&str>,
    equipment: Option<&str>,
    search: Option<&str>,
) -> QueryResult<Vec<Exercise>> {
    let mut query = exercises::table
        .select(Exercise::as_select())
        .order(exercises::id.asc())
        .into_boxed();
    if let Some(muscle) = muscle_group {
        query = query.filter(exercises::muscle_group.like(like_pattern(muscle)).escape('\\'));
    }
    if let Some(equipment) = equipment {
        query = query.filter(exercises::equipment.like(like_pattern(equipment)).escape('\\'));
    }
    if let Some(search) = search {
        query = query.filter(exercises::name.like(like_pattern(search)).escape('\\'));
    }
    query.load(conn)
}

pub fn distinct_muscle_groups(conn: &mut SqliteConnection) -> QueryResult<Vec<String>> {
    let groups: Vec<String> = exercises::table
        .select(exercises::muscle_group)
        .distinct()
        .order(exercises::muscle_group.asc())
        .load(conn)?;
    Ok(groups.into_iter().filter(|g| !g.trim().is_empty()).collect())
}

pub fn distinct_equipment(conn: &mut SqliteConnection) -> QueryResult<Vec<String>> {
    let equipment: Vec<Option<String>> = exercises::table
        .select(exercises::equipment)
        .filter(exercises::equipment.is_not_null())
        .distinct()
        .order(exercises::equipment.asc())
        .load(conn)?;
    Ok(equipment
        .into_iter()
        .flatten()
        .filter(|e| !e.trim().is_empty())
        .collect())
}

// Workout sessions
pub fn insert_workout_session(
    conn: &mut SqliteConnection,
    new: &NewWorkoutSession,
) -> QueryResult<WorkoutSession> {
    diesel::insert_into(workout_sessions::table)
        .values(new)
        .returning(WorkoutSession::as_returning())
        .get_result(conn)
}

pub fn get_workout_session(
    conn: &mut SqliteConnection,
    session_id: i32,
) -> QueryResult<Option<WorkoutSession>> {
    workout_sessions::table
        .find(session_id)
        .select(WorkoutSession::as_select())
        .first(conn)
        .optional()
}

/// Most recently started session of `user_id` that has not ended.
pub fn find_open_session(
    conn: &mut SqliteConnection,
    user_id: i32,
) -> QueryResult<Option<WorkoutSession>> {
    workout_sessions::table
        .filter(workout_sessions::user_id.eq(user_id))
        .filter(workout_sessions::end_time.is_null())
        .order((workout_sessions::start_time.desc(), workout_sessions::id.desc()))
        .select(WorkoutSession::as_select())
        .first(conn)
        .optional()
}

pub fn list_user_sessions(
    conn: &mut SqliteConnection,
    user_id: i32,
) -> QueryResult<Vec<WorkoutSession>> {
    workout_sessions::table
        .filter(workout_sessions::user_id.eq(user_id))
        .order((workout_sessions::start_time.desc(), workout_sessions::id.desc()))
        .select(WorkoutSession::as_select())
        .load(conn)
}

pub fn update_workout_session(
    conn: &mut SqliteConnection,
    session_id: i32,
    changes: &UpdateWorkoutSession,
) -> QueryResult<WorkoutSession> {
    if changes.is_empty() {
        return workout_sessions::table
            .find(session_id)
            .select(WorkoutSession::as_select())
            .first(conn);
    }
    diesel::update(workout_sessions::table.find(session_id))
        .set(changes)
        .returning(WorkoutSession::as_returning())
        .get_result(conn)
}

// Workout exercises
pub fn max_order_in_workout(conn: &mut SqliteConnection, session_id: i32) -> QueryResult<Option<i32>> {
    workout_exercises::table
        .filter(workout_exercises::session_id.eq(session_id))
        .select(diesel::dsl::max(workout_exercises::order_in_workout))
        .first(conn)
}

pub fn insert_workout_exercise(
    conn: &mut SqliteConnection,
    new: &NewWorkoutExercise,
) -> QueryResult<WorkoutExercise> {
    diesel::insert_into(workout_exercises::table)
        .values(new)
        .returning(WorkoutExercise::as_returning())
        .get_result(conn)
}

/// Sets go with it through `ON DELETE CASCADE`.
pub fn delete_workout_exercise(
    conn: &mut SqliteConnection,
    workout_exercise_id: i32,
) -> QueryResult<usize> {
    diesel::delete(workout_exercises::table.find(workout_exercise_id)).execute(conn)
}

/// Entries of the given sessions with their catalog exercise, ordered by position.
pub fn load_workout_entries(
    conn: &mut SqliteConnection,
    session_ids: &[i32],
) -> QueryResult<Vec<(WorkoutExercise, Exercise)>> {
    workout_exercises::table
        .inner_join(exercises::table)
        .filter(workout_exercises::session_id.eq_any(session_ids))
        .order((
            workout_exercises::session_id.asc(),
            workout_exercises::order_in_workout.asc(),
            workout_exercises::id.asc(),
        ))
        .select((WorkoutExercise::as_select(), Exercise::as_select()))
        .load(conn)
}

// Sets
pub fn max_set_number(conn: &mut SqliteConnection, workout_exercise_id: i32) -> QueryResult<Option<i32>> {
    exercise_sets::table
        .filter(exercise_sets::workout_exercise_id.eq(workout_exercise_id))
        .select(diesel::dsl::max(exercise_sets::set_number))
        .first(conn)
}

pub fn insert_set(conn: &mut SqliteConnection, new: &NewExerciseSet) -> QueryResult<ExerciseSet> {
    diesel::insert_into(exercise_sets::table)
        .values(new)
        .returning(ExerciseSet::as_returning())
        .get_result(conn)
}

pub fn get_set(conn: &mut SqliteConnection, set_id: i32) -> QueryResult<Option<ExerciseSet>> {
    exercise_sets::table
        .find(set_id)
        .select(ExerciseSet::as_select())
        .first(conn)
        .optional()
}

pub fn update_set(
    conn: &mut SqliteConnection,
    set_id: i32,
    changes: &UpdateExerciseSet,
) -> QueryResult<ExerciseSet> {
    if changes.is_empty() {
        return exercise_sets::table
            .find(set_id)
            .select(ExerciseSet::as_select())
            .first(conn);
    }
    diesel::update(exercise_sets::table.find(set_id))
        .set(changes)
        .returning(ExerciseSet::as_returning())
        .get_result(conn)
}

pub fn delete_set(conn: &mut SqliteConnection, set_id: i32) -> QueryResult<usize> {
    diesel::delete(exercise_sets::table.find(set_id)).execute(conn)
}

pub fn sets_for_workout_exercise(
    conn: &mut SqliteConnection,
    workout_exercise_id: i32,
) -> QueryResult<Vec<ExerciseSet>> {
    exercise_sets::table
        .filter(exercise_sets::workout_exercise_id.eq(workout_exercise_id))
        .order((exercise_sets::set_number.asc(), exercise_sets::id.asc()))
        .select(ExerciseSet::as_select())
        .load(conn)
}

pub fn sets_for_workout_exercises(
    conn: &mut SqliteConnection,
    workout_exercise_ids: &[i32],
) -> QueryResult<Vec<ExerciseSet>> {
    exercise_sets::table
        .filter(exercise_sets::workout_exercise_id.eq_any(workout_exercise_ids))
        .order((
            exercise_sets::workout_exercise_id.asc(),
            exercise_sets::set_number.asc(),
        ))
        .select(ExerciseSet::as_select())
        .load(conn)
}

/// Compact the set numbers of one workout exercise to 1..=N, keeping relative order.
///
/// Walking in ascending order means every target number is at most the current one,
/// so the `(workout_exercise_id, set_number)` unique index is never violated midway.
pub fn renumber_sets(conn: &mut SqliteConnection, workout_exercise_id: i32) -> QueryResult<usize> {
    let current: Vec<(i32, i32)> = exercise_sets::table
        .filter(exercise_sets::workout_exercise_id.eq(workout_exercise_id))
        .order((exercise_sets::set_number.asc(), exercise_sets::id.asc()))
        .select((exercise_sets::id, exercise_sets::set_number))
        .load(conn)?;

    let mut changed = 0;
    for (target, (set_id, number)) in (1..).zip(current) {
        if number != target {
            changed += diesel::update(exercise_sets::table.find(set_id))
                .set(exercise_sets::set_number.eq(target))
                .execute(conn)?;
        }
    }
    Ok(changed)
}

// Personal records
pub fn insert_personal_record(
    conn: &mut SqliteConnection,
    new: &NewPersonalRecord,
) -> QueryResult<PersonalRecord> {
    diesel::insert_into(personal_records::table)
        .values(new)
        .returning(PersonalRecord::as_returning())
        .get_result(conn)
}

pub fn personal_records_for_user(
    conn: &mut SqliteConnection,
    user_id: i32,
) -> QueryResult<Vec<(PersonalRecord, Exercise)>> {
    personal_records::table
        .inner_join(exercises::table)
        .filter(personal_records::user_id.eq(user_id))
        .order((
            personal_records::achieved_date.desc(),
            personal_records::id.desc(),
        ))
        .select((PersonalRecord::as_select(), Exercise::as_select()))
        .load(conn)
}

pub fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}
