use chrono::Utc;
use diesel::SqliteConnection;
use log::info;

use super::importer::{ImportSummary, import};
use super::{ImportError, RawExercise};
use crate::auth::hash_password;
use crate::db::models::{Difficulty, NewExercise, NewUser};
use crate::db::operations;

pub const DEV_USERNAME: &str = "melanie";
pub const DEV_PASSWORD: &str = "1234";

const BASIC_EXERCISES: &[(&str, &str, &str, Difficulty)] = &[
    ("Push-ups", "Chest", "Bodyweight", Difficulty::Beginner),
    ("Squats", "Legs", "Bodyweight", Difficulty::Beginner),
    ("Bench Press", "Chest", "Barbell", Difficulty::Intermediate),
    ("Deadlift", "Back", "Barbell", Difficulty::Advanced),
    ("Pull-ups", "Back", "Bodyweight", Difficulty::Intermediate),
    ("Overhead Press", "Shoulders", "Barbell", Difficulty::Intermediate),
    ("Bicep Curls", "Arms", "Dumbbell", Difficulty::Beginner),
    ("Tricep Dips", "Arms", "Bodyweight", Difficulty::Beginner),
    ("Lunges", "Legs", "Bodyweight", Difficulty::Beginner),
    ("Planks", "Core", "Bodyweight", Difficulty::Beginner),
];

/// Whether the exercise table is empty. Callers check this before loading a dataset
/// so a populated catalog never needs the file.
pub fn catalog_is_empty(conn: &mut SqliteConnection) -> Result<bool, ImportError> {
    let count = operations::count_exercises(conn)?;
    if count > 0 {
        info!("Database already has {} exercises. Skipping import.", count);
    }
    Ok(count == 0)
}

/// Import `records` only when the exercise table is empty. `None` means skipped.
pub fn seed_if_empty(
    conn: &mut SqliteConnection,
    records: &[RawExercise],
    commit_batch_size: usize,
) -> Result<Option<ImportSummary>, ImportError> {
    if !catalog_is_empty(conn)? {
        return Ok(None);
    }
    info!("Database is empty. Importing {} records...", records.len());
    import(conn, records, commit_batch_size).map(Some)
}

/// Development convenience: the default user plus a handful of basic exercises when
/// the catalog is empty. Returns how many exercises were seeded.
pub fn seed_dev_defaults(conn: &mut SqliteConnection) -> Result<usize, ImportError> {
    conn.immediate_transaction::<_, ImportError, _>(|conn| {
        if operations::find_user_by_username(conn, DEV_USERNAME)?.is_none() {
            operations::insert_user(
                conn,
                &NewUser {
                    username: DEV_USERNAME.to_string(),
                    email: Some(format!("{}@example.com", DEV_USERNAME)),
                    password_hash: hash_password(DEV_PASSWORD)?,
                    profile_picture: None,
                    created_at: Utc::now().naive_utc(),
                },
            )?;
            info!("Created default user: {}/{}", DEV_USERNAME, DEV_PASSWORD);
        }

        if operations::count_exercises(conn)? > 0 {
            return Ok(0);
        }
        let basics: Vec<NewExercise> = BASIC_EXERCISES
            .iter()
            .map(|(name, muscle_group, equipment, difficulty)| NewExercise {
                name: name.to_string(),
                description: None,
                muscle_group: muscle_group.to_string(),
                equipment: Some(equipment.to_string()),
                difficulty: Some(difficulty.as_str().to_string()),
                instructions: Some(r#"{"allowed_fields": ["reps", "weight"]}"#.to_string()),
                is_custom: false,
                created_by: None,
            })
            .collect();
        let seeded = operations::insert_exercises(conn, &basics)?;
        info!("Seeded {} basic exercises", seeded);
        Ok(seeded)
    })
}
