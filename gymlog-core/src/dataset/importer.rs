use diesel::SqliteConnection;
use log::{debug, info};
use serde::Serialize;
use serde_json::json;

use super::{ImportError, RawExercise, RawInstructions};
use crate::db::models::{Difficulty, NewExercise};
use crate::db::operations;
use crate::muscle;

pub const DATASET_TAG: &str = "free-exercise-db";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub inserted: usize,
    pub skipped_duplicate: usize,
    pub updated_difficulty: usize,
}

/// Merge `records` into the exercise table.
///
/// Records are processed in order and committed every `commit_batch_size` records
/// (blank names included in the count), each batch in its own transaction. A failure
/// rolls back only the open batch; earlier batches stay committed.
pub fn import(
    conn: &mut SqliteConnection,
    records: &[RawExercise],
    commit_batch_size: usize,
) -> Result<ImportSummary, ImportError> {
    let batch_size = commit_batch_size.max(1);
    let mut summary = ImportSummary::default();
    let mut processed = 0;

    for batch in records.chunks(batch_size) {
        let delta = conn.immediate_transaction::<_, ImportError, _>(|conn| {
            let mut delta = ImportSummary::default();
            for record in batch {
                import_one(conn, record, &mut delta)?;
            }
            Ok(delta)
        })?;
        processed += batch.len();
        summary.inserted += delta.inserted;
        summary.skipped_duplicate += delta.skipped_duplicate;
        summary.updated_difficulty += delta.updated_difficulty;
        if batch.len() == batch_size {
            info!("Committed batch at {} records...", processed);
        }
    }

    info!(
        "Import finished: inserted {}, skipped {}, updated difficulty {}",
        summary.inserted, summary.skipped_duplicate, summary.updated_difficulty
    );
    Ok(summary)
}

fn import_one(
    conn: &mut SqliteConnection,
    record: &RawExercise,
    summary: &mut ImportSummary,
) -> Result<(), ImportError> {
    let name = record.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Ok(());
    }
    let level = record.level.as_deref().and_then(Difficulty::parse);

    if let Some(existing) = operations::find_exercise_by_name(conn, name)? {
        let blank = existing
            .difficulty
            .as_deref()
            .is_none_or(|d| d.trim().is_empty());
        if let (Some(level), true) = (level, blank) {
            debug!("Backfilling difficulty of '{}' to {}", name, level.as_str());
            operations::set_exercise_difficulty(conn, existing.id, level.as_str())?;
            summary.updated_difficulty += 1;
        }
        summary.skipped_duplicate += 1;
        return Ok(());
    }

    let new = to_new_exercise(name, record, level);
    debug!("Inserting '{}' ({})", new.name, new.muscle_group);
    operations::insert_exercise(conn, &new)?;
    summary.inserted += 1;
    Ok(())
}

fn to_new_exercise(name: &str, record: &RawExercise, level: Option<Difficulty>) -> NewExercise {
    let primary = record
        .primary_muscles
        .as_ref()
        .and_then(|muscles| muscles.first())
        .map(String::as_str);

    NewExercise {
        name: name.to_string(),
        description: describe(record.instructions.as_ref()),
        muscle_group: muscle::normalize(primary),
        equipment: record.equipment.clone().filter(|e| !e.is_empty()),
        difficulty: level.map(|l| l.as_str().to_string()),
        instructions: Some(
            json!({
                "source": DATASET_TAG,
                "allowed_fields": allowed_fields(record.category.as_deref()),
            })
            .to_string(),
        ),
        is_custom: false,
        created_by: None,
    }
}

/// Cardio is tracked by time and distance, everything else by reps and load.
pub fn allowed_fields(category: Option<&str>) -> [&'static str; 2] {
    match category.map(|c| c.trim().to_lowercase()).as_deref() {
        Some("cardio") => ["duration", "distance"],
        _ => ["reps", "weight"],
    }
}

fn describe(instructions: Option<&RawInstructions>) -> Option<String> {
    let text = match instructions? {
        RawInstructions::Steps(steps) => steps
            .iter()
            .map(|step| match step {
                serde_json::Value::String(s) => s.trim().to_string(),
                other => other.to_string().trim().to_string(),
            })
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        RawInstructions::Text(text) => text.trim().to_string(),
    };
    (!text.is_empty()).then_some(text)
}
