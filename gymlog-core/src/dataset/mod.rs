//! Third-party exercise catalog ingestion (free-exercise-db).
//!
//! [`loader`] finds the raw JSON, [`importer`] merges it into the exercise table and
//! [`seed`] wraps both for first-run bootstrapping.

pub mod importer;
pub mod loader;
pub mod seed;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use importer::{ImportSummary, import};
pub use loader::{DEFAULT_DATASET_PATH, DatasetSource, REMOTE_URL, load};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("{0}")]
    NotFound(String),
    #[error("failed to download dataset: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed dataset: {0}")]
    Format(#[from] serde_json::Error),
    #[error("dataset i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("database error during import: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("failed to create development user: {0}")]
    Credentials(#[from] crate::auth::AuthError),
}

/// `instructions` arrives either as a list of steps or as one block of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInstructions {
    Steps(Vec<serde_json::Value>),
    Text(String),
}

/// One entry of the upstream dataset. Fields the importer does not use are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawExercise {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub equipment: Option<String>,
    #[serde(default, rename = "primaryMuscles")]
    pub primary_muscles: Option<Vec<String>>,
    #[serde(default)]
    pub instructions: Option<RawInstructions>,
}

impl RawExercise {
    pub fn named(name: &str) -> Self {
        RawExercise {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_upstream_shape() {
        let raw = r#"[{
            "name": "3/4 Sit-Up",
            "force": "pull",
            "level": "beginner",
            "mechanic": "compound",
            "equipment": "body only",
            "primaryMuscles": ["abdominals"],
            "secondaryMuscles": [],
            "instructions": ["Lie down on the floor.", "", "Flex your hips."],
            "category": "strength",
            "images": ["3_4_Sit-Up/0.jpg"],
            "id": "3_4_Sit-Up"
        }, {"name": "Stretch", "instructions": "Hold it.", "equipment": null}]"#;
        let records: Vec<RawExercise> = serde_json::from_str(raw).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].primary_muscles.as_deref(), Some(&["abdominals".to_string()][..]));
        assert!(matches!(records[0].instructions, Some(RawInstructions::Steps(ref s)) if s.len() == 3));
        assert_eq!(
            records[1].instructions,
            Some(RawInstructions::Text("Hold it.".into()))
        );
        assert_eq!(records[1].equipment, None);
    }
}
