#![allow(dead_code)]

use gymlog::Tracker;
use gymlog::auth::{MIN_HASH_COST, TokenSigner};
use gymlog::dataset::RawExercise;
use gymlog::db::models::{Exercise, NewExercise};
use gymlog::db::operations;
use gymlog::tracker::AuthSession;
use gymlog::tracker::requests::RegisterRequest;
use tempfile::TempDir;

pub struct TestEnv {
    // keeps the database file alive for the test
    pub dir: TempDir,
    pub tracker: Tracker,
}

pub fn setup() -> TestEnv {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = dir.path().join("gymlog-test.db");
    let signer = TokenSigner::new("test-secret", 0).expect("signer");
    let tracker = Tracker::open(url.to_str().expect("utf-8 path"), 2, signer)
        .expect("tracker")
        .with_password_cost(MIN_HASH_COST);
    TestEnv { dir, tracker }
}

pub fn register(tracker: &Tracker, username: &str) -> AuthSession {
    tracker
        .register(RegisterRequest {
            username: Some(username.to_string()),
            password: Some("pass1234".to_string()),
            email: None,
        })
        .expect("register")
}

pub fn insert_exercise(tracker: &Tracker, name: &str, difficulty: Option<&str>) -> Exercise {
    let mut conn = tracker.pool().get().expect("conn");
    operations::insert_exercise(
        &mut conn,
        &NewExercise {
            name: name.to_string(),
            description: None,
            muscle_group: "Chest".to_string(),
            equipment: Some("Barbell".to_string()),
            difficulty: difficulty.map(str::to_string),
            instructions: None,
            is_custom: false,
            created_by: None,
        },
    )
    .expect("insert exercise")
}

pub fn record(name: &str, level: Option<&str>) -> RawExercise {
    RawExercise {
        name: Some(name.to_string()),
        level: level.map(str::to_string),
        category: Some("strength".to_string()),
        equipment: Some("barbell".to_string()),
        primary_muscles: Some(vec!["chest".to_string()]),
        instructions: None,
    }
}
