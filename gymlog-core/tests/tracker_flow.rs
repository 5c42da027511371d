mod common;

use common::{insert_exercise, register, setup};
use gymlog::TrackerError;
use gymlog::auth::AuthError;
use gymlog::tracker::requests::{
    AddExerciseRequest, LoginRequest, NewRecordRequest, NewSetRequest, RegisterRequest,
    StartWorkoutRequest, UpdateProfileRequest, UpdateSetRequest, UpdateWorkoutRequest,
};
use gymlog::db::models::RecordType;

fn set_numbers(env: &common::TestEnv, caller: i32, workout_id: i32) -> Vec<i32> {
    let view = env.tracker.get_workout(caller, workout_id).unwrap();
    view.exercises[0].sets.iter().map(|s| s.set_number).collect()
}

fn weight(kg: f64) -> NewSetRequest {
    NewSetRequest {
        reps: Some(5),
        weight: Some(kg),
        ..Default::default()
    }
}

#[test]
fn deleting_sets_keeps_numbers_contiguous() {
    let env = setup();
    let alice = register(&env.tracker, "alice").user.id;
    let bench = insert_exercise(&env.tracker, "Bench Press", None);

    let workout = env
        .tracker
        .start_workout(alice, StartWorkoutRequest::default())
        .unwrap();
    assert_eq!(workout.session.name.as_deref(), Some("Workout"));
    assert_eq!(workout.session.notes.as_deref(), Some(""));
    assert!(workout.session.end_time.is_none());

    let entry = env
        .tracker
        .add_exercise(alice, workout.session.id, AddExerciseRequest { exercise_id: Some(bench.id) })
        .unwrap();
    assert_eq!(entry.entry.order_in_workout, 1);

    let sets: Vec<_> = [60.0, 70.0, 80.0, 90.0]
        .into_iter()
        .map(|kg| env.tracker.add_set(alice, entry.entry.id, weight(kg)).unwrap())
        .collect();
    assert_eq!(
        sets.iter().map(|s| s.set_number).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
    assert_eq!(sets[0].set_type, "normal");
    assert_eq!(sets[0].notes.as_deref(), Some(""));

    env.tracker.delete_set(alice, sets[1].id).unwrap();
    assert_eq!(set_numbers(&env, alice, workout.session.id), vec![1, 2, 3]);

    env.tracker.delete_set(alice, sets[0].id).unwrap();
    let view = env.tracker.get_workout(alice, workout.session.id).unwrap();
    let survivors: Vec<(i32, Option<f64>)> = view.exercises[0]
        .sets
        .iter()
        .map(|s| (s.set_number, s.weight))
        .collect();
    assert_eq!(survivors, vec![(1, Some(80.0)), (2, Some(90.0))]);

    // numbering continues after the compacted maximum
    let next = env.tracker.add_set(alice, entry.entry.id, weight(100.0)).unwrap();
    assert_eq!(next.set_number, 3);

    assert!(matches!(
        env.tracker.delete_set(alice, sets[1].id),
        Err(TrackerError::NotFound(_))
    ));
}

#[test]
fn order_in_workout_is_not_renumbered() {
    let env = setup();
    let alice = register(&env.tracker, "alice").user.id;
    let bench = insert_exercise(&env.tracker, "Bench Press", None);
    let squat = insert_exercise(&env.tracker, "Squat", None);
    let workout = env
        .tracker
        .start_workout(alice, StartWorkoutRequest::default())
        .unwrap()
        .session
        .id;

    let add = |id| {
        env.tracker
            .add_exercise(alice, workout, AddExerciseRequest { exercise_id: Some(id) })
            .unwrap()
    };
    let first = add(bench.id);
    let second = add(squat.id);
    assert_eq!(second.entry.order_in_workout, 2);
    env.tracker.add_set(alice, first.entry.id, weight(100.0)).unwrap();

    // removing an entry cascades to its sets and leaves the others' positions alone
    env.tracker.remove_exercise(alice, first.entry.id).unwrap();
    let third = add(bench.id);
    assert_eq!(third.entry.order_in_workout, 3);

    let view = env.tracker.get_workout(alice, workout).unwrap();
    let orders: Vec<i32> = view.exercises.iter().map(|e| e.entry.order_in_workout).collect();
    assert_eq!(orders, vec![2, 3]);
    assert!(view.exercises.iter().all(|e| e.sets.is_empty()));
    assert_eq!(view.exercises[0].exercise.name, "Squat");
}

#[test]
fn other_users_records_are_forbidden() {
    let env = setup();
    let alice = register(&env.tracker, "alice").user.id;
    let bob = register(&env.tracker, "bob").user.id;
    let bench = insert_exercise(&env.tracker, "Bench Press", None);

    let workout = env
        .tracker
        .start_workout(alice, StartWorkoutRequest::default())
        .unwrap()
        .session
        .id;
    let entry = env
        .tracker
        .add_exercise(alice, workout, AddExerciseRequest { exercise_id: Some(bench.id) })
        .unwrap()
        .entry
        .id;
    let set = env.tracker.add_set(alice, entry, weight(50.0)).unwrap().id;

    let forbidden = |r: Result<_, TrackerError>| matches!(r, Err(TrackerError::Forbidden(_)));
    assert!(forbidden(env.tracker.get_workout(bob, workout).map(|_| ())));
    assert!(forbidden(
        env.tracker
            .update_workout(bob, workout, UpdateWorkoutRequest::default(), true)
            .map(|_| ())
    ));
    assert!(forbidden(
        env.tracker
            .add_exercise(bob, workout, AddExerciseRequest { exercise_id: Some(bench.id) })
            .map(|_| ())
    ));
    assert!(forbidden(env.tracker.add_set(bob, entry, weight(1.0)).map(|_| ())));
    assert!(forbidden(
        env.tracker
            .update_set(bob, set, UpdateSetRequest::default())
            .map(|_| ())
    ));
    assert!(forbidden(env.tracker.delete_set(bob, set)));
    assert!(forbidden(env.tracker.remove_exercise(bob, entry)));
    assert!(forbidden(env.tracker.user_workouts(bob, alice).map(|_| ())));
    assert!(forbidden(env.tracker.personal_records(bob, alice).map(|_| ())));

    // nothing changed for the owner
    let view = env.tracker.get_workout(alice, workout).unwrap();
    assert!(view.session.end_time.is_none());
    assert_eq!(view.exercises[0].sets.len(), 1);

    assert!(matches!(
        env.tracker.get_workout(bob, 9_999),
        Err(TrackerError::NotFound(_))
    ));
}

#[test]
fn one_open_workout_per_user() {
    let env = setup();
    let alice = register(&env.tracker, "alice").user.id;
    assert!(env.tracker.active_workout(alice).unwrap().is_none());

    let first = env
        .tracker
        .start_workout(
            alice,
            StartWorkoutRequest {
                name: Some("Push day".into()),
                notes: None,
            },
        )
        .unwrap();
    assert!(matches!(
        env.tracker.start_workout(alice, StartWorkoutRequest::default()),
        Err(TrackerError::Conflict(_))
    ));
    let active = env.tracker.active_workout(alice).unwrap().unwrap();
    assert_eq!(active.session.id, first.session.id);

    // PATCH-style edit keeps it open
    let edited = env
        .tracker
        .update_workout(
            alice,
            first.session.id,
            serde_json::from_value(serde_json::json!({"notes": "felt strong"})).unwrap(),
            false,
        )
        .unwrap();
    assert_eq!(edited.session.notes.as_deref(), Some("felt strong"));
    assert_eq!(edited.session.name.as_deref(), Some("Push day"));
    assert!(edited.session.end_time.is_none());

    let finished = env
        .tracker
        .update_workout(alice, first.session.id, UpdateWorkoutRequest::default(), true)
        .unwrap();
    assert!(finished.session.end_time.is_some());
    assert!(env.tracker.active_workout(alice).unwrap().is_none());

    let second = env
        .tracker
        .start_workout(alice, StartWorkoutRequest::default())
        .unwrap();
    let ended_by_patch = env
        .tracker
        .update_workout(
            alice,
            second.session.id,
            serde_json::from_value(serde_json::json!({"end_time": "now"})).unwrap(),
            false,
        )
        .unwrap();
    assert!(ended_by_patch.session.end_time.is_some());

    let history = env.tracker.user_workouts(alice, alice).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].session.id, second.session.id);
}

#[test]
fn registration_and_login_rules() {
    let env = setup();
    let reg = |u: &str, p: &str, e: Option<&str>| {
        env.tracker.register(RegisterRequest {
            username: Some(u.into()),
            password: Some(p.into()),
            email: e.map(str::to_string),
        })
    };

    let alice = reg("  alice ", "pass1234", Some("a@example.com")).unwrap();
    assert_eq!(alice.user.username, "alice");
    assert_eq!(env.tracker.authenticate(&alice.access_token).unwrap(), alice.user.id);

    assert!(matches!(reg("bob", "123", None), Err(TrackerError::Validation(_))));
    assert!(matches!(reg("", "pass1234", None), Err(TrackerError::Validation(_))));
    assert!(matches!(reg("alice", "pass1234", None), Err(TrackerError::Conflict(_))));
    assert!(matches!(
        reg("bob", "pass1234", Some(" a@example.com ")),
        Err(TrackerError::Conflict(_))
    ));
    let bob = reg("bob", "pass1234", Some("  ")).unwrap();
    assert_eq!(bob.user.email, None);

    let login = |u: &str, p: &str| {
        env.tracker.login(LoginRequest {
            username: Some(u.into()),
            password: Some(p.into()),
        })
    };
    assert!(login("alice", " pass1234 ").is_ok());
    assert!(matches!(
        login("alice", "wrong"),
        Err(TrackerError::Auth(AuthError::InvalidCredentials))
    ));
    assert!(matches!(
        login("nobody", "pass1234"),
        Err(TrackerError::Auth(AuthError::InvalidCredentials))
    ));
    assert!(matches!(login("alice", ""), Err(TrackerError::Validation(_))));
}

#[test]
fn profile_updates() {
    let env = setup();
    let alice = register(&env.tracker, "alice").user.id;
    let bob = register(&env.tracker, "bob").user.id;

    let update = |caller, v: serde_json::Value| {
        env.tracker
            .update_current_user(caller, serde_json::from_value::<UpdateProfileRequest>(v).unwrap())
    };
    let user = update(alice, serde_json::json!({"email": "alice@example.com", "profile_picture": "data:x"})).unwrap();
    assert_eq!(user.email.as_deref(), Some("alice@example.com"));
    assert_eq!(user.profile_picture.as_deref(), Some("data:x"));

    // re-sending your own email is not a conflict
    assert!(update(alice, serde_json::json!({"email": "alice@example.com"})).is_ok());
    assert!(matches!(
        update(bob, serde_json::json!({"email": "alice@example.com"})),
        Err(TrackerError::Conflict(_))
    ));

    let cleared = update(alice, serde_json::json!({"email": "", "profile_picture": null})).unwrap();
    assert_eq!(cleared.email, None);
    assert_eq!(cleared.profile_picture, None);

    let untouched = update(alice, serde_json::json!({})).unwrap();
    assert_eq!(untouched.username, "alice");
}

#[test]
fn set_updates_are_tri_state() {
    let env = setup();
    let alice = register(&env.tracker, "alice").user.id;
    let bench = insert_exercise(&env.tracker, "Bench Press", None);
    let workout = env
        .tracker
        .start_workout(alice, StartWorkoutRequest::default())
        .unwrap()
        .session
        .id;
    let entry = env
        .tracker
        .add_exercise(alice, workout, AddExerciseRequest { exercise_id: Some(bench.id) })
        .unwrap()
        .entry
        .id;
    let set = env.tracker.add_set(alice, entry, weight(60.0)).unwrap();

    let changed = env
        .tracker
        .update_set(
            alice,
            set.id,
            serde_json::from_value(serde_json::json!({"weight": null, "reps": 12, "set_type": "Warmup"}))
                .unwrap(),
        )
        .unwrap();
    assert_eq!(changed.weight, None);
    assert_eq!(changed.reps, Some(12));
    assert_eq!(changed.set_type, "warmup");
    assert_eq!(changed.set_number, 1);

    assert!(matches!(
        env.tracker.update_set(
            alice,
            set.id,
            UpdateSetRequest {
                set_type: Some("giant".into()),
                ..Default::default()
            }
        ),
        Err(TrackerError::Validation(_))
    ));
    assert!(matches!(
        env.tracker
            .add_exercise(alice, workout, AddExerciseRequest { exercise_id: Some(424_242) }),
        Err(TrackerError::NotFound(_))
    ));
}

#[test]
fn personal_records_belong_to_their_user() {
    let env = setup();
    let alice = register(&env.tracker, "alice").user.id;
    let bob = register(&env.tracker, "bob").user.id;
    let bench = insert_exercise(&env.tracker, "Bench Press", None);
    let bobs_workout = env
        .tracker
        .start_workout(bob, StartWorkoutRequest::default())
        .unwrap()
        .session
        .id;

    let stored = env
        .tracker
        .record_personal_record(
            alice,
            NewRecordRequest {
                exercise_id: bench.id,
                record_type: RecordType::MaxWeight,
                value: 100.0,
                workout_session_id: None,
            },
        )
        .unwrap();
    assert_eq!(stored.record.record_type, "max_weight");
    assert_eq!(stored.exercise.name, "Bench Press");

    assert!(matches!(
        env.tracker.record_personal_record(
            alice,
            NewRecordRequest {
                exercise_id: bench.id,
                record_type: RecordType::MaxReps,
                value: 10.0,
                workout_session_id: Some(bobs_workout),
            },
        ),
        Err(TrackerError::Forbidden(_))
    ));

    let records = env.tracker.personal_records(alice, alice).unwrap();
    assert_eq!(records.len(), 1);
    assert!(env.tracker.personal_records(bob, bob).unwrap().is_empty());
}

#[test]
fn exercise_catalog_filters_and_custom_entries() {
    let env = setup();
    let alice = register(&env.tracker, "alice").user.id;
    insert_exercise(&env.tracker, "Bench Press", Some("beginner"));
    insert_exercise(&env.tracker, "Incline Bench", None);

    let custom = env
        .tracker
        .create_custom_exercise(
            alice,
            serde_json::from_value(serde_json::json!({
                "name": "Landmine Press",
                "muscle_group": "Shoulders",
                "equipment": "Landmine 100%"
            }))
            .unwrap(),
        )
        .unwrap();
    assert!(custom.is_custom);
    assert_eq!(custom.created_by, Some(alice));

    let filter = |v: serde_json::Value| {
        env.tracker
            .list_exercises(&serde_json::from_value(v).unwrap())
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect::<Vec<_>>()
    };
    assert_eq!(filter(serde_json::json!({"search": "BENCH"})), vec!["Bench Press", "Incline Bench"]);
    assert_eq!(filter(serde_json::json!({"muscle_group": "should"})), vec!["Landmine Press"]);
    assert_eq!(filter(serde_json::json!({"equipment": "0%"})), vec!["Landmine Press"]);
    assert_eq!(filter(serde_json::json!({"equipment": "_"})), Vec::<String>::new());
    assert_eq!(filter(serde_json::json!({"search": ""})).len(), 3);

    assert_eq!(env.tracker.muscle_groups().unwrap(), vec!["Chest", "Shoulders"]);
    assert_eq!(env.tracker.equipment().unwrap(), vec!["Barbell", "Landmine 100%"]);

    assert!(matches!(
        env.tracker.create_custom_exercise(
            alice,
            serde_json::from_value(serde_json::json!({"name": "No muscle"})).unwrap()
        ),
        Err(TrackerError::Validation(_))
    ));
    assert!(matches!(env.tracker.get_exercise(9_999), Err(TrackerError::NotFound(_))));
}
