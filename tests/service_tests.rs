mod common;

use bugdesk::models::{NewBug, UserId};
use bugdesk::services::{BugError, CredentialError, export_csv};
use bugdesk::state::SharedState;
use common::test_config;

async fn shared_state() -> SharedState {
    SharedState::new(test_config())
        .await
        .expect("failed to create shared state")
}

fn crash_report() -> NewBug {
    NewBug {
        title: "Crash on save".to_string(),
        description: "App crashes when save is pressed".to_string(),
        tag: Some("Backend".to_string()),
    }
}

#[tokio::test]
async fn test_register_and_authenticate() {
    let state = shared_state().await;

    let alice = state.credentials.register("alice", "secret").await.unwrap();

    assert_eq!(
        state.credentials.authenticate("alice", "secret").await.unwrap(),
        Some(alice)
    );
    assert_eq!(
        state.credentials.authenticate("alice", "wrong").await.unwrap(),
        None
    );
    assert_eq!(
        state.credentials.authenticate("nobody", "secret").await.unwrap(),
        None
    );
    assert_eq!(
        state.credentials.username_of(alice).await.unwrap().as_deref(),
        Some("alice")
    );

    state.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_duplicate_username_keeps_original_password() {
    let state = shared_state().await;

    state.credentials.register("alice", "first").await.unwrap();
    let err = state
        .credentials
        .register("alice", "second")
        .await
        .unwrap_err();
    assert!(matches!(err, CredentialError::UsernameTaken));

    assert!(
        state
            .credentials
            .authenticate("alice", "first")
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn test_unique_index_rejects_concurrent_duplicate() {
    let state = shared_state().await;

    // Bypasses the existence pre-check, as a racing registration would
    let first = state.store.insert_user("alice", "h1").await.unwrap();
    assert!(first.is_some());
    let second = state.store.insert_user("alice", "h2").await.unwrap();
    assert_eq!(second, None);

    let credentials = state
        .store
        .get_user_credentials("alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(credentials.password_hash, "h1");
    assert_eq!(Some(credentials.user.id), first);
}

#[tokio::test]
async fn test_password_hash_is_not_plaintext() {
    let state = shared_state().await;
    state.credentials.register("alice", "secret").await.unwrap();

    let credentials = state
        .store
        .get_user_credentials("alice")
        .await
        .unwrap()
        .unwrap();
    assert_ne!(credentials.password_hash, "secret");
    assert!(credentials.password_hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn test_create_bug_records_reporter() {
    let state = shared_state().await;
    let alice = state.credentials.register("alice", "secret").await.unwrap();

    let id = state.bugs.create_bug(crash_report(), alice).await.unwrap();

    let bugs = state.bugs.list_bugs().await.unwrap();
    assert_eq!(bugs.len(), 1);
    assert_eq!(bugs[0].id, id);
    assert_eq!(bugs[0].status, "Open");
    assert_eq!(bugs[0].reported_by, "alice");
    assert!(!bugs[0].created_at.is_empty());

    assert_eq!(
        String::from_utf8(export_csv(&bugs)).unwrap(),
        "ID,Title,Description,Tag,Status,Reported By\r\n\
         1,Crash on save,App crashes when save is pressed,Backend,Open,alice\r\n"
    );
}

#[tokio::test]
async fn test_bugs_are_listed_in_creation_order() {
    let state = shared_state().await;
    let alice = state.credentials.register("alice", "secret").await.unwrap();
    let bob = state.credentials.register("bob", "secret").await.unwrap();

    for (title, reporter) in [("First", alice), ("Second", bob), ("Third", alice)] {
        let bug = NewBug {
            title: title.to_string(),
            description: "details".to_string(),
            tag: None,
        };
        state.bugs.create_bug(bug, reporter).await.unwrap();
    }

    let bugs = state.bugs.list_bugs().await.unwrap();
    let titles: Vec<&str> = bugs.iter().map(|bug| bug.title.as_str()).collect();
    assert_eq!(titles, ["First", "Second", "Third"]);
    assert!(bugs.windows(2).all(|pair| pair[0].id.0 < pair[1].id.0));
    assert_eq!(bugs[1].reported_by, "bob");
}

#[tokio::test]
async fn test_unknown_reporter_is_rejected() {
    let state = shared_state().await;

    let err = state
        .bugs
        .create_bug(crash_report(), UserId(999))
        .await
        .unwrap_err();
    assert!(matches!(err, BugError::MissingReporter(UserId(999))));
    assert!(state.bugs.list_bugs().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_bug_is_rejected_before_write() {
    let state = shared_state().await;
    let alice = state.credentials.register("alice", "secret").await.unwrap();

    let mut bug = crash_report();
    bug.title = "t".repeat(201);
    let err = state.bugs.create_bug(bug, alice).await.unwrap_err();
    assert!(matches!(err, BugError::Validation(_)));

    assert!(state.bugs.list_bugs().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_data_survives_reopening_the_database() {
    let config = test_config();
    let state = SharedState::new(config.clone()).await.unwrap();
    let alice = state.credentials.register("alice", "secret").await.unwrap();
    state.bugs.create_bug(crash_report(), alice).await.unwrap();
    state.shutdown().await.unwrap();

    let state = SharedState::new(config).await.unwrap();
    assert!(
        state
            .credentials
            .authenticate("alice", "secret")
            .await
            .unwrap()
            .is_some()
    );
    assert_eq!(state.bugs.list_bugs().await.unwrap().len(), 1);
}
