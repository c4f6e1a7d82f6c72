//! Integration tests for persisted-state edge cases.
//!
//! Stored blobs are edited directly through the raw store to simulate
//! corruption, hand edits and accounts disappearing between runs.

#![allow(clippy::unwrap_used)]

use crowdcount_auth::db::users::LoadOutcome;
use crowdcount_auth::models::SessionState;
use crowdcount_auth::models::session::keys;
use crowdcount_core::AccountId;
use crowdcount_integration_tests::TestContext;

#[test]
fn test_dangling_session_is_cleared_on_restart() {
    let ctx = TestContext::new();
    {
        let mut state = ctx.start().unwrap();
        let mut auth = state.auth();
        auth.register("alice", "a@b.com", "secret1", "secret1").unwrap();
        auth.register("bob", "bob@b.com", "secret2", "secret2").unwrap();
    }
    let raw = ctx.raw_store().unwrap();
    assert_eq!(
        raw.get(keys::CURRENT_USER).unwrap().as_deref(),
        Some(r#"{"id":2}"#)
    );

    // Remove bob from the stored collection behind the store's back.
    let mut accounts: Vec<serde_json::Value> =
        serde_json::from_str(&raw.get(keys::USERS).unwrap().unwrap()).unwrap();
    accounts.retain(|a| a["id"] != 2);
    raw.set(keys::USERS, &serde_json::to_string(&accounts).unwrap())
        .unwrap();

    let state = ctx.start().unwrap();

    assert_eq!(state.session(), SessionState::Anonymous);
    assert!(!raw.contains(keys::CURRENT_USER).unwrap());
    assert_eq!(state.users().len(), 1);
}

#[test]
fn test_malformed_accounts_blob_is_empty_store() {
    let ctx = TestContext::new().with_sample_account();
    ctx.raw_store()
        .unwrap()
        .set(keys::USERS, "[{\"id\": 1, \"username\":")
        .unwrap();

    let mut state = ctx.start().unwrap();

    assert!(state.users().is_empty());
    assert_eq!(state.users().load_outcome(), LoadOutcome::Malformed);

    // The next registration overwrites the bad blob.
    let alice = state
        .auth()
        .register("alice", "a@b.com", "secret1", "secret1")
        .unwrap();
    assert_eq!(alice.id, AccountId::new(1));
    assert_eq!(ctx.start().unwrap().users().len(), 1);
}

#[test]
fn test_malformed_session_blob_is_cleared() {
    let ctx = TestContext::new().with_sample_account();
    ctx.start().unwrap();
    let raw = ctx.raw_store().unwrap();
    raw.set(keys::CURRENT_USER, "not json at all").unwrap();

    let state = ctx.start().unwrap();

    assert_eq!(state.session(), SessionState::Anonymous);
    assert!(!raw.contains(keys::CURRENT_USER).unwrap());
}

#[test]
fn test_legacy_full_account_session_blob_restores() {
    let ctx = TestContext::new().with_sample_account();
    ctx.start().unwrap();
    let raw = ctx.raw_store().unwrap();
    raw.set(
        keys::CURRENT_USER,
        r#"{"id":1,"username":"admin","email":"admin@crowdcount.com","password":"password123","createdAt":"2024-06-01T12:00:00.000Z"}"#,
    )
    .unwrap();

    let state = ctx.start().unwrap();

    assert_eq!(state.session(), SessionState::Authenticated(AccountId::new(1)));
}

#[test]
fn test_sample_account_seeded_once() {
    let ctx = TestContext::new().with_sample_account();
    ctx.start().unwrap();
    ctx.start().unwrap();

    let state = ctx.start().unwrap();
    assert_eq!(state.users().len(), 1);
    assert!(ctx.data_dir().join("crowdcount_users.json").is_file());
}

#[test]
fn test_session_blob_holds_only_the_id() {
    let ctx = TestContext::new();
    ctx.start()
        .unwrap()
        .auth()
        .register("alice", "a@b.com", "secret1", "secret1")
        .unwrap();

    let raw = ctx.raw_store().unwrap().get(keys::CURRENT_USER).unwrap().unwrap();
    assert_eq!(raw, r#"{"id":1}"#);
}
