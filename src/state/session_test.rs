use super::*;
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::net::types::AdminUser;
use crate::util::storage::{KeyValueStore, MemoryStore};

fn ana() -> AdminUser {
    AdminUser {
        id: "u1".to_owned(),
        name: "Ana".to_owned(),
        email: "ana@example.com".to_owned(),
        role: Some("admin".to_owned()),
    }
}

fn session_over(store: &Arc<MemoryStore>) -> SessionContext<AdminUser> {
    SessionContext::init(Arc::clone(store) as SharedStore)
}

// =============================================================
// init
// =============================================================

#[test]
fn init_with_empty_store_is_anonymous() {
    let store = Arc::new(MemoryStore::new());
    let session = session_over(&store);
    assert_eq!(session.user(), None);
    assert!(!session.is_authenticated());
}

#[test]
fn init_restores_stored_user() {
    let encoded = serde_json::to_string(&ana()).unwrap();
    let store = Arc::new(MemoryStore::with_entries([(USER_KEY, encoded.as_str())]));
    let session = session_over(&store);
    assert_eq!(session.user(), Some(ana()));
}

#[test]
fn init_with_invalid_json_is_anonymous() {
    let store = Arc::new(MemoryStore::with_entries([(USER_KEY, "{not json")]));
    let session = session_over(&store);
    assert_eq!(session.user(), None);
}

#[test]
fn init_with_wrong_shape_is_anonymous() {
    let store = Arc::new(MemoryStore::with_entries([(USER_KEY, r#"{"id":42}"#)]));
    let session = session_over(&store);
    assert_eq!(session.user(), None);
}

#[test]
fn init_with_arbitrary_json_user_type() {
    let store = Arc::new(MemoryStore::with_entries([(USER_KEY, r#"{"anything":[1,2]}"#)]));
    let session: SessionContext<serde_json::Value> = SessionContext::init(Arc::clone(&store) as SharedStore);
    assert_eq!(session.user(), Some(serde_json::json!({ "anything": [1, 2] })));
}

// =============================================================
// login
// =============================================================

#[test]
fn login_sets_memory_and_durable_user() {
    let store = Arc::new(MemoryStore::new());
    let session = session_over(&store);

    session.login(ana()).unwrap();

    assert_eq!(session.user(), Some(ana()));
    let stored: AdminUser = serde_json::from_str(&store.get(USER_KEY).unwrap()).unwrap();
    assert_eq!(stored, ana());
}

#[test]
fn login_replaces_previous_user_wholesale() {
    let store = Arc::new(MemoryStore::new());
    let session = session_over(&store);
    session.login(ana()).unwrap();

    let bruno = AdminUser {
        id: "u2".to_owned(),
        name: "Bruno".to_owned(),
        email: "bruno@example.com".to_owned(),
        role: None,
    };
    session.login(bruno.clone()).unwrap();

    assert_eq!(session.user(), Some(bruno.clone()));
    let stored: AdminUser = serde_json::from_str(&store.get(USER_KEY).unwrap()).unwrap();
    assert_eq!(stored, bruno);
}

#[test]
fn login_does_not_touch_token() {
    let store = Arc::new(MemoryStore::with_entries([(TOKEN_KEY, "abc")]));
    let session = session_over(&store);
    session.login(ana()).unwrap();
    assert_eq!(session.token().as_deref(), Some("abc"));
}

#[test]
fn sign_in_stores_token_and_user() {
    let store = Arc::new(MemoryStore::new());
    let session = session_over(&store);

    session.sign_in(ana(), "abc").unwrap();

    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc"));
    assert_eq!(session.token().as_deref(), Some("abc"));
    assert_eq!(session.user(), Some(ana()));
}

#[test]
fn login_with_unencodable_user_writes_nothing() {
    // Non-string map keys cannot be encoded as JSON object keys.
    let mut user = BTreeMap::new();
    user.insert(vec![1_u8], "x".to_owned());

    let store = Arc::new(MemoryStore::new());
    let session: SessionContext<BTreeMap<Vec<u8>, String>> =
        SessionContext::init(Arc::clone(&store) as SharedStore);

    assert!(matches!(session.sign_in(user, "abc"), Err(SessionError::Encode(_))));
    assert_eq!(session.user(), None);
    assert!(!store.contains(USER_KEY));
    assert!(!store.contains(TOKEN_KEY));
}

// =============================================================
// logout
// =============================================================

#[test]
fn logout_clears_user_and_token() {
    let store = Arc::new(MemoryStore::new());
    let session = session_over(&store);
    session.sign_in(ana(), "abc").unwrap();

    session.logout();

    assert_eq!(session.user(), None);
    assert!(!store.contains(USER_KEY));
    assert!(!store.contains(TOKEN_KEY));
    assert_eq!(session.token(), None);
}

#[test]
fn logout_from_anonymous_state_is_harmless() {
    let store = Arc::new(MemoryStore::with_entries([(TOKEN_KEY, "orphan")]));
    let session = session_over(&store);
    session.logout();
    assert_eq!(session.user(), None);
    assert!(!store.contains(TOKEN_KEY));
}

#[test]
fn logout_is_visible_through_clones() {
    let store = Arc::new(MemoryStore::new());
    let session = session_over(&store);
    let other = session.clone();
    session.login(ana()).unwrap();
    assert!(other.is_authenticated());
    other.logout();
    assert!(!session.is_authenticated());
}

// =============================================================
// observers
// =============================================================

#[test]
fn observers_see_each_mutation_in_order() {
    let store = Arc::new(MemoryStore::new());
    let session = session_over(&store);
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    session.subscribe(move |user: &Option<AdminUser>| {
        sink.lock().unwrap().push(user.as_ref().map(|u| u.id.clone()));
    });

    session.login(ana()).unwrap();
    session.logout();

    assert_eq!(*seen.lock().unwrap(), vec![Some("u1".to_owned()), None]);
}

#[test]
fn observer_reads_committed_state() {
    let store = Arc::new(MemoryStore::new());
    let session = session_over(&store);
    let seen = Arc::new(Mutex::new(None));

    let reader = session.clone();
    let inner_store = Arc::clone(&store);
    let sink = Arc::clone(&seen);
    session.subscribe(move |_| {
        *sink.lock().unwrap() = Some((reader.is_authenticated(), inner_store.contains(USER_KEY)));
    });

    session.login(ana()).unwrap();
    assert_eq!(*seen.lock().unwrap(), Some((true, true)));

    session.logout();
    assert_eq!(*seen.lock().unwrap(), Some((false, false)));
}

#[test]
fn unsubscribed_observer_is_not_called() {
    let store = Arc::new(MemoryStore::new());
    let session = session_over(&store);
    let calls = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&calls);
    let id = session.subscribe(move |_| *counter.lock().unwrap() += 1);

    assert!(session.unsubscribe(id));
    session.login(ana()).unwrap();

    assert_eq!(*calls.lock().unwrap(), 0);
}
