use futures::executor::block_on;

use super::*;
use crate::http::testing::{Reply, ScriptedTransport};
use crate::tokens::MemoryBackend;

const DAY_MS: i64 = 86_400_000;

struct Harness {
    transport: Rc<ScriptedTransport>,
    backend: Rc<MemoryBackend>,
    store: Rc<TokenStore>,
    client: AuthClient,
}

fn harness() -> Harness {
    let transport = Rc::new(ScriptedTransport::new());
    let backend = Rc::new(MemoryBackend::new());
    let store = Rc::new(TokenStore::new(backend.clone()));
    let client = AuthClient::new(store.clone(), transport.clone(), SessionConfig::default());
    Harness {
        transport,
        backend,
        store,
        client,
    }
}

/// Seed a persisted session with expiries offset from the real clock.
fn seed(h: &Harness, access_offset_ms: i64, refresh_offset_ms: i64) {
    let now = clock::now_ms();
    h.store.write(&SessionTokens {
        access_token: "A1".to_owned(),
        access_expires_at_ms: now + access_offset_ms,
        refresh_token: "R1".to_owned(),
        refresh_expires_at_ms: now + refresh_offset_ms,
    });
}

fn login_reply() -> Reply {
    Reply::json(
        200,
        &json!({
            "token": "T1",
            "refreshToken": "R1",
            "expiresInMs": 900_000,
            "refreshExpiresInMs": DAY_MS,
        }),
    )
}

// =============================================================
// Login
// =============================================================

#[test]
fn login_persists_full_token_set() {
    let h = harness();
    h.transport.script("/api/auth/login", login_reply());

    let before = clock::now_ms();
    let tokens = block_on(h.client.login("alice", "secret")).unwrap();
    let after = clock::now_ms();

    assert_eq!(tokens.access_token, "T1");
    assert_eq!(h.backend.read("authToken"), Some("T1".to_owned()));
    assert_eq!(h.backend.read("refreshToken"), Some("R1".to_owned()));
    let refresh_expiry: i64 = h.backend.read("refreshTokenExpiry").unwrap().parse().unwrap();
    assert!(refresh_expiry >= before + DAY_MS);
    assert!(refresh_expiry <= after + DAY_MS);
    assert!(h.client.is_authenticated());
}

#[test]
fn login_sends_credentials_without_bearer() {
    let h = harness();
    h.transport.script("/api/auth/login", login_reply());

    block_on(h.client.login("alice", "secret")).unwrap();

    let requests = h.transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].url, "/api/auth/login");
    assert_eq!(requests[0].bearer, None);
    assert_eq!(
        requests[0].body,
        Some(json!({ "username": "alice", "password": "secret" }))
    );
}

#[test]
fn login_rejection_carries_server_message() {
    let h = harness();
    h.transport.script(
        "/api/auth/login",
        Reply::json(401, &json!({ "message": "bad credentials" })),
    );

    let err = block_on(h.client.login("alice", "wrong")).unwrap_err();
    assert!(matches!(err, ApiError::Authentication(m) if m == "bad credentials"));
    assert!(!h.client.is_authenticated());
    assert_eq!(h.backend.read("authToken"), None);
}

#[test]
fn login_rejection_without_body_uses_fallback_text() {
    let h = harness();
    h.transport.script("/api/auth/login", Reply::empty(401));

    let err = block_on(h.client.login("alice", "wrong")).unwrap_err();
    assert!(matches!(err, ApiError::Authentication(m) if m == "invalid username or password"));
}

#[test]
fn login_with_undecodable_success_body_fails_cleanly() {
    let h = harness();
    h.transport
        .script("/api/auth/login", Reply::text(200, "not json"));

    let err = block_on(h.client.login("alice", "secret")).unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse));
    assert_eq!(h.backend.read("authToken"), None);
}

#[test]
fn login_propagates_transport_failure() {
    let h = harness();
    h.transport
        .script("/api/auth/login", Reply::offline("connection refused"));

    let err = block_on(h.client.login("alice", "secret")).unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert!(!h.client.is_authenticated());
}

// =============================================================
// Registration
// =============================================================

#[test]
fn register_posts_camel_case_payload() {
    let h = harness();
    h.transport.script("/api/auth/register", Reply::empty(201));

    let registration = Registration {
        username: "bob".to_owned(),
        password: "pw".to_owned(),
        email: "bob@example.com".to_owned(),
        first_name: "Bob".to_owned(),
        last_name: "Builder".to_owned(),
        role: Some("WAREHOUSE".to_owned()),
    };
    block_on(h.client.register(&registration)).unwrap();

    let requests = h.transport.requests();
    assert_eq!(requests[0].url, "/api/auth/register");
    assert_eq!(
        requests[0].body,
        Some(json!({
            "username": "bob",
            "password": "pw",
            "email": "bob@example.com",
            "firstName": "Bob",
            "lastName": "Builder",
            "role": "WAREHOUSE",
        }))
    );
}

#[test]
fn register_omits_role_when_none() {
    let h = harness();
    h.transport.script("/api/auth/register", Reply::empty(201));

    let registration = Registration {
        username: "bob".to_owned(),
        password: "pw".to_owned(),
        email: "bob@example.com".to_owned(),
        first_name: "Bob".to_owned(),
        last_name: "Builder".to_owned(),
        role: None,
    };
    block_on(h.client.register(&registration)).unwrap();

    let body = h.transport.requests()[0].body.clone().unwrap();
    assert!(body.get("role").is_none());
}

#[test]
fn register_rejection_is_an_authentication_error() {
    let h = harness();
    h.transport.script(
        "/api/auth/register",
        Reply::json(409, &json!({ "message": "username taken" })),
    );

    let registration = Registration {
        username: "bob".to_owned(),
        password: "pw".to_owned(),
        email: "bob@example.com".to_owned(),
        first_name: "Bob".to_owned(),
        last_name: "Builder".to_owned(),
        role: None,
    };
    let err = block_on(h.client.register(&registration)).unwrap_err();
    assert!(matches!(err, ApiError::Authentication(m) if m == "username taken"));
    assert!(!h.client.is_authenticated());
}

// =============================================================
// Refresh exchange
// =============================================================

#[test]
fn refresh_with_dead_refresh_token_skips_the_network() {
    let h = harness();
    seed(&h, -DAY_MS, -1_000);

    assert_eq!(block_on(h.client.refresh_access_token()), None);

    assert_eq!(h.transport.calls_to("/api/auth/refresh"), 0);
    assert_eq!(h.backend.read("authToken"), None);
    assert_eq!(h.backend.read("refreshToken"), None);
}

#[test]
fn refresh_with_no_session_skips_the_network() {
    let h = harness();
    assert_eq!(block_on(h.client.refresh_access_token()), None);
    assert_eq!(h.transport.requests().len(), 0);
}

#[test]
fn refresh_rotates_only_the_access_pair() {
    let h = harness();
    seed(&h, -1_000, DAY_MS);
    let refresh_expiry_before = h.backend.read("refreshTokenExpiry").unwrap();
    h.transport.script(
        "/api/auth/refresh",
        Reply::json(200, &json!({ "token": "A2", "expiresInMs": 900_000 })),
    );

    let before = clock::now_ms();
    let token = block_on(h.client.refresh_access_token());
    let after = clock::now_ms();

    assert_eq!(token, Some("A2".to_owned()));
    assert_eq!(h.backend.read("authToken"), Some("A2".to_owned()));
    assert_eq!(h.backend.read("refreshToken"), Some("R1".to_owned()));
    assert_eq!(
        h.backend.read("refreshTokenExpiry"),
        Some(refresh_expiry_before)
    );
    let access_expiry: i64 = h.backend.read("tokenExpiry").unwrap().parse().unwrap();
    assert!(access_expiry >= before + 900_000);
    assert!(access_expiry <= after + 900_000);
}

#[test]
fn refresh_sends_the_stored_refresh_token() {
    let h = harness();
    seed(&h, -1_000, DAY_MS);
    h.transport.script(
        "/api/auth/refresh",
        Reply::json(200, &json!({ "token": "A2", "expiresInMs": 900_000 })),
    );

    block_on(h.client.refresh_access_token());

    let requests = h.transport.requests();
    assert_eq!(requests[0].body, Some(json!({ "refreshToken": "R1" })));
    assert_eq!(requests[0].bearer, None);
}

#[test]
fn refresh_rejection_logs_the_session_out() {
    let h = harness();
    seed(&h, -1_000, DAY_MS);
    h.transport.script("/api/auth/refresh", Reply::empty(401));

    assert_eq!(block_on(h.client.refresh_access_token()), None);

    assert!(!h.client.is_authenticated());
    assert_eq!(h.backend.read("refreshToken"), None);
}

#[test]
fn refresh_transport_failure_logs_the_session_out() {
    let h = harness();
    seed(&h, -1_000, DAY_MS);
    h.transport
        .script("/api/auth/refresh", Reply::offline("connection reset"));

    assert_eq!(block_on(h.client.refresh_access_token()), None);
    assert!(!h.client.is_authenticated());
}

#[test]
fn refresh_undecodable_body_logs_the_session_out() {
    let h = harness();
    seed(&h, -1_000, DAY_MS);
    h.transport
        .script("/api/auth/refresh", Reply::text(200, "<!doctype html>"));

    assert_eq!(block_on(h.client.refresh_access_token()), None);
    assert!(!h.client.is_authenticated());
}

// =============================================================
// Logout and token queries
// =============================================================

#[test]
fn logout_is_idempotent() {
    let h = harness();
    seed(&h, 900_000, DAY_MS);

    h.client.logout();
    assert!(!h.client.is_authenticated());
    assert_eq!(h.backend.read("authToken"), None);

    // Second logout with nothing stored changes nothing and panics nowhere.
    h.client.logout();
    assert!(!h.client.is_authenticated());
}

#[test]
fn logout_without_a_session_is_a_no_op() {
    let h = harness();
    h.client.logout();
    assert!(!h.client.is_authenticated());
}

#[test]
fn token_accessor_never_refreshes() {
    let h = harness();
    seed(&h, -1_000, DAY_MS);

    assert_eq!(h.client.token(), None);
    assert_eq!(h.transport.requests().len(), 0);
}

#[test]
fn token_accessor_returns_live_token() {
    let h = harness();
    seed(&h, 900_000, DAY_MS);
    assert_eq!(h.client.token(), Some("A1".to_owned()));
}

// =============================================================
// Expiring-soon window
// =============================================================

#[test]
fn token_far_from_expiry_is_not_expiring_soon() {
    let h = harness();
    h.store.write(&SessionTokens {
        access_token: "A1".to_owned(),
        access_expires_at_ms: 1_000_000,
        refresh_token: "R1".to_owned(),
        refresh_expires_at_ms: 2_000_000,
    });
    assert!(!h.client.is_token_expiring_soon_at(1_000_000 - 60_001));
}

#[test]
fn leeway_boundary_is_not_yet_expiring() {
    let h = harness();
    h.store.write(&SessionTokens {
        access_token: "A1".to_owned(),
        access_expires_at_ms: 1_000_000,
        refresh_token: "R1".to_owned(),
        refresh_expires_at_ms: 2_000_000,
    });
    // Remaining lifetime exactly equal to the leeway sits outside the window.
    assert!(!h.client.is_token_expiring_soon_at(1_000_000 - 60_000));
    assert!(h.client.is_token_expiring_soon_at(1_000_000 - 59_999));
}

#[test]
fn expired_token_counts_as_expiring() {
    let h = harness();
    h.store.write(&SessionTokens {
        access_token: "A1".to_owned(),
        access_expires_at_ms: 1_000_000,
        refresh_token: "R1".to_owned(),
        refresh_expires_at_ms: 2_000_000,
    });
    assert!(h.client.is_token_expiring_soon_at(5_000_000));
}

#[test]
fn missing_expiry_counts_as_expiring() {
    let h = harness();
    assert!(h.client.is_token_expiring_soon_at(0));
}
