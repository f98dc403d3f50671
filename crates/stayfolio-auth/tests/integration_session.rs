//! Session lifecycle integration tests
//!
//! Exercise the token store, claim decoding, affordance gating and the route
//! guard together against real signed tokens and a file-backed store.

mod common;

use std::sync::Arc;

use stayfolio_auth::{
    decode, has_role, is_admin, login_return_path, AdminAffordance, AuthError, FileStorage,
    Guarded, Route, RouteGuard, SessionStorage, TokenStore, TOKEN_KEY,
};
use stayfolio_types::ROLE_ADMIN;

use common::{sign, TestClaims};

fn file_store(dir: &tempfile::TempDir) -> Arc<TokenStore> {
    let storage = FileStorage::new(dir.path().join("nested").join("session.json"));
    Arc::new(TokenStore::init(Arc::new(storage)).unwrap())
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_admin_token_claims() {
    let token = sign(&TestClaims::admin("admin@example.com"));

    let claims = decode(&token).unwrap();
    assert!(claims.is_admin());
    assert!(claims.has_role("ROLE_USER"));
    assert_eq!(claims.subject(), Some("admin@example.com"));
    assert!(claims.claim("exp").is_some());
}

#[test]
fn test_token_without_roles_field() {
    let token = sign(&TestClaims::user("user@example.com"));

    let claims = decode(&token).unwrap();
    assert!(claims.roles().is_empty());
    assert!(!has_role(&token, ROLE_ADMIN));
}

#[test]
fn test_expired_token_still_decodes() {
    let token = sign(&TestClaims::admin("admin@example.com").expired());

    assert!(has_role(&token, ROLE_ADMIN));
}

#[test]
fn test_signature_is_not_checked() {
    let token = sign(&TestClaims::admin("admin@example.com"));
    let mut parts: Vec<&str> = token.split('.').collect();
    parts[2] = "tampered";
    let tampered = parts.join(".");

    assert!(has_role(&tampered, ROLE_ADMIN));
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn test_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let token = sign(&TestClaims::admin("admin@example.com"));

    file_store(&dir).save(token.clone()).unwrap();

    let restarted = file_store(&dir);
    assert_eq!(restarted.read(), Some(token));
    assert!(is_admin(&restarted));

    restarted.clear().unwrap();
    assert!(!file_store(&dir).is_logged_in());
}

#[test]
fn test_token_stored_under_fixed_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let storage = Arc::new(FileStorage::new(&path));
    let store = TokenStore::init(storage.clone()).unwrap();

    store.save("abc.def.ghi").unwrap();
    assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("abc.def.ghi"));

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("qr_jwt"));
}

#[test]
fn test_corrupt_session_file_reads_as_signed_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, b"{trunc").unwrap();

    let err = FileStorage::new(&path).get(TOKEN_KEY).unwrap_err();
    assert!(matches!(err, AuthError::CorruptStorage { .. }));
    assert_eq!(err.error_code(), "SESSION_STORAGE_CORRUPT");

    let store = TokenStore::init(Arc::new(FileStorage::new(&path))).unwrap();
    assert!(!store.is_logged_in());

    // Logging in again repairs the file
    store.save(sign(&TestClaims::user("user@example.com"))).unwrap();
    let reopened = TokenStore::init(Arc::new(FileStorage::new(&path))).unwrap();
    assert_eq!(reopened.read(), store.read());
}

// ============================================================================
// Affordances and guard
// ============================================================================

#[test]
fn test_affordance_follows_session() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(&dir);

    assert_eq!(AdminAffordance::evaluate(&store), AdminAffordance::Anonymous);

    store.save(sign(&TestClaims::user("user@example.com").with_roles(&["ROLE_USER"]))).unwrap();
    assert_eq!(
        AdminAffordance::evaluate(&store),
        AdminAffordance::SignedInWithoutPermission
    );

    store.save(sign(&TestClaims::admin("admin@example.com"))).unwrap();
    assert!(AdminAffordance::evaluate(&store).can_manage());
}

#[test]
fn test_guard_redirect_and_return() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(&dir);
    let guard = RouteGuard::new(store.clone());

    let route = Route::parse("/apartments/42/edit").unwrap();
    let redirect = guard.enter(&route).unwrap_err();
    assert_eq!(redirect.to(), "/login");
    assert_eq!(redirect.from(), "/apartments/42/edit");

    // After login the user lands back where they were headed
    store.save(sign(&TestClaims::admin("admin@example.com"))).unwrap();
    let target = login_return_path(Some(redirect.from()));
    assert_eq!(target, "/apartments/42/edit");

    let outcome = guard.guard(target, || "edit form");
    assert_eq!(outcome, Guarded::Render("edit form"));
}

#[test]
fn test_guard_sees_session_cleared_elsewhere() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(&dir);
    let guard = RouteGuard::new(store.clone());

    store.save(sign(&TestClaims::user("user@example.com"))).unwrap();
    assert!(guard.enter(&Route::ApartmentCreate).is_ok());

    // A rejected request elsewhere drops the session
    store.clear().unwrap();
    let redirect = guard.enter(&Route::ApartmentCreate).unwrap_err();
    assert_eq!(redirect.from(), "/apartments/new");
}

#[test]
fn test_non_admin_session_passes_guard() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(&dir);
    let guard = RouteGuard::new(store.clone());

    store.save(sign(&TestClaims::user("user@example.com"))).unwrap();

    assert!(guard.enter(&Route::ApartmentCreate).is_ok());
    assert!(!is_admin(&store));
}
