mod common;

use std::io::Write;

use common::TestApp;
use common::SIGNING_KEY;
use forum_auth::Argon2Params;
use forum_auth::PasswordRecord;
use forum_gateway::domain::account::ports::AccountRepository;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_signup_success() {
    let app = TestApp::spawn().await;

    let response = app.signup("ada@example.com", "Sup3r$ecret!").await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"]["password_hash"].is_null());

    let stored = app
        .repository
        .find_by_email("ada@example.com")
        .await
        .unwrap()
        .expect("Account not stored");
    let record = PasswordRecord::parse(&stored.password_hash).expect("Stored hash malformed");
    assert_eq!(record.params(), &Argon2Params::new(64, 1, 1));
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = TestApp::spawn().await;

    app.signup("ada@example.com", "first").await;
    let response = app.signup("ada@example.com", "second").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_signup_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app.signup("not-an-email", "Sup3r$ecret!").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_signup_empty_password() {
    let app = TestApp::spawn().await;

    let response = app.signup("ada@example.com", "").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_signup_while_logged_in() {
    let app = TestApp::spawn().await;
    let token = app.signed_in("ada@example.com", "Sup3r$ecret!").await;

    let response = app
        .post("/api/users")
        .bearer_auth(&token)
        .json(&json!({ "email": "bob@example.com", "password": "hunter2" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(app
        .repository
        .find_by_email("bob@example.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_signup_with_unverified_claims_is_still_turned_away() {
    let app = TestApp::spawn().await;
    let forged = app.token_for("mallory@example.com", b"not-the-server-key", 3600);

    let response = app
        .post("/api/users")
        .bearer_auth(&forged)
        .json(&json!({ "email": "bob@example.com", "password": "hunter2" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_with_garbage_bearer_is_allowed() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .bearer_auth("garbage")
        .json(&json!({ "email": "bob@example.com", "password": "hunter2" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    app.signup("ada@example.com", "Sup3r$ecret!").await;

    let response = app.login("ada@example.com", "Sup3r$ecret!").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["account"]["email"], "ada@example.com");
    let token = body["data"]["token"].as_str().unwrap();
    assert_eq!(token.split('.').count(), 3);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::spawn().await;
    app.signup("ada@example.com", "Sup3r$ecret!").await;

    let response = app.login("ada@example.com", "wrong").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_unknown_account() {
    let app = TestApp::spawn().await;

    let response = app.login("nobody@example.com", "whatever").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_current_user_success() {
    let app = TestApp::spawn().await;
    let token = app.signed_in("ada@example.com", "Sup3r$ecret!").await;

    let response = app
        .get_authenticated("/api/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["email"], "ada@example.com");
}

#[tokio::test]
async fn test_current_user_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/users/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_user_without_bearer_prefix() {
    let app = TestApp::spawn().await;
    let token = app.signed_in("ada@example.com", "Sup3r$ecret!").await;

    let response = app
        .get("/api/users/me")
        .header("Authorization", token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_user_malformed_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authenticated("/api/users/me", "not.a.token")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_user_forged_token() {
    let app = TestApp::spawn().await;
    app.signup("ada@example.com", "Sup3r$ecret!").await;
    let forged = app.token_for("ada@example.com", b"attacker-chosen-key", 3600);

    let response = app
        .get_authenticated("/api/users/me", &forged)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_user_expired_token() {
    let app = TestApp::spawn().await;
    app.signup("ada@example.com", "Sup3r$ecret!").await;
    let expired = app.token_for("ada@example.com", SIGNING_KEY, -30);

    let response = app
        .get_authenticated("/api/users/me", &expired)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_current_user_deleted_account() {
    let app = TestApp::spawn().await;
    let token = app.token_for("ghost@example.com", SIGNING_KEY, 3600);

    let response = app
        .get_authenticated("/api/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_change_password() {
    let app = TestApp::spawn().await;
    let token = app.signed_in("ada@example.com", "old secret").await;

    let response = app
        .put_authenticated("/api/users/me/password", &token)
        .json(&json!({ "new_password": "new secret" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        app.login("ada@example.com", "old secret").await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        app.login("ada@example.com", "new secret").await.status(),
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_change_password_rejects_empty() {
    let app = TestApp::spawn().await;
    let token = app.signed_in("ada@example.com", "old secret").await;

    let response = app
        .put_authenticated("/api/users/me/password", &token)
        .json(&json!({ "new_password": "" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_change_password_requires_token() {
    let app = TestApp::spawn().await;

    let response = app
        .api_client
        .put(&format!("{}/api/users/me/password", app.address))
        .json(&json!({ "new_password": "new secret" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_upgrades_outdated_hash() {
    let app = TestApp::spawn_with(Argon2Params::new(128, 1, 1)).await;
    app.signup("ada@example.com", "Sup3r$ecret!").await;

    // Move the record to a server configured with different costs.
    let upgraded = TestApp::spawn().await;
    let account = app
        .repository
        .find_by_email("ada@example.com")
        .await
        .unwrap()
        .unwrap();
    upgraded.repository.create(account).await.unwrap();

    let response = upgraded.login("ada@example.com", "Sup3r$ecret!").await;
    assert_eq!(response.status(), StatusCode::OK);

    let stored = upgraded
        .repository
        .find_by_email("ada@example.com")
        .await
        .unwrap()
        .unwrap();
    let record = PasswordRecord::parse(&stored.password_hash).unwrap();
    assert_eq!(record.params(), &Argon2Params::new(64, 1, 1));
}

#[tokio::test]
async fn test_current_user_with_file_backed_key() {
    let mut key_file = tempfile::NamedTempFile::new().expect("Failed to create key file");
    key_file.write_all(SIGNING_KEY).expect("Failed to write key file");
    let app = TestApp::spawn_with_key_file(key_file.path()).await;
    let token = app.signed_in("ada@example.com", "Sup3r$ecret!").await;

    let response = app
        .get_authenticated("/api/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["email"], "ada@example.com");
}

#[tokio::test]
async fn test_current_user_with_missing_key_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let key_path = dir.path().join("jwt.key");
    std::fs::write(&key_path, SIGNING_KEY).expect("Failed to write key file");
    let app = TestApp::spawn_with_key_file(&key_path).await;
    let token = app.signed_in("ada@example.com", "Sup3r$ecret!").await;

    std::fs::remove_file(&key_path).expect("Failed to remove key file");

    let response = app
        .get_authenticated("/api/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Internal server error");
}
