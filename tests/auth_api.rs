#[macro_use]
mod common;

use actix_web::test;
use serde_json::json;

#[actix_web::test]
async fn test_register_and_login() {
    let app = test_app!();

    let register_response = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({"username": "alice", "password": "pw1"}))
        .send_request(&app)
        .await;
    assert_eq!(register_response.status(), 201);
    let register_body: serde_json::Value = test::read_body_json(register_response).await;
    assert_eq!(register_body["message"], "user registered");
    assert!(register_body.get("password_hash").is_none());

    let login_response = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"username": "alice", "password": "pw1"}))
        .send_request(&app)
        .await;
    assert_eq!(login_response.status(), 200);

    let login_body: serde_json::Value = test::read_body_json(login_response).await;
    let access = login_body["access_token"].as_str().unwrap();
    let refresh = login_body["refresh_token"].as_str().unwrap();
    assert!(!access.is_empty());
    assert!(!refresh.is_empty());
    assert_ne!(access, refresh);
}

#[actix_web::test]
async fn test_duplicate_registration() {
    let app = test_app!();
    register_and_login!(app, "alice", "pw1");

    let response = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({"username": "alice", "password": "another"}))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 409);

    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["error"]["status"], 409);
}

#[actix_web::test]
async fn test_invalid_registration() {
    let app = test_app!();

    let response = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({"username": "alice", "password": ""}))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 400);

    let response = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({"username": "alice"}))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 400);

    let response = test::TestRequest::post()
        .uri("/auth/register")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 400);
}

#[actix_web::test]
async fn test_invalid_login() {
    let app = test_app!();
    register_and_login!(app, "alice", "pw1");

    let wrong_password = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"username": "alice", "password": "wrong"}))
        .send_request(&app)
        .await;
    assert_eq!(wrong_password.status(), 401);
    let wrong_body: serde_json::Value = test::read_body_json(wrong_password).await;

    let unknown_user = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"username": "nobody", "password": "wrong"}))
        .send_request(&app)
        .await;
    assert_eq!(unknown_user.status(), 401);
    let unknown_body: serde_json::Value = test::read_body_json(unknown_user).await;

    // Same answer either way.
    assert_eq!(wrong_body, unknown_body);
}

#[actix_web::test]
async fn test_refresh_rotates_and_revokes() {
    let app = test_app!();
    let login = register_and_login!(app, "alice", "pw1");
    let first_refresh = login["refresh_token"].as_str().unwrap().to_string();

    let response = test::TestRequest::post()
        .uri("/auth/refresh")
        .set_json(json!({"refresh_token": first_refresh}))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert!(body["access_token"].as_str().is_some());
    let second_refresh = body["refresh_token"].as_str().unwrap().to_string();
    assert_ne!(first_refresh, second_refresh);

    let replay = test::TestRequest::post()
        .uri("/auth/refresh")
        .set_json(json!({"refresh_token": first_refresh}))
        .send_request(&app)
        .await;
    assert_eq!(replay.status(), 401);

    let response = test::TestRequest::post()
        .uri("/auth/refresh")
        .set_json(json!({"refresh_token": second_refresh}))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 200);
}

#[actix_web::test]
async fn test_relogin_revokes_previous_refresh_token() {
    let app = test_app!();
    let first = register_and_login!(app, "alice", "pw1");

    let relogin = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"username": "alice", "password": "pw1"}))
        .send_request(&app)
        .await;
    assert_eq!(relogin.status(), 200);

    let response = test::TestRequest::post()
        .uri("/auth/refresh")
        .set_json(json!({"refresh_token": first["refresh_token"]}))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 401);
}

#[actix_web::test]
async fn test_refresh_rejects_access_token() {
    let app = test_app!();
    let login = register_and_login!(app, "alice", "pw1");

    let response = test::TestRequest::post()
        .uri("/auth/refresh")
        .set_json(json!({"refresh_token": login["access_token"]}))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 401);
}
