use todo_api_server::{AppState, Settings};

pub fn test_state() -> AppState {
    let config = Settings::new_for_test().expect("Failed to load test config");
    AppState::in_memory(config).expect("Failed to build app state")
}

/// Builds the full application on a fresh in-memory store.
#[macro_export]
macro_rules! test_app {
    () => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($crate::common::test_state()))
                .configure(todo_api_server::configure_routes),
        )
        .await
    };
}

/// Registers a user and logs in, evaluating to the login response body.
#[macro_export]
macro_rules! register_and_login {
    ($app:expr, $username:expr, $password:expr) => {{
        let resp = actix_web::test::TestRequest::post()
            .uri("/auth/register")
            .set_json(serde_json::json!({"username": $username, "password": $password}))
            .send_request(&$app)
            .await;
        assert_eq!(resp.status(), 201);

        let resp = actix_web::test::TestRequest::post()
            .uri("/auth/login")
            .set_json(serde_json::json!({"username": $username, "password": $password}))
            .send_request(&$app)
            .await;
        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        body
    }};
}
