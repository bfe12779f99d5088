//! Crate-level tests for the auth crate
//! Router tests drive the account endpoints end to end over an in-memory store.

#[cfg(test)]
mod error_tests {
    use crate::domain::value_object::OwnershipTagError;
    use crate::error::*;
    use axum::http::{StatusCode, header};
    use axum::response::IntoResponse;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(AuthError, StatusCode)> = vec![
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::InvalidToken, StatusCode::UNAUTHORIZED),
            (AuthError::Forbidden, StatusCode::FORBIDDEN),
            (
                AuthError::MalformedOwnershipTag(OwnershipTagError::TooShort),
                StatusCode::FORBIDDEN,
            ),
            (AuthError::AccountNotFound, StatusCode::NOT_FOUND),
            (AuthError::EmailTaken, StatusCode::UNPROCESSABLE_ENTITY),
            (
                AuthError::InvalidEmail("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AuthError::Internal("test".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AuthError::TokenCollision, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected_status) in test_cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected_status);
        }
    }

    #[test]
    fn test_unauthorized_carries_challenge() {
        let response = AuthError::InvalidCredentials.into_response();
        let challenge = response.headers().get(header::WWW_AUTHENTICATE).unwrap();
        assert!(challenge.to_str().unwrap().starts_with("Basic"));

        let response = AuthError::InvalidToken.into_response();
        let challenge = response.headers().get(header::WWW_AUTHENTICATE).unwrap();
        assert!(challenge.to_str().unwrap().starts_with("Bearer"));
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let app_error = AuthError::Internal("pool exhausted at 10.0.0.1".into()).to_app_error();
        assert!(!app_error.message().contains("10.0.0.1"));
    }

    #[test]
    fn test_token_collision_is_opaque() {
        let app_error = AuthError::TokenCollision.to_app_error();
        assert_eq!(app_error.message(), "Internal server error");
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use chrono::Duration;
    use platform::clock::ManualClock;
    use platform::crypto::to_base64;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::config::AuthConfig;
    use crate::domain::repository::AccountRepository;
    use crate::infra::memory::InMemoryAccountRepository;
    use crate::presentation::{AuthAppState, account_router};

    struct TestApp {
        router: Router,
        repo: InMemoryAccountRepository,
        clock: ManualClock,
    }

    fn app() -> TestApp {
        let repo = InMemoryAccountRepository::new();
        let clock = ManualClock::at_epoch();
        let config = AuthConfig::default().with_admin_emails(["boss@x.com"]);
        let state = AuthAppState::new(repo.clone(), config, Arc::new(clock.clone()));
        TestApp {
            router: account_router(state),
            repo,
            clock,
        }
    }

    fn basic(id: &str, secret: &str) -> String {
        format!("Basic {}", to_base64(format!("{id}:{secret}").as_bytes()))
    }

    async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn register(router: &Router, email: &str, password: &str) -> StatusCode {
        let req = Request::post("/user")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "email": email,
                    "first_name": "Ann",
                    "last_name": "Lee",
                    "password": password,
                })
                .to_string(),
            ))
            .unwrap();
        send(router, req).await.0
    }

    async fn login(router: &Router, email: &str, password: &str) -> (StatusCode, Value) {
        let req = Request::get("/login")
            .header(header::AUTHORIZATION, basic(email, password))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(router, req).await;
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    fn bearer(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"));
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let app = app();
        assert_eq!(register(&app.router, "a@x.com", "pw1").await, StatusCode::OK);

        let (status, body) = login(&app.router, "a@x.com", "pw1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "a@x.com");
        assert_eq!(body["is_admin"], false);
        assert!(body["token"].as_str().is_some_and(|t| t.len() >= 43));
        assert!(body.get("password").is_none());
        assert!(body.get("password_hash").is_none());

        let (status, _) = login(&app.router, "a@x.com", "wrong").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_unprocessable() {
        let app = app();
        register(&app.router, "a@x.com", "pw1").await;
        assert_eq!(
            register(&app.router, "A@X.com", "pw2").await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(app.repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_allow_listed_registration_is_admin() {
        let app = app();
        register(&app.router, "Boss@x.com", "pw1").await;
        let (_, body) = login(&app.router, "boss@x.com", "pw1").await;
        assert_eq!(body["is_admin"], true);
    }

    #[tokio::test]
    async fn test_login_reuses_token_until_near_expiry() {
        let app = app();
        register(&app.router, "a@x.com", "pw1").await;

        let (_, first) = login(&app.router, "a@x.com", "pw1").await;
        app.clock.advance(Duration::hours(1));
        let (_, second) = login(&app.router, "a@x.com", "pw1").await;
        assert_eq!(first["token"], second["token"]);

        app.clock.advance(Duration::hours(23) - Duration::seconds(30));
        let (_, third) = login(&app.router, "a@x.com", "pw1").await;
        assert_ne!(first["token"], third["token"]);
    }

    #[tokio::test]
    async fn test_missing_authorization_is_challenged() {
        let app = app();
        let req = Request::get("/login").body(Body::empty()).unwrap();
        let response = app.router.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));

        let req = Request::delete("/user").body(Body::empty()).unwrap();
        let (status, _) = send(&app.router, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_token_is_not_accepted_as_basic() {
        let app = app();
        register(&app.router, "a@x.com", "pw1").await;
        let (_, body) = login(&app.router, "a@x.com", "pw1").await;
        let token = body["token"].as_str().unwrap().to_string();

        // Bearer on the Basic route
        let (status, _) = send(&app.router, bearer("GET", "/login", &token, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        // Basic on a Bearer route
        let req = Request::post("/logout")
            .header(header::AUTHORIZATION, basic("a@x.com", "pw1"))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app.router, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_update_profile() {
        let app = app();
        register(&app.router, "a@x.com", "pw1").await;
        register(&app.router, "b@x.com", "pw1").await;
        let (_, body) = login(&app.router, "a@x.com", "pw1").await;
        let token = body["token"].as_str().unwrap().to_string();

        let req = bearer(
            "PUT",
            "/user",
            &token,
            Some(json!({ "first_name": "Annie", "password": "pw2" })),
        );
        assert_eq!(send(&app.router, req).await.0, StatusCode::OK);

        let (status, body) = login(&app.router, "a@x.com", "pw2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["first_name"], "Annie");
        assert_eq!(body["last_name"], "Lee");
        assert!(!body["modified_on"].is_null());

        let req = bearer("PUT", "/user", &token, Some(json!({ "email": "b@x.com" })));
        assert_eq!(
            send(&app.router, req).await.0,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn test_update_cannot_grant_admin() {
        let app = app();
        register(&app.router, "a@x.com", "pw1").await;
        let (_, body) = login(&app.router, "a@x.com", "pw1").await;
        let token = body["token"].as_str().unwrap().to_string();

        let req = bearer("PUT", "/user", &token, Some(json!({ "is_admin": true })));
        assert_eq!(send(&app.router, req).await.0, StatusCode::OK);

        let (_, body) = login(&app.router, "a@x.com", "pw1").await;
        assert_eq!(body["is_admin"], false);
    }

    #[tokio::test]
    async fn test_logout_revokes_token() {
        let app = app();
        register(&app.router, "a@x.com", "pw1").await;
        let (_, body) = login(&app.router, "a@x.com", "pw1").await;
        let token = body["token"].as_str().unwrap().to_string();

        let (status, _) = send(&app.router, bearer("POST", "/logout", &token, None)).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app.router, bearer("POST", "/logout", &token, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        // Row and token string survive revocation
        let account = app.repo.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(account.token.unwrap().as_str(), token);

        let (_, relogin) = login(&app.router, "a@x.com", "pw1").await;
        assert_ne!(relogin["token"], Value::String(token));
    }

    #[tokio::test]
    async fn test_delete_account() {
        let app = app();
        register(&app.router, "a@x.com", "pw1").await;
        let (_, body) = login(&app.router, "a@x.com", "pw1").await;
        let token = body["token"].as_str().unwrap().to_string();

        let (status, _) = send(&app.router, bearer("DELETE", "/user", &token, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(app.repo.is_empty().await);

        let (status, _) = login(&app.router, "a@x.com", "pw1").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let app = app();
        register(&app.router, "a@x.com", "pw1").await;
        let (_, body) = login(&app.router, "a@x.com", "pw1").await;
        let token = body["token"].as_str().unwrap().to_string();

        app.clock.advance(Duration::hours(24) + Duration::seconds(1));
        let (status, _) = send(&app.router, bearer("POST", "/logout", &token, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
