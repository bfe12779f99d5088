//! Crate-level tests for the catalog crate
//! Routers are exercised together with the account router over in-memory stores.

#[cfg(test)]
mod error_tests {
    use crate::error::*;
    use auth::AuthError;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(CatalogError, StatusCode)> = vec![
            (CatalogError::BookNotFound, StatusCode::NOT_FOUND),
            (CatalogError::QuestionNotFound, StatusCode::NOT_FOUND),
            (CatalogError::Forbidden, StatusCode::FORBIDDEN),
            (
                CatalogError::Auth(AuthError::InvalidToken),
                StatusCode::UNAUTHORIZED,
            ),
            (
                CatalogError::Internal("test".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            assert_eq!(error.status_code(), expected_status);
            assert_eq!(error.into_response().status(), expected_status);
        }
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use auth::{AuthAppState, AuthConfig, InMemoryAccountRepository, RolePolicy, account_router};
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use platform::clock::{Clock, ManualClock};
    use platform::crypto::to_base64;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::{BookCatalog, QuestionBoard};
    use crate::infra::InMemoryCatalogRepository;
    use crate::presentation::{BookAppState, QuestionAppState, book_router, question_router};

    const SUPERUSER: &str = "boss@x.com";

    fn app() -> Router {
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::at_epoch());
        let config = AuthConfig::default()
            .with_superuser_email(SUPERUSER)
            .with_admin_emails(["admin@x.com", "other@x.com"]);
        let policy = Arc::new(RolePolicy::new(&config.superuser_email));

        let auth_state = AuthAppState::new(InMemoryAccountRepository::new(), config, clock.clone());
        let catalog_repo = Arc::new(InMemoryCatalogRepository::new(clock.clone()));

        let books = BookAppState {
            catalog: Arc::new(BookCatalog::new(catalog_repo.clone(), policy.clone())),
        };
        let questions = QuestionAppState {
            board: Arc::new(QuestionBoard::new(catalog_repo, policy, clock)),
        };

        Router::new()
            .merge(account_router(auth_state.clone()))
            .merge(book_router(auth_state.clone(), books))
            .merge(question_router(auth_state, questions))
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    /// Register, log in, return the bearer token
    async fn sign_in(app: &Router, email: &str) -> String {
        let register = json_request(
            "POST",
            "/user",
            None,
            json!({ "email": email, "first_name": "Ann", "last_name": "Lee", "password": "pw1" }),
        );
        send(app, register).await;

        let login = Request::get("/login")
            .header(
                header::AUTHORIZATION,
                format!("Basic {}", to_base64(format!("{email}:pw1").as_bytes())),
            )
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, login).await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_books_are_public_to_read() {
        let app = app();
        let (status, body) = send(&app, Request::get("/book").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["books"], json!([]));

        let (status, _) = send(&app, Request::get("/book/1").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_only_superuser_creates_books() {
        let app = app();
        let books = json!([{ "title": "Dune", "pages": 412 }, { "title": "Emma" }]);

        let (status, _) = send(&app, json_request("POST", "/book", None, books.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let admin = sign_in(&app, "admin@x.com").await;
        let (status, _) =
            send(&app, json_request("POST", "/book", Some(&admin), books.clone())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let boss = sign_in(&app, "BOSS@x.com").await;
        let (status, _) = send(&app, json_request("POST", "/book", Some(&boss), books)).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, Request::get("/book").body(Body::empty()).unwrap()).await;
        assert_eq!(body["books"].as_array().unwrap().len(), 2);

        let (status, body) =
            send(&app, Request::get("/book/1").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Dune");
        assert_eq!(body["pages"], 412);
    }

    #[tokio::test]
    async fn test_question_lifecycle() {
        let app = app();
        let owner = sign_in(&app, "admin@x.com").await;
        let other = sign_in(&app, "other@x.com").await;
        let plain = sign_in(&app, "plain@x.com").await;

        let ask = json!({ "question": "Q?", "answer": "A" });

        let (status, _) = send(&app, json_request("POST", "/question", Some(&plain), ask.clone())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, created) =
            send(&app, json_request("POST", "/question", Some(&owner), ask)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["author"], "Ann_0001");
        let uri = format!("/question/{}", created["id"]);

        let patch = json!({ "answer": "B" });
        let (status, _) = send(&app, json_request("PUT", &uri, Some(&other), patch.clone())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, updated) = send(&app, json_request("PUT", &uri, Some(&owner), patch)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["answer"], "B");
        assert_eq!(updated["question"], "Q?");

        // Delete compares the tag with the caller's email, which never matches
        let (status, _) = send(&app, json_request("DELETE", &uri, Some(&owner), json!({}))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (_, body) = send(&app, Request::get("/question").body(Body::empty()).unwrap()).await;
        assert_eq!(body["questions"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_question_is_not_found() {
        let app = app();
        let owner = sign_in(&app, "admin@x.com").await;
        let (status, _) = send(
            &app,
            json_request("PUT", "/question/42", Some(&owner), json!({ "answer": "B" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
