//! Integration tests for API endpoints.
//!
//! These tests drive the full router with stub services, so the cookie
//! handling and response shapes are exercised without a database or Redis.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use postboard::api::create_router;
use postboard::domain::{Credentials, FieldError, Post, SessionContext, User};
use postboard::errors::{AppError, AppResult};
use postboard::infra::Database;
use postboard::services::{AccountService, AuthAttempt, PostService};
use postboard::{AppState, Config};

const STUB_TOKEN: &str = "stub-session-token";

// =============================================================================
// Stub Services
// =============================================================================

/// Account service stub with a fixed outcome for every operation.
struct StubAccountService {
    /// The authenticated user; `None` makes register/login reject.
    user: Option<User>,
    /// Rejection payload used when `user` is `None`.
    errors: Vec<FieldError>,
    logout_succeeds: bool,
}

impl StubAccountService {
    fn authenticated(user: User) -> Self {
        Self {
            user: Some(user),
            errors: Vec::new(),
            logout_succeeds: true,
        }
    }

    fn rejecting(errors: Vec<FieldError>) -> Self {
        Self {
            user: None,
            errors,
            logout_succeeds: true,
        }
    }

    fn anonymous() -> Self {
        Self::rejecting(Vec::new())
    }

    fn failing_logout(user: User) -> Self {
        Self {
            user: Some(user),
            errors: Vec::new(),
            logout_succeeds: false,
        }
    }

    fn attempt(&self, session: &mut SessionContext) -> AuthAttempt {
        match &self.user {
            Some(user) => {
                session.set_token(STUB_TOKEN.to_string());
                AuthAttempt::Success(user.clone())
            }
            None => AuthAttempt::Rejected(self.errors.clone()),
        }
    }
}

#[async_trait]
impl AccountService for StubAccountService {
    async fn register(
        &self,
        _credentials: Credentials,
        session: &mut SessionContext,
    ) -> AppResult<AuthAttempt> {
        Ok(self.attempt(session))
    }

    async fn login(
        &self,
        _credentials: Credentials,
        session: &mut SessionContext,
    ) -> AppResult<AuthAttempt> {
        Ok(self.attempt(session))
    }

    async fn me(&self, session: &SessionContext) -> AppResult<Option<User>> {
        if session.is_anonymous() {
            return Ok(None);
        }
        Ok(self.user.clone())
    }

    async fn logout(&self, session: &mut SessionContext) -> bool {
        if self.logout_succeeds {
            session.clear();
            true
        } else {
            false
        }
    }
}

/// Post service stub holding at most one post.
struct StubPostService {
    post: Option<Post>,
}

impl StubPostService {
    fn empty() -> Self {
        Self { post: None }
    }

    fn with_post(post: Post) -> Self {
        Self { post: Some(post) }
    }
}

#[async_trait]
impl PostService for StubPostService {
    async fn create_post(&self, title: String) -> AppResult<Post> {
        Ok(test_post(&title))
    }

    async fn get_post(&self, _id: Uuid) -> AppResult<Post> {
        self.post.clone().ok_or(AppError::NotFound)
    }

    async fn list_posts(&self) -> AppResult<Vec<Post>> {
        Ok(self.post.clone().into_iter().collect())
    }

    async fn update_post(&self, _id: Uuid, title: String) -> AppResult<Post> {
        let mut post = self.post.clone().ok_or(AppError::NotFound)?;
        post.title = title;
        Ok(post)
    }

    async fn delete_post(&self, _id: Uuid) -> AppResult<()> {
        self.post.as_ref().map(|_| ()).ok_or(AppError::NotFound)
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn test_user(username: &str) -> User {
    User::new(Uuid::new_v4(), username.to_string(), "hashed".to_string())
}

fn test_post(title: &str) -> Post {
    let now = chrono::Utc::now();
    Post {
        id: Uuid::new_v4(),
        title: title.to_string(),
        created_at: now,
        updated_at: now,
    }
}

fn test_config() -> Config {
    Config {
        database_url: String::new(),
        redis_url: String::new(),
        cors_origin: "http://localhost:3000".to_string(),
        session_ttl_seconds: 60,
    }
}

/// Build the real router around stub services and a disconnected database.
fn test_router(account: StubAccountService, posts: StubPostService) -> Router {
    let state = AppState::new(
        Arc::new(account),
        Arc::new(posts),
        Arc::new(Database::from_connection(DatabaseConnection::default())),
        test_config(),
    );
    create_router(state)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    request_with_cookie("GET", uri, cookie)
}

fn request_with_cookie(method: &str, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = cookie {
        builder = builder.header(header::COOKIE, format!("qid={}", token));
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn set_cookie(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("expected a Set-Cookie header")
        .to_str()
        .unwrap()
        .to_string()
}

// =============================================================================
// Account Session Endpoints
// =============================================================================

#[tokio::test]
async fn test_register_success_sets_session_cookie() {
    let app = test_router(
        StubAccountService::authenticated(test_user("alice")),
        StubPostService::empty(),
    );

    let response = app
        .oneshot(json_request(
            "POST",
            "/auth/register",
            json!({"username": "alice", "password": "longenough1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let cookie = set_cookie(&response);
    assert!(cookie.starts_with(&format!("qid={}", STUB_TOKEN)));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));

    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["user"]["username"], "alice");
    // The hash never crosses the wire
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_rejection_reports_field_errors_without_session() {
    let app = test_router(
        StubAccountService::rejecting(vec![FieldError::new(
            "username",
            "length must be greater than 2",
        )]),
        StubPostService::empty(),
    );

    let response = app
        .oneshot(json_request(
            "POST",
            "/auth/register",
            json!({"username": "al", "password": "longenough1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    // No token was bound, so no session cookie value is set
    let cookie = set_cookie(&response);
    assert!(cookie.starts_with("qid=;") || cookie.starts_with("qid=\"\""));
    assert!(!cookie.contains(STUB_TOKEN));

    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["errors"][0]["field"], "username");
    assert_eq!(body["errors"][0]["message"], "length must be greater than 2");
}

#[tokio::test]
async fn test_login_success_sets_session_cookie() {
    let app = test_router(
        StubAccountService::authenticated(test_user("alice")),
        StubPostService::empty(),
    );

    let response = app
        .oneshot(json_request(
            "POST",
            "/auth/login",
            json!({"username": "alice", "password": "longenough1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie(&response).starts_with(&format!("qid={}", STUB_TOKEN)));

    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["user"]["username"], "alice");
}

#[tokio::test]
async fn test_me_without_cookie_is_null() {
    let app = test_router(StubAccountService::anonymous(), StubPostService::empty());

    let response = app.oneshot(get_request("/auth/me", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, Value::Null);
}

#[tokio::test]
async fn test_me_with_cookie_returns_user() {
    let app = test_router(
        StubAccountService::authenticated(test_user("alice")),
        StubPostService::empty(),
    );

    let response = app
        .oneshot(get_request("/auth/me", Some(STUB_TOKEN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["username"], "alice");
}

#[tokio::test]
async fn test_logout_clears_session_cookie() {
    let app = test_router(
        StubAccountService::authenticated(test_user("alice")),
        StubPostService::empty(),
    );

    let response = app
        .oneshot(request_with_cookie("POST", "/auth/logout", Some(STUB_TOKEN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let cookie = set_cookie(&response);
    assert!(!cookie.contains(STUB_TOKEN));
    assert!(cookie.contains("Max-Age=0"));

    assert_eq!(body_json(response).await, Value::Bool(true));
}

#[tokio::test]
async fn test_failed_logout_keeps_session_cookie() {
    let app = test_router(
        StubAccountService::failing_logout(test_user("alice")),
        StubPostService::empty(),
    );

    let response = app
        .oneshot(request_with_cookie("POST", "/auth/logout", Some(STUB_TOKEN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    // The cookie survives so the client can retry
    let cookie = set_cookie(&response);
    assert!(cookie.starts_with(&format!("qid={}", STUB_TOKEN)));
    assert!(!cookie.contains("Max-Age=0"));

    assert_eq!(body_json(response).await, Value::Bool(false));
}

// =============================================================================
// Post Endpoints
// =============================================================================

#[tokio::test]
async fn test_create_post_returns_created() {
    let app = test_router(StubAccountService::anonymous(), StubPostService::empty());

    let response = app
        .oneshot(json_request(
            "POST",
            "/posts",
            json!({"title": "Hello world"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["title"], "Hello world");
}

#[tokio::test]
async fn test_create_post_with_empty_title_is_bad_request() {
    let app = test_router(StubAccountService::anonymous(), StubPostService::empty());

    let response = app
        .oneshot(json_request("POST", "/posts", json!({"title": ""})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["message"], "Title cannot be empty");
}

#[tokio::test]
async fn test_get_missing_post_is_not_found() {
    let app = test_router(StubAccountService::anonymous(), StubPostService::empty());

    let response = app
        .oneshot(get_request(&format!("/posts/{}", Uuid::new_v4()), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_list_posts_returns_collection() {
    let app = test_router(
        StubAccountService::anonymous(),
        StubPostService::with_post(test_post("First post")),
    );

    let response = app.oneshot(get_request("/posts", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["title"], "First post");
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_reports_unavailable_without_database() {
    let app = test_router(StubAccountService::anonymous(), StubPostService::empty());

    let response = app.oneshot(get_request("/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["status"], "unhealthy");
}
