#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use salon_api::auth::jwt::{generate_token, JwtConfig};
use salon_api::auth::password::hash_password;
use salon_api::captcha::CaptchaVerifier;
use salon_api::config::{
    RecaptchaConfig, ServerConfig, StorageConfig, DEFAULT_RECAPTCHA_VERIFY_URL,
};
use salon_api::router::build_app_router;
use salon_api::state::AppState;
use salon_api::storage::PublicDisk;
use salon_core::environment::AppEnvironment;
use salon_db::models::user::{CreateUser, User};
use salon_db::repositories::UserRepo;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "secret-password";

/// A PNG signature plus IHDR chunk header; enough for format detection.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01\0\0\0\x01\x08\x02\0\0\0";
pub const JPEG_BYTES: &[u8] = b"\xFF\xD8\xFF\xE0\0\x10JFIF\0\x01\x01\0\0\x01\0\x01\0\0";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(environment: AppEnvironment, storage_root: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        environment,
        app_url: "http://localhost:8000".to_string(),
        storage: StorageConfig {
            public_path: storage_root,
            max_image_kb: 2048,
        },
        recaptcha: RecaptchaConfig {
            secret_key: Some("test-secret".to_string()),
            verify_url: DEFAULT_RECAPTCHA_VERIFY_URL.to_string(),
        },
        jwt: JwtConfig {
            secret: "test-jwt-secret-that-is-long-enough".to_string(),
            expiry_mins: 60,
        },
    }
}

/// CAPTCHA verifier with a fixed answer that counts its calls.
pub struct StubCaptcha {
    pub accept: bool,
    pub calls: AtomicUsize,
}

impl StubCaptcha {
    pub fn new(accept: bool) -> Arc<Self> {
        Arc::new(Self {
            accept,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CaptchaVerifier for StubCaptcha {
    async fn verify(&self, _token: &str, _remote_ip: Option<&str>) -> anyhow::Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.accept)
    }
}

/// The application router plus the temporary public disk behind it.
pub struct TestApp {
    pub router: Router,
    pub config: ServerConfig,
    pub storage: Arc<PublicDisk>,
    _storage_dir: TempDir,
}

impl TestApp {
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Bearer token for `user`, signed with the test secret.
    pub fn token_for(&self, user: &User) -> String {
        generate_token(user.id, &self.config.jwt).expect("token generation should succeed")
    }
}

/// Build the full application router in the `testing` environment.
pub fn build_test_app(pool: PgPool) -> TestApp {
    build_test_app_with(pool, AppEnvironment::Testing, StubCaptcha::new(true))
}

/// Build the full application router with a chosen environment and verifier.
///
/// Uses the same [`build_app_router`] as production so tests exercise the
/// same middleware stack.
pub fn build_test_app_with(
    pool: PgPool,
    environment: AppEnvironment,
    captcha: Arc<dyn CaptchaVerifier>,
) -> TestApp {
    let storage_dir = tempfile::tempdir().expect("temp dir should be created");
    let config = test_config(environment, storage_dir.path().to_path_buf());
    let storage = Arc::new(PublicDisk::new(storage_dir.path(), config.app_url.clone()));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage: Arc::clone(&storage),
        captcha,
    };

    TestApp {
        router: build_app_router(state, &config),
        config,
        storage,
        _storage_dir: storage_dir,
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

pub async fn create_user(pool: &PgPool, email: &str, is_admin: bool) -> User {
    let input = CreateUser {
        name: "Test User".to_string(),
        email: email.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        is_admin,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

pub async fn create_admin(pool: &PgPool) -> User {
    create_user(pool, "admin@salon.test", true).await
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: &serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, &body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), &body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), &body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::delete(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// One part of a multipart form.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

const BOUNDARY: &str = "salon-test-boundary";

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, filename, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn multipart_auth(
    app: Router,
    method: Method,
    uri: &str,
    token: &str,
    parts: &[Part<'_>],
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
