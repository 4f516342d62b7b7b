#![allow(dead_code)]

//! In-process stand-in for the salon API, serving just enough of each
//! endpoint to drive the client.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::Utc;
use salon_client::model::{Category, FeedbackEntry, PortfolioItem, User};
use salon_client::{ApiClient, MemoryTokenStore, Session};
use salon_core::category::CategoryType;
use serde::Deserialize;
use serde_json::{json, Value};

pub const TOKEN: &str = "stub-token";
pub const EMAIL: &str = "admin@salon.test";
pub const PASSWORD: &str = "secret-password";

#[derive(Default)]
pub struct StubState {
    pub categories: Vec<Category>,
    pub portfolio: Vec<PortfolioItem>,
    pub feedback: Vec<FeedbackEntry>,
    next_id: i64,
    /// Ids whose DELETE is refused with 422.
    pub undeletable: HashSet<i64>,
    pub fail_updates: bool,
    pub fail_logout: bool,
    /// `"METHOD /path"` of every request, in arrival order.
    pub requests: Vec<String>,
}

impl StubState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn add_category(&mut self, name: &str, category_type: CategoryType) -> i64 {
        let id = self.next_id();
        self.categories.push(Category {
            id,
            name: name.to_string(),
            slug: salon_core::slug::slugify(name),
            category_type,
        });
        id
    }

    pub fn add_feedback(&mut self, name: &str) -> i64 {
        let id = self.next_id();
        self.feedback.insert(
            0,
            FeedbackEntry {
                id,
                name: name.to_string(),
                phone: "+79990000000".to_string(),
                message: None,
                created_at: Utc::now(),
            },
        );
        id
    }
}

#[derive(Clone, Default)]
pub struct Stub(Arc<Mutex<StubState>>);

impl Stub {
    pub fn state(&self) -> MutexGuard<'_, StubState> {
        self.0.lock().unwrap()
    }

    fn record(&self, method: &str, path: &str) {
        self.state().requests.push(format!("{method} {path}"));
    }
}

fn user() -> Value {
    json!({
        "id": 1,
        "name": "Admin",
        "email": EMAIL,
        "is_admin": true,
        "created_at": "2024-05-01T10:00:00Z",
    })
}

fn error(status: StatusCode, message: &str, errors: Option<Value>) -> Response {
    let mut body = json!({ "message": message, "code": "STUB_ERROR" });
    if let Some(errors) = errors {
        body["errors"] = errors;
    }
    (status, Json(body)).into_response()
}

fn authorized(headers: &HeaderMap) -> Result<(), Response> {
    let expected = format!("Bearer {TOKEN}");
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(error(StatusCode::UNAUTHORIZED, "Unauthenticated.", None)),
    }
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["email"] == EMAIL && body["password"] == PASSWORD {
        Json(json!({
            "token": TOKEN,
            "token_type": "Bearer",
            "expires_in": 3600,
            "user": user(),
        }))
        .into_response()
    } else {
        error(StatusCode::UNAUTHORIZED, "Неверный логин или пароль", None)
    }
}

async fn logout(State(stub): State<Stub>, headers: HeaderMap) -> Response {
    stub.record("POST", "/logout");
    if let Err(response) = authorized(&headers) {
        return response;
    }
    if stub.state().fail_logout {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "An internal error occurred", None);
    }
    Json(json!({ "message": "Вы успешно вышли." })).into_response()
}

async fn current_user(headers: HeaderMap) -> Response {
    match authorized(&headers) {
        Ok(()) => Json(user()).into_response(),
        Err(response) => response,
    }
}

#[derive(Deserialize)]
struct TypeFilter {
    #[serde(rename = "type")]
    category_type: Option<CategoryType>,
}

async fn public_categories(State(stub): State<Stub>, Query(filter): Query<TypeFilter>) -> Response {
    let categories: Vec<Category> = stub
        .state()
        .categories
        .iter()
        .filter(|c| filter.category_type.map_or(true, |t| c.category_type.matches(t)))
        .cloned()
        .collect();
    Json(categories).into_response()
}

async fn list_categories(State(stub): State<Stub>, headers: HeaderMap) -> Response {
    stub.record("GET", "/admin/categories");
    if let Err(response) = authorized(&headers) {
        return response;
    }
    Json(stub.state().categories.clone()).into_response()
}

async fn create_category(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    stub.record("POST", "/admin/categories");
    if let Err(response) = authorized(&headers) {
        return response;
    }
    let name = body["name"].as_str().unwrap_or_default().to_string();
    let mut state = stub.state();
    if state.categories.iter().any(|c| c.name == name) {
        let message = "Такое значение поля name уже существует.";
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            message,
            Some(json!({ "name": [message] })),
        );
    }
    let category_type = serde_json::from_value(body["type"].clone()).unwrap_or(CategoryType::Both);
    let id = state.add_category(&name, category_type);
    let created = state.categories.iter().find(|c| c.id == id).cloned();
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn update_category(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    stub.record("PUT", &format!("/admin/categories/{id}"));
    if let Err(response) = authorized(&headers) {
        return response;
    }
    let mut state = stub.state();
    if state.fail_updates {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "An internal error occurred", None);
    }
    let Some(category) = state.categories.iter_mut().find(|c| c.id == id) else {
        return error(StatusCode::NOT_FOUND, "Category not found", None);
    };
    if let Some(name) = body["name"].as_str() {
        category.name = name.to_string();
        category.slug = salon_core::slug::slugify(name);
    }
    if let Ok(category_type) = serde_json::from_value::<CategoryType>(body["type"].clone()) {
        category.category_type = category_type;
    }
    Json(category.clone()).into_response()
}

async fn delete_category(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    stub.record("DELETE", &format!("/admin/categories/{id}"));
    if let Err(response) = authorized(&headers) {
        return response;
    }
    let mut state = stub.state();
    if state.undeletable.contains(&id) {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Категория используется и не может быть удалена",
            None,
        );
    }
    let before = state.categories.len();
    state.categories.retain(|c| c.id != id);
    if state.categories.len() == before {
        return error(StatusCode::NOT_FOUND, "Category not found", None);
    }
    Json(json!({ "message": "Категория успешно удалена" })).into_response()
}

async fn create_portfolio(
    State(stub): State<Stub>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    stub.record("POST", "/admin/portfolio");
    if let Err(response) = authorized(&headers) {
        return response;
    }

    let mut category_id = None;
    let mut title = None;
    let mut file_name = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "category_id" => category_id = field.text().await.ok().and_then(|t| t.parse().ok()),
            "title" => title = field.text().await.ok(),
            "image" => {
                file_name = field.file_name().map(String::from);
                let _ = field.bytes().await;
            }
            _ => {}
        }
    }

    let (Some(category_id), Some(file_name)) = (category_id, file_name) else {
        let message = "Поле image обязательно для заполнения.";
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            message,
            Some(json!({ "image": [message] })),
        );
    };

    let mut state = stub.state();
    let id = state.next_id();
    let image_path = format!("portfolio/{id}-{file_name}");
    let item = PortfolioItem {
        id,
        category_id,
        title,
        image_url: format!("http://localhost:8000/storage/{image_path}"),
        image_path,
        created_at: Utc::now(),
    };
    state.portfolio.insert(0, item.clone());
    (StatusCode::CREATED, Json(item)).into_response()
}

async fn list_portfolio(State(stub): State<Stub>, headers: HeaderMap) -> Response {
    if let Err(response) = authorized(&headers) {
        return response;
    }
    Json(stub.state().portfolio.clone()).into_response()
}

async fn list_feedback(State(stub): State<Stub>, headers: HeaderMap) -> Response {
    stub.record("GET", "/admin/feedback");
    if let Err(response) = authorized(&headers) {
        return response;
    }
    Json(stub.state().feedback.clone()).into_response()
}

async fn delete_feedback(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    stub.record("DELETE", &format!("/admin/feedback/{id}"));
    if let Err(response) = authorized(&headers) {
        return response;
    }
    let mut state = stub.state();
    if state.undeletable.contains(&id) {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "An internal error occurred", None);
    }
    state.feedback.retain(|f| f.id != id);
    Json(json!({ "message": "Удалено" })).into_response()
}

async fn submit_feedback(Json(body): Json<Value>) -> Response {
    let name = body["name"].as_str().unwrap_or_default();
    if name.trim().is_empty() {
        let message = "Поле name обязательно для заполнения.";
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            message,
            Some(json!({ "name": [message] })),
        );
    }
    (
        StatusCode::CREATED,
        Json(json!({ "message": "Спасибо! Мы с вами свяжемся." })),
    )
        .into_response()
}

fn router(stub: Stub) -> Router {
    let api = Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/user", get(current_user))
        .route("/categories", get(public_categories))
        .route("/feedback", post(submit_feedback))
        .route(
            "/admin/categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/admin/categories/{id}",
            put(update_category).delete(delete_category),
        )
        .route("/admin/portfolio", get(list_portfolio).post(create_portfolio))
        .route("/admin/feedback", get(list_feedback))
        .route("/admin/feedback/{id}", axum::routing::delete(delete_feedback));

    Router::new().nest("/api", api).with_state(stub)
}

/// Serve the stub on an ephemeral port and return its state handle plus a
/// client pointed at it.
pub async fn spawn_stub() -> (Stub, Arc<ApiClient>) {
    let stub = Stub::default();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind should succeed");
    let addr = listener.local_addr().expect("local addr");
    let app = router(stub.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server failed");
    });

    let session = Arc::new(Session::new(Arc::new(MemoryTokenStore::default())));
    let client = Arc::new(ApiClient::new(format!("http://{addr}/api"), session));
    (stub, client)
}

/// A stub plus a client that is already signed in.
pub async fn signed_in() -> (Stub, Arc<ApiClient>) {
    let (stub, client) = spawn_stub().await;
    client
        .login(EMAIL, PASSWORD)
        .await
        .expect("login should succeed");
    (stub, client)
}

pub fn user_model() -> User {
    serde_json::from_value(user()).unwrap()
}
