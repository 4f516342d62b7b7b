//! Handlers for services (public price list and admin CRUD).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use salon_core::error::CoreError;
use salon_core::prices::Prices;
use salon_core::types::DbId;
use salon_db::models::service::{CreateService, ServiceWithCategory, UpdateService};
use salon_db::repositories::ServiceRepo;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use super::{ensure_category_exists, non_blank, MessageResponse};
use crate::error::{AppError, AppResult};
use crate::query::CategoryFilterParams;
use crate::state::AppState;

/// Request body for `POST /admin/services`.
///
/// `prices` may be an object or a JSON-encoded string; see [`Prices::parse`].
#[derive(Debug, Deserialize, Validate)]
pub struct CreateServiceRequest {
    #[validate(required(message = "Поле category_id обязательно для заполнения."))]
    pub category_id: Option<DbId>,
    #[validate(
        required(message = "Поле name обязательно для заполнения."),
        custom(function = "non_blank"),
        length(max = 255, message = "Поле name не может быть длиннее 255 символов.")
    )]
    pub name: Option<String>,
    #[validate(required(message = "Поле prices обязательно для заполнения."))]
    pub prices: Option<Value>,
}

/// Request body for `PUT /admin/services/{id}`. Absent fields are kept.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateServiceRequest {
    pub category_id: Option<DbId>,
    #[validate(
        custom(function = "non_blank"),
        length(max = 255, message = "Поле name не может быть длиннее 255 символов.")
    )]
    pub name: Option<String>,
    pub prices: Option<Value>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Service",
        id,
    })
}

/// GET /api/services and GET /api/admin/services
///
/// Services with their category embedded, optionally for one category.
pub async fn list_services(
    State(state): State<AppState>,
    Query(params): Query<CategoryFilterParams>,
) -> AppResult<Json<Vec<ServiceWithCategory>>> {
    let services = ServiceRepo::list_with_category(&state.pool, params.category_id).await?;
    Ok(Json(services))
}

/// POST /api/admin/services
pub async fn create_service(
    State(state): State<AppState>,
    Json(input): Json<CreateServiceRequest>,
) -> AppResult<(StatusCode, Json<ServiceWithCategory>)> {
    input.validate()?;
    let category_id = input.category_id.unwrap_or_default();
    let prices = Prices::parse(&input.prices.unwrap_or_default())?;

    ensure_category_exists(&state, category_id).await?;

    let create = CreateService {
        category_id,
        name: input.name.unwrap_or_default().trim().to_string(),
        prices,
    };
    let service = ServiceRepo::create(&state.pool, &create).await?;
    tracing::info!(service_id = service.id, category_id, "Service created");

    let created = ServiceRepo::find_with_category(&state.pool, service.id)
        .await?
        .ok_or_else(|| not_found(service.id))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/admin/services/{id}
pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateServiceRequest>,
) -> AppResult<Json<ServiceWithCategory>> {
    input.validate()?;

    if let Some(category_id) = input.category_id {
        ensure_category_exists(&state, category_id).await?;
    }
    let prices = input.prices.as_ref().map(Prices::parse).transpose()?;

    let update = UpdateService {
        category_id: input.category_id,
        name: input.name.map(|n| n.trim().to_string()),
        prices,
    };
    ServiceRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(service_id = id, "Service updated");

    let updated = ServiceRepo::find_with_category(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(updated))
}

/// DELETE /api/admin/services/{id}
pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !ServiceRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(service_id = id, "Service deleted");
    Ok(Json(MessageResponse::new("Услуга успешно удалена")))
}
