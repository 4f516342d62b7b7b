//! Handlers for categories (public listing and admin CRUD).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use salon_core::category::CategoryType;
use salon_core::error::CoreError;
use salon_core::slug::slugify;
use salon_core::types::DbId;
use salon_db::models::category::{Category, CreateCategory, UpdateCategory};
use salon_db::repositories::CategoryRepo;
use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use super::{non_blank, MessageResponse};
use crate::error::{AppError, AppResult};
use crate::query::CategoryListParams;
use crate::state::AppState;

const NAME_TAKEN: &str = "Такое значение поля name уже существует.";
const CATEGORY_IN_USE: &str = "Категория используется и не может быть удалена";

/// Request body for `POST /admin/categories`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(
        required(message = "Поле name обязательно для заполнения."),
        custom(function = "non_blank"),
        length(max = 255, message = "Поле name не может быть длиннее 255 символов.")
    )]
    pub name: Option<String>,
    /// Checked in [`CreateCategoryRequest::check`] so the error is keyed `type`.
    #[serde(rename = "type")]
    pub category_type: Option<String>,
}

impl CreateCategoryRequest {
    /// Field validation plus the required `type`, reported together.
    fn check(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        if self
            .category_type
            .as_deref()
            .map_or(true, |t| t.trim().is_empty())
        {
            errors.add(
                "type",
                ValidationError::new("required")
                    .with_message("Поле type обязательно для заполнения.".into()),
            );
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Request body for `PUT /admin/categories/{id}`. Absent fields are kept.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(
        custom(function = "non_blank"),
        length(max = 255, message = "Поле name не может быть длиннее 255 символов.")
    )]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub category_type: Option<String>,
}

/// An absent `type` lists everything. An empty `type=` matches no specific
/// type, so only `both` categories remain.
fn parse_type_filter(params: CategoryListParams) -> AppResult<Option<CategoryType>> {
    match params.category_type.as_deref().map(str::trim) {
        None => Ok(None),
        Some("") => Ok(Some(CategoryType::Both)),
        Some(raw) => Ok(Some(raw.parse()?)),
    }
}

async fn ensure_name_free(state: &AppState, name: &str, except_id: Option<DbId>) -> AppResult<()> {
    if CategoryRepo::name_taken(&state.pool, name, except_id).await? {
        return Err(CoreError::field("name", NAME_TAKEN).into());
    }
    Ok(())
}

/// GET /api/categories and GET /api/admin/categories
///
/// With `?type=`, returns categories of that type plus all `both` categories.
pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<CategoryListParams>,
) -> AppResult<Json<Vec<Category>>> {
    let type_filter = parse_type_filter(params)?;
    let categories = CategoryRepo::list(&state.pool, type_filter).await?;
    Ok(Json(categories))
}

/// POST /api/admin/categories
pub async fn create_category(
    State(state): State<AppState>,
    Json(input): Json<CreateCategoryRequest>,
) -> AppResult<(StatusCode, Json<Category>)> {
    input.check()?;
    let name = input.name.unwrap_or_default().trim().to_string();
    let category_type: CategoryType = input.category_type.unwrap_or_default().parse()?;

    ensure_name_free(&state, &name, None).await?;

    let create = CreateCategory {
        slug: slugify(&name),
        name,
        category_type,
    };
    let category = CategoryRepo::create(&state.pool, &create).await?;

    tracing::info!(category_id = category.id, slug = %category.slug, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/admin/categories/{id}
///
/// Partial update. A new name re-derives the slug.
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategoryRequest>,
) -> AppResult<Json<Category>> {
    input.validate()?;

    let name = input.name.map(|n| n.trim().to_string());
    if let Some(name) = &name {
        ensure_name_free(&state, name, Some(id)).await?;
    }
    let category_type = input
        .category_type
        .map(|t| t.parse::<CategoryType>())
        .transpose()?;

    let update = UpdateCategory {
        slug: name.as_deref().map(slugify),
        name,
        category_type,
    };
    let category = CategoryRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    tracing::info!(category_id = id, "Category updated");
    Ok(Json(category))
}

/// DELETE /api/admin/categories/{id}
///
/// Rejected with 422 while any service or portfolio item references the
/// category. Unexpected failures are reported as 500 with the error text.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    let usage = CategoryRepo::usage(&state.pool, id)
        .await
        .map_err(|e| AppError::DeleteFailed(e.to_string()))?;
    if usage.is_used() {
        tracing::info!(
            category_id = id,
            services = usage.services,
            portfolios = usage.portfolios,
            "Refusing to delete category in use"
        );
        return Err(CoreError::Unprocessable(CATEGORY_IN_USE.into()).into());
    }

    match CategoryRepo::delete(&state.pool, id).await {
        Ok(_) => {}
        // A reference added after the usage check.
        Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23503") => {
            return Err(CoreError::Unprocessable(CATEGORY_IN_USE.into()).into());
        }
        Err(e) => return Err(AppError::DeleteFailed(e.to_string())),
    }

    tracing::info!(category_id = id, "Category deleted");
    Ok(Json(MessageResponse::new("Категория успешно удалена")))
}
