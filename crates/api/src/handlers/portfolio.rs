//! Handlers for portfolio items (public gallery and admin CRUD with image upload).

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use salon_core::error::{CoreError, FieldErrors};
use salon_core::types::DbId;
use salon_core::upload::{validate_image, UploadImageFormat};
use salon_db::models::portfolio::{CreatePortfolio, Portfolio, UpdatePortfolio};
use salon_db::repositories::PortfolioRepo;
use serde::Serialize;

use super::{ensure_category_exists, MessageResponse};
use crate::error::{AppError, AppResult};
use crate::query::CategoryFilterParams;
use crate::state::AppState;
use crate::storage::PublicDisk;

/// Directory on the public disk holding portfolio images.
const PORTFOLIO_DIR: &str = "portfolio";

const MAX_TITLE_LEN: usize = 255;

/// A portfolio item with the public URL of its image.
#[derive(Debug, Serialize)]
pub struct PortfolioResponse {
    #[serde(flatten)]
    pub item: Portfolio,
    pub image_url: String,
}

impl PortfolioResponse {
    fn new(item: Portfolio, disk: &PublicDisk) -> Self {
        let image_url = disk.url(&item.image_path);
        Self { item, image_url }
    }
}

/// Raw multipart fields of the portfolio form.
#[derive(Debug, Default)]
struct PortfolioForm {
    image: Option<Vec<u8>>,
    category_id: Option<String>,
    title: Option<String>,
}

/// Validated portfolio form.
struct ValidForm {
    image: Option<(Vec<u8>, UploadImageFormat)>,
    category_id: Option<DbId>,
    title: Option<String>,
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        CoreError::field("image", "Размер изображения превышает допустимый").into()
    } else {
        AppError::BadRequest(e.body_text())
    }
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

async fn read_form(mut multipart: Multipart) -> AppResult<PortfolioForm> {
    let mut form = PortfolioForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image" => {
                let has_filename = field.file_name().is_some_and(|f| !f.is_empty());
                let data = field.bytes().await.map_err(multipart_error)?;
                // Browsers send an empty part when no file was chosen.
                if has_filename || !data.is_empty() {
                    form.image = Some(data.to_vec());
                }
            }
            "category_id" => {
                form.category_id = non_empty(field.text().await.map_err(multipart_error)?);
            }
            "title" => {
                form.title = non_empty(field.text().await.map_err(multipart_error)?);
            }
            _ => {} // ignore unknown fields
        }
    }

    Ok(form)
}

/// Validate every field, collecting all failures into one field error map.
fn validate_form(form: PortfolioForm, max_image_kb: u64, creating: bool) -> AppResult<ValidForm> {
    let mut errors = FieldErrors::new();
    let mut push = |field: &str, message: String| {
        errors.entry(field.to_string()).or_default().push(message);
    };

    let image = match form.image {
        Some(bytes) => match validate_image(&bytes, max_image_kb) {
            Ok(format) => Some((bytes, format)),
            Err(CoreError::InvalidFields { message, .. }) => {
                push("image", message);
                None
            }
            Err(other) => return Err(other.into()),
        },
        None if creating => {
            push("image", "Поле image обязательно для заполнения.".into());
            None
        }
        None => None,
    };

    let category_id = match form.category_id {
        Some(raw) => match raw.parse::<DbId>() {
            Ok(id) => Some(id),
            Err(_) => {
                push(
                    "category_id",
                    "Поле category_id должно быть целым числом.".into(),
                );
                None
            }
        },
        None if creating => {
            push(
                "category_id",
                "Поле category_id обязательно для заполнения.".into(),
            );
            None
        }
        None => None,
    };

    if form
        .title
        .as_ref()
        .is_some_and(|t| t.chars().count() > MAX_TITLE_LEN)
    {
        push(
            "title",
            format!("Поле title не может быть длиннее {MAX_TITLE_LEN} символов."),
        );
    }

    if let Some(message) = errors.values().flatten().next().cloned() {
        return Err(CoreError::InvalidFields { message, errors }.into());
    }

    Ok(ValidForm {
        image,
        category_id,
        title: form.title,
    })
}

async fn store_image(
    disk: &PublicDisk,
    bytes: &[u8],
    format: UploadImageFormat,
) -> AppResult<String> {
    disk.store(PORTFOLIO_DIR, bytes, format.extension())
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store image: {e}")))
}

/// Best-effort removal; a leftover file is logged, not reported.
async fn remove_image(disk: &PublicDisk, path: &str) {
    if let Err(e) = disk.delete(path).await {
        tracing::warn!(path, error = %e, "Failed to remove portfolio image");
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Portfolio",
        id,
    })
}

/// GET /api/portfolio and GET /api/admin/portfolio
///
/// Newest first, optionally for one category, each with its `image_url`.
pub async fn list_portfolio(
    State(state): State<AppState>,
    Query(params): Query<CategoryFilterParams>,
) -> AppResult<Json<Vec<PortfolioResponse>>> {
    let items = PortfolioRepo::list(&state.pool, params.category_id).await?;
    let items = items
        .into_iter()
        .map(|item| PortfolioResponse::new(item, &state.storage))
        .collect();
    Ok(Json(items))
}

/// POST /api/admin/portfolio
///
/// Multipart form: `image` (required), `category_id` (required), `title`.
pub async fn create_portfolio(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<PortfolioResponse>)> {
    let form = read_form(multipart).await?;
    let form = validate_form(form, state.config.storage.max_image_kb, true)?;

    let (Some((bytes, format)), Some(category_id)) = (form.image, form.category_id) else {
        return Err(AppError::InternalError("validated form is missing fields".into()));
    };
    ensure_category_exists(&state, category_id).await?;

    let image_path = store_image(&state.storage, &bytes, format).await?;

    let create = CreatePortfolio {
        category_id,
        title: form.title,
        image_path: image_path.clone(),
    };
    let item = match PortfolioRepo::create(&state.pool, &create).await {
        Ok(item) => item,
        Err(e) => {
            remove_image(&state.storage, &image_path).await;
            return Err(e.into());
        }
    };

    tracing::info!(
        portfolio_id = item.id,
        category_id,
        image_path = %item.image_path,
        "Portfolio item created"
    );
    Ok((
        StatusCode::CREATED,
        Json(PortfolioResponse::new(item, &state.storage)),
    ))
}

/// PUT|POST /api/admin/portfolio/{id}
///
/// Multipart form with every field optional. A new image replaces the old
/// one, and the old file is removed once the row points at the new file.
pub async fn update_portfolio(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<PortfolioResponse>> {
    let form = read_form(multipart).await?;
    let form = validate_form(form, state.config.storage.max_image_kb, false)?;

    let existing = PortfolioRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(category_id) = form.category_id {
        ensure_category_exists(&state, category_id).await?;
    }

    let new_path = match &form.image {
        Some((bytes, format)) => Some(store_image(&state.storage, bytes, *format).await?),
        None => None,
    };

    let update = UpdatePortfolio {
        category_id: form.category_id,
        title: form.title,
        image_path: new_path.clone(),
    };
    let updated = match PortfolioRepo::update(&state.pool, id, &update).await {
        Ok(Some(item)) => item,
        result => {
            if let Some(path) = &new_path {
                remove_image(&state.storage, path).await;
            }
            return Err(match result {
                Err(e) => e.into(),
                _ => not_found(id),
            });
        }
    };

    if new_path.is_some() {
        remove_image(&state.storage, &existing.image_path).await;
    }

    tracing::info!(
        portfolio_id = id,
        replaced_image = new_path.is_some(),
        "Portfolio item updated"
    );
    Ok(Json(PortfolioResponse::new(updated, &state.storage)))
}

/// DELETE /api/admin/portfolio/{id}
///
/// Removes the image file, then the row.
pub async fn delete_portfolio(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let item = PortfolioRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    remove_image(&state.storage, &item.image_path).await;

    if !PortfolioRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(portfolio_id = id, "Portfolio item deleted");
    Ok(Json(MessageResponse::new("Элемент портфолио удалён")))
}
