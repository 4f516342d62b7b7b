use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use salon_core::error::{CoreError, FieldErrors};
use serde::Serialize;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `salon_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Request DTO validation failures.
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Unexpected failure while deleting a category. Unlike other internal
    /// errors the message is returned to the client.
    #[error("Delete failed: {0}")]
    DeleteFailed(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl ErrorBody {
    fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            errors: None,
        }
    }

    fn with_errors(code: &'static str, message: impl Into<String>, errors: FieldErrors) -> Self {
        Self {
            message: message.into(),
            code,
            errors: Some(errors),
        }
    }
}

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    ErrorBody::new("NOT_FOUND", format!("{entity} with id {id} not found")),
                ),
                CoreError::Validation(msg) | CoreError::Unprocessable(msg) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorBody::new("VALIDATION_ERROR", msg),
                ),
                CoreError::InvalidFields { message, errors } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorBody::with_errors("VALIDATION_ERROR", message, errors),
                ),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, ErrorBody::new("UNAUTHORIZED", msg))
                }
                CoreError::Forbidden(msg) => {
                    (StatusCode::FORBIDDEN, ErrorBody::new("FORBIDDEN", msg))
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorBody::new("INTERNAL_ERROR", INTERNAL_MESSAGE),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(&err),

            // --- Request validation ---
            AppError::Validation(errors) => {
                let errors = validation_field_errors(&errors);
                let message = first_message(&errors)
                    .unwrap_or_else(|| "Переданные данные некорректны".to_string());
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorBody::with_errors("VALIDATION_ERROR", message, errors),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorBody::new("BAD_REQUEST", msg))
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("INTERNAL_ERROR", INTERNAL_MESSAGE),
                )
            }
            AppError::DeleteFailed(msg) => {
                tracing::error!(error = %msg, "Delete failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new(
                        "DELETE_FAILED",
                        format!("Ошибка при удалении категории: {msg}"),
                    ),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Flatten `validator` errors into the field -> messages map.
///
/// Uses each error's message when present and falls back to its code.
fn validation_field_errors(errors: &validator::ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

fn first_message(errors: &FieldErrors) -> Option<String> {
    errors.values().flatten().next().cloned()
}

/// Tables whose names prefix constraint names.
const TABLES: &[&str] = &[
    "categories",
    "services",
    "portfolios",
    "feedback",
    "users",
    "revoked_tokens",
];

/// Column name from a constraint such as `uq_categories_name` or
/// `revoked_tokens_user_id_fkey`.
fn constraint_column(constraint: &str) -> Option<&str> {
    let bare = constraint
        .strip_prefix("uq_")
        .or_else(|| constraint.strip_suffix("_fkey"))?;
    TABLES.iter().find_map(|table| {
        bare.strip_prefix(table)
            .and_then(|rest| rest.strip_prefix('_'))
            .filter(|column| !column.is_empty())
    })
}

/// Classify a sqlx error into an HTTP status and error body.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map
///   to 422 with a field error on the constrained column.
/// - Foreign key violations map to 422.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, ErrorBody) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            ErrorBody::new("NOT_FOUND", "Resource not found"),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                // PostgreSQL unique constraint violation.
                Some("23505") if constraint.starts_with("uq_") => {
                    let column = constraint_column(constraint).unwrap_or(constraint);
                    let message = format!("Такое значение поля {column} уже существует.");
                    let mut errors = FieldErrors::new();
                    errors.insert(column.to_string(), vec![message.clone()]);
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        ErrorBody::with_errors("VALIDATION_ERROR", message, errors),
                    )
                }
                // PostgreSQL foreign key violation.
                Some("23503") => {
                    let column = constraint_column(constraint).unwrap_or(constraint);
                    let message = format!("Выбранное значение для {column} некорректно.");
                    let mut errors = FieldErrors::new();
                    errors.insert(column.to_string(), vec![message.clone()]);
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        ErrorBody::with_errors("VALIDATION_ERROR", message, errors),
                    )
                }
                _ => {
                    tracing::error!(error = %db_err, "Database error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorBody::new("INTERNAL_ERROR", INTERNAL_MESSAGE),
                    )
                }
            }
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("INTERNAL_ERROR", INTERNAL_MESSAGE),
            )
        }
    }
}
