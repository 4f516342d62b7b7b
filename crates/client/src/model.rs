//! Wire types as the server sends and accepts them.

use chrono::{DateTime, Utc};
use salon_core::category::CategoryType;
use salon_core::prices::Prices;
use salon_core::types::DbId;
use serde::{Deserialize, Serialize};

/// Anything listed by id in a resource store.
pub trait Identified {
    fn id(&self) -> DbId;
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// Response of `POST /login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
    pub user: User,
}

/// `{"message": ...}` bodies of deletes, logout and the contact form.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
}

/// Body for creating a category.
#[derive(Debug, Clone, Serialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
}

/// Partial category update; `None` fields are left out of the request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub category_type: Option<CategoryType>,
}

/// The category summary embedded in every service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCategory {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: DbId,
    pub category_id: DbId,
    pub name: String,
    pub prices: Prices,
    #[serde(default)]
    pub category: Option<ServiceCategory>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewService {
    pub category_id: DbId,
    pub name: String,
    pub prices: Prices,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ServiceChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prices: Option<Prices>,
}

/// A portfolio item with the public URL of its image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub id: DbId,
    pub category_id: DbId,
    pub title: Option<String>,
    pub image_path: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// An image file to upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewPortfolioItem {
    pub category_id: DbId,
    pub title: Option<String>,
    pub image: ImageUpload,
}

#[derive(Debug, Clone, Default)]
pub struct PortfolioChanges {
    pub category_id: Option<DbId>,
    pub title: Option<String>,
    pub image: Option<ImageUpload>,
}

/// A contact form submission as listed in the admin inbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub id: DbId,
    pub name: String,
    pub phone: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// What the public contact form sends.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FeedbackSubmission {
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(
        rename = "g-recaptcha-response",
        skip_serializing_if = "Option::is_none"
    )]
    pub captcha_token: Option<String>,
}

macro_rules! identified {
    ($($ty:ty),*) => {
        $(impl Identified for $ty {
            fn id(&self) -> DbId {
                self.id
            }
        })*
    };
}

identified!(Category, Service, PortfolioItem, FeedbackEntry);
