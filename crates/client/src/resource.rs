//! One trait per admin resource: where it lives, how its bodies are encoded,
//! and what the admin sees when an operation succeeds or fails.

use std::convert::Infallible;

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ClientError;
use crate::model::{
    Category, CategoryChanges, FeedbackEntry, Identified, ImageUpload, NewCategory,
    NewPortfolioItem, NewService, PortfolioChanges, PortfolioItem, Service, ServiceChanges,
};

/// Encoded request body for a create or update call.
#[derive(Debug)]
pub enum RequestBody {
    Json(serde_json::Value),
    Multipart(Form),
}

impl RequestBody {
    pub fn json<T: Serialize>(value: &T) -> Result<Self, ClientError> {
        Ok(RequestBody::Json(serde_json::to_value(value)?))
    }
}

/// Notice texts for one resource page.
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    pub load_failed: &'static str,
    pub created: &'static str,
    pub create_failed: &'static str,
    pub updated: &'static str,
    pub update_failed: &'static str,
    pub deleted: &'static str,
    pub delete_failed: &'static str,
    pub delete_prompt: &'static str,
}

/// An admin resource under `/admin/...`.
pub trait Resource: Send + Sync + 'static {
    type Item: DeserializeOwned + Identified + Clone + Send + Sync;
    type Create: Send + Sync;
    type Update: Send + Sync;

    /// Path below the API root, e.g. `/admin/categories`.
    const PATH: &'static str;
    const MESSAGES: Messages;

    fn create_body(input: &Self::Create) -> Result<RequestBody, ClientError>;
    fn update_body(input: &Self::Update) -> Result<RequestBody, ClientError>;

    /// Method used for updates.
    fn update_method() -> Method {
        Method::PUT
    }

    /// Apply an update to the local copy before the server confirms it.
    fn apply_update(item: &mut Self::Item, update: &Self::Update);
}

pub struct Categories;

impl Resource for Categories {
    type Item = Category;
    type Create = NewCategory;
    type Update = CategoryChanges;

    const PATH: &'static str = "/admin/categories";
    const MESSAGES: Messages = Messages {
        load_failed: "Ошибка загрузки категорий",
        created: "Категория добавлена",
        create_failed: "Ошибка сохранения",
        updated: "Категория обновлена",
        update_failed: "Ошибка сохранения",
        deleted: "Категория успешно удалена",
        delete_failed: "Не удалось удалить категорию. Возможно, она используется в услугах или портфолио.",
        delete_prompt: "Удалить эту категорию? Это действие нельзя отменить.",
    };

    fn create_body(input: &NewCategory) -> Result<RequestBody, ClientError> {
        RequestBody::json(input)
    }

    fn update_body(input: &CategoryChanges) -> Result<RequestBody, ClientError> {
        RequestBody::json(input)
    }

    fn apply_update(item: &mut Category, update: &CategoryChanges) {
        if let Some(name) = &update.name {
            item.name = name.trim().to_string();
            item.slug = salon_core::slug::slugify(&item.name);
        }
        if let Some(category_type) = update.category_type {
            item.category_type = category_type;
        }
    }
}

pub struct Services;

impl Resource for Services {
    type Item = Service;
    type Create = NewService;
    type Update = ServiceChanges;

    const PATH: &'static str = "/admin/services";
    const MESSAGES: Messages = Messages {
        load_failed: "Ошибка загрузки данных",
        created: "Услуга добавлена",
        create_failed: "Ошибка при добавлении",
        updated: "Услуга обновлена",
        update_failed: "Ошибка при редактировании",
        deleted: "Услуга удалена",
        delete_failed: "Ошибка при удалении",
        delete_prompt: "Удалить услугу?",
    };

    fn create_body(input: &NewService) -> Result<RequestBody, ClientError> {
        RequestBody::json(input)
    }

    fn update_body(input: &ServiceChanges) -> Result<RequestBody, ClientError> {
        RequestBody::json(input)
    }

    fn apply_update(item: &mut Service, update: &ServiceChanges) {
        if let Some(category_id) = update.category_id {
            if category_id != item.category_id {
                // The embedded summary is stale until the server answers.
                item.category = None;
            }
            item.category_id = category_id;
        }
        if let Some(name) = &update.name {
            item.name = name.trim().to_string();
        }
        if let Some(prices) = &update.prices {
            item.prices = prices.clone();
        }
    }
}

pub struct Portfolio;

fn image_part(image: &ImageUpload) -> Part {
    Part::bytes(image.bytes.clone()).file_name(image.file_name.clone())
}

impl Resource for Portfolio {
    type Item = PortfolioItem;
    type Create = NewPortfolioItem;
    type Update = PortfolioChanges;

    const PATH: &'static str = "/admin/portfolio";
    const MESSAGES: Messages = Messages {
        load_failed: "Ошибка загрузки данных",
        created: "Изображение добавлено",
        create_failed: "Ошибка при добавлении изображения",
        updated: "Изображение обновлено",
        update_failed: "Ошибка при обновлении изображения",
        deleted: "Элемент портфолио удалён",
        delete_failed: "Ошибка при удалении",
        delete_prompt: "Удалить этот элемент?",
    };

    fn create_body(input: &NewPortfolioItem) -> Result<RequestBody, ClientError> {
        let mut form = Form::new()
            .text("category_id", input.category_id.to_string())
            .part("image", image_part(&input.image));
        if let Some(title) = &input.title {
            form = form.text("title", title.clone());
        }
        Ok(RequestBody::Multipart(form))
    }

    fn update_body(input: &PortfolioChanges) -> Result<RequestBody, ClientError> {
        let mut form = Form::new();
        if let Some(category_id) = input.category_id {
            form = form.text("category_id", category_id.to_string());
        }
        if let Some(title) = &input.title {
            form = form.text("title", title.clone());
        }
        if let Some(image) = &input.image {
            form = form.part("image", image_part(image));
        }
        Ok(RequestBody::Multipart(form))
    }

    /// Portfolio updates are posted as multipart forms.
    fn update_method() -> Method {
        Method::POST
    }

    fn apply_update(item: &mut PortfolioItem, update: &PortfolioChanges) {
        if let Some(category_id) = update.category_id {
            item.category_id = category_id;
        }
        if let Some(title) = &update.title {
            item.title = Some(title.clone());
        }
    }
}

/// The feedback inbox. Submissions come from the public form, so the admin
/// side can only list and delete.
pub struct Feedback;

impl Resource for Feedback {
    type Item = FeedbackEntry;
    type Create = Infallible;
    type Update = Infallible;

    const PATH: &'static str = "/admin/feedback";
    const MESSAGES: Messages = Messages {
        load_failed: "Ошибка загрузки данных",
        created: "",
        create_failed: "",
        updated: "",
        update_failed: "",
        deleted: "Удалено",
        delete_failed: "Ошибка при удалении",
        delete_prompt: "Удалить это сообщение?",
    };

    fn create_body(input: &Infallible) -> Result<RequestBody, ClientError> {
        match *input {}
    }

    fn update_body(input: &Infallible) -> Result<RequestBody, ClientError> {
        match *input {}
    }

    fn apply_update(_item: &mut FeedbackEntry, update: &Infallible) {
        match *update {}
    }
}
