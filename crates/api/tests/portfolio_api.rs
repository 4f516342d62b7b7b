//! HTTP-level integration tests for portfolio items and image storage.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    body_json, create_admin, delete_auth, get, multipart_auth, Part, JPEG_BYTES, PNG_BYTES,
};
use salon_core::category::CategoryType;
use salon_db::models::category::CreateCategory;
use salon_db::repositories::CategoryRepo;
use serde_json::json;
use sqlx::PgPool;

async fn seed_category(pool: &PgPool, name: &str, slug: &str) -> i64 {
    CategoryRepo::create(
        pool,
        &CreateCategory {
            name: name.to_string(),
            slug: slug.to_string(),
            category_type: CategoryType::Portfolio,
        },
    )
    .await
    .expect("category creation should succeed")
    .id
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_upload_returns_resolvable_url(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let category_id = seed_category(&pool, "Маникюр", "manikyur").await.to_string();
    let test_app = common::build_test_app(pool);
    let token = test_app.token_for(&admin);

    let response = multipart_auth(
        test_app.app(),
        Method::POST,
        "/api/admin/portfolio",
        &token,
        &[
            Part::Text("category_id", &category_id),
            Part::Text("title", "Френч"),
            Part::File("image", "french.png", PNG_BYTES),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Френч");
    let image_path = json["image_path"].as_str().unwrap().to_string();
    assert!(image_path.starts_with("portfolio/"));
    assert!(image_path.ends_with(".png"));
    assert_eq!(
        json["image_url"],
        format!("http://localhost:8000/storage/{image_path}")
    );
    assert!(test_app.storage.exists(&image_path).await);

    // The URL path is served from the public disk.
    let response = get(test_app.app(), &format!("/storage/{image_path}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_upload_validation(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let category_id = seed_category(&pool, "Маникюр", "manikyur").await.to_string();
    let test_app = common::build_test_app(pool);
    let token = test_app.token_for(&admin);

    // Missing image and category.
    let response = multipart_auth(
        test_app.app(),
        Method::POST,
        "/api/admin/portfolio",
        &token,
        &[Part::Text("title", "Без фото")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert!(json["errors"]["image"].is_array());
    assert!(json["errors"]["category_id"].is_array());

    // Not an image.
    let response = multipart_auth(
        test_app.app(),
        Method::POST,
        "/api/admin/portfolio",
        &token,
        &[
            Part::Text("category_id", &category_id),
            Part::File("image", "notes.txt", b"just some text"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_json(response).await["errors"]["image"].is_array());

    // Unknown category.
    let response = multipart_auth(
        test_app.app(),
        Method::POST,
        "/api/admin/portfolio",
        &token,
        &[
            Part::Text("category_id", "9999"),
            Part::File("image", "a.png", PNG_BYTES),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_json(response).await["errors"]["category_id"].is_array());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_replaces_image_and_removes_old_file(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let category_id = seed_category(&pool, "Маникюр", "manikyur").await.to_string();
    let test_app = common::build_test_app(pool);
    let token = test_app.token_for(&admin);

    let response = multipart_auth(
        test_app.app(),
        Method::POST,
        "/api/admin/portfolio",
        &token,
        &[
            Part::Text("category_id", &category_id),
            Part::File("image", "before.png", PNG_BYTES),
        ],
    )
    .await;
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    let old_path = created["image_path"].as_str().unwrap().to_string();

    let response = multipart_auth(
        test_app.app(),
        Method::PUT,
        &format!("/api/admin/portfolio/{id}"),
        &token,
        &[Part::File("image", "after.jpg", JPEG_BYTES)],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    let new_path = updated["image_path"].as_str().unwrap().to_string();
    assert_ne!(new_path, old_path);
    assert!(new_path.ends_with(".jpg"));
    assert_eq!(updated["category_id"].as_i64().unwrap().to_string(), category_id);
    assert!(test_app.storage.exists(&new_path).await);
    assert!(!test_app.storage.exists(&old_path).await);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_via_post_without_image_keeps_file(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let category_id = seed_category(&pool, "Маникюр", "manikyur").await.to_string();
    let test_app = common::build_test_app(pool);
    let token = test_app.token_for(&admin);

    let response = multipart_auth(
        test_app.app(),
        Method::POST,
        "/api/admin/portfolio",
        &token,
        &[
            Part::Text("category_id", &category_id),
            Part::File("image", "a.png", PNG_BYTES),
        ],
    )
    .await;
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    let path = created["image_path"].as_str().unwrap().to_string();

    let response = multipart_auth(
        test_app.app(),
        Method::POST,
        &format!("/api/admin/portfolio/{id}"),
        &token,
        &[
            Part::Text("title", "Новое название"),
            Part::File("image", "", b""),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["title"], "Новое название");
    assert_eq!(updated["image_path"], path.as_str());
    assert!(test_app.storage.exists(&path).await);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_removes_file_and_row(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let category_id = seed_category(&pool, "Маникюр", "manikyur").await.to_string();
    let test_app = common::build_test_app(pool);
    let token = test_app.token_for(&admin);

    let response = multipart_auth(
        test_app.app(),
        Method::POST,
        "/api/admin/portfolio",
        &token,
        &[
            Part::Text("category_id", &category_id),
            Part::File("image", "a.png", PNG_BYTES),
        ],
    )
    .await;
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    let path = created["image_path"].as_str().unwrap().to_string();

    let response = delete_auth(test_app.app(), &format!("/api/admin/portfolio/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Элемент портфолио удалён");
    assert!(!test_app.storage.exists(&path).await);

    let response = get(test_app.app(), "/api/portfolio").await;
    assert_eq!(body_json(response).await, json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_public_list_filters_by_category(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let nails = seed_category(&pool, "Маникюр", "manikyur").await.to_string();
    let brows = seed_category(&pool, "Брови", "brovi").await.to_string();
    let test_app = common::build_test_app(pool);
    let token = test_app.token_for(&admin);

    for category_id in [&nails, &brows] {
        let response = multipart_auth(
            test_app.app(),
            Method::POST,
            "/api/admin/portfolio",
            &token,
            &[
                Part::Text("category_id", category_id),
                Part::File("image", "a.png", PNG_BYTES),
            ],
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(test_app.app(), &format!("/api/portfolio?category_id={brows}")).await;
    let json = body_json(response).await;
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["category_id"].as_i64().unwrap().to_string(), brows);
    assert!(items[0]["image_url"].as_str().unwrap().contains("/storage/portfolio/"));
}
