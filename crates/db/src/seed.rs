//! Default data for a fresh installation.

use salon_core::category::CategoryType;
use salon_core::slug::slugify;
use sqlx::PgPool;

use crate::models::category::CreateCategory;
use crate::repositories::CategoryRepo;

/// The salon's base categories, shown on both the price list and the
/// portfolio.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Наращивание ногтей",
    "Маникюр",
    "Педикюр",
    "Брови и ресницы",
    "Лицо",
    "Массаж",
    "Препаратный педикюр KART",
    "Комплексы",
    "Пирсинг",
    "Депиляция",
];

/// Insert every missing default category. Returns how many were created.
pub async fn seed_default_categories(pool: &PgPool) -> Result<usize, sqlx::Error> {
    let mut created = 0;
    for name in DEFAULT_CATEGORIES {
        let input = CreateCategory {
            name: (*name).to_string(),
            slug: slugify(name),
            category_type: CategoryType::Both,
        };
        if CategoryRepo::insert_if_missing(pool, &input).await? {
            created += 1;
        }
    }
    tracing::info!(created, "Default categories seeded");
    Ok(created)
}
