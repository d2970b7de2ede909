use contracts::domain::a001_category::Category;
use tracing::info;

use crate::shared::data::store::CatalogStore;
use crate::shared::error::{CatalogError, CatalogResult};

/// Пометить все товары категории как услуги (с доставкой).
///
/// Категория ищется без учета регистра и не создается.
pub async fn mark_category_as_service(
    store: &dyn CatalogStore,
    category_name: &str,
) -> CatalogResult<(Category, u64)> {
    let name = category_name.trim();
    if name.is_empty() {
        return Err(CatalogError::Validation("Category name must not be empty".into()));
    }
    let category = store
        .find_category_by_name(name)
        .await?
        .ok_or_else(|| CatalogError::ReferentialGap(format!("category '{}' not found", name)))?;

    let updated = store.mark_category_as_service(category.id).await?;
    info!(
        "Marked {} products of '{}' (id={}) as services",
        updated, category.name, category.id
    );
    Ok((category, updated))
}
