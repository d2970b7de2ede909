use contracts::domain::a001_category::{Category, CategoryDraft, CategorySummary};
use tracing::{info, warn};

use crate::shared::data::store::{CatalogStore, ProductScope};
use crate::shared::error::{CatalogError, CatalogResult};

/// Как была получена категория
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// Уже существовала
    Found,
    /// Создана этим вызовом
    Created,
    /// Создание упало на уникальности, строку нашел повторный поиск
    Recovered,
}

#[derive(Debug, Clone)]
pub struct Resolved {
    pub category: Category,
    pub outcome: ResolveOutcome,
}

/// Найти категорию по имени без учета регистра или создать ее
pub async fn resolve(store: &dyn CatalogStore, name: &str) -> CatalogResult<Category> {
    Ok(resolve_with_icon(store, name, None).await?.category)
}

/// То же, что [`resolve`]; `icon` применяется только при создании.
///
/// Каноническая запись - с наименьшим id, она возвращается без изменений.
/// Конфликт уникальности при создании означает, что строку создал
/// кто-то параллельно: выполняется один повторный поиск.
pub async fn resolve_with_icon(
    store: &dyn CatalogStore,
    name: &str,
    icon: Option<&str>,
) -> CatalogResult<Resolved> {
    let draft = CategoryDraft::new(name.trim()).with_icon(icon.map(str::to_string));
    draft.validate().map_err(CatalogError::Validation)?;

    if let Some(category) = store.find_category_by_name(&draft.name).await? {
        return Ok(Resolved {
            category,
            outcome: ResolveOutcome::Found,
        });
    }

    match store.create_category(&draft).await {
        Ok(category) => {
            info!(
                "Created category '{}' (id={}) in {}",
                category.name,
                category.id,
                store.label()
            );
            Ok(Resolved {
                category,
                outcome: ResolveOutcome::Created,
            })
        }
        Err(CatalogError::UniquenessConflict(cause)) => {
            warn!(
                "Category '{}' was created concurrently ({}), looking it up again",
                draft.name, cause
            );
            match store.find_category_by_name(&draft.name).await? {
                Some(category) => Ok(Resolved {
                    category,
                    outcome: ResolveOutcome::Recovered,
                }),
                None => Err(CatalogError::IrreconcilableConflict(format!(
                    "category '{}': create reported a conflict but no row matches ({})",
                    draft.name, cause
                ))),
            }
        }
        Err(e) => Err(e),
    }
}

/// Категории (по возрастанию id), в имени которых есть `filter`, с числом товаров
pub async fn category_stats(
    store: &dyn CatalogStore,
    filter: Option<&str>,
) -> CatalogResult<Vec<CategorySummary>> {
    let needle = filter
        .map(|f| f.trim().to_lowercase())
        .filter(|f| !f.is_empty());

    let mut summaries = Vec::new();
    for category in store.list_categories().await? {
        if let Some(needle) = &needle {
            if !category.name.to_lowercase().contains(needle.as_str()) {
                continue;
            }
        }
        let product_count = store
            .count_products(ProductScope::category(category.id))
            .await?;
        summaries.push(CategorySummary {
            id: category.id,
            name: category.name,
            icon: category.icon,
            product_count,
        });
    }
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::testing::{memory_store, CreateRace, ScriptedStore};
    use contracts::domain::a002_product::ProductDraft;

    #[tokio::test]
    async fn test_resolve_reuses_existing_case_insensitively() {
        let store = memory_store().await;
        let flowers = resolve(&store, "Flowers").await.unwrap();

        let again = resolve_with_icon(&store, "  flowers ", Some("🌸")).await.unwrap();
        assert_eq!(again.outcome, ResolveOutcome::Found);
        assert_eq!(again.category.id, flowers.id);
        assert_eq!(again.category.name, "Flowers");
        // icon only applies on creation
        assert_eq!(again.category.icon, None);
        assert_eq!(store.count_categories().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_resolve_creates_trimmed_name_with_icon() {
        let store = memory_store().await;
        let resolved = resolve_with_icon(&store, " Pet Services ", Some("🐾")).await.unwrap();
        assert_eq!(resolved.outcome, ResolveOutcome::Created);
        assert_eq!(resolved.category.name, "Pet Services");
        assert_eq!(resolved.category.icon.as_deref(), Some("🐾"));
    }

    #[tokio::test]
    async fn test_resolve_rejects_empty_name() {
        let store = memory_store().await;
        let err = resolve(&store, "   ").await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert_eq!(store.count_categories().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_resolve_recovers_from_concurrent_create() {
        let store = ScriptedStore::new(memory_store().await);
        store.race_category("Groceries", CreateRace::LostToConcurrentWriter);

        let resolved = resolve_with_icon(&store, "groceries", None).await.unwrap();
        assert_eq!(resolved.outcome, ResolveOutcome::Recovered);
        assert_eq!(store.count_categories().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_resolve_reports_irreconcilable_conflict() {
        let store = ScriptedStore::new(memory_store().await);
        store.race_category("Groceries", CreateRace::Phantom);

        let err = resolve(&store, "Groceries").await.unwrap_err();
        assert!(matches!(err, CatalogError::IrreconcilableConflict(_)), "{err}");
    }

    #[tokio::test]
    async fn test_resolve_propagates_unavailable_store() {
        let store = ScriptedStore::new(memory_store().await);
        store.go_offline();
        let err = resolve(&store, "Groceries").await.unwrap_err();
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_category_stats_filters_and_counts() {
        let store = memory_store().await;
        let local = resolve(&store, "Local Services").await.unwrap();
        resolve(&store, "Pet Services").await.unwrap();
        resolve(&store, "Flowers").await.unwrap();
        store
            .create_product(&ProductDraft::new("Plumber", 300.0, local.id))
            .await
            .unwrap();

        let stats = category_stats(&store, Some("SERVICE")).await.unwrap();
        let names: Vec<_> = stats.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Local Services", "Pet Services"]);
        assert_eq!(stats[0].product_count, 1);
        assert_eq!(stats[1].product_count, 0);

        assert_eq!(category_stats(&store, None).await.unwrap().len(), 3);
    }
}
