use crate::shared::data::store::{CatalogStore, ProductScope};
use crate::shared::error::CatalogResult;
use contracts::domain::a002_product::{Product, ProductId};
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u502_dedupe_products::{
    DedupeProducts, DedupeReport, DedupeRequest, DuplicateGroupOutcome,
};
use std::collections::HashMap;

/// Группа товаров с одинаковым нормализованным названием
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    pub title_key: String,
    pub members: Vec<Product>,
}

/// Сгруппировать товары по нормализованному названию.
///
/// Возвращает только группы из двух и более товаров, в порядке первого
/// появления ключа; порядок внутри группы совпадает с входным.
pub fn group_duplicates(products: Vec<Product>) -> Vec<DuplicateGroup> {
    let mut groups: Vec<DuplicateGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for product in products {
        let Some(key) = product.title_key() else {
            continue;
        };
        match index.get(&key) {
            Some(&pos) => groups[pos].members.push(product),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(DuplicateGroup {
                    title_key: key,
                    members: vec![product],
                });
            }
        }
    }

    groups.retain(|g| g.members.len() > 1);
    groups
}

/// Оставляемый товар: первый с категорией, иначе товар с наибольшим id.
///
/// Может отбросить дубль с более полными данными.
pub fn select_keeper(members: &[Product]) -> Option<&Product> {
    members
        .iter()
        .find(|p| p.category_id.is_some())
        .or_else(|| members.iter().max_by_key(|p| p.id))
}

/// Executor для UseCase удаления дублей товаров
pub struct DedupeExecutor<'a> {
    store: &'a dyn CatalogStore,
}

impl<'a> DedupeExecutor<'a> {
    pub fn new(store: &'a dyn CatalogStore) -> Self {
        Self { store }
    }

    pub async fn run(&self, request: &DedupeRequest) -> CatalogResult<DedupeReport> {
        let scope = ProductScope {
            category_id: request.category_id,
        };
        let products = self.store.list_products(scope).await?;
        tracing::info!(
            "{}: {} products in scope (category: {:?}, dry run: {})",
            DedupeProducts::full_name(),
            products.len(),
            request.category_id,
            request.dry_run
        );

        let mut report = DedupeReport {
            dry_run: request.dry_run,
            ..Default::default()
        };

        for group in group_duplicates(products) {
            let Some(keeper) = select_keeper(&group.members) else {
                continue;
            };
            let keeper_id = keeper.id;
            let removed_ids: Vec<ProductId> = group
                .members
                .iter()
                .map(|p| p.id)
                .filter(|id| *id != keeper_id)
                .collect();

            let removed = if request.dry_run {
                0
            } else {
                self.store.delete_products(&removed_ids).await?
            };
            tracing::info!(
                "'{}': keep id={}, remove {:?}",
                group.title_key,
                keeper_id,
                removed_ids.iter().map(|id| id.0).collect::<Vec<_>>()
            );

            report.groups += 1;
            report.removed += removed;
            report.outcomes.push(DuplicateGroupOutcome {
                title_key: group.title_key,
                keeper_id,
                removed_ids,
                removed,
            });
        }

        tracing::info!(
            "Dedupe finished: {} groups, {} rows removed",
            report.groups,
            report.removed
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_category::service::resolve;
    use crate::shared::data::testing::memory_store;
    use contracts::domain::a001_category::CategoryId;
    use contracts::domain::a002_product::ProductDraft;
    use contracts::domain::common::EntityMetadata;
    use contracts::enums::ProductStatus;
    use sea_orm::{ConnectionTrait, Statement};

    fn product(id: i32, title: &str, category: Option<i32>) -> Product {
        Product {
            id: ProductId(id),
            title: title.into(),
            title_kannada: None,
            description: None,
            description_kannada: None,
            price: 1.0,
            variety: None,
            sub_variety: None,
            unit: None,
            supplier_id: None,
            is_service: false,
            delivery_available: true,
            is_template: false,
            metadata: None,
            status: ProductStatus::Active,
            category_id: category.map(CategoryId),
            lifecycle: EntityMetadata::new(),
        }
    }

    #[test]
    fn test_keeper_is_first_categorized() {
        let members = vec![
            product(5, "Apple", None),
            product(7, "apple ", Some(2)),
            product(9, "APPLE", None),
        ];
        let groups = group_duplicates(members);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].title_key, "apple");
        assert_eq!(select_keeper(&groups[0].members).map(|p| p.id), Some(ProductId(7)));
    }

    #[test]
    fn test_keeper_without_categories_is_highest_id() {
        let members = vec![product(3, "Rose", None), product(8, "rose", None), product(4, "ROSE", None)];
        assert_eq!(select_keeper(&members).map(|p| p.id), Some(ProductId(8)));
    }

    #[test]
    fn test_blank_titles_and_singletons_are_not_groups() {
        let groups = group_duplicates(vec![
            product(1, "  ", None),
            product(2, "", None),
            product(3, "Lily", Some(1)),
            product(4, "Lotus", Some(1)),
        ]);
        assert!(groups.is_empty());
    }

    async fn store_with_apples() -> (crate::shared::data::db::CatalogDb, CategoryId) {
        let store = memory_store().await;
        let fruits = resolve(&store, "Groceries").await.unwrap();
        for title in ["Apple", "apple ", "APPLE", "Banana"] {
            store
                .create_product(&ProductDraft::new(title, 2.0, fruits.id))
                .await
                .unwrap();
        }
        // only the second apple keeps its category
        store
            .connection()
            .execute(Statement::from_string(
                store.backend(),
                r#"UPDATE "Products" SET "CategoryId" = NULL WHERE "title" IN ('Apple', 'APPLE')"#
                    .to_string(),
            ))
            .await
            .unwrap();
        (store, fruits.id)
    }

    #[tokio::test]
    async fn test_dedupe_removes_all_but_keeper() {
        let (store, _) = store_with_apples().await;
        let report = DedupeExecutor::new(&store)
            .run(&DedupeRequest::default())
            .await
            .unwrap();

        assert_eq!(report.groups, 1);
        assert_eq!(report.removed, 2);
        let remaining = store.list_products(ProductScope::all()).await.unwrap();
        let titles: Vec<_> = remaining.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["apple ", "Banana"]);
        assert_eq!(report.outcomes[0].keeper_id, remaining[0].id);

        let again = DedupeExecutor::new(&store)
            .run(&DedupeRequest::default())
            .await
            .unwrap();
        assert_eq!((again.groups, again.removed), (0, 0));
    }

    #[tokio::test]
    async fn test_dry_run_deletes_nothing() {
        let (store, _) = store_with_apples().await;
        let report = DedupeExecutor::new(&store)
            .run(&DedupeRequest {
                category_id: None,
                dry_run: true,
            })
            .await
            .unwrap();
        assert_eq!(report.groups, 1);
        assert_eq!(report.removed, 0);
        assert_eq!(report.outcomes[0].removed_ids.len(), 2);
        assert_eq!(store.count_products(ProductScope::all()).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_category_scope_only_sees_that_category() {
        let (store, groceries) = store_with_apples().await;
        let report = DedupeExecutor::new(&store)
            .run(&DedupeRequest {
                category_id: Some(groceries),
                dry_run: false,
            })
            .await
            .unwrap();
        // the uncategorized apples are out of scope, one categorized apple is no group
        assert_eq!((report.groups, report.removed), (0, 0));
    }
}
