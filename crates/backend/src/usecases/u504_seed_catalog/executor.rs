use crate::domain::a001_category::service::{resolve_with_icon, ResolveOutcome};
use crate::shared::data::store::{CatalogStore, ProductScope};
use crate::shared::error::CatalogResult;
use contracts::domain::a001_category::name_key;
use contracts::domain::a002_product::ProductDraft;
use contracts::enums::ProductStatus;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u504_seed_catalog::{
    DefaultCategory, IconFix, IconRepairReport, SeedCatalog, SeedReport, DEFAULT_CATEGORIES,
    SAMPLE_PRODUCT_PRICE,
};

/// Исправить иконку, сохраненную как UTF-8, прочитанный в latin-1.
///
/// Срабатывает, только если все символы в диапазоне U+0000..U+00FF и их байты
/// образуют корректный UTF-8, отличный от исходной строки.
pub fn repair_mojibake(raw: &str) -> Option<String> {
    if raw.is_ascii() {
        return None;
    }
    let bytes = raw
        .chars()
        .map(|c| u8::try_from(u32::from(c)).ok())
        .collect::<Option<Vec<u8>>>()?;
    let fixed = String::from_utf8(bytes).ok()?;
    (fixed != raw).then_some(fixed)
}

/// Executor для UseCase наполнения каталога
pub struct SeedExecutor<'a> {
    store: &'a dyn CatalogStore,
}

impl<'a> SeedExecutor<'a> {
    pub fn new(store: &'a dyn CatalogStore) -> Self {
        Self { store }
    }

    /// Создать недостающие стандартные категории и выровнять их иконки
    pub async fn ensure_default_categories(&self) -> CatalogResult<SeedReport> {
        tracing::info!("{}: ensuring default categories", SeedCatalog::full_name());
        let mut report = SeedReport::default();

        for wanted in DEFAULT_CATEGORIES {
            self.ensure_category(wanted, &mut report).await?;
        }

        report.categories_untouched = self
            .store
            .list_categories()
            .await?
            .into_iter()
            .filter(|c| !DEFAULT_CATEGORIES.iter().any(|d| name_key(d.name) == name_key(&c.name)))
            .map(|c| c.name)
            .collect();

        tracing::info!(
            "Default categories: {} created, {} icons updated, {} already correct, {} other",
            report.categories_created.len(),
            report.icons_updated.len(),
            report.categories_found.len(),
            report.categories_untouched.len()
        );
        Ok(report)
    }

    async fn ensure_category(
        &self,
        wanted: &DefaultCategory,
        report: &mut SeedReport,
    ) -> CatalogResult<()> {
        let resolved = resolve_with_icon(self.store, wanted.name, Some(wanted.icon)).await?;
        let category = resolved.category;
        if resolved.outcome == ResolveOutcome::Created {
            report.categories_created.push(category.name);
            return Ok(());
        }
        if category.icon.as_deref() == Some(wanted.icon) {
            report.categories_found.push(category.name);
            return Ok(());
        }
        self.store.update_category_icon(category.id, wanted.icon).await?;
        tracing::info!(
            "Icon of '{}' (id={}): {:?} -> {}",
            category.name,
            category.id,
            category.icon,
            wanted.icon
        );
        report.icons_updated.push(category.name);
        Ok(())
    }

    /// Наполнить пустую базу: стандартные категории и по одному демо-товару
    pub async fn seed_if_empty(&self) -> CatalogResult<SeedReport> {
        let mut report = if self.store.count_categories().await? == 0 {
            self.ensure_default_categories().await?
        } else {
            tracing::info!("Categories already present, skipping category seed");
            SeedReport::default()
        };

        if self.store.count_products(ProductScope::all()).await? > 0 {
            tracing::info!("Products already present, skipping product seed");
            report.products_present = true;
            return Ok(report);
        }

        let drafts: Vec<ProductDraft> = self
            .store
            .list_categories()
            .await?
            .into_iter()
            .map(|category| {
                let mut draft = ProductDraft::new(
                    DefaultCategory::sample_title(&category.name),
                    SAMPLE_PRODUCT_PRICE,
                    category.id,
                );
                draft.description = Some(format!("Auto-seeded sample product for {}", category.name));
                draft.status = ProductStatus::Active;
                draft
            })
            .collect();

        report.products_seeded = self.store.bulk_create_products(&drafts).await? as usize;
        tracing::info!("Seeded {} sample products", report.products_seeded);
        Ok(report)
    }

    /// Исправить иконки категорий, испорченные перекодировкой
    pub async fn repair_icons(&self) -> CatalogResult<IconRepairReport> {
        let mut report = IconRepairReport::default();
        for category in self.store.list_categories().await? {
            let Some(icon) = category.icon.as_deref().filter(|i| !i.is_empty()) else {
                report.without_icon += 1;
                continue;
            };
            match repair_mojibake(icon) {
                Some(fixed) => {
                    self.store.update_category_icon(category.id, &fixed).await?;
                    tracing::info!("Fixed icon of '{}': {:?} -> {}", category.name, icon, fixed);
                    report.fixed.push(IconFix {
                        id: category.id,
                        name: category.name.clone(),
                        before: icon.to_string(),
                        after: fixed,
                    });
                }
                None => report.unchanged += 1,
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_category::service::resolve;
    use crate::shared::data::testing::memory_store;
    use contracts::domain::a001_category::CategoryDraft;

    fn garbled(text: &str) -> String {
        text.bytes().map(char::from).collect()
    }

    #[test]
    fn test_repair_mojibake() {
        assert_eq!(repair_mojibake(&garbled("🌸")), Some("🌸".to_string()));
        assert_eq!(repair_mojibake(&garbled("🛠️")), Some("🛠️".to_string()));
        assert_eq!(repair_mojibake("🌸"), None);
        assert_eq!(repair_mojibake("abc"), None);
        // latin-1 text that is not UTF-8 underneath
        assert_eq!(repair_mojibake("café"), None);
    }

    #[tokio::test]
    async fn test_ensure_defaults_is_idempotent() {
        let store = memory_store().await;
        store
            .create_category(&CategoryDraft::new("flowers").with_icon(Some("?".into())))
            .await
            .unwrap();
        resolve(&store, "Toys").await.unwrap();

        let first = SeedExecutor::new(&store).ensure_default_categories().await.unwrap();
        assert_eq!(first.categories_created.len(), DEFAULT_CATEGORIES.len() - 1);
        assert_eq!(first.icons_updated, vec!["flowers".to_string()]);
        assert_eq!(first.categories_untouched, vec!["Toys".to_string()]);

        let second = SeedExecutor::new(&store).ensure_default_categories().await.unwrap();
        assert!(second.categories_created.is_empty());
        assert!(second.icons_updated.is_empty());
        assert_eq!(second.categories_found.len(), DEFAULT_CATEGORIES.len());

        let flowers = store.find_category_by_name("Flowers").await.unwrap().unwrap();
        assert_eq!(flowers.icon.as_deref(), Some("🌸"));
        assert_eq!(
            store.count_categories().await.unwrap() as usize,
            DEFAULT_CATEGORIES.len() + 1
        );
    }

    #[tokio::test]
    async fn test_seed_if_empty_runs_once() {
        let store = memory_store().await;
        let first = SeedExecutor::new(&store).seed_if_empty().await.unwrap();
        assert_eq!(first.categories_created.len(), DEFAULT_CATEGORIES.len());
        assert_eq!(first.products_seeded, DEFAULT_CATEGORIES.len());

        let crackers = store.find_category_by_name("Crackers").await.unwrap().unwrap();
        let sample = store
            .find_product("Sample Crackers Item", crackers.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(sample.price, SAMPLE_PRODUCT_PRICE);
        assert_eq!(sample.status, ProductStatus::Active);

        let second = SeedExecutor::new(&store).seed_if_empty().await.unwrap();
        assert!(second.categories_created.is_empty());
        assert!(second.products_present);
        assert_eq!(second.products_seeded, 0);
    }

    #[tokio::test]
    async fn test_repair_icons() {
        let store = memory_store().await;
        store
            .create_category(&CategoryDraft::new("Flowers").with_icon(Some(garbled("🌸"))))
            .await
            .unwrap();
        store
            .create_category(&CategoryDraft::new("Crackers").with_icon(Some("🎆".into())))
            .await
            .unwrap();
        resolve(&store, "Toys").await.unwrap();

        let report = SeedExecutor::new(&store).repair_icons().await.unwrap();
        assert_eq!(report.fixed.len(), 1);
        assert_eq!(report.fixed[0].after, "🌸");
        assert_eq!((report.unchanged, report.without_icon), (1, 1));

        let flowers = store.find_category_by_name("Flowers").await.unwrap().unwrap();
        assert_eq!(flowers.icon.as_deref(), Some("🌸"));
        let again = SeedExecutor::new(&store).repair_icons().await.unwrap();
        assert!(again.fixed.is_empty());
    }
}
