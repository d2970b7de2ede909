use crate::domain::a001_category::service::{resolve_with_icon, ResolveOutcome};
use crate::shared::data::store::{CatalogStore, ProductScope};
use crate::shared::error::{CatalogError, CatalogResult};
use contracts::domain::a001_category::{Category, CategoryId};
use contracts::domain::a002_product::{Product, ProductDraft, ProductId};
use contracts::usecases::common::{IssueKind, RecordIssue, UseCaseMetadata};
use contracts::usecases::u501_migrate_store::{MigrateStore, MigrationReport};
use std::collections::HashMap;
use uuid::Uuid;

/// Соответствие id категорий: исходное хранилище -> целевое
#[derive(Debug, Default, Clone)]
pub struct CategoryRemap(HashMap<CategoryId, CategoryId>);

impl CategoryRemap {
    pub fn insert(&mut self, source: CategoryId, destination: CategoryId) {
        self.0.insert(source, destination);
    }

    pub fn get(&self, source: CategoryId) -> Option<CategoryId> {
        self.0.get(&source).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Результат переноса одного товара
#[derive(Debug)]
enum ProductOutcome {
    Created(ProductId),
    /// Уже есть в целевом хранилище, в этой категории
    AlreadyPresent(CategoryId),
    /// Пропущен (нет категории, невалидные данные)
    Skipped(RecordIssue),
    /// Ошибка записи; прогон продолжается
    Failed(RecordIssue),
}

/// Executor для UseCase переноса каталога между хранилищами.
///
/// Фаза 1 переносит категории и строит таблицу соответствия id,
/// фаза 2 переносит товары. Повторный запуск ничего не создает.
pub struct MigrationExecutor<'a> {
    source: &'a dyn CatalogStore,
    destination: &'a dyn CatalogStore,
}

impl<'a> MigrationExecutor<'a> {
    pub fn new(source: &'a dyn CatalogStore, destination: &'a dyn CatalogStore) -> Self {
        Self {
            source,
            destination,
        }
    }

    pub async fn run(&self) -> CatalogResult<MigrationReport> {
        let mut report = MigrationReport::new(Uuid::new_v4().to_string());
        tracing::info!(
            "{} run {}: {} -> {}",
            MigrateStore::full_name(),
            report.run_id,
            self.source.label(),
            self.destination.label()
        );

        self.source.ping().await?;
        self.destination.ping().await?;
        self.destination.sync_id_sequences().await?;

        let source_categories = self.source.list_categories().await?;
        let remap = self.migrate_categories(&source_categories, &mut report).await?;
        tracing::info!(
            "Categories mapped: {} ({} created)",
            remap.len(),
            report.categories_created
        );

        let by_id: HashMap<CategoryId, &Category> =
            source_categories.iter().map(|c| (c.id, c)).collect();
        let products = self.source.list_products(ProductScope::all()).await?;
        tracing::info!("Migrating {} products", products.len());

        for product in &products {
            let source_category = product.category_id.and_then(|id| by_id.get(&id).copied());
            match self.migrate_product(product, source_category, &remap).await {
                Ok(ProductOutcome::Created(id)) => {
                    tracing::info!(
                        "Created product '{}' (source id={}, new id={})",
                        product.title,
                        product.id,
                        id
                    );
                    report.created += 1;
                }
                Ok(ProductOutcome::AlreadyPresent(category_id)) => {
                    tracing::debug!(
                        "Skipped product '{}' (source id={}): already in category {}",
                        product.title,
                        product.id,
                        category_id
                    );
                    report.skipped += 1;
                }
                Ok(ProductOutcome::Skipped(issue)) => {
                    tracing::warn!("Skipped: {}", issue);
                    report.skipped += 1;
                    report.issues.push(issue);
                }
                Ok(ProductOutcome::Failed(issue)) => {
                    report.failed += 1;
                    report.issues.push(issue);
                }
                Err(e) if e.is_fatal() => {
                    tracing::error!("Migration {} aborted: {}", report.run_id, e);
                    return Err(e);
                }
                Err(e) => {
                    tracing::error!(
                        "Failed product '{}' (source id={}): {}",
                        product.title,
                        product.id,
                        e
                    );
                    report.failed += 1;
                    report.issues.push(
                        RecordIssue::new(e.issue_kind(), e.to_string())
                            .with_source_id(product.id.0)
                            .with_title(product.title.clone()),
                    );
                }
            }
        }

        report.complete();
        tracing::info!(
            "Migration {} finished ({}): created={}, skipped={}, failed={}",
            report.run_id,
            report.status,
            report.created,
            report.skipped,
            report.failed
        );
        Ok(report)
    }

    /// Фаза 1: категории по возрастанию id
    async fn migrate_categories(
        &self,
        categories: &[Category],
        report: &mut MigrationReport,
    ) -> CatalogResult<CategoryRemap> {
        let mut remap = CategoryRemap::default();
        for category in categories {
            let name = category.name.trim();
            if name.is_empty() {
                tracing::debug!("Category id={} has an empty name, skipping", category.id);
                continue;
            }
            match resolve_with_icon(self.destination, name, category.icon.as_deref()).await {
                Ok(resolved) => {
                    if resolved.outcome == ResolveOutcome::Created {
                        report.categories_created += 1;
                    }
                    remap.insert(category.id, resolved.category.id);
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    tracing::warn!("Category '{}' (id={}) not mapped: {}", name, category.id, e);
                    report.issues.push(
                        RecordIssue::new(e.issue_kind(), e.to_string())
                            .with_source_id(category.id.0)
                            .with_title(name),
                    );
                }
            }
        }
        report.categories_mapped = remap.len();
        Ok(remap)
    }

    async fn destination_category(
        &self,
        product: &Product,
        source_category: Option<&Category>,
        remap: &CategoryRemap,
    ) -> CatalogResult<Option<CategoryId>> {
        if let Some(id) = product.category_id.and_then(|id| remap.get(id)) {
            return Ok(Some(id));
        }
        let name = source_category
            .map(|c| c.name.trim())
            .filter(|n| !n.is_empty());
        match name {
            Some(name) => Ok(self
                .destination
                .find_category_by_name(name)
                .await?
                .map(|c| c.id)),
            None => Ok(None),
        }
    }

    /// Фаза 2: один товар
    async fn migrate_product(
        &self,
        product: &Product,
        source_category: Option<&Category>,
        remap: &CategoryRemap,
    ) -> CatalogResult<ProductOutcome> {
        let issue = |kind: IssueKind, message: String| {
            RecordIssue::new(kind, message)
                .with_source_id(product.id.0)
                .with_title(product.title.clone())
        };

        let Some(category_id) = self
            .destination_category(product, source_category, remap)
            .await?
        else {
            let detail = match (product.category_id, source_category) {
                (None, _) => "product has no category".to_string(),
                (Some(id), None) => format!("source category id={} not found", id),
                (Some(id), Some(c)) => {
                    format!("category '{}' (source id={}) not in destination", c.name, id)
                }
            };
            return Ok(ProductOutcome::Skipped(issue(IssueKind::ReferentialGap, detail)));
        };

        // status is normalized when the source row is read
        let draft = ProductDraft::carried_over(product, category_id, product.status);
        if let Err(message) = draft.validate() {
            return Ok(ProductOutcome::Skipped(
                issue(IssueKind::Validation, message).with_target(category_id.to_string()),
            ));
        }

        if self
            .destination
            .find_product(&product.title, category_id)
            .await?
            .is_some()
        {
            return Ok(ProductOutcome::AlreadyPresent(category_id));
        }

        match self.destination.create_product(&draft).await {
            Ok(created) => Ok(ProductOutcome::Created(created.id)),
            Err(CatalogError::UniquenessConflict(cause)) => {
                if self
                    .destination
                    .find_product(&product.title, category_id)
                    .await?
                    .is_some()
                {
                    return Ok(ProductOutcome::AlreadyPresent(category_id));
                }
                let err = CatalogError::IrreconcilableConflict(cause);
                Ok(self.failed(product, category_id, err))
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => Ok(self.failed(product, category_id, e)),
        }
    }

    fn failed(&self, product: &Product, category_id: CategoryId, err: CatalogError) -> ProductOutcome {
        tracing::error!(
            "Failed product '{}' (source id={}) -> category {}: {}",
            product.title,
            product.id,
            category_id,
            err
        );
        ProductOutcome::Failed(
            RecordIssue::new(err.issue_kind(), err.to_string())
                .with_source_id(product.id.0)
                .with_title(product.title.clone())
                .with_target(category_id.to_string()),
        )
    }
}
