use async_trait::async_trait;
use contracts::domain::a001_category::{Category, CategoryDraft, CategoryId};
use contracts::domain::a002_product::{Product, ProductDraft, ProductId};

use super::db::{sync_sequences, CatalogDb};
use crate::domain::{a001_category, a002_product};
use crate::shared::error::{CatalogError, CatalogResult};

/// Набор товаров, над которым выполняется операция
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductScope {
    pub category_id: Option<CategoryId>,
}

impl ProductScope {
    pub fn all() -> Self {
        Self { category_id: None }
    }

    pub fn category(id: CategoryId) -> Self {
        Self {
            category_id: Some(id),
        }
    }
}

/// Условие удаления товаров по названию
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleMatch {
    pub prefix: Option<String>,
    pub exact: Vec<String>,
}

/// Операции хранилища каталога, которые нужны use case-ам.
///
/// Реализация для базы данных - [`CatalogDb`]; в тестах ее оборачивает
/// scripted-хранилище, подменяющее отдельные ответы.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Имя хранилища для логов
    fn label(&self) -> &str;

    async fn ping(&self) -> CatalogResult<()>;

    /// Все категории по возрастанию id
    async fn list_categories(&self) -> CatalogResult<Vec<Category>>;

    /// Поиск без учета регистра, каноническая запись - с наименьшим id
    async fn find_category_by_name(&self, name: &str) -> CatalogResult<Option<Category>>;

    async fn create_category(&self, draft: &CategoryDraft) -> CatalogResult<Category>;

    async fn update_category_icon(&self, id: CategoryId, icon: &str) -> CatalogResult<bool>;

    async fn count_categories(&self) -> CatalogResult<u64>;

    /// Товары по возрастанию id
    async fn list_products(&self, scope: ProductScope) -> CatalogResult<Vec<Product>>;

    async fn find_product(
        &self,
        title: &str,
        category_id: CategoryId,
    ) -> CatalogResult<Option<Product>>;

    async fn create_product(&self, draft: &ProductDraft) -> CatalogResult<Product>;

    async fn bulk_create_products(&self, drafts: &[ProductDraft]) -> CatalogResult<u64>;

    async fn delete_products(&self, ids: &[ProductId]) -> CatalogResult<u64>;

    async fn delete_products_in_category(&self, category_id: CategoryId) -> CatalogResult<u64>;

    async fn delete_products_matching(&self, titles: &TitleMatch) -> CatalogResult<u64>;

    async fn mark_category_as_service(&self, category_id: CategoryId) -> CatalogResult<u64>;

    async fn count_products(&self, scope: ProductScope) -> CatalogResult<u64>;

    /// Выравнивание последовательностей id (только Postgres)
    async fn sync_id_sequences(&self) -> CatalogResult<()>;
}

#[async_trait]
impl CatalogStore for CatalogDb {
    fn label(&self) -> &str {
        CatalogDb::label(self)
    }

    async fn ping(&self) -> CatalogResult<()> {
        self.connection()
            .ping()
            .await
            .map_err(|e| CatalogError::StoreUnavailable(format!("{}: {}", self.label(), e)))
    }

    async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        a001_category::repository::list_all(self.connection()).await
    }

    async fn find_category_by_name(&self, name: &str) -> CatalogResult<Option<Category>> {
        a001_category::repository::find_by_name(self.connection(), name).await
    }

    async fn create_category(&self, draft: &CategoryDraft) -> CatalogResult<Category> {
        a001_category::repository::insert(self.connection(), draft).await
    }

    async fn update_category_icon(&self, id: CategoryId, icon: &str) -> CatalogResult<bool> {
        a001_category::repository::update_icon(self.connection(), id, icon).await
    }

    async fn count_categories(&self) -> CatalogResult<u64> {
        a001_category::repository::count(self.connection()).await
    }

    async fn list_products(&self, scope: ProductScope) -> CatalogResult<Vec<Product>> {
        a002_product::repository::list(self.connection(), scope.category_id).await
    }

    async fn find_product(
        &self,
        title: &str,
        category_id: CategoryId,
    ) -> CatalogResult<Option<Product>> {
        a002_product::repository::find_by_title_and_category(self.connection(), title, category_id)
            .await
    }

    async fn create_product(&self, draft: &ProductDraft) -> CatalogResult<Product> {
        a002_product::repository::insert(self.connection(), draft).await
    }

    async fn bulk_create_products(&self, drafts: &[ProductDraft]) -> CatalogResult<u64> {
        a002_product::repository::insert_many(self.connection(), drafts).await
    }

    async fn delete_products(&self, ids: &[ProductId]) -> CatalogResult<u64> {
        a002_product::repository::delete_by_ids(self.connection(), ids).await
    }

    async fn delete_products_in_category(&self, category_id: CategoryId) -> CatalogResult<u64> {
        a002_product::repository::delete_by_category(self.connection(), category_id).await
    }

    async fn delete_products_matching(&self, titles: &TitleMatch) -> CatalogResult<u64> {
        a002_product::repository::delete_by_title(
            self.connection(),
            titles.prefix.as_deref(),
            &titles.exact,
        )
        .await
    }

    async fn mark_category_as_service(&self, category_id: CategoryId) -> CatalogResult<u64> {
        a002_product::repository::mark_service(self.connection(), category_id).await
    }

    async fn count_products(&self, scope: ProductScope) -> CatalogResult<u64> {
        a002_product::repository::count(self.connection(), scope.category_id).await
    }

    async fn sync_id_sequences(&self) -> CatalogResult<()> {
        sync_sequences(self.connection()).await
    }
}
