//! Test helpers: in-memory stores and a scripted wrapper that injects
//! races and connection failures.

use async_trait::async_trait;
use contracts::domain::a001_category::{name_key, Category, CategoryDraft, CategoryId};
use contracts::domain::a002_product::{Product, ProductDraft, ProductId};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::db::{CatalogDb, DatabaseTarget};
use super::store::{CatalogStore, ProductScope, TitleMatch};
use crate::shared::error::{CatalogError, CatalogResult};

pub async fn memory_store() -> CatalogDb {
    CatalogDb::connect(&DatabaseTarget::InMemory, 1)
        .await
        .expect("in-memory store")
}

/// Как поведет себя `create_category` для заданного имени
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateRace {
    /// Параллельный писатель успел создать строку: конфликт, строка есть
    LostToConcurrentWriter,
    /// Конфликт, но строку найти не удастся
    Phantom,
}

/// Обертка над реальным хранилищем с подменой отдельных ответов
pub struct ScriptedStore {
    inner: CatalogDb,
    category_races: Mutex<Vec<(String, CreateRace)>>,
    product_races: Mutex<Vec<(String, CreateRace)>>,
    failing_titles: Mutex<HashSet<String>>,
    hidden_categories: Mutex<HashSet<CategoryId>>,
    missed_lookups: Mutex<HashMap<String, usize>>,
    unavailable: AtomicBool,
}

impl ScriptedStore {
    pub fn new(inner: CatalogDb) -> Self {
        Self {
            inner,
            category_races: Mutex::new(Vec::new()),
            product_races: Mutex::new(Vec::new()),
            failing_titles: Mutex::new(HashSet::new()),
            hidden_categories: Mutex::new(HashSet::new()),
            missed_lookups: Mutex::new(HashMap::new()),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn inner(&self) -> &CatalogDb {
        &self.inner
    }

    /// Следующий `create_category` с этим именем закончится конфликтом
    pub fn race_category(&self, name: &str, race: CreateRace) {
        self.category_races
            .lock()
            .unwrap()
            .push((name_key(name), race));
    }

    /// Следующий `create_product` с этим названием закончится конфликтом
    pub fn race_product(&self, title: &str, race: CreateRace) {
        self.product_races
            .lock()
            .unwrap()
            .push((title.to_string(), race));
    }

    /// `create_product` с этим названием падает с ошибкой БД
    pub fn fail_product(&self, title: &str) {
        self.failing_titles.lock().unwrap().insert(title.to_string());
    }

    /// Категория пропадает из `list_categories`
    pub fn hide_category(&self, id: CategoryId) {
        self.hidden_categories.lock().unwrap().insert(id);
    }

    /// Следующие `times` поисков категории по имени ничего не находят
    pub fn miss_category_lookups(&self, name: &str, times: usize) {
        self.missed_lookups
            .lock()
            .unwrap()
            .insert(name_key(name), times);
    }

    pub fn go_offline(&self) {
        self.unavailable.store(true, Ordering::SeqCst);
    }

    fn check_online(&self) -> CatalogResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CatalogError::StoreUnavailable("connection reset".into()));
        }
        Ok(())
    }

    fn take_race(list: &Mutex<Vec<(String, CreateRace)>>, key: &str) -> Option<CreateRace> {
        let mut list = list.lock().unwrap();
        let pos = list.iter().position(|(k, _)| k == key)?;
        Some(list.remove(pos).1)
    }
}

#[async_trait]
impl CatalogStore for ScriptedStore {
    fn label(&self) -> &str {
        "scripted"
    }

    async fn ping(&self) -> CatalogResult<()> {
        self.check_online()?;
        self.inner.ping().await
    }

    async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        self.check_online()?;
        let hidden = self.hidden_categories.lock().unwrap().clone();
        let all = self.inner.list_categories().await?;
        Ok(all.into_iter().filter(|c| !hidden.contains(&c.id)).collect())
    }

    async fn find_category_by_name(&self, name: &str) -> CatalogResult<Option<Category>> {
        self.check_online()?;
        let missed = match self.missed_lookups.lock().unwrap().get_mut(&name_key(name)) {
            Some(left) if *left > 0 => {
                *left -= 1;
                true
            }
            _ => false,
        };
        if missed {
            return Ok(None);
        }
        self.inner.find_category_by_name(name).await
    }

    async fn create_category(&self, draft: &CategoryDraft) -> CatalogResult<Category> {
        self.check_online()?;
        match Self::take_race(&self.category_races, &name_key(&draft.name)) {
            Some(CreateRace::LostToConcurrentWriter) => {
                self.inner.create_category(draft).await?;
                Err(CatalogError::UniquenessConflict(format!(
                    "Categories.name '{}' already exists",
                    draft.name
                )))
            }
            Some(CreateRace::Phantom) => Err(CatalogError::UniquenessConflict(format!(
                "Categories.name '{}' already exists",
                draft.name
            ))),
            None => self.inner.create_category(draft).await,
        }
    }

    async fn update_category_icon(&self, id: CategoryId, icon: &str) -> CatalogResult<bool> {
        self.check_online()?;
        self.inner.update_category_icon(id, icon).await
    }

    async fn count_categories(&self) -> CatalogResult<u64> {
        self.check_online()?;
        self.inner.count_categories().await
    }

    async fn list_products(&self, scope: ProductScope) -> CatalogResult<Vec<Product>> {
        self.check_online()?;
        self.inner.list_products(scope).await
    }

    async fn find_product(
        &self,
        title: &str,
        category_id: CategoryId,
    ) -> CatalogResult<Option<Product>> {
        self.check_online()?;
        self.inner.find_product(title, category_id).await
    }

    async fn create_product(&self, draft: &ProductDraft) -> CatalogResult<Product> {
        self.check_online()?;
        let failing = self.failing_titles.lock().unwrap().contains(&draft.title);
        if failing {
            return Err(CatalogError::Database(format!(
                "value too long for column title: '{}'",
                draft.title
            )));
        }
        match Self::take_race(&self.product_races, &draft.title) {
            Some(CreateRace::LostToConcurrentWriter) => {
                self.inner.create_product(draft).await?;
                Err(CatalogError::UniquenessConflict(format!(
                    "Products '{}' already exists",
                    draft.title
                )))
            }
            Some(CreateRace::Phantom) => Err(CatalogError::UniquenessConflict(format!(
                "Products '{}' already exists",
                draft.title
            ))),
            None => self.inner.create_product(draft).await,
        }
    }

    async fn bulk_create_products(&self, drafts: &[ProductDraft]) -> CatalogResult<u64> {
        self.check_online()?;
        self.inner.bulk_create_products(drafts).await
    }

    async fn delete_products(&self, ids: &[ProductId]) -> CatalogResult<u64> {
        self.check_online()?;
        self.inner.delete_products(ids).await
    }

    async fn delete_products_in_category(&self, category_id: CategoryId) -> CatalogResult<u64> {
        self.check_online()?;
        self.inner.delete_products_in_category(category_id).await
    }

    async fn delete_products_matching(&self, titles: &TitleMatch) -> CatalogResult<u64> {
        self.check_online()?;
        self.inner.delete_products_matching(titles).await
    }

    async fn mark_category_as_service(&self, category_id: CategoryId) -> CatalogResult<u64> {
        self.check_online()?;
        self.inner.mark_category_as_service(category_id).await
    }

    async fn count_products(&self, scope: ProductScope) -> CatalogResult<u64> {
        self.check_online()?;
        self.inner.count_products(scope).await
    }

    async fn sync_id_sequences(&self) -> CatalogResult<()> {
        self.check_online()?;
        self.inner.sync_id_sequences().await
    }
}
