use crate::shared::data::store::{CatalogStore, TitleMatch};
use crate::shared::error::CatalogResult;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u505_cleanup_demo_products::{
    CleanupDemoProducts, CleanupReport, DEMO_TITLES, DEMO_TITLE_PREFIX,
};

/// Executor для UseCase удаления демо-товаров
pub struct CleanupExecutor<'a> {
    store: &'a dyn CatalogStore,
}

impl<'a> CleanupExecutor<'a> {
    pub fn new(store: &'a dyn CatalogStore) -> Self {
        Self { store }
    }

    pub async fn run(&self) -> CatalogResult<CleanupReport> {
        let titles = TitleMatch {
            prefix: Some(DEMO_TITLE_PREFIX.to_string()),
            exact: DEMO_TITLES.iter().map(|t| t.to_string()).collect(),
        };
        let deleted = self.store.delete_products_matching(&titles).await?;
        tracing::info!("{}: deleted {} demo products", CleanupDemoProducts::full_name(), deleted);
        Ok(CleanupReport { deleted })
    }
}
