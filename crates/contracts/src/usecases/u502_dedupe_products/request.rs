use crate::domain::a001_category::CategoryId;
use serde::{Deserialize, Serialize};

/// Запрос на удаление дублей
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DedupeRequest {
    /// Ограничить одной категорией (если пусто - все товары)
    #[serde(rename = "categoryId")]
    pub category_id: Option<CategoryId>,

    /// Только посчитать, ничего не удалять
    #[serde(rename = "dryRun", default)]
    pub dry_run: bool,
}
