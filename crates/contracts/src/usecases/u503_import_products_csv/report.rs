use crate::domain::a001_category::CategoryId;
use crate::usecases::common::RecordIssue;
use serde::{Deserialize, Serialize};

/// Результат импорта
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportReport {
    /// Прочитано строк данных (без заголовка)
    #[serde(rename = "rowsRead")]
    pub rows_read: usize,

    /// Вставлено товаров
    pub inserted: u64,

    /// Удалено товаров (режим замены категории)
    pub deleted: u64,

    /// Категория, в которую выполнялась замена
    #[serde(rename = "categoryId")]
    pub category_id: Option<CategoryId>,

    /// Строки, пропущенные при импорте
    #[serde(default)]
    pub issues: Vec<RecordIssue>,
}
