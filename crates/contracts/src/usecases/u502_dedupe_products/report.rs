use crate::domain::a002_product::ProductId;
use serde::{Deserialize, Serialize};

/// Результат обработки одной группы дублей
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateGroupOutcome {
    /// Нормализованное название
    #[serde(rename = "titleKey")]
    pub title_key: String,

    #[serde(rename = "keeperId")]
    pub keeper_id: ProductId,

    #[serde(rename = "removedIds")]
    pub removed_ids: Vec<ProductId>,

    /// Сколько строк фактически удалено (0 в режиме dry-run)
    pub removed: u64,
}

/// Отчет об удалении дублей
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DedupeReport {
    /// Групп с дублями
    pub groups: usize,

    /// Удалено строк
    pub removed: u64,

    #[serde(rename = "dryRun", default)]
    pub dry_run: bool,

    #[serde(default)]
    pub outcomes: Vec<DuplicateGroupOutcome>,
}
