use crate::domain::a001_category::CategoryId;
use serde::{Deserialize, Serialize};

/// Отчет о наполнении каталога
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedReport {
    /// Созданные категории
    #[serde(rename = "categoriesCreated")]
    pub categories_created: Vec<String>,

    /// Категории, у которых исправлена иконка
    #[serde(rename = "iconsUpdated")]
    pub icons_updated: Vec<String>,

    /// Категории, уже совпадающие со стандартом
    #[serde(rename = "categoriesFound")]
    pub categories_found: Vec<String>,

    /// Категории вне стандартного списка (не изменяются)
    #[serde(rename = "categoriesUntouched")]
    pub categories_untouched: Vec<String>,

    /// Создано демо-товаров
    #[serde(rename = "productsSeeded")]
    pub products_seeded: usize,

    /// Наполнение пропущено, так как данные уже есть
    #[serde(rename = "productsPresent")]
    pub products_present: bool,
}

/// Исправленная иконка
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconFix {
    pub id: CategoryId,
    pub name: String,
    pub before: String,
    pub after: String,
}

/// Отчет об исправлении иконок
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IconRepairReport {
    pub fixed: Vec<IconFix>,
    pub unchanged: usize,
    #[serde(rename = "withoutIcon")]
    pub without_icon: usize,
}
