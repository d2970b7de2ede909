use crate::domain::common::EntityMetadata;
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================
crate::aggregate_id!(
    /// Идентификатор категории (назначается хранилищем)
    CategoryId
);

/// Ключ сравнения имени категории: trim + нижний регистр
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub icon: Option<String>,
    #[serde(flatten)]
    pub lifecycle: EntityMetadata,
}

impl Category {
    /// Совпадает ли имя категории с `name` без учета регистра
    pub fn matches_name(&self, name: &str) -> bool {
        name_key(&self.name) == name_key(name)
    }
}

/// Данные для создания новой категории
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
    pub icon: Option<String>,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: Option<String>) -> Self {
        self.icon = icon;
        self
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Category name must not be empty".into());
        }
        Ok(())
    }
}

/// Строка отчета по категориям: категория и количество товаров в ней
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub name: String,
    pub icon: Option<String>,
    #[serde(rename = "productCount")]
    pub product_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_name_ignores_case_and_padding() {
        let category = Category {
            id: CategoryId(1),
            name: "Flowers".into(),
            icon: None,
            lifecycle: EntityMetadata::new(),
        };
        assert!(category.matches_name("  flowers "));
        assert!(category.matches_name("FLOWERS"));
        assert!(!category.matches_name("Flower"));
    }

    #[test]
    fn test_draft_requires_name() {
        assert!(CategoryDraft::new("   ").validate().is_err());
        assert!(CategoryDraft::new("Groceries").validate().is_ok());
    }
}
