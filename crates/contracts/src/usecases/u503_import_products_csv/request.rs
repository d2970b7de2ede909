use serde::{Deserialize, Serialize};

/// Нормализация поля variety при импорте
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VarietyStyle {
    /// Как в файле
    #[default]
    Verbatim,
    /// "fresh  VEGETABLES" -> "Fresh Vegetables"
    TitleCase,
    /// Классификация цветов по ключевым словам (Roses, Jasmine, Garlands...)
    Flowers,
}

/// Режим импорта
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum ImportMode {
    /// Добавить строки; категория берется из categoryId или categoryName
    Append,
    /// Заменить все товары категории содержимым файла
    ReplaceCategory {
        #[serde(rename = "categoryName")]
        category_name: String,
        #[serde(rename = "isService", default)]
        is_service: bool,
    },
}

/// Запрос на импорт
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRequest {
    #[serde(flatten)]
    pub mode: ImportMode,

    #[serde(default)]
    pub variety: VarietyStyle,
}

impl ImportRequest {
    pub fn append() -> Self {
        Self {
            mode: ImportMode::Append,
            variety: VarietyStyle::Verbatim,
        }
    }

    pub fn replace_category(category_name: impl Into<String>, is_service: bool) -> Self {
        Self {
            mode: ImportMode::ReplaceCategory {
                category_name: category_name.into(),
                is_service,
            },
            variety: VarietyStyle::Verbatim,
        }
    }

    pub fn with_variety(mut self, variety: VarietyStyle) -> Self {
        self.variety = variety;
        self
    }
}
