use serde::{Deserialize, Serialize};

/// Статус товара в каталоге
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Pending,
    Active,
    Inactive,
}

impl ProductStatus {
    /// Значение, которое хранится в колонке `status`
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Pending => "pending",
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
        }
    }

    /// Получить все статусы
    pub fn all() -> Vec<ProductStatus> {
        vec![
            ProductStatus::Pending,
            ProductStatus::Active,
            ProductStatus::Inactive,
        ]
    }

    /// Парсинг канонического значения (без нормализации)
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pending" => Some(ProductStatus::Pending),
            "active" => Some(ProductStatus::Active),
            "inactive" => Some(ProductStatus::Inactive),
            _ => None,
        }
    }

    /// Нормализация статуса из источника.
    ///
    /// Источники пишут статус по-разному (`approved` в старой схеме),
    /// поэтому значение приводится к нижнему регистру и сопоставляется
    /// по фиксированной таблице. Неизвестное или пустое значение -> `pending`.
    pub fn normalize(raw: Option<&str>) -> Self {
        let value = raw.map(|s| s.trim().to_lowercase()).unwrap_or_default();
        match value.as_str() {
            "approved" | "active" => ProductStatus::Active,
            "inactive" => ProductStatus::Inactive,
            "pending" => ProductStatus::Pending,
            _ => ProductStatus::Pending,
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
