use crate::domain::a001_category::CategoryId;
use crate::domain::common::EntityMetadata;
use crate::enums::ProductStatus;
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================
crate::aggregate_id!(
    /// Идентификатор товара (назначается хранилищем)
    ProductId
);

/// Нормализованное название товара (ключ дедупликации).
///
/// Возвращает `None`, если после trim название пустое.
pub fn normalized_title(title: &str) -> Option<String> {
    let key = title.trim().to_lowercase();
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(rename = "titleKannada")]
    pub title_kannada: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "descriptionKannada")]
    pub description_kannada: Option<String>,
    pub price: f64,
    pub variety: Option<String>,
    #[serde(rename = "subVariety")]
    pub sub_variety: Option<String>,
    pub unit: Option<String>,
    #[serde(rename = "supplierId")]
    pub supplier_id: Option<i32>,
    #[serde(rename = "isService", default)]
    pub is_service: bool,
    #[serde(rename = "deliveryAvailable", default = "default_true")]
    pub delivery_available: bool,
    #[serde(rename = "isTemplate", default)]
    pub is_template: bool,
    /// Произвольные данные товара (JSON как есть)
    pub metadata: Option<serde_json::Value>,
    pub status: ProductStatus,
    /// Ссылка на категорию; в хранилище nullable (ON DELETE SET NULL)
    #[serde(rename = "CategoryId")]
    pub category_id: Option<CategoryId>,
    #[serde(flatten)]
    pub lifecycle: EntityMetadata,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Ключ дедупликации для этого товара
    pub fn title_key(&self) -> Option<String> {
        normalized_title(&self.title)
    }
}

/// Данные для создания товара.
///
/// Категория обязательна: ядро никогда не создает товар без категории.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub title: String,
    #[serde(rename = "titleKannada")]
    pub title_kannada: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "descriptionKannada")]
    pub description_kannada: Option<String>,
    pub price: f64,
    pub variety: Option<String>,
    #[serde(rename = "subVariety")]
    pub sub_variety: Option<String>,
    pub unit: Option<String>,
    #[serde(rename = "supplierId")]
    pub supplier_id: Option<i32>,
    #[serde(rename = "isService")]
    pub is_service: bool,
    #[serde(rename = "deliveryAvailable")]
    pub delivery_available: bool,
    #[serde(rename = "isTemplate")]
    pub is_template: bool,
    pub metadata: Option<serde_json::Value>,
    pub status: ProductStatus,
    #[serde(rename = "CategoryId")]
    pub category_id: CategoryId,
}

impl ProductDraft {
    /// Черновик с значениями по умолчанию
    /// (isService = false, deliveryAvailable = true, status = pending)
    pub fn new(title: impl Into<String>, price: f64, category_id: CategoryId) -> Self {
        Self {
            title: title.into(),
            title_kannada: None,
            description: None,
            description_kannada: None,
            price,
            variety: None,
            sub_variety: None,
            unit: None,
            supplier_id: None,
            is_service: false,
            delivery_available: true,
            is_template: false,
            metadata: None,
            status: ProductStatus::Pending,
            category_id,
        }
    }

    /// Черновик для переноса существующего товара в другое хранилище.
    ///
    /// Все поля переносятся как есть, кроме категории (уже пересчитанной
    /// для целевого хранилища) и статуса, который нормализуется.
    pub fn carried_over(source: &Product, category_id: CategoryId, status: ProductStatus) -> Self {
        Self {
            title: source.title.clone(),
            title_kannada: source.title_kannada.clone(),
            description: source.description.clone(),
            description_kannada: source.description_kannada.clone(),
            price: source.price,
            variety: source.variety.clone(),
            sub_variety: source.sub_variety.clone(),
            unit: source.unit.clone(),
            supplier_id: source.supplier_id,
            is_service: source.is_service,
            delivery_available: source.delivery_available,
            is_template: source.is_template,
            metadata: source.metadata.clone(),
            status,
            category_id,
        }
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Product title must not be empty".into());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("Product price must be >= 0, got {}", self.price));
        }
        Ok(())
    }
}
