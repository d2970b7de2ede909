/// Стандартная категория каталога
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultCategory {
    pub name: &'static str,
    pub icon: &'static str,
}

pub const DEFAULT_CATEGORIES: &[DefaultCategory] = &[
    DefaultCategory { name: "Crackers", icon: "🎆" },
    DefaultCategory { name: "Flowers", icon: "🌸" },
    DefaultCategory { name: "Groceries", icon: "🛒" },
    DefaultCategory { name: "Local Services", icon: "🛠️" },
    DefaultCategory { name: "Pet Services", icon: "🐾" },
    DefaultCategory { name: "Consultancy", icon: "💼" },
];

/// Цена демо-товара при наполнении пустой базы
pub const SAMPLE_PRODUCT_PRICE: f64 = 199.0;

impl DefaultCategory {
    /// Название демо-товара для категории
    pub fn sample_title(category_name: &str) -> String {
        format!("Sample {} Item", category_name)
    }
}
