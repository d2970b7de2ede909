pub mod report;

pub use report::CleanupReport;

use crate::usecases::common::UseCaseMetadata;

/// Префикс названий демо-товаров
pub const DEMO_TITLE_PREFIX: &str = "Sample Product";

/// Точные названия демо-товаров из первоначального наполнения
pub const DEMO_TITLES: &[&str] = &[
    "Sample Product for Groceries",
    "Sample Product for Flowers",
    "Sample Product for Local Services",
    "Sample Product for Pet Services",
    "Sample Product for Consultancy",
    "Sample Product for Crackers",
];

pub struct CleanupDemoProducts;

impl UseCaseMetadata for CleanupDemoProducts {
    fn usecase_index() -> &'static str {
        "u505"
    }

    fn usecase_name() -> &'static str {
        "cleanup_demo_products"
    }

    fn display_name() -> &'static str {
        "Удаление демо-товаров"
    }
}
