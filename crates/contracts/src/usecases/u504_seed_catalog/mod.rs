pub mod defaults;
pub mod report;

pub use defaults::{DefaultCategory, DEFAULT_CATEGORIES, SAMPLE_PRODUCT_PRICE};
pub use report::{IconFix, IconRepairReport, SeedReport};

use crate::usecases::common::UseCaseMetadata;

pub struct SeedCatalog;

impl UseCaseMetadata for SeedCatalog {
    fn usecase_index() -> &'static str {
        "u504"
    }

    fn usecase_name() -> &'static str {
        "seed_catalog"
    }

    fn display_name() -> &'static str {
        "Начальное наполнение каталога"
    }

    fn description() -> &'static str {
        "Стандартные категории с иконками и демо-товары для пустой базы"
    }
}
