pub mod report;
pub mod request;

pub use report::{DedupeReport, DuplicateGroupOutcome};
pub use request::DedupeRequest;

use crate::usecases::common::UseCaseMetadata;

pub struct DedupeProducts;

impl UseCaseMetadata for DedupeProducts {
    fn usecase_index() -> &'static str {
        "u502"
    }

    fn usecase_name() -> &'static str {
        "dedupe_products"
    }

    fn display_name() -> &'static str {
        "Удаление дублей товаров"
    }

    fn description() -> &'static str {
        "Группировка товаров по нормализованному названию и удаление всех, кроме одного"
    }
}
