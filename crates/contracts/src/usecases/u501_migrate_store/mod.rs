pub mod report;

pub use report::MigrationReport;

use crate::usecases::common::UseCaseMetadata;

pub struct MigrateStore;

impl UseCaseMetadata for MigrateStore {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "migrate_store"
    }

    fn display_name() -> &'static str {
        "Перенос каталога между хранилищами"
    }

    fn description() -> &'static str {
        "Перенос категорий и товаров из локальной SQLite в Postgres с пересчетом ссылок на категории"
    }
}
