pub mod report;
pub mod request;
pub mod row;

pub use report::ImportReport;
pub use request::{ImportMode, ImportRequest, VarietyStyle};
pub use row::CsvProductRow;

use crate::usecases::common::UseCaseMetadata;

pub struct ImportProductsCsv;

impl UseCaseMetadata for ImportProductsCsv {
    fn usecase_index() -> &'static str {
        "u503"
    }

    fn usecase_name() -> &'static str {
        "import_products_csv"
    }

    fn display_name() -> &'static str {
        "Импорт товаров из CSV"
    }

    fn description() -> &'static str {
        "Добавление товаров из CSV или полная замена товаров одной категории"
    }
}
