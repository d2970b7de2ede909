use super::variety::normalize_variety;
use crate::domain::a001_category::service::resolve;
use crate::shared::data::store::CatalogStore;
use crate::shared::error::{CatalogError, CatalogResult};
use contracts::domain::a001_category::{name_key, Category, CategoryId};
use contracts::domain::a002_product::ProductDraft;
use contracts::enums::ProductStatus;
use contracts::usecases::common::{IssueKind, RecordIssue, UseCaseMetadata};
use contracts::usecases::u503_import_products_csv::{
    CsvProductRow, ImportMode, ImportProductsCsv, ImportReport, ImportRequest, VarietyStyle,
};
use std::collections::HashMap;
use std::io::Read;

/// Прочитать строки CSV (первая строка - заголовок).
///
/// Строки нумеруются с 1 без учета заголовка; строка, которую не удалось
/// разобрать, попадает в список проблем.
pub fn read_rows<R: Read>(reader: R) -> CatalogResult<(Vec<(usize, CsvProductRow)>, Vec<RecordIssue>)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    csv_reader
        .headers()
        .map_err(|e| CatalogError::Validation(format!("Cannot read CSV header: {}", e)))?;

    let mut rows = Vec::new();
    let mut issues = Vec::new();
    for (index, record) in csv_reader.deserialize::<CsvProductRow>().enumerate() {
        let row = index + 1;
        match record {
            Ok(parsed) => rows.push((row, parsed)),
            Err(e) => issues.push(
                RecordIssue::new(IssueKind::Validation, format!("Cannot parse row: {}", e))
                    .with_row(row),
            ),
        }
    }
    Ok((rows, issues))
}

/// Executor для UseCase импорта товаров из CSV
pub struct ImportExecutor<'a> {
    store: &'a dyn CatalogStore,
}

impl<'a> ImportExecutor<'a> {
    pub fn new(store: &'a dyn CatalogStore) -> Self {
        Self { store }
    }

    pub async fn run<R: Read>(&self, reader: R, request: &ImportRequest) -> CatalogResult<ImportReport> {
        let (rows, issues) = read_rows(reader)?;
        tracing::info!(
            "{}: {} rows read ({:?})",
            ImportProductsCsv::full_name(),
            rows.len(),
            request.mode
        );

        let mut report = ImportReport {
            rows_read: rows.len() + issues.len(),
            issues,
            ..Default::default()
        };

        match &request.mode {
            ImportMode::Append => self.append(&rows, request.variety, &mut report).await?,
            ImportMode::ReplaceCategory {
                category_name,
                is_service,
            } => {
                self.replace_category(&rows, category_name, *is_service, request.variety, &mut report)
                    .await?
            }
        }

        for issue in &report.issues {
            tracing::warn!("Skipped: {}", issue);
        }
        tracing::info!(
            "Import finished: inserted={}, deleted={}, issues={}",
            report.inserted,
            report.deleted,
            report.issues.len()
        );
        Ok(report)
    }

    async fn append(
        &self,
        rows: &[(usize, CsvProductRow)],
        variety: VarietyStyle,
        report: &mut ImportReport,
    ) -> CatalogResult<()> {
        let categories = self.store.list_categories().await?;
        let lookup = CategoryLookup::new(&categories);

        let mut drafts = Vec::new();
        for (row, record) in rows {
            let Some(title) = record.title() else {
                report
                    .issues
                    .push(RecordIssue::new(IssueKind::Validation, "missing title").with_row(*row));
                continue;
            };
            let Some(category_id) = lookup.resolve(record) else {
                let target = record
                    .category_id()
                    .or(record.category_name())
                    .unwrap_or("-");
                report.issues.push(
                    RecordIssue::new(IssueKind::ReferentialGap, "missing or unknown category")
                        .with_row(*row)
                        .with_title(title)
                        .with_target(target),
                );
                continue;
            };
            match build_draft(record, title, category_id, variety) {
                Ok(draft) => drafts.push(draft),
                Err(message) => report.issues.push(
                    RecordIssue::new(IssueKind::Validation, message)
                        .with_row(*row)
                        .with_title(title),
                ),
            }
        }

        if drafts.is_empty() {
            tracing::warn!("No valid rows to insert");
            return Ok(());
        }
        report.inserted = self.store.bulk_create_products(&drafts).await?;
        Ok(())
    }

    async fn replace_category(
        &self,
        rows: &[(usize, CsvProductRow)],
        category_name: &str,
        is_service: bool,
        variety: VarietyStyle,
        report: &mut ImportReport,
    ) -> CatalogResult<()> {
        let category = resolve(self.store, category_name).await?;
        report.category_id = Some(category.id);

        let mut drafts = Vec::new();
        for (row, record) in rows {
            let Some(title) = record.title() else {
                report
                    .issues
                    .push(RecordIssue::new(IssueKind::Validation, "missing title").with_row(*row));
                continue;
            };
            match build_draft(record, title, category.id, variety) {
                Ok(mut draft) => {
                    draft.is_service = is_service;
                    draft.delivery_available = true;
                    drafts.push(draft);
                }
                Err(message) => report.issues.push(
                    RecordIssue::new(IssueKind::Validation, message)
                        .with_row(*row)
                        .with_title(title),
                ),
            }
        }

        if drafts.is_empty() {
            tracing::warn!(
                "No valid rows; category '{}' (id={}) left unchanged",
                category.name,
                category.id
            );
            return Ok(());
        }

        report.deleted = self.store.delete_products_in_category(category.id).await?;
        tracing::info!(
            "Removed {} existing products from '{}'",
            report.deleted,
            category.name
        );
        report.inserted = self.store.bulk_create_products(&drafts).await?;
        Ok(())
    }
}

fn build_draft(
    record: &CsvProductRow,
    title: &str,
    category_id: CategoryId,
    variety: VarietyStyle,
) -> Result<ProductDraft, String> {
    let mut draft = ProductDraft::new(title, record.price(), category_id);
    draft.variety = normalize_variety(variety, record.variety(), title);
    draft.sub_variety = record.sub_variety().map(String::from);
    draft.unit = record.unit().map(String::from);
    draft.description = record.description().map(String::from);
    draft.status = ProductStatus::Active;
    draft.validate()?;
    Ok(draft)
}

/// Поиск категории строки: сначала по id, затем по имени без учета регистра
struct CategoryLookup {
    ids: HashMap<CategoryId, CategoryId>,
    names: HashMap<String, CategoryId>,
}

impl CategoryLookup {
    fn new(categories: &[Category]) -> Self {
        let mut names = HashMap::new();
        // ascending id: the first entry per key is the canonical one
        for category in categories {
            names.entry(name_key(&category.name)).or_insert(category.id);
        }
        Self {
            ids: categories.iter().map(|c| (c.id, c.id)).collect(),
            names,
        }
    }

    fn resolve(&self, record: &CsvProductRow) -> Option<CategoryId> {
        let by_id = record
            .category_id()
            .and_then(|raw| raw.parse::<i32>().ok())
            .and_then(|id| self.ids.get(&CategoryId(id)).copied());
        by_id.or_else(|| {
            record
                .category_name()
                .and_then(|name| self.names.get(&name_key(name)).copied())
        })
    }
}
