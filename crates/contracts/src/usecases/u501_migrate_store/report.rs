use crate::usecases::common::{RecordIssue, RunStatus};
use serde::{Deserialize, Serialize};

/// Отчет о переносе каталога
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationReport {
    /// ID запуска
    #[serde(rename = "runId")]
    pub run_id: String,

    pub status: RunStatus,

    /// Категорий источника, для которых найдено соответствие
    #[serde(rename = "categoriesMapped")]
    pub categories_mapped: usize,

    /// Категорий, созданных в целевом хранилище
    #[serde(rename = "categoriesCreated")]
    pub categories_created: usize,

    /// Товаров создано
    pub created: usize,

    /// Товаров пропущено (уже есть, нет категории, невалидны)
    pub skipped: usize,

    /// Товаров, запись которых завершилась ошибкой
    pub failed: usize,

    /// Проблемы по отдельным записям
    #[serde(default)]
    pub issues: Vec<RecordIssue>,

    #[serde(rename = "startedAt")]
    pub started_at: chrono::DateTime<chrono::Utc>,

    #[serde(rename = "completedAt")]
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl MigrationReport {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            status: RunStatus::InProgress,
            categories_mapped: 0,
            categories_created: 0,
            created: 0,
            skipped: 0,
            failed: 0,
            issues: Vec::new(),
            started_at: chrono::Utc::now(),
            completed_at: None,
        }
    }

    /// Зафиксировать завершение; статус зависит от наличия упавших записей
    pub fn complete(&mut self) {
        self.status = if self.failed > 0 {
            RunStatus::CompletedWithErrors
        } else {
            RunStatus::Completed
        };
        self.completed_at = Some(chrono::Utc::now());
    }
}
