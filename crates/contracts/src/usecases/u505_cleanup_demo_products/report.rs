use serde::{Deserialize, Serialize};

/// Отчет об удалении демо-товаров
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleanupReport {
    pub deleted: u64,
}
