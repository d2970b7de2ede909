use serde::{Deserialize, Serialize};

/// Итоговый статус выполнения UseCase
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RunStatus {
    /// В процессе
    InProgress,
    /// Завершено успешно
    Completed,
    /// Завершено, но часть записей не обработана из-за ошибок
    CompletedWithErrors,
    /// Прервано (ошибка уровня соединения)
    Failed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::InProgress => "in progress",
            RunStatus::Completed => "completed",
            RunStatus::CompletedWithErrors => "completed with errors",
            RunStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
