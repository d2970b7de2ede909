use serde::{Deserialize, Serialize};

/// Вид проблемы с отдельной записью
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// Не заполнено обязательное поле (пустое название и т.п.)
    Validation,
    /// Не удалось определить категорию в целевом хранилище
    ReferentialGap,
    /// Конфликт уникальности, не разрешенный повторным поиском
    IrreconcilableConflict,
    /// Ошибка хранилища при записи отдельной строки
    Store,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::Validation => "validation",
            IssueKind::ReferentialGap => "referential-gap",
            IssueKind::IrreconcilableConflict => "irreconcilable-conflict",
            IssueKind::Store => "store",
        }
    }
}

/// Проблема с отдельной записью: достаточно контекста, чтобы воспроизвести
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordIssue {
    pub kind: IssueKind,
    /// ID записи в исходном хранилище
    #[serde(rename = "sourceId")]
    pub source_id: Option<i32>,
    /// Номер строки во входном файле (с 1)
    pub row: Option<usize>,
    pub title: Option<String>,
    /// Целевой ключ (например, категория назначения)
    pub target: Option<String>,
    pub message: String,
}

impl RecordIssue {
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            source_id: None,
            row: None,
            title: None,
            target: None,
            message: message.into(),
        }
    }

    pub fn with_source_id(mut self, id: i32) -> Self {
        self.source_id = Some(id);
        self
    }

    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

impl std::fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.kind.as_str())?;
        if let Some(row) = self.row {
            write!(f, " row {}", row)?;
        }
        if let Some(id) = self.source_id {
            write!(f, " id={}", id)?;
        }
        if let Some(title) = &self.title {
            write!(f, " title='{}'", title)?;
        }
        if let Some(target) = &self.target {
            write!(f, " target={}", target)?;
        }
        write!(f, ": {}", self.message)
    }
}
