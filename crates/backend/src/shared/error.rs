use contracts::usecases::common::IssueKind;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Ошибки операций каталога
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Хранилище недоступно: соединение не установлено или потеряно
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Нарушение ограничения уникальности при записи
    #[error("Uniqueness conflict: {0}")]
    UniquenessConflict(String),

    /// Запись ссылается на категорию, которую не удалось найти
    #[error("Referential gap: {0}")]
    ReferentialGap(String),

    /// Конфликт уникальности, после которого повторный поиск ничего не нашел
    #[error("Irreconcilable conflict: {0}")]
    IrreconcilableConflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    /// Ошибка уровня соединения: продолжать прогон бессмысленно
    pub fn is_fatal(&self) -> bool {
        matches!(self, CatalogError::StoreUnavailable(_))
    }

    /// Вид проблемы для отчета, если ошибка относится к одной записи
    pub fn issue_kind(&self) -> IssueKind {
        match self {
            CatalogError::Validation(_) => IssueKind::Validation,
            CatalogError::ReferentialGap(_) => IssueKind::ReferentialGap,
            CatalogError::UniquenessConflict(_) | CatalogError::IrreconcilableConflict(_) => {
                IssueKind::IrreconcilableConflict
            }
            CatalogError::StoreUnavailable(_) | CatalogError::Database(_) => IssueKind::Store,
        }
    }
}

impl From<DbErr> for CatalogError {
    fn from(err: DbErr) -> Self {
        if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
            return CatalogError::UniquenessConflict(detail);
        }
        match err {
            DbErr::Conn(e) => CatalogError::StoreUnavailable(e.to_string()),
            DbErr::ConnectionAcquire(e) => CatalogError::StoreUnavailable(e.to_string()),
            other => CatalogError::Database(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_connection_errors_are_fatal() {
        assert!(CatalogError::StoreUnavailable("down".into()).is_fatal());
        assert!(!CatalogError::Database("syntax".into()).is_fatal());
        assert!(!CatalogError::UniquenessConflict("dup".into()).is_fatal());
    }

    #[test]
    fn test_issue_kind_mapping() {
        assert_eq!(
            CatalogError::Validation("empty".into()).issue_kind(),
            IssueKind::Validation
        );
        assert_eq!(
            CatalogError::IrreconcilableConflict("x".into()).issue_kind(),
            IssueKind::IrreconcilableConflict
        );
        assert_eq!(CatalogError::Database("x".into()).issue_kind(), IssueKind::Store);
    }

    #[test]
    fn test_generic_db_error_is_not_a_conflict() {
        let err: CatalogError = DbErr::Custom("boom".into()).into();
        assert!(matches!(err, CatalogError::Database(_)));
    }
}
