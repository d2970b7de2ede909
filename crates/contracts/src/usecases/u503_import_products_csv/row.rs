use serde::{Deserialize, Serialize};

/// Строка CSV файла с товаром.
///
/// Все поля необязательные: проверка выполняется при импорте,
/// чтобы ошибка попала в отчет с номером строки.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CsvProductRow {
    #[serde(default)]
    pub title: Option<String>,
    /// Старые выгрузки называют колонку `name`
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub variety: Option<String>,
    #[serde(default, rename = "subVariety")]
    pub sub_variety: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "categoryId")]
    pub category_id: Option<String>,
    #[serde(default, rename = "categoryName")]
    pub category_name: Option<String>,
}

/// Пустая ячейка считается отсутствующим значением
fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

impl CsvProductRow {
    /// `title`, а если пусто, то `name`
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title).or_else(|| non_empty(&self.name))
    }

    /// Цена; нечисловое или пустое значение -> 0
    pub fn price(&self) -> f64 {
        non_empty(&self.price)
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|p| p.is_finite())
            .unwrap_or(0.0)
    }

    pub fn variety(&self) -> Option<&str> {
        non_empty(&self.variety)
    }

    pub fn sub_variety(&self) -> Option<&str> {
        non_empty(&self.sub_variety)
    }

    pub fn unit(&self) -> Option<&str> {
        non_empty(&self.unit)
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }

    pub fn category_id(&self) -> Option<&str> {
        non_empty(&self.category_id)
    }

    pub fn category_name(&self) -> Option<&str> {
        non_empty(&self.category_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_parsing() {
        let mut row = CsvProductRow::default();
        assert_eq!(row.price(), 0.0);
        row.price = Some(" 12.5 ".into());
        assert_eq!(row.price(), 12.5);
        row.price = Some("n/a".into());
        assert_eq!(row.price(), 0.0);
    }

    #[test]
    fn test_blank_cells_are_absent() {
        let row = CsvProductRow {
            title: Some("  ".into()),
            unit: Some("kg".into()),
            ..Default::default()
        };
        assert_eq!(row.title(), None);
        assert_eq!(row.unit(), Some("kg"));
    }

    #[test]
    fn test_title_falls_back_to_name() {
        let row = CsvProductRow {
            title: Some("".into()),
            name: Some("Lily".into()),
            ..Default::default()
        };
        assert_eq!(row.title(), Some("Lily"));

        let both = CsvProductRow {
            title: Some("Rose".into()),
            name: Some("Lily".into()),
            ..Default::default()
        };
        assert_eq!(both.title(), Some("Rose"));
    }
}
