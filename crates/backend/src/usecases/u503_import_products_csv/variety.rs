use contracts::usecases::u503_import_products_csv::VarietyStyle;

/// Сорт товара в выбранном стиле; пустое значение - `None`
pub fn normalize_variety(style: VarietyStyle, raw: Option<&str>, title: &str) -> Option<String> {
    match style {
        VarietyStyle::Verbatim => raw.map(str::trim).filter(|v| !v.is_empty()).map(String::from),
        VarietyStyle::TitleCase => raw.map(title_case).filter(|v| !v.is_empty()),
        VarietyStyle::Flowers => flower_variety(raw, title),
    }
}

/// "toor  DAL" -> "Toor Dal"
pub fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Ключевые слова цветочных сортов, проверяются по порядку
const FLOWER_KEYWORDS: &[(&[&str], &str)] = &[
    (&["garland", "garla"], "Garlands"),
    (&["rose"], "Roses"),
    (&["jasmine"], "Jasmine"),
    (&["marigold"], "Marigold"),
    (&["lily"], "Lily"),
    (&["lotus"], "Lotus"),
    (&["tulasi"], "Tulasi"),
    (&["unbound"], "Unbound"),
    (&["bound"], "Bound"),
];

/// Сорт цветов: ищется ключевое слово в сорте или в названии товара,
/// иначе сорт с заглавной буквы
pub fn flower_variety(raw: Option<&str>, title: &str) -> Option<String> {
    let variety = raw.unwrap_or("").trim().to_lowercase();
    let title = title.trim().to_lowercase();
    if variety.is_empty() && title.is_empty() {
        return None;
    }

    for (keywords, label) in FLOWER_KEYWORDS {
        if keywords
            .iter()
            .any(|k| variety.contains(k) || title.contains(k))
        {
            return Some((*label).to_string());
        }
    }

    if variety.is_empty() {
        None
    } else {
        Some(capitalize(&variety))
    }
}
