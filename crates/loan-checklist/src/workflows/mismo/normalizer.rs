use chrono::{DateTime, NaiveDate};

/// Trims, drops BOM/zero-width characters, and collapses internal whitespace.
pub(crate) fn clean_text(value: &str) -> Option<String> {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Lowercase alphanumerics only, so `USDA Rural Development` and
/// `USDARuralDevelopment` compare equal.
pub(crate) fn normalize_code(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

pub(crate) fn parse_amount(value: &str) -> Option<f64> {
    let stripped: String = value
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '%') && !c.is_whitespace())
        .collect();
    stripped.parse::<f64>().ok().filter(|amount| amount.is_finite())
}

pub(crate) fn parse_count(value: &str) -> Option<u32> {
    parse_amount(value)
        .filter(|count| *count >= 0.0)
        .map(|count| count.round() as u32)
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    // Year-month values such as `2021-06` appear on older exports.
    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d").ok()
}

pub(crate) fn parse_indicator(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "y" | "yes" | "1" => Some(true),
        "false" | "n" | "no" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_collapses_whitespace_and_drops_blank() {
        assert_eq!(
            clean_text("\u{feff}  Acme \n  Widgets "),
            Some("Acme Widgets".to_string())
        );
        assert_eq!(clean_text("   \n"), None);
    }

    #[test]
    fn amounts_tolerate_currency_formatting() {
        assert_eq!(parse_amount("$325,000.00"), Some(325000.0));
        assert_eq!(parse_amount("96.5%"), Some(96.5));
        assert_eq!(parse_amount("n/a"), None);
        assert_eq!(parse_count("24"), Some(24));
        assert_eq!(parse_count("-3"), None);
    }

    #[test]
    fn dates_accept_iso_rfc3339_and_year_month() {
        let expected = NaiveDate::from_ymd_opt(2023, 3, 1);
        assert_eq!(parse_date("2023-03-01"), expected);
        assert_eq!(parse_date("2023-03-01T09:30:00Z"), expected);
        assert_eq!(parse_date("2023-03"), expected);
        assert_eq!(parse_date("03/01/2023"), None);
        assert_eq!(parse_date(" "), None);
    }

    #[test]
    fn indicators_are_tri_state() {
        assert_eq!(parse_indicator("true"), Some(true));
        assert_eq!(parse_indicator("N"), Some(false));
        assert_eq!(parse_indicator("maybe"), None);
    }

    #[test]
    fn normalize_code_ignores_case_and_punctuation() {
        assert_eq!(normalize_code("USDA Rural-Development"), "usdaruraldevelopment");
    }
}
