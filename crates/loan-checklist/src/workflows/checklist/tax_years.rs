use chrono::{Datelike, NaiveDate};

/// Latest tax year a borrower can be expected to have filed by `reference`.
///
/// Assumes the US federal April 15 deadline; before it, last year's return may
/// not exist yet.
pub fn most_recent_filed_year(reference: NaiveDate) -> i32 {
    let before_deadline =
        reference.month() < 4 || (reference.month() == 4 && reference.day() < 15);
    if before_deadline {
        reference.year() - 2
    } else {
        reference.year() - 1
    }
}

/// `years_needed` consecutive years ending at the most recent filed year, ascending.
pub fn tax_years(years_needed: u32, reference: NaiveDate) -> Vec<i32> {
    let latest = most_recent_filed_year(reference);
    let span = years_needed as i32;
    ((latest - span + 1)..=latest).collect()
}

/// Human-readable span: `2024` or `2023-2024`.
pub fn format_tax_years(years: &[i32]) -> String {
    match (years.first(), years.last()) {
        (Some(first), Some(last)) if first == last => first.to_string(),
        (Some(first), Some(last)) => format!("{first}-{last}"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn filing_deadline_boundary() {
        assert_eq!(tax_years(2, date(2026, 4, 14)), vec![2023, 2024]);
        assert_eq!(tax_years(2, date(2026, 4, 15)), vec![2024, 2025]);
        assert_eq!(tax_years(1, date(2025, 1, 1)), vec![2023]);
        assert_eq!(tax_years(2, date(2026, 2, 10)), vec![2023, 2024]);
    }

    #[test]
    fn zero_years_yields_empty_range() {
        assert!(tax_years(0, date(2026, 6, 1)).is_empty());
        assert_eq!(format_tax_years(&[]), "");
    }

    #[test]
    fn formats_single_and_multi_year_ranges() {
        assert_eq!(format_tax_years(&[2024]), "2024");
        assert_eq!(format_tax_years(&[2022, 2023, 2024]), "2022-2024");
    }
}
