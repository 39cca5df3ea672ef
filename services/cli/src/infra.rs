use chrono::{Local, NaiveDate};
use loan_checklist::config::OutputFormat;

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_format(raw: &str) -> Result<OutputFormat, String> {
    OutputFormat::parse(raw)
        .ok_or_else(|| format!("unknown format '{raw}' (expected text or json)"))
}

/// Flag first, then configured date, then the local calendar date.
pub(crate) fn resolve_reference_date(
    flag: Option<NaiveDate>,
    configured: Option<NaiveDate>,
) -> NaiveDate {
    flag.or(configured)
        .unwrap_or_else(|| Local::now().date_naive())
}
