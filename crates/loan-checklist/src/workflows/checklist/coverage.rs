use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{Employment, Residence};

/// Two-year history rule shared by employment and residence checks.
pub const HISTORY_MONTHS_REQUIRED: u32 = 24;
/// Gaps longer than this need a letter of explanation.
pub const EXPLANATION_GAP_DAYS: i64 = 30;
/// Any break longer than a day interrupts a continuous employment history.
pub const CONTINUITY_GAP_DAYS: i64 = 1;
/// Marks a gap that runs from the last job up to the reference date.
pub const CURRENT_MARKER: &str = "(current)";

const AVERAGE_DAYS_PER_MONTH: f64 = 30.44;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryCoverage {
    pub total_months: u32,
    pub months_needed: u32,
    pub is_sufficient: bool,
}

impl HistoryCoverage {
    pub fn from_months<I>(months: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let total_months = months
            .into_iter()
            .fold(0u32, |total, months| total.saturating_add(months));
        Self {
            total_months,
            months_needed: HISTORY_MONTHS_REQUIRED.saturating_sub(total_months),
            is_sufficient: total_months >= HISTORY_MONTHS_REQUIRED,
        }
    }
}

pub fn employment_coverage(employments: &[Employment], reference: NaiveDate) -> HistoryCoverage {
    HistoryCoverage::from_months(
        employments
            .iter()
            .map(|employment| employment.months_employed(reference)),
    )
}

pub fn residence_coverage(residences: &[Residence]) -> HistoryCoverage {
    HistoryCoverage::from_months(
        residences
            .iter()
            .map(|residence| residence.months_at_residence.unwrap_or(0)),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentGap {
    pub from_employer: String,
    pub to_employer: String,
    pub gap_days: i64,
    pub gap_months: u32,
}

impl EmploymentGap {
    fn new(from: &Employment, to_employer: &str, gap_days: i64) -> Self {
        let gap_months = (gap_days as f64 / AVERAGE_DAYS_PER_MONTH).round().max(1.0) as u32;
        Self {
            from_employer: from.employer_label().to_string(),
            to_employer: to_employer.to_string(),
            gap_days,
            gap_months,
        }
    }

    pub fn abuts_present(&self) -> bool {
        self.to_employer == CURRENT_MARKER
    }
}

/// Gaps long enough to require a borrower letter of explanation.
pub fn explanation_gaps(employments: &[Employment], reference: NaiveDate) -> Vec<EmploymentGap> {
    gaps_exceeding(employments, reference, EXPLANATION_GAP_DAYS)
}

/// Any break in the employment timeline, used to confirm a continuous history.
pub fn continuity_gaps(employments: &[Employment], reference: NaiveDate) -> Vec<EmploymentGap> {
    gaps_exceeding(employments, reference, CONTINUITY_GAP_DAYS)
}

fn gaps_exceeding(
    employments: &[Employment],
    reference: NaiveDate,
    tolerance_days: i64,
) -> Vec<EmploymentGap> {
    let mut dated: Vec<(NaiveDate, &Employment)> = employments
        .iter()
        .filter_map(|employment| employment.start_date.map(|start| (start, employment)))
        .collect();
    dated.sort_by_key(|(start, _)| *start);

    let mut gaps = Vec::new();
    // Job with the latest end seen so far; overlapping jobs never open a gap.
    let mut latest: Option<(NaiveDate, &Employment)> = None;

    for (start, employment) in dated {
        if let Some((end, previous)) = latest {
            let gap_days = (start - end).num_days();
            if gap_days > tolerance_days {
                gaps.push(EmploymentGap::new(
                    previous,
                    employment.employer_label(),
                    gap_days,
                ));
            }
        }

        let end = employment.end_or(reference);
        if latest.map_or(true, |(latest_end, _)| end > latest_end) {
            latest = Some((end, employment));
        }
    }

    if let Some((end, previous)) = latest {
        let gap_days = (reference - end).num_days();
        if gap_days > tolerance_days {
            gaps.push(EmploymentGap::new(previous, CURRENT_MARKER, gap_days));
        }
    }

    gaps
}
