use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::classifier;

/// Normalized loan file produced by the MISMO extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub loan: LoanContext,
    pub borrowers: Vec<Borrower>,
    pub assets: Vec<Asset>,
    pub liabilities: Vec<Liability>,
    pub reo_properties: Vec<ReoProperty>,
}

/// Transaction-level facts that drive program and property rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanContext {
    pub purpose: LoanPurpose,
    pub program: MortgageProgram,
    pub property_type: PropertyType,
    pub occupancy: Occupancy,
    pub units: Option<u32>,
    /// Loan-to-value as a percentage (e.g. `85.0`).
    pub ltv: Option<f64>,
    pub base_loan_amount: Option<f64>,
    pub has_hoa: bool,
}

impl Default for LoanContext {
    fn default() -> Self {
        Self {
            purpose: LoanPurpose::Unknown,
            program: MortgageProgram::Unknown,
            property_type: PropertyType::Unknown,
            occupancy: Occupancy::Unknown,
            units: None,
            ltv: None,
            base_loan_amount: None,
            has_hoa: false,
        }
    }
}

impl LoanContext {
    /// Financed unit count, treating a missing count as a single unit.
    pub fn unit_count(&self) -> u32 {
        self.units.unwrap_or(1).max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanPurpose {
    Purchase,
    CashOutRefinance,
    RateTermRefinance,
    Unknown,
}

impl LoanPurpose {
    pub fn is_refinance(self) -> bool {
        matches!(self, Self::CashOutRefinance | Self::RateTermRefinance)
    }

    pub const fn label(self) -> &'static str {
        match self {
            LoanPurpose::Purchase => "Purchase",
            LoanPurpose::CashOutRefinance => "Cash-Out Refinance",
            LoanPurpose::RateTermRefinance => "Rate/Term Refinance",
            LoanPurpose::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MortgageProgram {
    Conventional,
    Fha,
    Va,
    Usda,
    Unknown,
}

impl MortgageProgram {
    pub const fn label(self) -> &'static str {
        match self {
            MortgageProgram::Conventional => "Conventional",
            MortgageProgram::Fha => "FHA",
            MortgageProgram::Va => "VA",
            MortgageProgram::Usda => "USDA",
            MortgageProgram::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    SingleFamily,
    Condominium,
    Cooperative,
    Manufactured,
    PlannedUnitDevelopment,
    Unknown,
}

impl PropertyType {
    pub const fn label(self) -> &'static str {
        match self {
            PropertyType::SingleFamily => "Single Family",
            PropertyType::Condominium => "Condominium",
            PropertyType::Cooperative => "Cooperative",
            PropertyType::Manufactured => "Manufactured",
            PropertyType::PlannedUnitDevelopment => "PUD",
            PropertyType::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupancy {
    PrimaryResidence,
    SecondHome,
    Investment,
    Unknown,
}

impl Occupancy {
    pub const fn label(self) -> &'static str {
        match self {
            Occupancy::PrimaryResidence => "Primary Residence",
            Occupancy::SecondHome => "Second Home",
            Occupancy::Investment => "Investment",
            Occupancy::Unknown => "Unknown",
        }
    }
}

/// One MISMO `BORROWER` role. Identity is positional; names may collide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Borrower {
    pub index: usize,
    pub name: String,
    pub incomes: Vec<Income>,
    pub employments: Vec<Employment>,
    pub residences: Vec<Residence>,
    pub declarations: Declarations,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    Current,
    Prior,
}

/// ULAD ownership band reported when no explicit percentage is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipBand {
    LessThan25Percent,
    AtLeast25Percent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Employment {
    pub employer_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<EmploymentStatus>,
    /// Explicit months-on-job reported in the file, preferred over date math.
    pub months_on_job: Option<u32>,
    pub self_employed: bool,
    pub classification: String,
    pub ownership_percent: Option<f64>,
    pub ownership_band: Option<OwnershipBand>,
}

impl Employment {
    pub fn employer_label(&self) -> &str {
        self.employer_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Unnamed employer")
    }

    pub fn end_or(&self, reference: NaiveDate) -> NaiveDate {
        self.end_date.unwrap_or(reference)
    }

    pub fn months_employed(&self, reference: NaiveDate) -> u32 {
        if let Some(months) = self.months_on_job {
            return months;
        }

        match self.start_date {
            Some(start) => months_between(start, self.end_or(reference)),
            None => 0,
        }
    }

    pub fn is_current(&self, reference: NaiveDate) -> bool {
        match self.status {
            Some(EmploymentStatus::Current) => true,
            Some(EmploymentStatus::Prior) => false,
            None => self.end_date.map_or(true, |end| end >= reference),
        }
    }

    pub fn is_s_corp(&self) -> bool {
        classifier::patterns().s_corp.is_match(&self.classification)
    }

    pub fn is_partnership(&self) -> bool {
        classifier::patterns().partnership.is_match(&self.classification)
    }

    pub fn is_1120(&self) -> bool {
        classifier::patterns().form_1120.is_match(&self.classification)
    }

    pub fn is_1065(&self) -> bool {
        classifier::patterns().form_1065.is_match(&self.classification)
    }

    pub fn has_entity_structure(&self) -> bool {
        self.is_s_corp() || self.is_partnership() || self.is_1120() || self.is_1065()
    }

    pub fn is_minority_owner(&self) -> bool {
        match self.ownership_percent {
            Some(percent) => percent < 25.0,
            None => self.ownership_band == Some(OwnershipBand::LessThan25Percent),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub income_type: String,
    pub monthly_amount: Option<f64>,
    pub employment_income: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Residence {
    pub months_at_residence: Option<u32>,
    /// Free-text basis such as `Own`, `Rent`, or `LivingRentFree`.
    pub residency_basis: String,
    pub current: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Citizenship {
    UsCitizen,
    PermanentResidentAlien,
    NonPermanentResidentAlien,
}

/// URLA section 5 answers; `None` means the question was not answered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declarations {
    pub citizenship: Option<Citizenship>,
    pub bankruptcy: Option<bool>,
    pub foreclosure: Option<bool>,
    pub outstanding_judgments: Option<bool>,
    pub alimony_obligation: Option<bool>,
    pub federal_debt_delinquency: Option<bool>,
    pub party_to_lawsuit: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub asset_type: String,
    pub holder_name: Option<String>,
    pub account_identifier: Option<String>,
    pub value: Option<f64>,
}

impl Asset {
    /// Holder name, then account id, then a positional fallback.
    pub fn label(&self, position: usize) -> String {
        non_blank(&self.holder_name)
            .or_else(|| non_blank(&self.account_identifier))
            .map(str::to_string)
            .unwrap_or_else(|| format!("Asset #{}", position + 1))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Liability {
    pub liability_type: String,
    pub holder_name: Option<String>,
    pub account_identifier: Option<String>,
    pub unpaid_balance: Option<f64>,
    pub monthly_payment: Option<f64>,
    pub paid_at_closing: bool,
}

impl Liability {
    pub fn label(&self) -> String {
        match (non_blank(&self.holder_name), non_blank(&self.account_identifier)) {
            (Some(holder), Some(account)) => format!("{holder} ({account})"),
            (Some(holder), None) => holder.to_string(),
            (None, Some(account)) => format!("account {account}"),
            (None, None) if !self.liability_type.is_empty() => self.liability_type.clone(),
            (None, None) => "creditor".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReoProperty {
    pub address: Option<String>,
    pub usage: String,
    pub disposition: Option<String>,
    pub market_value: Option<f64>,
}

impl ReoProperty {
    pub fn label(&self, position: usize) -> String {
        self.address
            .clone()
            .filter(|address| !address.trim().is_empty())
            .unwrap_or_else(|| format!("REO property #{}", position + 1))
    }

    pub fn is_investment(&self) -> bool {
        classifier::patterns().investment_usage.is_match(&self.usage)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

/// Whole calendar months from `start` to `end`, never negative.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    if end <= start {
        return 0;
    }

    let mut months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    if end.day() < start.day() {
        months -= 1;
    }
    months.max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn months_between_counts_whole_months_only() {
        assert_eq!(months_between(date(2023, 1, 15), date(2023, 3, 14)), 1);
        assert_eq!(months_between(date(2023, 1, 15), date(2023, 3, 15)), 2);
        assert_eq!(months_between(date(2021, 6, 1), date(2024, 6, 1)), 36);
        assert_eq!(months_between(date(2024, 6, 1), date(2021, 6, 1)), 0);
    }

    #[test]
    fn blank_holder_name_falls_back_to_account_identifier() {
        let asset = Asset {
            holder_name: Some("  ".to_string()),
            account_identifier: Some("SAV-2231".to_string()),
            ..Asset::default()
        };
        assert_eq!(asset.label(0), "SAV-2231");
        assert_eq!(Asset::default().label(2), "Asset #3");

        let liability = Liability {
            holder_name: Some(String::new()),
            account_identifier: Some("5521".to_string()),
            ..Liability::default()
        };
        assert_eq!(liability.label(), "account 5521");
    }

    #[test]
    fn open_ended_employment_runs_to_reference_date() {
        let employment = Employment {
            start_date: Some(date(2022, 2, 1)),
            ..Employment::default()
        };
        let reference = date(2024, 2, 1);

        assert_eq!(employment.months_employed(reference), 24);
        assert!(employment.is_current(reference));
    }

    #[test]
    fn explicit_months_on_job_wins_over_dates() {
        let employment = Employment {
            start_date: Some(date(2022, 2, 1)),
            months_on_job: Some(7),
            ..Employment::default()
        };

        assert_eq!(employment.months_employed(date(2024, 2, 1)), 7);
    }

    #[test]
    fn minority_ownership_reads_percent_before_band() {
        let mut employment = Employment {
            ownership_percent: Some(30.0),
            ownership_band: Some(OwnershipBand::LessThan25Percent),
            ..Employment::default()
        };
        assert!(!employment.is_minority_owner());

        employment.ownership_percent = None;
        assert!(employment.is_minority_owner());

        employment.ownership_band = None;
        assert!(!employment.is_minority_owner());
    }

    #[test]
    fn entity_flags_follow_classification_text() {
        let s_corp = Employment {
            classification: "S-Corp".to_string(),
            ..Employment::default()
        };
        assert!(s_corp.is_s_corp());
        assert!(!s_corp.is_1120());
        assert!(s_corp.has_entity_structure());

        let partnership = Employment {
            classification: "General Partnership (1065)".to_string(),
            ..Employment::default()
        };
        assert!(partnership.is_partnership());
        assert!(partnership.is_1065());

        let sole = Employment {
            classification: "Sole proprietor".to_string(),
            ..Employment::default()
        };
        assert!(!sole.has_entity_structure());
    }

    #[test]
    fn asset_label_prefers_holder_then_account() {
        let mut asset = Asset {
            holder_name: Some("First Federal".to_string()),
            account_identifier: Some("1234".to_string()),
            ..Asset::default()
        };
        assert_eq!(asset.label(0), "First Federal");

        asset.holder_name = None;
        assert_eq!(asset.label(0), "1234");

        asset.account_identifier = None;
        assert_eq!(asset.label(2), "Asset #3");
    }
}
