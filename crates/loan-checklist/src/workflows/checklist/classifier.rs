//! Income and employment classification over free-text MISMO type fields.
//!
//! Every predicate is evaluated independently: one borrower can be self-employed,
//! receive alimony, and draw W-2 wages at the same time.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::domain::Borrower;

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

pub(crate) struct Patterns {
    pub(crate) self_employed: Regex,
    pub(crate) alimony: Regex,
    pub(crate) base_keywords: Regex,
    pub(crate) retired: Regex,
    pub(crate) retirement_income: Regex,
    pub(crate) variable_income: Regex,
    pub(crate) military: Regex,
    pub(crate) active_duty: Regex,
    pub(crate) social_security: Regex,
    pub(crate) on_behalf_of_another: Regex,
    pub(crate) pension_or_disability: Regex,
    pub(crate) retirement_distribution: Regex,
    pub(crate) s_corp: Regex,
    pub(crate) partnership: Regex,
    pub(crate) form_1120: Regex,
    pub(crate) form_1065: Regex,
    pub(crate) investment_usage: Regex,
    pub(crate) rent: Regex,
    pub(crate) gift: Regex,
    other_income: Vec<(Regex, OtherIncomeCategory)>,
}

pub(crate) fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| {
        // Ordered: the first matching row decides the category for an income record.
        const OTHER_INCOME_RULES: &[(&str, OtherIncomeCategory)] = &[
            (r"(?i)capital\s*gain", OtherIncomeCategory::CapitalGains),
            (r"(?i)dividend|interest", OtherIncomeCategory::DividendInterest),
            (r"(?i)foster", OtherIncomeCategory::FosterCare),
            (r"(?i)foreign", OtherIncomeCategory::Foreign),
            (r"(?i)unemployment", OtherIncomeCategory::Unemployment),
            (r"(?i)royalt", OtherIncomeCategory::Royalties),
            (r"(?i)trust", OtherIncomeCategory::Trust),
            (r"(?i)notes?\s*receivable", OtherIncomeCategory::NoteReceivable),
            (r"(?i)boarder", OtherIncomeCategory::BoarderIncome),
        ];

        Patterns {
            self_employed: compile(r"(?i)self|business|partnership|s-?corp|schedule\s*c|1099"),
            alimony: compile(r"(?i)alimony|child\s*support"),
            base_keywords: compile(r"(?i)military|contract\s*basis|wages"),
            retired: compile(r"(?i)retired"),
            retirement_income: compile(r"(?i)social\s*security|pension|retirement|disability"),
            variable_income: compile(r"(?i)bonus|tips|overtime|commission|part[\s-]*time"),
            military: compile(r"(?i)military"),
            active_duty: compile(r"(?i)active[\s-]*duty|armed\s*forces|military"),
            social_security: compile(r"(?i)social\s*security"),
            on_behalf_of_another: compile(r"(?i)behalf|survivor|dependent|minor"),
            pension_or_disability: compile(r"(?i)pension|disability"),
            retirement_distribution: compile(
                r"(?i)retirement|\bira\b|401\s*\(?k|403\s*\(?b|annuity|distribution",
            ),
            s_corp: compile(r"(?i)\bs[\s-]?corp|1120[\s-]?s\b"),
            partnership: compile(r"(?i)partnership|\b1065\b"),
            form_1120: compile(r"(?i)\bc[\s-]?corp|\b1120\b"),
            form_1065: compile(r"(?i)\b1065\b"),
            investment_usage: compile(r"(?i)invest|rental"),
            rent: compile(r"(?i)rent"),
            gift: compile(r"(?i)gift"),
            other_income: OTHER_INCOME_RULES
                .iter()
                .map(|(pattern, category)| (compile(pattern), *category))
                .collect(),
        }
    })
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static classifier pattern compiles")
}

/// Secondary income categories, each backed by a fixed two-document pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtherIncomeCategory {
    CapitalGains,
    DividendInterest,
    FosterCare,
    Foreign,
    Unemployment,
    Royalties,
    Trust,
    NoteReceivable,
    BoarderIncome,
}

impl OtherIncomeCategory {
    pub const fn label(self) -> &'static str {
        match self {
            OtherIncomeCategory::CapitalGains => "Capital gains",
            OtherIncomeCategory::DividendInterest => "Dividend/interest",
            OtherIncomeCategory::FosterCare => "Foster care",
            OtherIncomeCategory::Foreign => "Foreign",
            OtherIncomeCategory::Unemployment => "Unemployment",
            OtherIncomeCategory::Royalties => "Royalty",
            OtherIncomeCategory::Trust => "Trust",
            OtherIncomeCategory::NoteReceivable => "Note receivable",
            OtherIncomeCategory::BoarderIncome => "Boarder",
        }
    }

    /// Schedule-style document first, supporting statement second.
    pub const fn documents(self) -> [&'static str; 2] {
        match self {
            OtherIncomeCategory::CapitalGains => [
                "Schedule D with personal tax returns (2 years)",
                "Brokerage statements showing assets to sustain gains",
            ],
            OtherIncomeCategory::DividendInterest => [
                "Schedule B with personal tax returns (2 years)",
                "Account statements for interest/dividend-bearing assets",
            ],
            OtherIncomeCategory::FosterCare => [
                "Foster care agency verification letter",
                "Bank statements showing 2-year receipt of foster care income",
            ],
            OtherIncomeCategory::Foreign => [
                "Foreign income tax returns (2 years)",
                "Foreign income translation and currency conversion",
            ],
            OtherIncomeCategory::Unemployment => [
                "Tax returns showing 2-year seasonal unemployment history",
                "Unemployment benefit statements",
            ],
            OtherIncomeCategory::Royalties => [
                "Schedule E showing royalty income",
                "Royalty contract or agreement",
            ],
            OtherIncomeCategory::Trust => [
                "Trust agreement",
                "Trustee statement confirming distributions and continuance",
            ],
            OtherIncomeCategory::NoteReceivable => [
                "Copy of note receivable",
                "Evidence of 12 months receipt of note payments",
            ],
            OtherIncomeCategory::BoarderIncome => [
                "Evidence boarder shared the residence for 12 months",
                "Proof of boarder rent payments",
            ],
        }
    }
}

/// Per-borrower classification result consumed by the income rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeProfile {
    pub self_employed: bool,
    pub alimony: bool,
    pub base_income: bool,
    pub retired: bool,
    pub variable_income: bool,
    pub military_income: bool,
    pub other_income: Vec<OtherIncomeCategory>,
}

pub fn classify(borrower: &Borrower) -> IncomeProfile {
    IncomeProfile {
        self_employed: is_self_employed(borrower),
        alimony: has_alimony(borrower),
        base_income: has_base_income(borrower),
        retired: is_retired(borrower),
        variable_income: has_variable_income(borrower),
        military_income: has_military_income(borrower),
        other_income: other_income_categories(borrower),
    }
}

pub fn is_self_employed(borrower: &Borrower) -> bool {
    borrower.employments.iter().any(|job| job.self_employed)
        || any_income_matches(borrower, &patterns().self_employed)
}

pub fn has_alimony(borrower: &Borrower) -> bool {
    any_income_matches(borrower, &patterns().alimony)
}

pub fn has_base_income(borrower: &Borrower) -> bool {
    borrower.incomes.iter().any(|income| {
        let kind = income.income_type.trim();
        ["Base", "Hourly", "Salary"]
            .iter()
            .any(|base| kind.eq_ignore_ascii_case(base))
            || patterns().base_keywords.is_match(kind)
    })
}

pub fn is_retired(borrower: &Borrower) -> bool {
    let patterns = patterns();
    borrower
        .employments
        .iter()
        .any(|job| patterns.retired.is_match(&job.classification))
        || (borrower.employments.is_empty()
            && any_income_matches(borrower, &patterns.retirement_income))
}

pub fn has_variable_income(borrower: &Borrower) -> bool {
    any_income_matches(borrower, &patterns().variable_income)
}

pub fn has_military_income(borrower: &Borrower) -> bool {
    any_income_matches(borrower, &patterns().military)
}

/// Distinct secondary categories in table order. Unmatched records add nothing.
pub fn other_income_categories(borrower: &Borrower) -> Vec<OtherIncomeCategory> {
    let mut found: Vec<OtherIncomeCategory> = borrower
        .incomes
        .iter()
        .filter_map(|income| categorize_other_income(&income.income_type))
        .collect();
    found.sort();
    found.dedup();
    found
}

pub fn categorize_other_income(income_type: &str) -> Option<OtherIncomeCategory> {
    patterns()
        .other_income
        .iter()
        .find(|(pattern, _)| pattern.is_match(income_type))
        .map(|(_, category)| *category)
}

fn any_income_matches(borrower: &Borrower, pattern: &Regex) -> bool {
    borrower
        .incomes
        .iter()
        .any(|income| pattern.is_match(&income.income_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::checklist::domain::{Employment, Income};

    fn borrower_with_incomes(types: &[&str]) -> Borrower {
        Borrower {
            name: "Pat Example".to_string(),
            incomes: types
                .iter()
                .map(|kind| Income {
                    income_type: kind.to_string(),
                    monthly_amount: Some(1000.0),
                    employment_income: false,
                })
                .collect(),
            ..Borrower::default()
        }
    }

    #[test]
    fn self_employment_detected_from_flag_or_income_type() {
        let mut borrower = borrower_with_incomes(&["Base"]);
        assert!(!is_self_employed(&borrower));

        borrower.employments.push(Employment {
            self_employed: true,
            ..Employment::default()
        });
        assert!(is_self_employed(&borrower));

        let by_income = borrower_with_incomes(&["Schedule C net profit"]);
        assert!(is_self_employed(&by_income));
        assert!(is_self_employed(&borrower_with_incomes(&["1099 contractor"])));
    }

    #[test]
    fn base_income_accepts_exact_types_and_keywords() {
        assert!(has_base_income(&borrower_with_incomes(&["salary"])));
        assert!(has_base_income(&borrower_with_incomes(&["MilitaryBasePay"])));
        assert!(has_base_income(&borrower_with_incomes(&["ContractBasis"])));
        assert!(!has_base_income(&borrower_with_incomes(&["Baseline bonus"])));
    }

    #[test]
    fn retirement_requires_no_employment_unless_classified_retired() {
        let pension_only = borrower_with_incomes(&["Pension"]);
        assert!(is_retired(&pension_only));

        let mut still_working = borrower_with_incomes(&["Pension"]);
        still_working.employments.push(Employment::default());
        assert!(!is_retired(&still_working));

        still_working.employments[0].classification = "Retired".to_string();
        assert!(is_retired(&still_working));
    }

    #[test]
    fn predicates_are_independent() {
        let mut borrower = borrower_with_incomes(&["Alimony", "Base", "DividendsInterest"]);
        borrower.employments.push(Employment {
            self_employed: true,
            ..Employment::default()
        });

        let profile = classify(&borrower);
        assert!(profile.self_employed);
        assert!(profile.alimony);
        assert!(profile.base_income);
        assert_eq!(
            profile.other_income,
            vec![OtherIncomeCategory::DividendInterest]
        );
    }

    #[test]
    fn other_income_uses_first_matching_row_and_ignores_unknown_labels() {
        assert_eq!(
            categorize_other_income("CapitalGains"),
            Some(OtherIncomeCategory::CapitalGains)
        );
        assert_eq!(
            categorize_other_income("NotesReceivableInstallment"),
            Some(OtherIncomeCategory::NoteReceivable)
        );
        assert_eq!(
            categorize_other_income("TrustIncome"),
            Some(OtherIncomeCategory::Trust)
        );
        assert_eq!(categorize_other_income("Lottery winnings"), None);

        let borrower = borrower_with_incomes(&["BoarderIncome", "Royalties", "Boarder"]);
        assert_eq!(
            other_income_categories(&borrower),
            vec![
                OtherIncomeCategory::Royalties,
                OtherIncomeCategory::BoarderIncome
            ]
        );
    }

    #[test]
    fn variable_and_military_income_flags() {
        let borrower = borrower_with_incomes(&["Overtime", "MilitaryBasePay"]);
        let profile = classify(&borrower);
        assert!(profile.variable_income);
        assert!(profile.military_income);
        assert!(has_variable_income(&borrower_with_incomes(&["Part-Time"])));
    }
}
