use chrono::NaiveDate;

use crate::workflows::checklist::domain::{
    Borrower, Citizenship, Deal, Declarations, Employment, Income, LoanContext, LoanPurpose,
    MortgageProgram, Occupancy, PropertyType,
};
use crate::workflows::checklist::requirements::{
    DocumentRequirement, RequirementBuckets, RequirementStatus,
};
use crate::workflows::checklist::RequirementEngine;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Fixed "today" for every rule test; tax years resolve to 2022-2023.
pub(super) fn reference_date() -> NaiveDate {
    date(2024, 6, 1)
}

pub(super) fn loan(program: MortgageProgram, purpose: LoanPurpose) -> LoanContext {
    LoanContext {
        purpose,
        program,
        property_type: PropertyType::SingleFamily,
        occupancy: Occupancy::PrimaryResidence,
        units: Some(1),
        ltv: Some(75.0),
        base_loan_amount: Some(300_000.0),
        has_hoa: false,
    }
}

pub(super) fn income(kind: &str) -> Income {
    Income {
        income_type: kind.to_string(),
        monthly_amount: Some(5_000.0),
        employment_income: true,
    }
}

pub(super) fn job(employer: &str, start: NaiveDate, end: Option<NaiveDate>) -> Employment {
    Employment {
        employer_name: Some(employer.to_string()),
        start_date: Some(start),
        end_date: end,
        ..Employment::default()
    }
}

pub(super) fn business(
    employer: &str,
    classification: &str,
    start: NaiveDate,
    percent: f64,
) -> Employment {
    Employment {
        self_employed: true,
        classification: classification.to_string(),
        ownership_percent: Some(percent),
        ..job(employer, start, None)
    }
}

pub(super) fn citizen() -> Declarations {
    Declarations {
        citizenship: Some(Citizenship::UsCitizen),
        bankruptcy: Some(false),
        foreclosure: Some(false),
        outstanding_judgments: Some(false),
        alimony_obligation: Some(false),
        federal_debt_delinquency: Some(false),
        party_to_lawsuit: Some(false),
    }
}

/// Salaried borrower with a continuous four-year job and no declarations.
pub(super) fn salaried_borrower(name: &str) -> Borrower {
    Borrower {
        index: 0,
        name: name.to_string(),
        incomes: vec![income("Base")],
        employments: vec![job("Acme Logistics", date(2020, 3, 1), None)],
        residences: Vec::new(),
        declarations: citizen(),
    }
}

pub(super) fn deal(loan: LoanContext, borrowers: Vec<Borrower>) -> Deal {
    Deal {
        loan,
        borrowers,
        ..Deal::default()
    }
}

pub(super) fn evaluate(deal: &Deal) -> RequirementBuckets {
    RequirementEngine::new(reference_date()).evaluate(deal)
}

pub(super) fn find<'a>(
    items: &'a [DocumentRequirement],
    name: &str,
) -> Option<&'a DocumentRequirement> {
    items.iter().find(|item| item.name == name)
}

pub(super) fn has(items: &[DocumentRequirement], name: &str) -> bool {
    find(items, name).is_some()
}

pub(super) fn has_prefix(items: &[DocumentRequirement], prefix: &str) -> bool {
    items.iter().any(|item| item.name.starts_with(prefix))
}

pub(super) fn status_of(items: &[DocumentRequirement], name: &str) -> RequirementStatus {
    find(items, name)
        .unwrap_or_else(|| panic!("missing requirement {name:?}"))
        .status
}
