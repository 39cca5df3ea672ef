use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::classifier::{has_variable_income, is_self_employed, patterns};
use super::coverage::continuity_gaps;
use super::domain::{
    Citizenship, Deal, LoanPurpose, MortgageProgram, Occupancy, PropertyType,
};

/// Loan-level facts and complexity signals shown above the checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub program: MortgageProgram,
    pub purpose: LoanPurpose,
    pub occupancy: Occupancy,
    pub property_type: PropertyType,
    pub units: u32,
    pub ltv: Option<f64>,
    pub borrower_count: usize,
    pub flags: ComplexityFlags,
    pub tier: ComplexityTier,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityFlags {
    pub self_employed: bool,
    pub variable_income: bool,
    pub non_citizen: bool,
    pub derogatory_credit: bool,
    pub employment_gaps: bool,
    pub gift_funds: bool,
    pub investment_reo: bool,
}

impl ComplexityFlags {
    pub fn count(&self) -> usize {
        [
            self.self_employed,
            self.variable_income,
            self.non_citizen,
            self.derogatory_credit,
            self.employment_gaps,
            self.gift_funds,
            self.investment_reo,
        ]
        .into_iter()
        .filter(|flag| *flag)
        .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityTier {
    Standard,
    Elevated,
    Complex,
}

impl ComplexityTier {
    pub fn from_flag_count(count: usize) -> Self {
        match count {
            0 => Self::Standard,
            1 | 2 => Self::Elevated,
            _ => Self::Complex,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ComplexityTier::Standard => "standard",
            ComplexityTier::Elevated => "elevated",
            ComplexityTier::Complex => "complex",
        }
    }
}

impl LoanSummary {
    pub fn from_deal(deal: &Deal, reference_date: NaiveDate) -> Self {
        let borrowers = &deal.borrowers;
        let flags = ComplexityFlags {
            self_employed: borrowers.iter().any(is_self_employed),
            variable_income: borrowers.iter().any(has_variable_income),
            non_citizen: borrowers.iter().any(|borrower| {
                matches!(
                    borrower.declarations.citizenship,
                    Some(Citizenship::PermanentResidentAlien)
                        | Some(Citizenship::NonPermanentResidentAlien)
                )
            }),
            derogatory_credit: borrowers.iter().any(|borrower| {
                let declarations = &borrower.declarations;
                [
                    declarations.bankruptcy,
                    declarations.foreclosure,
                    declarations.outstanding_judgments,
                ]
                .contains(&Some(true))
            }),
            employment_gaps: borrowers.iter().any(|borrower| {
                !continuity_gaps(&borrower.employments, reference_date).is_empty()
            }),
            gift_funds: deal
                .assets
                .iter()
                .any(|asset| patterns().gift.is_match(&asset.asset_type)),
            investment_reo: deal.reo_properties.iter().any(|reo| reo.is_investment()),
        };

        Self {
            program: deal.loan.program,
            purpose: deal.loan.purpose,
            occupancy: deal.loan.occupancy,
            property_type: deal.loan.property_type,
            units: deal.loan.unit_count(),
            ltv: deal.loan.ltv,
            borrower_count: borrowers.len(),
            tier: ComplexityTier::from_flag_count(flags.count()),
            flags,
        }
    }
}
